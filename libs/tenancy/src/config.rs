use serde::{Deserialize, Serialize};

/// Theme colors applied to the process-wide style target on tenant switch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// Feature flags gating which modules a tenant is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Features {
    pub inventory: bool,
    pub analytics: bool,
    pub advanced_catalog: bool,
    pub multi_currency: bool,
}

impl Features {
    /// Name-based lookup used by feature-gated navigation. Unknown names are
    /// treated as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            "inventory" => self.inventory,
            "analytics" => self.analytics,
            "advanced_catalog" => self.advanced_catalog,
            "multi_currency" => self.multi_currency,
            _ => false,
        }
    }

    pub fn enabled_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.inventory {
            names.push("inventory");
        }
        if self.analytics {
            names.push("analytics");
        }
        if self.advanced_catalog {
            names.push("advanced_catalog");
        }
        if self.multi_currency {
            names.push("multi_currency");
        }
        names
    }
}

/// Storefront branding shown in the shell header and module breadcrumbs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Branding {
    pub logo: String,
    pub tagline: String,
    pub primary_color: String,
    pub secondary_color: String,
}

/// Locale / presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSettings {
    pub currency: String,
    pub language: String,
    pub page_size: usize,
}

/// A tenant's full configuration record.
///
/// Owned by the process-wide provider; replaced wholesale on tenant switch or
/// configuration save, never partially mutated outside
/// [`TenantProvider::update`](crate::provider::TenantProvider::update).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TenantConfig {
    pub id: String,
    pub name: String,
    pub theme: Theme,
    pub features: Features,
    pub branding: Branding,
    pub settings: StoreSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_lookup_by_name() {
        let features = Features {
            inventory: true,
            analytics: false,
            advanced_catalog: true,
            multi_currency: false,
        };
        assert!(features.is_enabled("inventory"));
        assert!(!features.is_enabled("analytics"));
        assert!(!features.is_enabled("wishlist"));
        assert_eq!(features.enabled_names(), vec!["inventory", "advanced_catalog"]);
    }
}
