//! The closed set of module identifiers the shell can mount.

use thiserror::Error;

/// Fixed module registry. Settings is served locally by the shell; the rest
/// are remote bundles resolved through the container registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleId {
    Storefront,
    Catalog,
    Orders,
    Analytics,
    Settings,
}

#[derive(Debug, Error)]
#[error("unknown module '{0}'")]
pub struct UnknownModule(pub String);

impl ModuleId {
    pub const ALL: [ModuleId; 5] = [
        ModuleId::Storefront,
        ModuleId::Catalog,
        ModuleId::Orders,
        ModuleId::Analytics,
        ModuleId::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleId::Storefront => "storefront",
            ModuleId::Catalog => "catalog",
            ModuleId::Orders => "orders",
            ModuleId::Analytics => "analytics",
            ModuleId::Settings => "settings",
        }
    }

    /// Human-readable navigation label.
    pub fn label(self) -> &'static str {
        match self {
            ModuleId::Storefront => "Storefront Builder",
            ModuleId::Catalog => "Product Catalog",
            ModuleId::Orders => "Order Management",
            ModuleId::Analytics => "Analytics Hub",
            ModuleId::Settings => "Configuration",
        }
    }

    /// Registry name of the backing remote; `None` for local modules.
    pub fn remote_name(self) -> Option<&'static str> {
        match self {
            ModuleId::Settings => None,
            other => Some(other.as_str()),
        }
    }

    /// Tenant feature flag required before the module is offered.
    pub fn required_feature(self) -> Option<&'static str> {
        match self {
            ModuleId::Analytics => Some("analytics"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModuleId {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_every_id() {
        for id in ModuleId::ALL {
            assert_eq!(id.as_str().parse::<ModuleId>().unwrap(), id);
        }
        assert!("checkout".parse::<ModuleId>().is_err());
    }

    #[test]
    fn settings_is_the_only_local_module() {
        let locals: Vec<_> = ModuleId::ALL
            .into_iter()
            .filter(|m| m.remote_name().is_none())
            .collect();
        assert_eq!(locals, vec![ModuleId::Settings]);
    }

    #[test]
    fn only_analytics_is_feature_gated() {
        for id in ModuleId::ALL {
            match id {
                ModuleId::Analytics => assert_eq!(id.required_feature(), Some("analytics")),
                other => assert_eq!(other.required_feature(), None),
            }
        }
    }
}
