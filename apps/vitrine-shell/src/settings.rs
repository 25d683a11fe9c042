//! Local tenant configuration screen. This is the one module the shell serves
//! itself instead of loading from a remote.

use std::fmt::Write as _;
use std::sync::Arc;

use composekit::Component;
use tenancy::{TenantConfig, TenantProvider};

/// Tenant configuration editor backed directly by the tenant provider.
pub struct SettingsApp {
    tenants: Arc<TenantProvider>,
}

impl SettingsApp {
    pub fn new(tenants: Arc<TenantProvider>) -> Self {
        Self { tenants }
    }

    /// Save a full configuration draft: the record is replaced wholesale
    /// through the provider (which re-applies the theme when the draft
    /// targets the active tenant).
    pub fn save(&self, draft: TenantConfig) {
        self.tenants.update(draft);
    }
}

impl Component for SettingsApp {
    fn render(&self) -> String {
        let tenant = self.tenants.current();
        let mut out = String::new();

        let _ = writeln!(out, "Tenant Configuration - {}", tenant.name);
        let _ = writeln!(out, "-- branding --");
        let _ = writeln!(out, "  logo:    {}", tenant.branding.logo);
        let _ = writeln!(out, "  tagline: {}", tenant.branding.tagline);
        let _ = writeln!(
            out,
            "  colors:  {} / {}",
            tenant.branding.primary_color, tenant.branding.secondary_color
        );

        let _ = writeln!(out, "-- features --");
        let _ = writeln!(out, "  inventory:        {}", tenant.features.inventory);
        let _ = writeln!(out, "  analytics:        {}", tenant.features.analytics);
        let _ = writeln!(out, "  advanced_catalog: {}", tenant.features.advanced_catalog);
        let _ = writeln!(out, "  multi_currency:   {}", tenant.features.multi_currency);

        let _ = writeln!(out, "-- settings --");
        let _ = writeln!(
            out,
            "  currency {} | language {} | page size {}",
            tenant.settings.currency, tenant.settings.language, tenant.settings.page_size
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tenancy::{builtin_tenants, MemoryStyleTarget, StyleTarget, DEFAULT_TENANT};

    #[test]
    fn save_replaces_the_record_wholesale() {
        let style = Arc::new(MemoryStyleTarget::new());
        let tenants = Arc::new(
            TenantProvider::new(builtin_tenants(), DEFAULT_TENANT, style.clone(), Duration::ZERO)
                .unwrap(),
        );
        let app = SettingsApp::new(tenants.clone());

        let mut draft = (*tenants.current()).clone();
        draft.branding.logo = "TechBazar Prime".to_string();
        draft.theme.primary = "#123456".to_string();
        app.save(draft);

        assert!(app.render().contains("TechBazar Prime"));
        assert_eq!(
            style.get_variable("--tenant-primary").as_deref(),
            Some("#123456")
        );
    }
}
