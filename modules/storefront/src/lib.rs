//! Storefront builder remote: renders the tenant's branded landing page.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use composekit::{
    Component, ContainerError, Factory, InitResult, ModuleExports, RemoteBundle, RemoteContainer,
    SharedScope,
};
use tenancy::{TenantProvider, TENANCY_DEP};

pub const REMOTE_NAME: &str = "storefront";

/// The default-exported storefront view.
pub struct StorefrontApp {
    tenants: Arc<TenantProvider>,
}

impl Component for StorefrontApp {
    fn render(&self) -> String {
        let tenant = self.tenants.current();
        let mut out = String::new();

        let _ = writeln!(out, "=== {} ===", tenant.branding.logo);
        let _ = writeln!(out, "{}", tenant.branding.tagline);
        let _ = writeln!(
            out,
            "theme: primary {} / secondary {}",
            tenant.theme.primary, tenant.theme.secondary
        );

        let badges = tenant.features.enabled_names().join(", ");
        let _ = writeln!(out, "features: [{badges}]");

        let _ = writeln!(out, "-- featured --");
        for product in storedata::products_for(&tenant.id).into_iter().take(3) {
            let _ = writeln!(out, "  {} (Rs.{})", product.name, product.price);
        }
        out
    }
}

/// Runtime container for the storefront bundle. `init` negotiates the shared
/// tenant provider exactly once; repeated calls reuse the first resolution.
#[derive(Default)]
pub struct StorefrontContainer {
    tenants: OnceCell<Arc<TenantProvider>>,
}

#[async_trait]
impl RemoteContainer for StorefrontContainer {
    fn name(&self) -> &str {
        REMOTE_NAME
    }

    fn init(&self, scope: Arc<SharedScope>) -> InitResult {
        let result = self
            .tenants
            .get_or_try_init(|| scope.resolve::<TenantProvider>(TENANCY_DEP))
            .map(|_| ())
            .map_err(ContainerError::from);
        if result.is_ok() {
            tracing::debug!("storefront container ready");
        }
        InitResult::Done(result)
    }

    async fn get(&self, module_path: &str) -> Result<Factory, ContainerError> {
        match module_path {
            "./App" => {
                let tenants = self.tenants.get().cloned().ok_or_else(|| {
                    ContainerError::Init(anyhow::anyhow!("container used before init"))
                })?;
                Ok(Factory::new(move || {
                    ModuleExports::with_default(Arc::new(StorefrontApp { tenants }))
                }))
            }
            other => Err(ContainerError::ModuleNotFound(other.to_string())),
        }
    }
}

composekit::inventory::submit! {
    RemoteBundle {
        name: REMOTE_NAME,
        default_delay_ms: 150,
        build: || Arc::new(StorefrontContainer::default()),
    }
}
