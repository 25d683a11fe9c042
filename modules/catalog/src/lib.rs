//! Product catalog remote: tenant-scoped product listing.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use composekit::{
    Component, ContainerError, Factory, InitResult, ModuleExports, RemoteBundle, RemoteContainer,
    SharedScope,
};
use tenancy::{TenantProvider, TENANCY_DEP};

pub const REMOTE_NAME: &str = "catalog";

/// Product list view. Page size follows the tenant's settings; the variants
/// column only appears for tenants with the advanced catalog feature.
pub struct CatalogApp {
    tenants: Arc<TenantProvider>,
}

impl Component for CatalogApp {
    fn render(&self) -> String {
        let tenant = self.tenants.current();
        let products = storedata::products_for(&tenant.id);
        let page: Vec<_> = products.iter().take(tenant.settings.page_size).collect();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Product Catalog - {} ({} of {} items)",
            tenant.name,
            page.len(),
            products.len()
        );
        for product in page {
            if tenant.features.advanced_catalog {
                let _ = writeln!(
                    out,
                    "  {:<28} {:>8} {}  [{}]",
                    product.name,
                    format!("Rs.{}", product.price),
                    product.category,
                    product.variants.join("/")
                );
            } else {
                let _ = writeln!(
                    out,
                    "  {:<28} {:>8} {}",
                    product.name,
                    format!("Rs.{}", product.price),
                    product.category
                );
            }
        }
        out
    }
}

/// Runtime container for the catalog bundle.
#[derive(Default)]
pub struct CatalogContainer {
    tenants: OnceCell<Arc<TenantProvider>>,
}

#[async_trait]
impl RemoteContainer for CatalogContainer {
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
            tracing::debug!("catalog container ready");
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
                    ModuleExports::with_default(Arc::new(CatalogApp { tenants }))
                }))
            }
            other => Err(ContainerError::ModuleNotFound(other.to_string())),
        }
    }
}

composekit::inventory::submit! {
    RemoteBundle {
        name: REMOTE_NAME,
        default_delay_ms: 200,
        build: || Arc::new(CatalogContainer::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tenancy::{builtin_tenants, MemoryStyleTarget, DEFAULT_TENANT, TENANCY_VERSION};

    async fn component_for_tenant(tenant_id: &str) -> (Arc<dyn Component>, Arc<TenantProvider>) {
        let provider = Arc::new(
            TenantProvider::new(
                builtin_tenants(),
                DEFAULT_TENANT,
                Arc::new(MemoryStyleTarget::new()),
                Duration::ZERO,
            )
            .unwrap(),
        );
        provider.load(tenant_id).await.unwrap();

        let scope = Arc::new(SharedScope::new());
        scope
            .provide(TENANCY_DEP, TENANCY_VERSION, provider.clone())
            .unwrap();

        let container = CatalogContainer::default();
        match container.init(scope) {
            InitResult::Done(r) => r.unwrap(),
            InitResult::Deferred(fut) => fut.await.unwrap(),
        }
        let component = container
            .get("./App")
            .await
            .unwrap()
            .invoke()
            .into_component();
        (component, provider)
    }

    #[tokio::test]
    async fn lists_only_the_tenants_products() {
        let (component, _) = component_for_tenant("book-corner").await;
        let rendered = component.render();
        assert!(rendered.contains("Ramayana"));
        assert!(!rendered.contains("OnePlus"));
    }

    #[tokio::test]
    async fn variants_column_is_feature_gated() {
        // book-corner has advanced_catalog disabled
        let (basic, _) = component_for_tenant("book-corner").await;
        assert!(!basic.render().contains("Paperback/Hardcover"));

        // electronics-hub has it enabled
        let (advanced, _) = component_for_tenant("electronics-hub").await;
        assert!(advanced.render().contains("128GB/256GB/512GB"));
    }
}
