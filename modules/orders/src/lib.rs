//! Order management remote: a board of orders grouped by status.
//!
//! Unlike the storefront/catalog bundles this container has an asynchronous
//! boot path, so `init` returns a deferred completion the loader awaits.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use composekit::{
    Component, ContainerError, Factory, InitResult, ModuleExports, RemoteBundle, RemoteContainer,
    SharedScope,
};
use storedata::OrderStatus;
use tenancy::{TenantProvider, TENANCY_DEP};

pub const REMOTE_NAME: &str = "orders";

const BOARD_COLUMNS: [OrderStatus; 3] = [
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

/// The order board view.
pub struct OrdersBoard {
    tenants: Arc<TenantProvider>,
}

impl Component for OrdersBoard {
    fn render(&self) -> String {
        let tenant = self.tenants.current();
        let orders = storedata::orders_for(&tenant.id);

        let mut out = String::new();
        let _ = writeln!(out, "Order Board - {}", tenant.name);
        for status in BOARD_COLUMNS {
            let column: Vec<_> = orders.iter().filter(|o| o.status == status).collect();
            let _ = writeln!(out, "[{}] ({})", status.label(), column.len());
            for order in column {
                let product = storedata::product_by_id(order.product_id)
                    .map(|p| p.name)
                    .unwrap_or("unknown product");
                let _ = writeln!(
                    out,
                    "  {} - {} - {} - Rs.{} ({})",
                    order.id, product, order.customer, order.value, order.date
                );
            }
        }
        out
    }
}

/// Runtime container for the orders bundle with an async initializer.
#[derive(Default)]
pub struct OrdersContainer {
    tenants: Arc<OnceCell<Arc<TenantProvider>>>,
}

#[async_trait]
impl RemoteContainer for OrdersContainer {
    fn name(&self) -> &str {
        REMOTE_NAME
    }

    fn init(&self, scope: Arc<SharedScope>) -> InitResult {
        let cell = self.tenants.clone();
        InitResult::Deferred(Box::pin(async move {
            // Async boot: hand control back once before negotiating.
            tokio::task::yield_now().await;
            cell.get_or_try_init(|| scope.resolve::<TenantProvider>(TENANCY_DEP))
                .map(|_| tracing::debug!("orders container ready"))
                .map_err(ContainerError::from)
        }))
    }

    async fn get(&self, module_path: &str) -> Result<Factory, ContainerError> {
        match module_path {
            "./App" => {
                let tenants = self.tenants.get().cloned().ok_or_else(|| {
                    ContainerError::Init(anyhow::anyhow!("container used before init"))
                })?;
                Ok(Factory::new(move || {
                    ModuleExports::with_default(Arc::new(OrdersBoard { tenants }))
                }))
            }
            other => Err(ContainerError::ModuleNotFound(other.to_string())),
        }
    }
}

composekit::inventory::submit! {
    RemoteBundle {
        name: REMOTE_NAME,
        default_delay_ms: 250,
        build: || Arc::new(OrdersContainer::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composekit::{load_remote, GlobalRegistry, LoadOptions};
    use std::time::Duration;
    use tenancy::{builtin_tenants, MemoryStyleTarget, DEFAULT_TENANT, TENANCY_VERSION};

    #[tokio::test]
    async fn full_load_through_the_loader_renders_the_board() {
        let provider = Arc::new(
            TenantProvider::new(
                builtin_tenants(),
                DEFAULT_TENANT,
                Arc::new(MemoryStyleTarget::new()),
                Duration::ZERO,
            )
            .unwrap(),
        );
        let scope = Arc::new(SharedScope::new());
        scope
            .provide(TENANCY_DEP, TENANCY_VERSION, provider)
            .unwrap();

        let registry = GlobalRegistry::new();
        registry.register(Arc::new(OrdersContainer::default()));

        let module = load_remote(&registry, scope, REMOTE_NAME, "./App", &LoadOptions::default())
            .await
            .unwrap();
        let rendered = module.component.render();

        assert!(rendered.contains("Order Board"));
        assert!(rendered.contains("[Processing]"));
        assert!(rendered.contains("Rahul Sharma"));
    }

    #[tokio::test]
    async fn init_is_required_before_get() {
        let container = OrdersContainer::default();
        let err = container.get("./App").await.unwrap_err();
        assert!(matches!(err, ContainerError::Init(_)));
    }
}
