//! Analytics hub remote: revenue and customer insight summaries.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use composekit::{
    Component, ContainerError, Factory, InitResult, ModuleExports, RemoteBundle, RemoteContainer,
    SharedScope,
};
use tenancy::{TenantProvider, TENANCY_DEP};

pub const REMOTE_NAME: &str = "analytics";

/// The analytics dashboard view.
pub struct AnalyticsHub {
    tenants: Arc<TenantProvider>,
}

impl Component for AnalyticsHub {
    fn render(&self) -> String {
        let tenant = self.tenants.current();
        let snapshot = storedata::analytics();

        let mut out = String::new();
        let _ = writeln!(out, "Analytics Hub - {}", tenant.name);
        let _ = writeln!(
            out,
            "total sales: Rs.{}  active customers: {}  A/B winner: {}",
            snapshot.total_sales, snapshot.active_customers, snapshot.ab_test_winner
        );

        let peak = snapshot
            .monthly_revenue
            .iter()
            .map(|(_, v)| *v)
            .max()
            .unwrap_or(0)
            .max(1);
        let _ = writeln!(out, "-- monthly revenue --");
        for (month, revenue) in snapshot.monthly_revenue {
            let bar = "#".repeat(((revenue * 24) / peak) as usize);
            let _ = writeln!(out, "  {month} {bar} {revenue}");
        }

        let _ = writeln!(out, "-- insights --");
        for insight in snapshot.customer_insights {
            let _ = writeln!(out, "  * {insight}");
        }
        out
    }
}

/// Runtime container for the analytics bundle; boots asynchronously like the
/// orders bundle.
#[derive(Default)]
pub struct AnalyticsContainer {
    tenants: Arc<OnceCell<Arc<TenantProvider>>>,
}

#[async_trait]
impl RemoteContainer for AnalyticsContainer {
    fn name(&self) -> &str {
        REMOTE_NAME
    }

    fn init(&self, scope: Arc<SharedScope>) -> InitResult {
        let cell = self.tenants.clone();
        InitResult::Deferred(Box::pin(async move {
            tokio::task::yield_now().await;
            cell.get_or_try_init(|| scope.resolve::<TenantProvider>(TENANCY_DEP))
                .map(|_| tracing::debug!("analytics container ready"))
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
                    ModuleExports::with_default(Arc::new(AnalyticsHub { tenants }))
                }))
            }
            other => Err(ContainerError::ModuleNotFound(other.to_string())),
        }
    }
}

composekit::inventory::submit! {
    RemoteBundle {
        name: REMOTE_NAME,
        default_delay_ms: 300,
        build: || Arc::new(AnalyticsContainer::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tenancy::{builtin_tenants, MemoryStyleTarget, DEFAULT_TENANT, TENANCY_VERSION};

    #[tokio::test]
    async fn renders_revenue_and_insights() {
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

        let container = AnalyticsContainer::default();
        match container.init(scope) {
            InitResult::Done(r) => r.unwrap(),
            InitResult::Deferred(fut) => fut.await.unwrap(),
        }
        let rendered = container
            .get("./App")
            .await
            .unwrap()
            .invoke()
            .into_component()
            .render();

        assert!(rendered.contains("Analytics Hub"));
        assert!(rendered.contains("monthly revenue"));
        assert!(rendered.contains("Sep"));
        assert!(rendered.contains("Returning customers spend 30% more"));
    }
}
