//! Tenant configuration: data model, process-wide provider, theme side effect.
//!
//! A tenant is a configuration identity (branding, feature flags,
//! locale/currency settings) that reconfigures shared presentation state
//! without changing which code is loaded.

pub mod catalog;
pub mod config;
pub mod provider;
pub mod style;

pub use catalog::{builtin_tenants, DEFAULT_TENANT};
pub use config::{Branding, Features, StoreSettings, TenantConfig, Theme};
pub use provider::{TenantError, TenantProvider};
pub use style::{apply_theme, MemoryStyleTarget, StyleTarget};

/// Scope key under which the shell shares the tenant provider with remotes.
pub const TENANCY_DEP: &str = "tenancy";

/// Version tag offered with the shared tenant provider.
pub const TENANCY_VERSION: &str = "1.0.0";
