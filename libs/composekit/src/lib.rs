//! # ComposeKit - Runtime Module Composition
//!
//! A unified crate for composing a host application out of independently
//! delivered remote modules at runtime.
//!
//! ## Features
//!
//! - **Injectable registry**: remotes are discovered through a `RegistryPort`,
//!   backed in production by a process-wide [`GlobalRegistry`] and in tests by
//!   in-memory fakes
//! - **Bounded discovery**: polling baseline with an optional push channel
//! - **Shared scope**: version-tagged singletons shared by reference across
//!   every loaded container
//! - **Lazy mounting**: one load per wrapper instance, cancel-on-drop, explicit
//!   retry from failure
//!
//! ## Load sequence
//!
//! ```text
//! await_remote -> container.init(scope) -> container.get(path) -> factory()
//! ```
//!
//! The sequence is strictly sequential per wrapper and is never re-entered
//! while a load is in flight.

pub use anyhow::Result;
pub use async_trait::async_trait;

// Re-export inventory for bundle submitters
pub use inventory;

pub mod bundle;
pub mod contracts;
pub mod errors;
pub mod lazy;
pub mod loader;
pub mod registry;
pub mod scope;

pub use bundle::{bundles, find_bundle, RemoteBundle};
pub use contracts::{Component, ContainerError, Factory, InitResult, ModuleExports, RemoteContainer};
pub use errors::LoadError;
pub use lazy::{LazyComponent, LoadState};
pub use loader::{load_remote, LoadOptions, LoadedModule};
pub use registry::{await_remote, global, DiscoveryOptions, GlobalRegistry, RegistryPort};
pub use scope::{ScopeError, SharedScope};
