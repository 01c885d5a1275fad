//! One method per endpoint of the Beiboot API.
//!
//! Services are thin views over an [`ApiClient`](crate::ApiClient); each method
//! builds the call descriptor and spawns it, returning a [`CallHandle`](crate::CallHandle).
//!
//! # Panics
//!
//! Spawning needs a tokio runtime: every service method panics when called
//! outside one.
//!
//! - [`ClustersApi`] - `/clusters/` lifecycle, kubeconfig and mTLS material
//! - [`ConfigsApi`] - `/configs/` cluster configurations
//! - [`ConnectionsApi`] - `/connections/` tunnel material
//! - [`DebugApi`] - `/debug/` helpers
//! - [`DefaultApi`] - root endpoints

mod clusters;
pub use self::clusters::{ClustersApi, DEFAULT_USER_ID};

mod configs;
pub use self::configs::ConfigsApi;

mod connections;
pub use self::connections::ConnectionsApi;

mod debug;
pub use self::debug::DebugApi;

mod default;
pub use self::default::DefaultApi;

/// Message of the `422 Unprocessable Entity` responses, declared by every
/// resource endpoint.
pub const VALIDATION_ERROR: &str = "Validation Error";
