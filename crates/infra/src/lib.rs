//! # TimeBridge Infra
//!
//! Adapters for the outside world:
//! - Blocking HTTP transport with retry/backoff
//! - The remote time-tracking API client implementing the core
//!   `InstanceClient` port
//! - Configuration loading (file probing plus environment overrides)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{RemoteClient, RemoteClientConfig};
pub use errors::InfraError;
pub use http::HttpClient;
