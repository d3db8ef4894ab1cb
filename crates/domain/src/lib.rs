//! # TimeBridge Domain
//!
//! Business domain types and models for TimeBridge.
//!
//! This crate contains:
//! - Typed records for the remote time-tracking service (Project, Task, Activity)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Scoring and threshold constants
//!
//! ## Architecture
//! - No dependencies on other TimeBridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
