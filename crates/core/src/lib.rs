//! # TimeBridge Core
//!
//! Pure reconciliation logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Fuzzy name matching
//! - Project/task mapping between instances
//! - Activity grouping, pair scoring and the greedy reconciliation engine
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `timebridge-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Fully synchronous; every step blocks the caller

pub mod matching;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use matching::{best_match, similarity};
pub use sync::engine::SyncEngine;
pub use sync::mapper::InstanceMappings;
pub use sync::ports::{InstanceClient, NullObserver, SyncEvent, SyncObserver};
