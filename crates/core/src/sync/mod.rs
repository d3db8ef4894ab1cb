//! Cross-instance reconciliation
//!
//! The pipeline: [`mapper`] builds source-to-target project and task
//! lookup tables once at construction, [`grouper`] buckets both sides'
//! activities by (date, project), [`scorer`] rates every candidate pair
//! within a bucket, and [`engine`] greedily assigns pairs by descending
//! score and applies the equal/update/create outcome.

pub mod engine;
pub mod grouper;
pub mod mapper;
pub mod ports;
pub mod scorer;
