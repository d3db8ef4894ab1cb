//! Fuzzy string matching

mod fuzzy;

pub use fuzzy::{best_match, similarity};
