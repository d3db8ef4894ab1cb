//! Matching and scoring constants

/// Default acceptance threshold for project name matching.
pub const DEFAULT_PROJECT_MATCH_THRESHOLD: f64 = 0.8;

/// Default acceptance threshold for task name matching.
pub const DEFAULT_TASK_MATCH_THRESHOLD: f64 = 0.45;

/// Score at which a pair needs no write at all.
pub const SCORE_EQUAL: u8 = 100;

/// Lowest score at which a pair is close enough to update in place.
/// Below this, neither side is consumed by the pair.
pub const SCORE_UPDATE_FLOOR: u8 = 60;

/// Contribution of task equality to the match score.
pub const SCORE_TASK_WEIGHT: u8 = 30;

/// Maximum contribution of description similarity to the match score.
pub const SCORE_DESCRIPTION_WEIGHT: f64 = 30.0;

/// Maximum contribution of duration closeness to the match score.
pub const SCORE_HOURS_WEIGHT: f64 = 40.0;

/// Hour differences are clamped to this many hours before scoring.
pub const HOURS_DIFF_CLAMP: f64 = 7.0;

/// Exponent applied to the normalized hour difference. Sub-linear, so
/// small rounding drift costs little while multi-hour gaps fall off
/// steeply (a 1.75h difference already halves the duration score).
pub const HOURS_DIFF_EXPONENT: f64 = 0.5;
