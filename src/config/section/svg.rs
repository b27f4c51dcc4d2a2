//! `[svg]` section configuration.

use serde::{Deserialize, Serialize};

/// Accepted range for `max_passes`.
pub const PASS_RANGE: std::ops::RangeInclusive<usize> = 1..=100;

/// Vector optimizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Upper bound on optimizer passes. Optimization stops earlier once a
    /// pass leaves the document unchanged.
    pub max_passes: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self { max_passes: 10 }
    }
}
