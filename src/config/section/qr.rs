//! `[qr]` section configuration.
//!
//! ```toml
//! [qr]
//! ec_level = "M"   # L, M, Q or H
//! margin = 4       # quiet zone, in modules
//! ```

use serde::{Deserialize, Serialize};

use crate::qr::EcLevel;

/// Largest accepted quiet zone, in modules.
pub const MAX_MARGIN: usize = 16;

/// Symbol settings shared by every artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    pub ec_level: EcLevel,
    pub margin: usize,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            margin: 4,
        }
    }
}
