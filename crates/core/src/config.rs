//! Configuration for the simulator.
//!
//! A small hierarchical structure deserializable from JSON, used by the
//! CLI; `Config::default()` gives the standard teaching setup (pipeline
//! protections on, single-cycle mode).

use serde::Deserialize;

use crate::sim::Mode;

/// Root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Pipeline hazard-handling toggles.
    pub pipeline: PipelineConfig,
}

/// General simulation settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Execution mode: `"single"` or `"pipeline"`.
    pub mode: Mode,
}

/// Pipeline hazard-handling toggles.
///
/// Turning either off makes the corresponding hazard observable: without
/// forwarding, RAW dependencies read stale register values; without
/// hazard detection, load-use pairs skip their stall.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Insert the one-cycle load-use stall.
    pub hazard_detection: bool,
    /// Forward EX/MEM and MEM/WB results into EX.
    pub forwarding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hazard_detection: true,
            forwarding: true,
        }
    }
}

impl Config {
    /// Deserializes a configuration from JSON text.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
