//! Configuration for the simulator.
//!
//! A small hierarchical structure deserializable from JSON, so the same
//! schema is usable from the CLI, from tests, and through the Python
//! bindings. Every field has a default; an empty document yields the stock
//! machine.

use serde::Deserialize;

use crate::common::constants::START_PC;
use crate::core::btb::DEFAULT_SEED;

/// Root configuration type.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General machine settings.
    pub general: GeneralConfig,
    /// Branch predictor settings.
    pub predictor: PredictorConfig,
}

/// General machine settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Program counter after reset; the loader places the image here.
    pub start_pc: u32,
    /// Emit per-stage trace lines to stderr.
    pub trace: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: START_PC,
            trace: false,
        }
    }
}

/// Branch predictor settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Seed for the BTB victim-selection generator. Fixing this makes runs
    /// with full-BTB replacement reproducible.
    pub seed: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}
