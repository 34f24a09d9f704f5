use std::time::Duration;

use crate::config::Config;

/// Runtime knobs for the translation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Characters sent to the translator; the rest is dropped.
    pub max_chars: usize,
    pub binary_read_delay: Duration,
    pub binary_finalize_delay: Duration,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_chars: config.pipeline.max_chars,
            binary_read_delay: config.pipeline.binary_read_delay(),
            binary_finalize_delay: config.pipeline.binary_finalize_delay(),
        }
    }

    /// No simulated delays. Used by tests and dry runs.
    pub fn without_delays(max_chars: usize) -> Self {
        Self {
            max_chars,
            binary_read_delay: Duration::ZERO,
            binary_finalize_delay: Duration::ZERO,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
