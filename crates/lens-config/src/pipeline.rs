use serde::{Deserialize, Serialize};

fn default_tick_interval_ms() -> u64 {
    500
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum CachePolicyConfig {
    /// Keep every translation for the life of the process
    #[default]
    Unbounded,
    Lru { capacity: usize },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub cache: CachePolicyConfig,
    /// Reuse the last recognized text when the captured pixels are identical
    #[serde(default = "default_enabled")]
    pub skip_identical_frames: bool,
    #[serde(default = "default_enabled")]
    pub auto_translate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            cache: CachePolicyConfig::default(),
            skip_identical_frames: default_enabled(),
            auto_translate: default_enabled(),
        }
    }
}
