use serde::{Deserialize, Serialize};

fn default_max_text_lines() -> u32 {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Show the recognized text above the translation
    #[serde(default)]
    pub show_original: bool,
    #[serde(default = "default_max_text_lines")]
    pub max_text_lines: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_original: false,
            max_text_lines: default_max_text_lines(),
        }
    }
}
