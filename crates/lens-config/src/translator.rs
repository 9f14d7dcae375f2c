use lens_types::OcrLanguage;
use serde::{Deserialize, Serialize};

fn default_provider() -> String {
    "google".to_string()
}

fn default_target_language() -> OcrLanguage {
    OcrLanguage::ChineseSimplified
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// One of `google`, `deepl`, `youdao`
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_target_language")]
    pub target_language: OcrLanguage,
    #[serde(default)]
    pub api_key: String,
    /// Only used by providers that sign requests (youdao)
    #[serde(default)]
    pub api_secret: String,
    /// Overrides the provider's endpoint
    pub api_url: Option<String>,
    /// Upper bound on a single translation call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            target_language: default_target_language(),
            api_key: String::new(),
            api_secret: String::new(),
            api_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}
