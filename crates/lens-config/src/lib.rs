use std::env;

use serde::{Deserialize, Serialize};

use self::ocr::OcrConfig;
use self::pipeline::{CachePolicyConfig, PipelineConfig};
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod ocr;
pub mod pipeline;
pub mod translator;
pub mod ui;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub pipeline: PipelineConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Overlay environment variables onto an already loaded config
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| env::var(name).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let parse = |name: &str| var(name).and_then(|v| v.trim().parse().ok());

        if let Some(ms) = parse("TICK_INTERVAL_MS") {
            self.pipeline.tick_interval_ms = ms;
        }

        if let Some(ms) = parse("TRANSLATE_TIMEOUT_MS") {
            self.translator.timeout_ms = ms;
        }

        if let Some(capacity) = var("CACHE_CAPACITY").and_then(|v| v.trim().parse().ok()) {
            self.pipeline.cache = CachePolicyConfig::Lru { capacity };
        }

        if let Some(provider) = var("TRANSLATOR_PROVIDER") {
            self.translator.provider = provider;
        }
        // Provider names are matched case-insensitively everywhere
        self.translator.provider = self.translator.provider.trim().to_ascii_lowercase();

        if let Some(key) = var("DEEPL_API_KEY")
            && self.translator.provider == "deepl"
        {
            self.translator.api_key = key;
        }

        if self.translator.provider == "youdao" {
            if let Some(key) = var("YOUDAO_APP_KEY") {
                self.translator.api_key = key;
            }
            if let Some(secret) = var("YOUDAO_APP_SECRET") {
                self.translator.api_secret = secret;
            }
        }

        if let Some(dir) = var("TESSDATA_PREFIX")
            && self.ocr.tessdata_dir.is_none()
        {
            self.ocr.tessdata_dir = Some(dir.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use lens_types::OcrLanguage;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pipeline.tick_interval_ms, 500);
        assert_eq!(config.pipeline.cache, CachePolicyConfig::Unbounded);
        assert!(config.pipeline.auto_translate);
        assert!(config.pipeline.skip_identical_frames);
        assert_eq!(config.ocr.language, OcrLanguage::English);
        assert_eq!(config.translator.target_language, OcrLanguage::ChineseSimplified);
        assert_eq!(config.translator.provider, "google");
        assert_eq!(config.translator.timeout_ms, 10_000);
        assert!(!config.ui.show_original);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "ocr": { "language": "jpn", "capture_region": { "x": 5, "y": 6, "width": 70, "height": 80 } },
            "pipeline": { "tick_interval_ms": 250, "cache": { "policy": "lru", "capacity": 64 } }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ocr.language, OcrLanguage::Japanese);
        assert_eq!(config.ocr.capture_region.map(|r| r.width), Some(70));
        assert!(config.ocr.auto_provision);
        assert_eq!(config.pipeline.tick_interval_ms, 250);
        assert_eq!(config.pipeline.cache, CachePolicyConfig::Lru { capacity: 64 });
        assert_eq!(config.translator.provider, "google");
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_provider_override_is_case_insensitive() {
        let mut config = Config::default();
        config.apply_vars(vars(&[
            ("TRANSLATOR_PROVIDER", "DeepL"),
            ("DEEPL_API_KEY", "dk-123"),
        ]));
        assert_eq!(config.translator.provider, "deepl");
        assert_eq!(config.translator.api_key, "dk-123");

        let mut config = Config::default();
        config.translator.provider = "Youdao".into();
        config.apply_vars(vars(&[
            ("YOUDAO_APP_KEY", "app"),
            ("YOUDAO_APP_SECRET", "secret"),
        ]));
        assert_eq!(config.translator.provider, "youdao");
        assert_eq!(config.translator.api_key, "app");
        assert_eq!(config.translator.api_secret, "secret");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_vars(vars(&[
            ("TICK_INTERVAL_MS", "200"),
            ("TRANSLATE_TIMEOUT_MS", " 3000 "),
            ("CACHE_CAPACITY", "32"),
            ("DEEPL_API_KEY", "ignored for google"),
            ("TESSDATA_PREFIX", "/data/tessdata"),
        ]));
        assert_eq!(config.pipeline.tick_interval_ms, 200);
        assert_eq!(config.translator.timeout_ms, 3000);
        assert_eq!(config.pipeline.cache, CachePolicyConfig::Lru { capacity: 32 });
        assert_eq!(config.translator.api_key, "");
        assert_eq!(config.ocr.tessdata_dir, Some("/data/tessdata".into()));

        let mut config = Config::default();
        config.apply_vars(vars(&[("TICK_INTERVAL_MS", "fast")]));
        assert_eq!(config.pipeline.tick_interval_ms, 500);
    }

    #[test]
    fn test_unsupported_language_rejected_at_load() {
        let json = r#"{ "ocr": { "language": "klingon" } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }
}
