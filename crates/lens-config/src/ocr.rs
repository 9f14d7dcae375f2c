use std::path::PathBuf;

use lens_types::{CaptureRegion, OcrLanguage};
use serde::{Deserialize, Serialize};

fn default_language() -> OcrLanguage {
    OcrLanguage::English
}

fn default_auto_provision() -> bool {
    true
}

fn default_tessdata_url() -> String {
    "https://raw.githubusercontent.com/tesseract-ocr/tessdata_fast/main".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Source language of the monitored text
    #[serde(default = "default_language")]
    pub language: OcrLanguage,
    /// Path to the tesseract executable, if not on PATH
    pub tesseract_cmd: Option<PathBuf>,
    pub tessdata_dir: Option<PathBuf>,
    /// Download missing `.traineddata` files before monitoring starts
    #[serde(default = "default_auto_provision")]
    pub auto_provision: bool,
    #[serde(default = "default_tessdata_url")]
    pub tessdata_url: String,
    pub capture_region: Option<CaptureRegion>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tesseract_cmd: None,
            tessdata_dir: None,
            auto_provision: default_auto_provision(),
            tessdata_url: default_tessdata_url(),
            capture_region: None,
        }
    }
}
