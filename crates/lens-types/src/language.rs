use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recognition languages the OCR engine ships data for.
///
/// The set is closed: anything outside it is rejected when parsed, so an
/// unsupported code can never reach a running pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OcrLanguage {
    English,
    ChineseSimplified,
    ChineseTraditional,
    Japanese,
    Korean,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("Unsupported language: {0}")]
    Unsupported(String),
}

impl OcrLanguage {
    pub const ALL: [OcrLanguage; 5] = [
        OcrLanguage::English,
        OcrLanguage::ChineseSimplified,
        OcrLanguage::ChineseTraditional,
        OcrLanguage::Japanese,
        OcrLanguage::Korean,
    ];

    /// Tesseract language code
    pub fn code(&self) -> &'static str {
        match self {
            OcrLanguage::English => "eng",
            OcrLanguage::ChineseSimplified => "chi_sim",
            OcrLanguage::ChineseTraditional => "chi_tra",
            OcrLanguage::Japanese => "jpn",
            OcrLanguage::Korean => "kor",
        }
    }

    /// Code understood by translation services
    pub fn translation_code(&self) -> &'static str {
        match self {
            OcrLanguage::English => "en",
            OcrLanguage::ChineseSimplified => "zh-cn",
            OcrLanguage::ChineseTraditional => "zh-tw",
            OcrLanguage::Japanese => "ja",
            OcrLanguage::Korean => "ko",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OcrLanguage::English => "English",
            OcrLanguage::ChineseSimplified => "Chinese",
            OcrLanguage::ChineseTraditional => "Chinese (Traditional)",
            OcrLanguage::Japanese => "Japanese",
            OcrLanguage::Korean => "Korean",
        }
    }
}

impl FromStr for OcrLanguage {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        OcrLanguage::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(needle)
                    || lang.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| LanguageError::Unsupported(s.to_string()))
    }
}

impl TryFrom<String> for OcrLanguage {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OcrLanguage> for String {
    fn from(lang: OcrLanguage) -> Self {
        lang.code().to_string()
    }
}

impl fmt::Display for OcrLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub source: OcrLanguage,
    pub dest: OcrLanguage,
}

impl LanguagePair {
    pub fn new(source: OcrLanguage, dest: OcrLanguage) -> Self {
        Self { source, dest }
    }

    /// (from, to) in translation-service codes
    pub fn translation_codes(&self) -> (&'static str, &'static str) {
        (self.source.translation_code(), self.dest.translation_code())
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new(OcrLanguage::English, OcrLanguage::ChineseSimplified)
    }
}
