pub mod language;
pub mod types;

pub use language::{LanguageError, LanguagePair, OcrLanguage};
pub use types::{AppEvent, CaptureRegion, DisplayUpdate, RegionParseError, UiCommand};
