mod capture;
mod ocr;
mod provision;

pub use capture::ScreenCapture;
pub use ocr::TesseractRecognizer;
pub use provision::{ProvisionError, ensure_language, traineddata_path};
