use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use lens_config::ocr::OcrConfig;
use lens_core::{Frame, RecognitionAdapter, RecognizeError};
use lens_types::OcrLanguage;
use xcap::image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

/// Text recognition through the `tesseract` executable
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: PathBuf,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractRecognizer {
    pub fn new(command: Option<PathBuf>, tessdata_dir: Option<PathBuf>) -> Self {
        let command = command
            .or_else(|| std::env::var_os("TESSERACT_CMD").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("tesseract"));
        Self {
            command,
            tessdata_dir,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.tessdata_dir.clone())
    }

    pub fn with_tessdata_dir(mut self, dir: PathBuf) -> Self {
        self.tessdata_dir = Some(dir);
        self
    }

    pub fn tessdata_dir(&self) -> Option<&Path> {
        self.tessdata_dir.as_deref()
    }

    /// Run `tesseract --version`; returns the first line
    pub fn probe(&self) -> Result<String, RecognizeError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .map_err(|e| {
                RecognizeError::Engine(format!(
                    "Failed to start {}: {}",
                    self.command.display(),
                    e
                ))
            })?;
        // Older builds print the version on stderr
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&text)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    fn args(&self, image: &Path, language: OcrLanguage) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            language.code().into(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".into());
            args.push(dir.as_os_str().to_owned());
        }
        args
    }
}

fn encode_png(frame: &Frame) -> Result<Vec<u8>, RecognizeError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(&frame.pixels, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| RecognizeError::Engine(format!("Failed to encode PNG: {}", e)))?;
    Ok(buffer)
}

impl RecognitionAdapter for TesseractRecognizer {
    fn recognize(&self, frame: &Frame, language: OcrLanguage) -> Result<String, RecognizeError> {
        let png = encode_png(frame)?;
        let mut file = tempfile::Builder::new()
            .prefix("lens-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| RecognizeError::Engine(format!("Failed to create temp file: {}", e)))?;
        file.write_all(&png)
            .and_then(|_| file.flush())
            .map_err(|e| RecognizeError::Engine(format!("Failed to write temp file: {}", e)))?;
        // Close our handle; the file is removed when `path` drops
        let path = file.into_temp_path();

        let output = Command::new(&self.command)
            .args(self.args(&path, language))
            .output()
            .map_err(|e| {
                RecognizeError::Engine(format!(
                    "Failed to start {}: {}",
                    self.command.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognizeError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(RecognizeError::Empty);
        }
        tracing::trace!("Recognized {} chars ({})", text.chars().count(), language.code());
        Ok(text)
    }
}
