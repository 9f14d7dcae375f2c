//! Boundaries to the platform: screen capture and text recognition.
//!
//! Both are blocking calls and are only ever invoked from the worker's
//! blocking pool. Translation goes through [`lens_translator::Translator`].

use lens_types::{CaptureRegion, OcrLanguage};

/// Captured RGB raster, 3 bytes per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Content hash used to detect pixel-identical consecutive captures
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.width.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&self.pixels);
        hasher.finalize()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    /// Caller-side problem: zero area, outside every monitor
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Platform glitch, worth retrying on the next tick
    #[error("Capture failed: {0}")]
    Platform(String),
}

impl CaptureError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::Platform(_))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RecognizeError {
    #[error("No text recognized")]
    Empty,

    #[error("Recognition failed: {0}")]
    Engine(String),
}

pub trait CaptureAdapter: Send + Sync {
    /// Capture exactly `region.width × region.height` pixels
    fn capture(&self, region: CaptureRegion) -> Result<Frame, CaptureError>;
}

pub trait RecognitionAdapter: Send + Sync {
    fn recognize(&self, frame: &Frame, language: OcrLanguage) -> Result<String, RecognizeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_depends_on_pixels_and_shape() {
        let a = Frame::new(2, 1, vec![0, 0, 0, 255, 255, 255]);
        let b = Frame::new(2, 1, vec![0, 0, 0, 255, 255, 255]);
        let c = Frame::new(2, 1, vec![0, 0, 0, 255, 255, 254]);
        let d = Frame::new(1, 2, vec![0, 0, 0, 255, 255, 255]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), d.fingerprint());
    }

    #[test]
    fn test_capture_error_transience() {
        assert!(CaptureError::Platform("busy".into()).is_transient());
        assert!(!CaptureError::InvalidRegion("0x0".into()).is_transient());
    }
}
