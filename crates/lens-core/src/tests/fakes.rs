//! In-memory adapters with call counters

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lens_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use lens_types::{CaptureRegion, OcrLanguage};

use crate::adapters::{CaptureAdapter, CaptureError, Frame, RecognitionAdapter, RecognizeError};

/// Returns a frame whose pixels encode `seed`; zero-area regions fail
pub struct FakeCapture {
    pub seed: Mutex<u8>,
    pub fail: Mutex<bool>,
    pub calls: AtomicUsize,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self {
            seed: Mutex::new(0),
            fail: Mutex::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_seed(&self, seed: u8) {
        *self.seed.lock().unwrap() = seed;
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CaptureAdapter for FakeCapture {
    fn capture(&self, region: CaptureRegion) -> Result<Frame, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if region.is_empty() {
            return Err(CaptureError::InvalidRegion("zero area".into()));
        }
        if *self.fail.lock().unwrap() {
            return Err(CaptureError::Platform("display asleep".into()));
        }
        let seed = *self.seed.lock().unwrap();
        let len = (region.width * region.height * 3) as usize;
        Ok(Frame::new(region.width, region.height, vec![seed; len]))
    }
}

/// Returns whatever text is currently "on screen"
pub struct FakeRecognizer {
    pub text: Mutex<Result<String, RecognizeError>>,
    pub calls: AtomicUsize,
    pub languages: Mutex<Vec<OcrLanguage>>,
}

impl FakeRecognizer {
    pub fn new(text: &str) -> Self {
        Self {
            text: Mutex::new(Ok(text.to_string())),
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = Ok(text.to_string());
    }

    pub fn set_error(&self, error: RecognizeError) {
        *self.text.lock().unwrap() = Err(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecognitionAdapter for FakeRecognizer {
    fn recognize(&self, _frame: &Frame, language: OcrLanguage) -> Result<String, RecognizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language);
        self.text.lock().unwrap().clone()
    }
}

/// Scripted translations; unknown text or `offline` mode fails
pub struct FakeTranslator {
    pub table: Mutex<HashMap<String, String>>,
    pub offline: Mutex<bool>,
    pub delay: Mutex<Duration>,
    pub calls: AtomicUsize,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub requests: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            table: Mutex::new(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            offline: Mutex::new(false),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), from.clone(), to.clone()));

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if *self.offline.lock().unwrap() {
            return Err(TranslateError::ApiError("network unreachable".into()));
        }

        let translated = self.table.lock().unwrap().get(text).cloned();
        match translated {
            Some(text) => Ok(Translation {
                text,
                from,
                to,
                provider: "fake".into(),
            }),
            None => Err(TranslateError::ApiError(format!("no entry for {}", text))),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".into(),
            requires_api_key: false,
        }
    }
}
