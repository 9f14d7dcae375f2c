use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lens_translator::Translator;
use lens_types::{LanguagePair, OcrLanguage};
use tokio_util::sync::CancellationToken;

use crate::adapters::{CaptureAdapter, RecognitionAdapter, RecognizeError};
use crate::cache::{CacheKey, TranslationCache};
use crate::request::PipelineRequest;

/// Why an attempt ended without anything to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipCause {
    Capture(String),
    NothingRecognized,
    Recognition(String),
    Interrupted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipCause),
    Unchanged,
    Succeeded {
        original: String,
        translation: String,
        cached: bool,
    },
    Failed {
        error: String,
        original: String,
    },
}

/// An outcome tagged with the request it answers
#[derive(Debug, Clone)]
pub struct Completed {
    pub request_id: u64,
    pub languages: LanguagePair,
    pub outcome: Outcome,
}

/// Last recognized frame, reused when the next capture is pixel-identical
#[derive(Clone)]
struct RecognitionMemo {
    fingerprint: blake3::Hash,
    language: OcrLanguage,
    text: Option<String>,
}

/// Runs capture → recognize → translate for one request at a time.
///
/// Capture and recognition are blocking and go to the blocking pool; the
/// translation call is bounded by `translate_timeout`.
pub struct WorkerExecutor {
    capture: Arc<dyn CaptureAdapter>,
    recognizer: Arc<dyn RecognitionAdapter>,
    translator: Arc<dyn Translator>,
    cache: TranslationCache,
    translate_timeout: Duration,
    skip_identical_frames: bool,
    memo: Option<RecognitionMemo>,
}

impl WorkerExecutor {
    pub fn new(
        capture: Arc<dyn CaptureAdapter>,
        recognizer: Arc<dyn RecognitionAdapter>,
        translator: Arc<dyn Translator>,
        cache: TranslationCache,
        translate_timeout: Duration,
    ) -> Self {
        Self {
            capture,
            recognizer,
            translator,
            cache,
            translate_timeout,
            skip_identical_frames: true,
            memo: None,
        }
    }

    pub fn with_skip_identical_frames(mut self, enabled: bool) -> Self {
        self.skip_identical_frames = enabled;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub async fn run(&mut self, request: PipelineRequest) -> Outcome {
        let recognized = match self.capture_and_recognize(&request).await {
            Ok(text) => text,
            Err(cause) => {
                tracing::debug!("[WORKER] #{} skipped: {:?}", request.id, cause);
                return Outcome::Skipped(cause);
            }
        };

        let text = recognized.trim();
        if text.is_empty() {
            return Outcome::Skipped(SkipCause::NothingRecognized);
        }

        if request.is_unchanged(text) {
            tracing::debug!("[WORKER] #{} text unchanged, skipping translation", request.id);
            return Outcome::Unchanged;
        }

        let key = CacheKey::new(text, &request.languages);
        if let Some(translation) = self.cache.get(&key) {
            tracing::debug!("[WORKER] #{} cache hit", request.id);
            return Outcome::Succeeded {
                original: text.to_string(),
                translation,
                cached: true,
            };
        }

        let (from, to) = request.languages.translation_codes();
        let started = std::time::Instant::now();
        let result = tokio::time::timeout(
            self.translate_timeout,
            self.translator.translate(text, from.to_string(), to.to_string()),
        )
        .await;

        match result {
            Ok(Ok(translation)) => {
                tracing::info!(
                    "[WORKER] #{} translated {} chars via {} in {:?}",
                    request.id,
                    text.chars().count(),
                    translation.provider,
                    started.elapsed()
                );
                self.cache.put(key, translation.text.clone());
                Outcome::Succeeded {
                    original: text.to_string(),
                    translation: translation.text,
                    cached: false,
                }
            }
            Ok(Err(e)) => {
                tracing::warn!("[WORKER] #{} translation failed: {}", request.id, e);
                Outcome::Failed {
                    error: format!("translation failure: {}", e),
                    original: text.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(
                    "[WORKER] #{} translation timed out after {:?}",
                    request.id,
                    self.translate_timeout
                );
                Outcome::Failed {
                    error: format!(
                        "translation timed out after {} ms",
                        self.translate_timeout.as_millis()
                    ),
                    original: text.to_string(),
                }
            }
        }
    }

    async fn capture_and_recognize(&mut self, request: &PipelineRequest) -> Result<String, SkipCause> {
        let capture = self.capture.clone();
        let recognizer = self.recognizer.clone();
        let region = request.region;
        let language = request.languages.source;
        let memo = if self.skip_identical_frames {
            self.memo.clone()
        } else {
            None
        };

        let joined = tokio::task::spawn_blocking(move || {
            let frame = capture
                .capture(region)
                .map_err(|e| SkipCause::Capture(e.to_string()))?;
            let fingerprint = frame.fingerprint();

            if let Some(memo) = memo
                && memo.fingerprint == fingerprint
                && memo.language == language
            {
                tracing::debug!("[WORKER] Frame unchanged, reusing recognition");
                return Ok(memo);
            }

            let text = match recognizer.recognize(&frame, language) {
                Ok(text) if !text.trim().is_empty() => Some(text),
                Ok(_) | Err(RecognizeError::Empty) => None,
                Err(e) => return Err(SkipCause::Recognition(e.to_string())),
            };

            Ok(RecognitionMemo {
                fingerprint,
                language,
                text,
            })
        })
        .await;

        let memo = match joined {
            Ok(result) => result?,
            Err(e) => {
                tracing::error!("[WORKER] Capture task error: {}", e);
                return Err(SkipCause::Interrupted(e.to_string()));
            }
        };

        let text = memo.text.clone();
        self.memo = Some(memo);
        text.ok_or(SkipCause::NothingRecognized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Worker busy")]
    Busy,
    #[error("Worker stopped")]
    Closed,
}

/// Non-blocking entry point into the worker's mailbox (depth 1)
#[derive(Clone)]
pub struct WorkerHandle {
    requests: AsyncSender<PipelineRequest>,
}

impl WorkerHandle {
    pub fn channel() -> (Self, AsyncReceiver<PipelineRequest>) {
        let (tx, rx) = kanal::bounded_async(1);
        (Self { requests: tx }, rx)
    }

    /// Hand a request over without waiting; a full mailbox drops it
    pub fn try_dispatch(&self, request: PipelineRequest) -> Result<(), DispatchError> {
        match self.requests.try_send(request) {
            Ok(true) => Ok(()),
            Ok(false) => Err(DispatchError::Busy),
            Err(_) => Err(DispatchError::Closed),
        }
    }
}

/// Worker task: one attempt at a time, outcomes posted back in order
pub async fn worker_loop(
    mut executor: WorkerExecutor,
    requests: AsyncReceiver<PipelineRequest>,
    outcomes: AsyncSender<Completed>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[WORKER] Started");
    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => break,
            received = requests.recv() => match received {
                Ok(request) => request,
                Err(_) => break,
            },
        };

        let request_id = request.id;
        let languages = request.languages;
        let outcome = tokio::select! {
            _ = cancel.cancelled() => break,
            outcome = executor.run(request) => outcome,
        };

        let completed = Completed {
            request_id,
            languages,
            outcome,
        };
        if outcomes.send(completed).await.is_err() {
            tracing::warn!("[WORKER] Outcome receiver closed");
            break;
        }
    }
    tracing::debug!(
        "[WORKER] Cache: {} entries, {}",
        executor.cache().len(),
        executor.cache().stats()
    );
    tracing::info!("[WORKER] Stopping");
    Ok(())
}
