use lens_types::DisplayUpdate;

use crate::request::ConsumedText;
use crate::worker::{Completed, Outcome};

/// What the floating display currently holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub translation: Option<String>,
    pub original: Option<String>,
    pub error: Option<String>,
    pub show_original: bool,
}

/// Applies worker outcomes on the interactive loop.
///
/// Sole owner of the last consumed text; the worker only ever sees the
/// copy carried in a request.
#[derive(Debug, Default)]
pub struct ResultSink {
    last_consumed: Option<ConsumedText>,
    display: DisplayState,
}

impl ResultSink {
    pub fn new(show_original: bool) -> Self {
        Self {
            last_consumed: None,
            display: DisplayState {
                show_original,
                ..DisplayState::default()
            },
        }
    }

    pub fn last_consumed(&self) -> Option<&ConsumedText> {
        self.last_consumed.as_ref()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn current_translation(&self) -> Option<&str> {
        self.display.translation.as_deref()
    }

    /// Returns the new display contents when the outcome changes them
    pub fn apply(&mut self, completed: Completed) -> Option<DisplayUpdate> {
        match completed.outcome {
            Outcome::Skipped(_) | Outcome::Unchanged => None,
            Outcome::Succeeded {
                original,
                translation,
                cached,
            } => {
                tracing::debug!("[SINK] #{} showing translation (cached: {})", completed.request_id, cached);
                self.last_consumed = Some(ConsumedText {
                    text: original.clone(),
                    languages: completed.languages,
                });
                self.display.translation = Some(translation);
                self.display.original = Some(original);
                self.display.error = None;
                Some(self.render())
            }
            Outcome::Failed { error, original } => {
                // Nothing on screen is consumed any more: the failed text is
                // retried, and returning to earlier text is looked up again
                tracing::debug!("[SINK] #{} showing error", completed.request_id);
                self.last_consumed = None;
                self.display.translation = None;
                self.display.original = Some(original);
                self.display.error = Some(error);
                Some(self.render())
            }
        }
    }

    pub fn set_show_original(&mut self, show: bool) -> DisplayUpdate {
        self.display.show_original = show;
        self.render()
    }

    /// Forget the previous text, e.g. after a new region is selected
    pub fn reset(&mut self) -> DisplayUpdate {
        self.last_consumed = None;
        self.display = DisplayState {
            show_original: self.display.show_original,
            ..DisplayState::default()
        };
        self.render()
    }

    /// Errors always carry their original text; otherwise it is opt-in
    pub fn render(&self) -> DisplayUpdate {
        let show_original = self.display.show_original || self.display.error.is_some();
        DisplayUpdate {
            translation: self.display.translation.clone(),
            original: if show_original {
                self.display.original.clone()
            } else {
                None
            },
            error: self.display.error.clone(),
        }
    }
}
