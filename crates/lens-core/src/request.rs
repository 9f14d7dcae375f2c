use lens_types::{CaptureRegion, LanguagePair};

/// Text the sink last accepted, with the languages it was translated under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedText {
    pub text: String,
    pub languages: LanguagePair,
}

/// Snapshot handed to the worker. Nothing in it changes after dispatch, so
/// later UI edits only affect the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub id: u64,
    pub region: CaptureRegion,
    pub languages: LanguagePair,
    pub last_consumed: Option<ConsumedText>,
}

impl PipelineRequest {
    /// Trimmed `text` matches what the sink already shows for these languages
    pub fn is_unchanged(&self, text: &str) -> bool {
        self.last_consumed
            .as_ref()
            .is_some_and(|c| c.languages == self.languages && c.text.trim() == text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_types::OcrLanguage;

    fn request(last: Option<ConsumedText>) -> PipelineRequest {
        PipelineRequest {
            id: 1,
            region: CaptureRegion::new(0, 0, 10, 10),
            languages: LanguagePair::default(),
            last_consumed: last,
        }
    }

    #[test]
    fn test_unchanged_ignores_incidental_whitespace() {
        let req = request(Some(ConsumedText {
            text: "Hello".into(),
            languages: LanguagePair::default(),
        }));
        assert!(req.is_unchanged("  Hello\n"));
        assert!(!req.is_unchanged("Hello!"));
    }

    #[test]
    fn test_language_switch_is_a_change() {
        let req = request(Some(ConsumedText {
            text: "Hello".into(),
            languages: LanguagePair::new(OcrLanguage::English, OcrLanguage::Japanese),
        }));
        assert!(!req.is_unchanged("Hello"));
    }

    #[test]
    fn test_nothing_consumed_yet() {
        assert!(!request(None).is_unchanged("Hello"));
    }
}
