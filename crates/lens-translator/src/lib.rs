mod deepl;
mod google;
mod provider;
mod youdao;

pub use deepl::DeepLTranslator;
pub use google::GoogleTranslator;
pub use provider::build_translator;
pub use youdao::YoudaoTranslator;

/// Translation-service language code (`en`, `zh-cn`, ...)
pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Maps the status codes every provider treats the same way
pub(crate) fn check_status(status: reqwest::StatusCode) -> Result<(), TranslateError> {
    match status.as_u16() {
        429 => Err(TranslateError::RateLimitExceeded),
        401 | 403 => Err(TranslateError::AuthenticationError),
        _ if !status.is_success() => Err(TranslateError::ApiError(format!("HTTP {}", status))),
        _ => Ok(()),
    }
}
