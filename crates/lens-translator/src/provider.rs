use std::sync::Arc;

use lens_config::translator::TranslatorConfig;

use crate::{DeepLTranslator, GoogleTranslator, TranslateError, Translator, YoudaoTranslator};

/// Build the configured translation provider
pub fn build_translator(config: &TranslatorConfig) -> Result<Arc<dyn Translator>, TranslateError> {
    let translator: Arc<dyn Translator> = match config.provider.to_lowercase().as_str() {
        "google" => Arc::new(GoogleTranslator::new(config.api_url.clone())),
        "deepl" => Arc::new(DeepLTranslator::new(
            config.api_key.clone(),
            config.api_url.clone(),
        )),
        "youdao" => Arc::new(YoudaoTranslator::new(
            config.api_key.clone(),
            config.api_secret.clone(),
            config.api_url.clone(),
        )),
        other => {
            return Err(TranslateError::ApiError(format!(
                "Unknown translation provider: {}",
                other
            )));
        }
    };

    let metadata = translator.metadata();
    if metadata.requires_api_key && config.api_key.is_empty() {
        tracing::warn!("{} selected but no API key configured", metadata.name);
    }

    Ok(translator)
}
