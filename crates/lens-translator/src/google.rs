use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status};

const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate (`client=gtx`) endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

/// Google wants the region part upper-cased (`zh-CN`)
fn google_code(code: &str) -> String {
    match code.split_once('-') {
        Some((lang, region)) => format!("{}-{}", lang, region.to_uppercase()),
        None => code.to_string(),
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let sl = google_code(&from);
        let tl = google_code(&to);
        let params = [
            ("client", "gtx"),
            ("sl", sl.as_str()),
            ("tl", tl.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;
        check_status(response.status())?;

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        // [[["translated", "original", ...], ...], ...]
        let segments = json
            .get(0)
            .and_then(|s| s.as_array())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
            .collect();

        if translated.is_empty() {
            return Err(TranslateError::ApiError("Empty translation".to_string()));
        }

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_google_code() {
        assert_eq!(google_code("zh-cn"), "zh-CN");
        assert_eq!(google_code("en"), "en");
    }

    #[tokio::test]
    async fn test_segments_are_joined() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/translate_a/single")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sl".into(), "en".into()),
                Matcher::UrlEncoded("tl".into(), "zh-CN".into()),
                Matcher::UrlEncoded("q".into(), "Hello. World.".into()),
            ]))
            .with_status(200)
            .with_body(r#"[[["你好。","Hello. ",null],["世界。","World.",null]],null,"en"]"#)
            .create_async()
            .await;

        let translator = GoogleTranslator::new(Some(format!("{}/translate_a/single", server.url())));
        let translation = translator
            .translate("Hello. World.", "en".into(), "zh-cn".into())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(translation.text, "你好。世界。");
        assert_eq!(translation.provider, "google");
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let translator = GoogleTranslator::new(Some(server.url()));
        let err = translator
            .translate("Bonjour", "en".into(), "zh-cn".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html>captcha</html>")
            .create_async()
            .await;

        let translator = GoogleTranslator::new(Some(server.url()));
        let err = translator
            .translate("Bonjour", "en".into(), "zh-cn".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }
}
