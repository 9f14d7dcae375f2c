use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status};

const DEFAULT_API_URL: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

/// DeepL only takes the base language as a source
fn source_code(code: &str) -> String {
    code.split('-').next().unwrap_or(code).to_uppercase()
}

fn target_code(code: &str) -> String {
    match code {
        "zh-cn" => "ZH-HANS".to_string(),
        "zh-tw" => "ZH-HANT".to_string(),
        "en" => "EN-US".to_string(),
        other => other.to_uppercase(),
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let source_lang = source_code(&from);
        let target_lang = target_code(&to);
        let params = [
            ("text", text),
            ("source_lang", source_lang.as_str()),
            ("target_lang", target_lang.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        check_status(response.status())?;

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_code_mapping() {
        assert_eq!(source_code("zh-cn"), "ZH");
        assert_eq!(source_code("ja"), "JA");
        assert_eq!(target_code("zh-tw"), "ZH-HANT");
        assert_eq!(target_code("en"), "EN-US");
        assert_eq!(target_code("ko"), "KO");
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let translator = DeepLTranslator::new(String::new(), Some("http://127.0.0.1:9".into()));
        let err = translator
            .translate("Hello", "en".into(), "ja".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn test_translate_form_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/translate")
            .match_header("authorization", "DeepL-Auth-Key secret")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("text".into(), "Hello".into()),
                Matcher::UrlEncoded("source_lang".into(), "EN".into()),
                Matcher::UrlEncoded("target_lang".into(), "ZH-HANS".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"translations":[{"detected_source_language":"EN","text":"你好"}]}"#)
            .create_async()
            .await;

        let translator =
            DeepLTranslator::new("secret".into(), Some(format!("{}/v2/translate", server.url())));
        let translation = translator
            .translate("Hello", "en".into(), "zh-cn".into())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(translation.text, "你好");
        assert_eq!(translation.to, "zh-cn");
    }

    #[tokio::test]
    async fn test_forbidden_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let translator = DeepLTranslator::new("bad".into(), Some(server.url()));
        let err = translator
            .translate("Hello", "en".into(), "ja".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
