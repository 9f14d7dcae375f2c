use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status};

const DEFAULT_API_URL: &str = "https://openapi.youdao.com/api";

/// Youdao open API with v3 (sha256) request signing
#[derive(Clone)]
pub struct YoudaoTranslator {
    client: reqwest::Client,
    app_key: String,
    app_secret: String,
    api_url: String,
}

impl YoudaoTranslator {
    pub fn new(app_key: String, app_secret: String, api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            app_key,
            app_secret,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    fn sign(&self, query: &str, salt: &str, curtime: &str) -> String {
        let input = format!(
            "{}{}{}{}{}",
            self.app_key,
            truncate(query),
            salt,
            curtime,
            self.app_secret
        );
        hex::encode(Sha256::digest(input.as_bytes()))
    }
}

/// Signing input: the query itself if short, else head + char count + tail
fn truncate(query: &str) -> String {
    let chars: Vec<char> = query.chars().collect();
    let size = chars.len();
    if size <= 20 {
        return query.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[size - 10..].iter().collect();
    format!("{}{}{}", head, size, tail)
}

fn youdao_code(code: &str) -> &str {
    match code {
        "zh-cn" => "zh-CHS",
        "zh-tw" => "zh-CHT",
        other => other,
    }
}

#[async_trait]
impl Translator for YoudaoTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.app_key.is_empty() || self.app_secret.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let salt = uuid::Uuid::new_v4().to_string();
        let curtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string();
        let sign = self.sign(text, &salt, &curtime);

        let params = [
            ("q", text),
            ("from", youdao_code(&from)),
            ("to", youdao_code(&to)),
            ("appKey", self.app_key.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
            ("signType", "v3"),
            ("curtime", curtime.as_str()),
        ];

        let response = self.client.post(&self.api_url).form(&params).send().await?;
        check_status(response.status())?;

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        match json["errorCode"].as_str() {
            Some("0") => {}
            Some("108") | Some("202") => return Err(TranslateError::AuthenticationError),
            Some("411") => return Err(TranslateError::RateLimitExceeded),
            Some(code) => return Err(TranslateError::ApiError(format!("Youdao error {}", code))),
            None => return Err(TranslateError::ApiError("Missing errorCode".to_string())),
        }

        let translated_text = json["translation"]
            .get(0)
            .and_then(|t| t.as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "youdao".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Youdao".to_string(),
            requires_api_key: true,
        }
    }
}
