//! Best-effort translation of card text through a LibreTranslate-compatible
//! service.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.com/translate";
pub const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(6);
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";
const SOURCE_LANGUAGE: &str = "zh";

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("upstream {0}")]
    Upstream(u16),

    #[error("translate_failed")]
    Failed(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

pub struct TranslationClient {
    client: Client,
    url: String,
}

impl TranslationClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Translates Chinese `text` into `target`. No retries.
    pub async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(&self.url)
            .header("accept", "application/json")
            .json(&TranslateRequest {
                q: text,
                source: SOURCE_LANGUAGE,
                target,
                format: "text",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslationError::Upstream(response.status().as_u16()));
        }

        let body: TranslateResponse = response.json().await?;
        Ok(body.translated_text.unwrap_or_default())
    }
}
