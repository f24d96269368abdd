//! MyMemory public translation API provider
//!
//! A keyless `GET` API: the text goes in the `q` query parameter and the
//! direction in `langpair` as `from|to`. The API reports its own status in
//! the body (`responseStatus`), and quota or validation failures arrive with
//! HTTP 200, so both statuses are checked.
//!
//! # Example
//!
//! ```ignore
//! use koen_translator::Language;
//! use koen_translator::mt::{MachineTranslator, MyMemoryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MyMemoryProvider::new()?;
//!     let result = provider.translate("Good morning", Language::English, Language::Korean).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::language::Language;
use crate::mt::error::{MtError, MtResult};
use crate::mt::http::{build_client, decode_json, normalize_base_url};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

/// Public endpoint of the MyMemory API
pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    /// Number on success, sometimes a string on errors
    response_status: Value,
    response_data: Option<MyMemoryData>,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryData {
    /// Absent on some error bodies, so it is read only after the status check
    #[serde(default)]
    translated_text: Option<String>,
}

/// MyMemory translation provider
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryProvider {
    /// Create a provider for the public endpoint
    pub fn new() -> MtResult<Self> {
        Self::with_base_url(DEFAULT_MYMEMORY_URL)
    }

    /// Create a provider for a MyMemory-compatible endpoint at `base_url`
    pub fn with_base_url(base_url: &str) -> MtResult<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Build the request URL; the query string is percent-encoded by `Url`
    fn request_url(&self, text: &str, source: Language, target: Language) -> MtResult<Url> {
        let langpair = format!("{}|{}", source.code(), target.code());
        Url::parse_with_params(
            &format!("{}/get", self.base_url),
            &[("q", text), ("langpair", langpair.as_str())],
        )
        .map_err(|e| MtError::ConfigError(format!("Invalid MyMemory URL: {}", e)))
    }

    fn parse_status(value: &Value) -> Option<u16> {
        match value {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl MachineTranslator for MyMemoryProvider {
    async fn translate(&self, text: &str, source: Language, target: Language) -> MtResult<String> {
        let url = self.request_url(text, source, target)?;
        let response = self.client.get(url).send().await?;
        let body: MyMemoryResponse = decode_json(response).await?;

        let status = Self::parse_status(&body.response_status).ok_or_else(|| {
            MtError::DecodeError(format!(
                "Invalid API response: unexpected responseStatus {}",
                body.response_status
            ))
        })?;

        if status != 200 {
            return Err(MtError::StatusError {
                status,
                message: body
                    .response_details
                    .unwrap_or_else(|| "Translation rejected".to_string()),
            });
        }

        body.response_data
            .and_then(|data| data.translated_text)
            .ok_or_else(|| {
                MtError::DecodeError(
                    "Invalid API response: missing 'responseData.translatedText' field"
                        .to_string(),
                )
            })
    }

    fn provider_name(&self) -> &str {
        "MyMemory"
    }
}
