//! Client for the local translation backend
//!
//! The backend exposes two JSON endpoints:
//!
//! - `POST /api/v0/translate/` with `{"text", "from", "to"}`, answering
//!   `{"translation": "..."}`
//! - `POST /api/v0/phrase-lookup/` with `{"phrase"}`, answering
//!   `{"analysis": "..."}` where the analysis is itself JSON text
//!
//! # Example
//!
//! ```ignore
//! use koen_translator::Language;
//! use koen_translator::mt::{BackendClient, MachineTranslator, PhraseLookup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = BackendClient::new("http://localhost:8000")?;
//!     let hello = backend.translate("Hello", Language::English, Language::Korean).await?;
//!     let thanks = backend.lookup_phrase("감사합니다").await?;
//!     println!("{} / {}", hello, thanks.pronunciation);
//!     Ok(())
//! }
//! ```

use crate::language::Language;
use crate::mt::error::MtResult;
use crate::mt::http::{build_client, decode_json, normalize_base_url};
use crate::mt::phrase::{PhraseAnalysis, PhraseLookup, decode_analysis};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default address of the local backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

const TRANSLATE_PATH: &str = "/api/v0/translate/";
const PHRASE_LOOKUP_PATH: &str = "/api/v0/phrase-lookup/";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    from: Language,
    to: Language,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

#[derive(Serialize)]
struct PhraseLookupRequest<'a> {
    phrase: &'a str,
}

#[derive(Deserialize)]
struct PhraseLookupResponse {
    analysis: serde_json::Value,
}

/// HTTP client for the local backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: &str) -> MtResult<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MachineTranslator for BackendClient {
    async fn translate(&self, text: &str, source: Language, target: Language) -> MtResult<String> {
        let url = self.endpoint(TRANSLATE_PATH);
        debug!(%url, "POST translate");

        let response = self
            .client
            .post(&url)
            .json(&TranslateRequest {
                text,
                from: source,
                to: target,
            })
            .send()
            .await?;

        let body: TranslateResponse = decode_json(response).await?;
        Ok(body.translation)
    }

    fn provider_name(&self) -> &str {
        "Backend"
    }
}

#[async_trait]
impl PhraseLookup for BackendClient {
    async fn lookup_phrase(&self, phrase: &str) -> MtResult<PhraseAnalysis> {
        let url = self.endpoint(PHRASE_LOOKUP_PATH);
        debug!(%url, "POST phrase-lookup");

        let response = self
            .client
            .post(&url)
            .json(&PhraseLookupRequest { phrase })
            .send()
            .await?;

        let body: PhraseLookupResponse = decode_json(response).await?;
        decode_analysis(body.analysis)
    }

    fn provider_name(&self) -> &str {
        "Backend"
    }
}
