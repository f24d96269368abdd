//! LLM-backed provider (OpenAI-compatible chat completions)
//!
//! Both translation and phrase analysis are phrased as a single chat
//! completion. The credential comes from `OPENAI_API_KEY`; without it the
//! provider cannot be constructed.

use crate::language::Language;
use crate::mt::error::{MtError, MtResult};
use crate::mt::http::{build_client, decode_json, normalize_base_url};
use crate::mt::phrase::{PhraseAnalysis, PhraseLookup, decode_analysis_str};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

pub const DEFAULT_LLM_URL: &str = "https://api.openai.com";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TEMPERATURE: f32 = 0.3;

const TRANSLATE_SYSTEM_PROMPT: &str = "You are a professional Korean-English translator. \
Reply with the translation only, without quotes, notes or romanization.";

const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a Korean language teacher. Analyze the Korean phrase the user sends and reply with a single JSON object, nothing else, using exactly these fields:
{"phrase": string, "pronunciation": string (romanized), "origin": string (etymology), "example": string (an example sentence with its English translation), "context": string (cultural context and when to use it), "formality": {"level": string, "alternatives": [string] (the phrase at other formality levels)}}"#;

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Chat-completion provider for translation and phrase analysis
#[derive(Clone)]
pub struct LlmProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmProvider {
    /// Create a provider with an explicit credential
    pub fn new(api_key: &str, base_url: &str, model: &str) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(MtError::ConfigError("Model name cannot be empty".to_string()));
        }

        Ok(Self {
            client: build_client()?,
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.trim().to_string(),
            model: model.trim().to_string(),
        })
    }

    /// Create a provider from `OPENAI_API_KEY` using the default endpoint and model
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            MtError::ConfigError(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        Self::new(&api_key, DEFAULT_LLM_URL, DEFAULT_LLM_MODEL)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion and return the trimmed message content
    async fn complete(&self, system: &str, user: &str) -> MtResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": TEMPERATURE
        });

        debug!(model = %self.model, "requesting chat completion");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let chat: ChatResponse = decode_json(response).await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                MtError::DecodeError("Invalid API response: completion has no content".to_string())
            })
    }
}

impl std::fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LlmProvider {
    async fn translate(&self, text: &str, source: Language, target: Language) -> MtResult<String> {
        let prompt = format!(
            "Translate the following {} text into {}:\n\n{}",
            source, target, text
        );
        self.complete(TRANSLATE_SYSTEM_PROMPT, &prompt).await
    }

    fn provider_name(&self) -> &str {
        "LLM"
    }
}

#[async_trait]
impl PhraseLookup for LlmProvider {
    async fn lookup_phrase(&self, phrase: &str) -> MtResult<PhraseAnalysis> {
        let content = self.complete(ANALYSIS_SYSTEM_PROMPT, phrase.trim()).await?;
        decode_analysis_str(&content)
    }

    fn provider_name(&self) -> &str {
        "LLM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::phrase::sample_analysis;
    use crate::test_support::spawn_stub;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::Value;

    fn completion(content: &str) -> Value {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
    }

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_empty_key() {
        match LlmProvider::new("  ", DEFAULT_LLM_URL, DEFAULT_LLM_MODEL) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_new_with_empty_model() {
        assert!(LlmProvider::new("sk-test", DEFAULT_LLM_URL, "").is_err());
    }

    #[test]
    fn test_debug_output_masks_key() {
        let provider = LlmProvider::new("sk-secret", DEFAULT_LLM_URL, DEFAULT_LLM_MODEL).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("sk-secret"));
    }

    // ========== Request Tests ==========

    #[tokio::test]
    async fn test_translate_sends_bearer_and_prompt() {
        let app = Router::new().route(
            COMPLETIONS_PATH,
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "test-model");
                let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
                assert!(prompt.contains("English text into Korean"));
                assert!(prompt.ends_with("Hello"));
                Json(completion("  안녕하세요\n"))
            }),
        );
        let provider =
            LlmProvider::new("sk-test", &spawn_stub(app).await, "test-model").unwrap();

        let result = provider
            .translate("Hello", Language::English, Language::Korean)
            .await
            .unwrap();
        assert_eq!(result, "안녕하세요");
    }

    #[tokio::test]
    async fn test_unauthorized_is_status_error() {
        let app = Router::new().route(COMPLETIONS_PATH, post(|| async { StatusCode::UNAUTHORIZED }));
        let provider =
            LlmProvider::new("sk-wrong", &spawn_stub(app).await, "test-model").unwrap();

        let err = provider
            .translate("Hello", Language::English, Language::Korean)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_empty_choices_is_decode_error() {
        let app = Router::new().route(
            COMPLETIONS_PATH,
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let provider =
            LlmProvider::new("sk-test", &spawn_stub(app).await, "test-model").unwrap();

        assert!(matches!(
            provider
                .translate("Hello", Language::English, Language::Korean)
                .await,
            Err(MtError::DecodeError(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_decodes_fenced_json_content() {
        let app = Router::new().route(
            COMPLETIONS_PATH,
            post(|| async {
                let inner = serde_json::to_string_pretty(&sample_analysis()).unwrap();
                Json(completion(&format!("```json\n{}\n```", inner)))
            }),
        );
        let provider =
            LlmProvider::new("sk-test", &spawn_stub(app).await, "test-model").unwrap();

        assert_eq!(
            provider.lookup_phrase("감사합니다").await.unwrap(),
            sample_analysis()
        );
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_translation() {
        if std::env::var(API_KEY_VAR).is_err() {
            eprintln!("Skipping: {} not set", API_KEY_VAR);
            return;
        }

        let provider = LlmProvider::from_env().unwrap();
        let result = provider
            .translate("Thank you very much", Language::English, Language::Korean)
            .await
            .unwrap();
        println!("Translation: Thank you very much → {}", result);
        assert!(!result.is_empty());
    }
}
