//! Machine translation trait and the fallback-aware client
//!
//! `MachineTranslator` abstracts over the providers (local backend, public
//! API, LLM, mock). Views never talk to a provider directly; they go through
//! `TranslationClient`, which decides what happens when the provider fails.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use koen_translator::Language;
//! use koen_translator::mt::{BackendClient, FallbackPolicy, TranslationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = BackendClient::new("http://localhost:8000")?;
//!     let client = TranslationClient::new(Arc::new(backend))
//!         .with_fallback(FallbackPolicy::Degrade);
//!
//!     let result = client.translate("Hello", Language::English, Language::Korean).await?;
//!     if result.is_degraded() {
//!         eprintln!("backend unavailable, showing a placeholder");
//!     }
//!     println!("{}", result.text());
//!     Ok(())
//! }
//! ```

use crate::language::Language;
use crate::mt::error::MtResult;
use crate::mt::mock::reverse_chars;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Generic trait for translation providers
///
/// All methods are async to support network-bound providers. A call issues
/// at most one request; providers never retry.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` from `source` into `target`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text, unmodified
    /// * `Err(MtError)` - Network failure, non-success status or undecodable response
    async fn translate(&self, text: &str, source: Language, target: Language) -> MtResult<String>;

    /// Name of this provider, used in logs
    fn provider_name(&self) -> &str;
}

/// Outcome of a translation that produced something to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A genuine translation from the provider
    Translated(String),
    /// A local placeholder standing in for a failed provider call
    Degraded { text: String, reason: String },
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Translation::Translated(text) => text,
            Translation::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Translation::Degraded { .. })
    }

    /// Why the result is degraded, if it is
    pub fn reason(&self) -> Option<&str> {
        match self {
            Translation::Translated(_) => None,
            Translation::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// What `TranslationClient` does when the provider fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Substitute a tagged placeholder (see [`degraded_placeholder`])
    Degrade,
}

/// The placeholder used when a translation degrades: the input with its
/// characters reversed, prefixed by the target language code.
///
/// ```ignore
/// assert_eq!(degraded_placeholder("Hello", Language::Korean), "[ko] olleH");
/// ```
pub fn degraded_placeholder(text: &str, target: Language) -> String {
    format!("[{}] {}", target.code(), reverse_chars(text))
}

/// A provider plus the policy applied to its failures
#[derive(Clone)]
pub struct TranslationClient {
    provider: Arc<dyn MachineTranslator>,
    policy: FallbackPolicy,
}

impl TranslationClient {
    /// Wrap a provider; failures propagate until `with_fallback` says otherwise
    pub fn new(provider: Arc<dyn MachineTranslator>) -> Self {
        Self {
            provider,
            policy: FallbackPolicy::Propagate,
        }
    }

    pub fn with_fallback(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Translate through the provider, applying the fallback policy on failure
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> MtResult<Translation> {
        debug!(
            provider = self.provider.provider_name(),
            from = source.code(),
            to = target.code(),
            chars = text.chars().count(),
            "translating"
        );

        match self.provider.translate(text, source, target).await {
            Ok(translated) => Ok(Translation::Translated(translated)),
            Err(err) => match self.policy {
                FallbackPolicy::Propagate => Err(err),
                FallbackPolicy::Degrade => {
                    warn!(
                        provider = self.provider.provider_name(),
                        error = %err,
                        "translation failed, substituting placeholder"
                    );
                    Ok(Translation::Degraded {
                        text: degraded_placeholder(text, target),
                        reason: err.to_string(),
                    })
                }
            },
        }
    }
}

impl fmt::Debug for TranslationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationClient")
            .field("provider", &self.provider.provider_name())
            .field("policy", &self.policy)
            .finish()
    }
}
