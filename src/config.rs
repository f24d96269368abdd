//! Runtime configuration: which provider to use and how to reach it.
//!
//! Values come from the environment (see the `*_VAR` constants) and can be
//! overridden field by field by the command line.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::mt::backend::DEFAULT_BACKEND_URL;
use crate::mt::error::{MtError, MtResult};
use crate::mt::llm::{API_KEY_VAR, DEFAULT_LLM_MODEL, DEFAULT_LLM_URL};
use crate::mt::mymemory::DEFAULT_MYMEMORY_URL;
use crate::mt::{
    BackendClient, FallbackPolicy, LlmProvider, MachineTranslator, MockMode, MockPhraseLookup,
    MockTranslator, MyMemoryProvider, PhraseLookup, TranslationClient,
};

pub const PROVIDER_VAR: &str = "KOEN_PROVIDER";
pub const BACKEND_URL_VAR: &str = "KOEN_BACKEND_URL";
pub const MYMEMORY_URL_VAR: &str = "KOEN_MYMEMORY_URL";
pub const LLM_URL_VAR: &str = "KOEN_LLM_URL";
pub const LLM_MODEL_VAR: &str = "KOEN_LLM_MODEL";
pub const FALLBACK_VAR: &str = "KOEN_FALLBACK";

/// Which service answers translation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Backend,
    MyMemory,
    Llm,
    Mock,
}

impl ProviderKind {
    pub const NAMES: [&'static str; 4] = ["backend", "mymemory", "llm", "mock"];
}

impl FromStr for ProviderKind {
    type Err = MtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backend" => Ok(ProviderKind::Backend),
            "mymemory" => Ok(ProviderKind::MyMemory),
            "llm" | "openai" => Ok(ProviderKind::Llm),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(MtError::ConfigError(format!(
                "Unknown provider '{}' (expected one of: {})",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Backend => "backend",
            ProviderKind::MyMemory => "mymemory",
            ProviderKind::Llm => "llm",
            ProviderKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub backend_url: String,
    pub mymemory_url: String,
    pub llm_url: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub fallback: FallbackPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            mymemory_url: DEFAULT_MYMEMORY_URL.to_string(),
            llm_url: DEFAULT_LLM_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_api_key: None,
            fallback: FallbackPolicy::Propagate,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(provider) = get(PROVIDER_VAR) {
            config.provider = provider.parse()?;
        }
        if let Some(url) = get(BACKEND_URL_VAR) {
            config.backend_url = url;
        }
        if let Some(url) = get(MYMEMORY_URL_VAR) {
            config.mymemory_url = url;
        }
        if let Some(url) = get(LLM_URL_VAR) {
            config.llm_url = url;
        }
        if let Some(model) = get(LLM_MODEL_VAR) {
            config.llm_model = model;
        }
        config.llm_api_key = get(API_KEY_VAR);
        if let Some(flag) = get(FALLBACK_VAR) {
            config.fallback = if parse_flag(&flag)? {
                FallbackPolicy::Degrade
            } else {
                FallbackPolicy::Propagate
            };
        }

        Ok(config)
    }

    fn llm_provider(&self) -> MtResult<LlmProvider> {
        let api_key = self.llm_api_key.as_deref().ok_or_else(|| {
            MtError::ConfigError(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        LlmProvider::new(api_key, &self.llm_url, &self.llm_model)
    }

    /// Build the translation client for the configured provider
    pub fn translation_client(&self) -> MtResult<TranslationClient> {
        let provider: Arc<dyn MachineTranslator> = match self.provider {
            ProviderKind::Backend => Arc::new(BackendClient::new(&self.backend_url)?),
            ProviderKind::MyMemory => Arc::new(MyMemoryProvider::with_base_url(&self.mymemory_url)?),
            ProviderKind::Llm => Arc::new(self.llm_provider()?),
            ProviderKind::Mock => Arc::new(MockTranslator::new(MockMode::Reverse)),
        };
        Ok(TranslationClient::new(provider).with_fallback(self.fallback))
    }

    /// Build the phrase lookup client.
    ///
    /// MyMemory has no phrase analysis, so that provider looks phrases up on
    /// the backend.
    pub fn phrase_lookup(&self) -> MtResult<Arc<dyn PhraseLookup>> {
        Ok(match self.provider {
            ProviderKind::Backend | ProviderKind::MyMemory => {
                Arc::new(BackendClient::new(&self.backend_url)?)
            }
            ProviderKind::Llm => Arc::new(self.llm_provider()?),
            ProviderKind::Mock => Arc::new(MockPhraseLookup::new()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("backend_url", &self.backend_url)
            .field("mymemory_url", &self.mymemory_url)
            .field("llm_url", &self.llm_url)
            .field("llm_model", &self.llm_model)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "***"))
            .field("fallback", &self.fallback)
            .finish()
    }
}

fn parse_flag(value: &str) -> MtResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(MtError::ConfigError(format!(
            "Invalid value '{}' for {}",
            other, FALLBACK_VAR
        ))),
    }
}
