//! Mock providers for testing and offline demos
//!
//! Deterministic, network-free implementations of both client traits, so the
//! views and the shell can be exercised without a backend.
//!
//! # Example
//!
//! ```ignore
//! use koen_translator::Language;
//! use koen_translator::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Reverse);
//!     let result = mock.translate("hello", Language::English, Language::Korean).await.unwrap();
//!     assert_eq!(result, "olleh");
//! }
//! ```

use crate::language::Language;
use crate::mt::error::{MtError, MtResult};
use crate::mt::phrase::{Formality, PhraseAnalysis, PhraseLookup};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Reverse the characters of `text`
pub fn reverse_chars(text: &str) -> String {
    text.chars().rev().collect()
}

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Reverse the characters: "hello" → "olleh"
    Reverse,

    /// Use predefined mappings for realistic translations
    /// (text, target) → translation; unknown text falls back to `Reverse`
    Mappings(HashMap<(String, Language), String>),

    /// Simulate a network failure with the given message
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share the call counter, so a test can hand a clone to a view and
/// still observe how many requests were issued.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator that sleeps `delay_ms` before answering
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `translate` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, text: &str, target: Language) -> MtResult<String> {
        match &self.mode {
            MockMode::Reverse => Ok(reverse_chars(text)),
            MockMode::Mappings(map) => Ok(map
                .get(&(text.to_string(), target))
                .cloned()
                .unwrap_or_else(|| reverse_chars(text))),
            MockMode::Error(msg) => Err(MtError::NetworkError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(&self, text: &str, _source: Language, target: Language) -> MtResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.apply_translation(text, target)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

/// Mock phrase analysis provider
///
/// Known phrases return their canned analysis; anything else gets a
/// placeholder analysis naming the phrase.
#[derive(Debug, Clone, Default)]
pub struct MockPhraseLookup {
    analyses: HashMap<String, PhraseAnalysis>,
    error: Option<MtError>,
    calls: Arc<AtomicUsize>,
}

impl MockPhraseLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always fail with `error`
    pub fn failing(error: MtError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_analysis(mut self, analysis: PhraseAnalysis) -> Self {
        self.analyses.insert(analysis.phrase.clone(), analysis);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn placeholder(phrase: &str) -> PhraseAnalysis {
        PhraseAnalysis {
            phrase: phrase.to_string(),
            pronunciation: "(unavailable offline)".to_string(),
            origin: "(unavailable offline)".to_string(),
            example: phrase.to_string(),
            context: "No analysis provider is configured.".to_string(),
            formality: Formality {
                level: "Unknown".to_string(),
                alternatives: Vec::new(),
            },
        }
    }
}

#[async_trait]
impl PhraseLookup for MockPhraseLookup {
    async fn lookup_phrase(&self, phrase: &str) -> MtResult<PhraseAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self
            .analyses
            .get(phrase.trim())
            .cloned()
            .unwrap_or_else(|| Self::placeholder(phrase.trim())))
    }

    fn provider_name(&self) -> &str {
        "Mock Phrase Lookup"
    }
}
