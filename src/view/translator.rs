//! Translator view: input/output text, language pair, loading state and history.
//!
//! The view is a two-state machine (`Idle`, `AwaitingResponse`). A request is
//! started with [`TranslatorView::begin_translate`], which hands out a
//! [`PendingTranslation`] ticket, and settled with
//! [`TranslatorView::complete`]. Swapping or resetting while a request is in
//! flight abandons it: the view stays in `AwaitingResponse` until the ticket
//! settles, and the abandoned response is then dropped without touching the
//! output or the history. At most one request is ever in flight.

use chrono::Local;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::history::{History, HistoryEntry};
use crate::language::Language;
use crate::mt::error::MtResult;
use crate::mt::translator::{Translation, TranslationClient};

/// Shown in place of the output when a translation fails
pub const FAILURE_MESSAGE: &str = "Translation failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorState {
    Idle,
    AwaitingResponse,
}

/// Why a translate action did not start a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateRejected {
    /// The input is empty or whitespace only
    EmptyInput,
    /// A translation is already in flight
    Busy,
}

impl std::fmt::Display for TranslateRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateRejected::EmptyInput => write!(f, "Nothing to translate"),
            TranslateRejected::Busy => write!(f, "A translation is already in progress"),
        }
    }
}

impl std::error::Error for TranslateRejected {}

/// Ticket for one in-flight translation
#[derive(Debug, Clone)]
pub struct PendingTranslation {
    token: u64,
    pub text: String,
    pub source: Language,
    pub target: Language,
    started: Instant,
}

/// How a settled request affected the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Output updated and one history entry appended
    Translated(Translation),
    /// Output replaced by [`FAILURE_MESSAGE`]
    Failed(String),
    /// The request was abandoned or the ticket is unknown; the view is idle
    /// but output and history are untouched
    Stale,
}

/// The request currently in flight
#[derive(Debug, Clone, Copy)]
struct InFlight {
    token: u64,
    /// Set by swap/reset; the response will be dropped
    abandoned: bool,
}

#[derive(Debug, Clone)]
pub struct TranslatorView {
    input: String,
    output: String,
    source: Language,
    target: Language,
    state: TranslatorState,
    pending: Option<InFlight>,
    next_token: u64,
    history: History,
    last_duration: Option<Duration>,
    degraded_reason: Option<String>,
    /// Placeholder flag of the input text, when a swap moved a placeholder there
    input_degraded_reason: Option<String>,
}

impl Default for TranslatorView {
    fn default() -> Self {
        Self::new(Language::English, Language::Korean)
    }
}

impl TranslatorView {
    pub fn new(source: Language, target: Language) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            source,
            target,
            state: TranslatorState::Idle,
            pending: None,
            next_token: 0,
            history: History::new(),
            last_duration: None,
            degraded_reason: None,
            input_degraded_reason: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn state(&self) -> TranslatorState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == TranslatorState::AwaitingResponse
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Wall-clock duration of the last successful request
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    /// Set when the current output is a fallback placeholder
    pub fn degraded_reason(&self) -> Option<&str> {
        self.degraded_reason.as_deref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.input_degraded_reason = None;
    }

    pub fn set_source(&mut self, language: Language) {
        self.source = language;
    }

    pub fn set_target(&mut self, language: Language) {
        self.target = language;
    }

    /// Exchange the languages and the input/output text.
    ///
    /// Allowed in any state. An in-flight request is abandoned, since its
    /// response would belong to the old direction, but the view stays busy
    /// until it settles.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        std::mem::swap(&mut self.input, &mut self.output);
        std::mem::swap(&mut self.degraded_reason, &mut self.input_degraded_reason);
        self.abandon_pending();
    }

    /// Abandon any in-flight request; its response will be discarded
    pub fn reset(&mut self) {
        self.abandon_pending();
    }

    fn abandon_pending(&mut self) {
        if let Some(in_flight) = self.pending.as_mut() {
            debug!(token = in_flight.token, "abandoning in-flight translation");
            in_flight.abandoned = true;
        }
    }

    /// Start a translation of the current input.
    ///
    /// Moves to `AwaitingResponse` and returns the ticket to settle with
    /// [`complete`](Self::complete). No request may be issued when this
    /// returns an error.
    pub fn begin_translate(&mut self) -> Result<PendingTranslation, TranslateRejected> {
        if self.is_loading() {
            return Err(TranslateRejected::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(TranslateRejected::EmptyInput);
        }

        self.next_token += 1;
        let token = self.next_token;
        self.pending = Some(InFlight {
            token,
            abandoned: false,
        });
        self.state = TranslatorState::AwaitingResponse;

        Ok(PendingTranslation {
            token,
            text: self.input.clone(),
            source: self.source,
            target: self.target,
            started: Instant::now(),
        })
    }

    /// Settle a request started by [`begin_translate`](Self::begin_translate).
    ///
    /// Failures replace the output with [`FAILURE_MESSAGE`] and are not
    /// recorded in history.
    pub fn complete(
        &mut self,
        ticket: PendingTranslation,
        result: MtResult<Translation>,
    ) -> Completion {
        let in_flight = match self.pending {
            Some(in_flight) if in_flight.token == ticket.token => in_flight,
            _ => {
                debug!(token = ticket.token, "ignoring unknown translation ticket");
                return Completion::Stale;
            }
        };
        self.pending = None;
        self.state = TranslatorState::Idle;

        if in_flight.abandoned {
            debug!(token = ticket.token, "discarding abandoned translation response");
            return Completion::Stale;
        }

        match result {
            Ok(translation) => {
                let elapsed = ticket.started.elapsed();
                info!(
                    from = ticket.source.code(),
                    to = ticket.target.code(),
                    degraded = translation.is_degraded(),
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "translation complete"
                );

                self.output = translation.text().to_string();
                self.degraded_reason = translation.reason().map(str::to_string);
                self.input_degraded_reason = None;
                self.last_duration = Some(elapsed);
                self.history.push(HistoryEntry {
                    source: ticket.source,
                    target: ticket.target,
                    original: ticket.text,
                    translated: translation.text().to_string(),
                    degraded: translation.reason().map(str::to_string),
                    created_at: Local::now(),
                });
                Completion::Translated(translation)
            }
            Err(err) => {
                warn!(error = %err, "translation failed");
                self.output = FAILURE_MESSAGE.to_string();
                self.degraded_reason = None;
                self.input_degraded_reason = None;
                self.last_duration = None;
                Completion::Failed(err.to_string())
            }
        }
    }

    /// Translate the current input through `client`
    pub async fn translate(
        &mut self,
        client: &TranslationClient,
    ) -> Result<Completion, TranslateRejected> {
        let ticket = self.begin_translate()?;
        let result = client
            .translate(&ticket.text, ticket.source, ticket.target)
            .await;
        Ok(self.complete(ticket, result))
    }
}
