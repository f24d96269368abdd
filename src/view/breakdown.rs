//! Phrase breakdown view: lookup input, loading/error state and the latest analysis.
//!
//! `reset` abandons an in-flight lookup, but the view stays busy until the
//! abandoned ticket settles; its response is then dropped.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::mt::error::MtResult;
use crate::mt::phrase::{PhraseAnalysis, PhraseLookup};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    AwaitingResponse,
    /// The last lookup failed; cleared by the next submit
    Error(String),
}

/// Why a lookup did not start a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupRejected {
    EmptyInput,
    Busy,
}

impl std::fmt::Display for LookupRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupRejected::EmptyInput => write!(f, "Enter a Korean phrase to look up"),
            LookupRejected::Busy => write!(f, "A lookup is already in progress"),
        }
    }
}

impl std::error::Error for LookupRejected {}

/// Ticket for one in-flight lookup
#[derive(Debug, Clone)]
pub struct PendingLookup {
    token: u64,
    pub phrase: String,
    started: Instant,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    token: u64,
    abandoned: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PhraseBreakdownView {
    phrase: String,
    state: LookupState,
    pending: Option<InFlight>,
    next_token: u64,
    analysis: Option<PhraseAnalysis>,
    last_duration: Option<Duration>,
}

impl PhraseBreakdownView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LookupState::AwaitingResponse
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LookupState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn analysis(&self) -> Option<&PhraseAnalysis> {
        self.analysis.as_ref()
    }

    /// Wall-clock duration of the last successful lookup
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn set_phrase(&mut self, phrase: impl Into<String>) {
        self.phrase = phrase.into();
    }

    /// Abandon any in-flight lookup; its response will be discarded
    pub fn reset(&mut self) {
        if let Some(in_flight) = self.pending.as_mut() {
            debug!(token = in_flight.token, "abandoning in-flight lookup");
            in_flight.abandoned = true;
        }
    }

    /// Start a lookup of the current phrase, clearing any previous error
    pub fn begin_lookup(&mut self) -> Result<PendingLookup, LookupRejected> {
        if self.is_loading() {
            return Err(LookupRejected::Busy);
        }
        if self.phrase.trim().is_empty() {
            return Err(LookupRejected::EmptyInput);
        }

        self.next_token += 1;
        self.pending = Some(InFlight {
            token: self.next_token,
            abandoned: false,
        });
        self.state = LookupState::AwaitingResponse;

        Ok(PendingLookup {
            token: self.next_token,
            phrase: self.phrase.clone(),
            started: Instant::now(),
        })
    }

    /// Settle a lookup. Returns `false` when the result was dropped because
    /// the lookup was abandoned or the ticket is unknown.
    pub fn complete(&mut self, ticket: PendingLookup, result: MtResult<PhraseAnalysis>) -> bool {
        let in_flight = match self.pending {
            Some(in_flight) if in_flight.token == ticket.token => in_flight,
            _ => {
                debug!(token = ticket.token, "ignoring unknown lookup ticket");
                return false;
            }
        };
        self.pending = None;

        if in_flight.abandoned {
            debug!(token = ticket.token, "discarding abandoned lookup response");
            self.state = LookupState::Idle;
            return false;
        }

        match result {
            Ok(analysis) => {
                let elapsed = ticket.started.elapsed();
                info!(
                    phrase = %ticket.phrase,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "phrase lookup complete"
                );
                self.analysis = Some(analysis);
                self.last_duration = Some(elapsed);
                self.state = LookupState::Idle;
            }
            Err(err) => {
                warn!(phrase = %ticket.phrase, error = %err, "phrase lookup failed");
                self.analysis = None;
                self.last_duration = None;
                self.state =
                    LookupState::Error(format!("Failed to fetch phrase analysis: {}", err));
            }
        }
        true
    }

    /// Look up the current phrase through `client`
    pub async fn lookup(&mut self, client: &dyn PhraseLookup) -> Result<(), LookupRejected> {
        let ticket = self.begin_lookup()?;
        let result = client.lookup_phrase(&ticket.phrase).await;
        self.complete(ticket, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::error::MtError;
    use crate::mt::mock::MockPhraseLookup;
    use crate::mt::phrase::sample_analysis;

    #[tokio::test]
    async fn test_successful_lookup_populates_analysis() {
        let client = MockPhraseLookup::new().with_analysis(sample_analysis());
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");

        view.lookup(&client).await.unwrap();

        assert_eq!(view.state(), &LookupState::Idle);
        assert_eq!(view.analysis(), Some(&sample_analysis()));
        assert!(view.last_duration().is_some());
        assert_eq!(view.error(), None);
    }

    #[tokio::test]
    async fn test_blank_phrase_is_rejected_without_call() {
        let client = MockPhraseLookup::new();
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("   ");

        assert_eq!(view.lookup(&client).await, Err(LookupRejected::EmptyInput));
        assert_eq!(client.call_count(), 0);
        assert_eq!(view.state(), &LookupState::Idle);
    }

    #[tokio::test]
    async fn test_failure_enters_error_state() {
        let client = MockPhraseLookup::failing(MtError::DecodeError(
            "Invalid phrase analysis: expected value".to_string(),
        ));
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");

        view.lookup(&client).await.unwrap();

        let message = view.error().unwrap();
        assert!(message.starts_with("Failed to fetch phrase analysis:"));
        assert!(message.contains("Decode error"));
        assert_eq!(view.analysis(), None);
        assert_eq!(view.last_duration(), None);
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_next_submit_clears_error() {
        let failing = MockPhraseLookup::failing(MtError::DecodeError("bad".to_string()));
        let working = MockPhraseLookup::new().with_analysis(sample_analysis());
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");

        view.lookup(&failing).await.unwrap();
        assert!(view.error().is_some());

        let ticket = view.begin_lookup().unwrap();
        assert_eq!(view.error(), None);
        assert!(view.is_loading());

        let result = working.lookup_phrase(&ticket.phrase).await;
        assert!(view.complete(ticket, result));
        assert_eq!(view.analysis(), Some(&sample_analysis()));
    }

    #[test]
    fn test_reentrant_lookup_is_rejected() {
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("안녕");
        let _ticket = view.begin_lookup().unwrap();
        assert_eq!(view.begin_lookup().unwrap_err(), LookupRejected::Busy);
    }

    #[test]
    fn test_reset_keeps_lookup_busy_until_ticket_settles() {
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("안녕");
        let old = view.begin_lookup().unwrap();
        let duplicate = old.clone();

        view.reset();
        assert!(view.is_loading());
        assert_eq!(view.begin_lookup().unwrap_err(), LookupRejected::Busy);

        assert!(!view.complete(old, Ok(sample_analysis())));
        assert_eq!(view.state(), &LookupState::Idle);
        assert_eq!(view.analysis(), None);

        let current = view.begin_lookup().unwrap();
        assert!(!view.complete(duplicate, Ok(sample_analysis())));
        assert!(view.is_loading());
        assert!(view.complete(current, Ok(sample_analysis())));
        assert_eq!(view.analysis(), Some(&sample_analysis()));
    }

    #[tokio::test]
    async fn test_reset_while_awaiting_never_starts_second_lookup() {
        let client = MockPhraseLookup::new().with_analysis(sample_analysis());
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");

        let ticket = view.begin_lookup().unwrap();
        view.reset();
        view.set_phrase("사랑해");
        assert_eq!(view.lookup(&client).await, Err(LookupRejected::Busy));
        assert_eq!(client.call_count(), 0);

        let result = client.lookup_phrase(&ticket.phrase).await;
        assert!(!view.complete(ticket, result));
        assert_eq!(view.analysis(), None);

        view.lookup(&client).await.unwrap();
        assert_eq!(view.analysis().unwrap().phrase, "사랑해");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_new_analysis_replaces_previous() {
        let client = MockPhraseLookup::new().with_analysis(sample_analysis());
        let mut view = PhraseBreakdownView::new();

        view.set_phrase("감사합니다");
        view.lookup(&client).await.unwrap();
        view.set_phrase("사랑해");
        view.lookup(&client).await.unwrap();

        assert_eq!(view.analysis().unwrap().phrase, "사랑해");
    }
}
