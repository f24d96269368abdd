//! View state for the two screens: translator and phrase breakdown.
//!
//! Each view owns its state exclusively and is mutated only through its own
//! methods; the views never share anything.

pub mod breakdown;
pub mod history;
pub mod translator;

pub use breakdown::{LookupRejected, LookupState, PendingLookup, PhraseBreakdownView};
pub use history::{History, HistoryEntry};
pub use translator::{
    Completion, FAILURE_MESSAGE, PendingTranslation, TranslateRejected, TranslatorState,
    TranslatorView,
};
