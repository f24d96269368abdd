use chrono::{DateTime, Local};

use crate::language::Language;

/// One completed translation, recorded for the current session only
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub source: Language,
    pub target: Language,
    pub original: String,
    pub translated: String,
    /// Set when the translated text is a fallback placeholder
    pub degraded: Option<String>,
    pub created_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Append-only list of history entries, oldest first
#[derive(Debug, Clone, Default)]
pub struct History(Vec<HistoryEntry>);

impl History {
    pub fn new() -> Self {
        History(Vec::new())
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }
}
