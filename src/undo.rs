//! Undo state tracking
//!
//! The undo system needs to know where the user was when a change was made,
//! so the shell records every location change here under the `url` key.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use tracing::trace;

const HISTORY_LIMIT: usize = 256;

/// Keys the undo tracker understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UndoKey {
    Url,
}

impl UndoKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
        }
    }
}

impl fmt::Display for UndoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub key: UndoKey,
    pub value: String,
}

/// Current undo context plus a bounded log of writes
#[derive(Debug, Default)]
pub struct UndoTracker {
    state: BTreeMap<UndoKey, String>,
    history: VecDeque<UndoEntry>,
    writes: usize,
}

impl UndoTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_undo_state(&mut self, key: UndoKey, value: impl Into<String>) {
        let value = value.into();
        trace!(%key, %value, "undo state");

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(UndoEntry {
            key,
            value: value.clone(),
        });
        self.state.insert(key, value);
        self.writes += 1;
    }

    pub fn get_undo_state(&self, key: UndoKey) -> Option<&str> {
        self.state.get(&key).map(String::as_str)
    }

    /// Writes in the order they happened, oldest first
    pub fn history(&self) -> impl Iterator<Item = &UndoEntry> {
        self.history.iter()
    }

    /// Total writes since creation, including ones trimmed from history
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut tracker = UndoTracker::new();
        assert_eq!(tracker.get_undo_state(UndoKey::Url), None);

        tracker.set_undo_state(UndoKey::Url, "/budget");
        tracker.set_undo_state(UndoKey::Url, "/accounts?x=1");

        assert_eq!(tracker.get_undo_state(UndoKey::Url), Some("/accounts?x=1"));
        assert_eq!(tracker.write_count(), 2);
        assert_eq!(tracker.history().next().unwrap().value, "/budget");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = UndoTracker::new();
        for i in 0..(HISTORY_LIMIT + 10) {
            tracker.set_undo_state(UndoKey::Url, format!("/accounts/{}", i));
        }
        assert_eq!(tracker.history().count(), HISTORY_LIMIT);
        assert_eq!(tracker.write_count(), HISTORY_LIMIT + 10);
        assert_eq!(tracker.history().next().unwrap().value, "/accounts/10");

        tracker.set_undo_state(UndoKey::Url, "/budget");
        assert_eq!(tracker.write_count(), HISTORY_LIMIT + 11);
    }
}
