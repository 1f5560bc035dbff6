//! Bounded per-session analysis history

use std::collections::VecDeque;

use platelens_types::HistoryEntry;

/// Default number of entries the dashboard keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Rolling in-memory history with eviction-on-append semantics.
///
/// Owned by the session that fills it; no cross-session sharing, no
/// persistence.
#[derive(Debug)]
pub struct RollingHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest when at capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries newest first, the order the dashboard lists them.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Manual clear action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
