use std::collections::VecDeque;

use crate::engine::constants::HISTORY_LIMIT;
use crate::models::Item;

/// Recent picks, most recent first.
///
/// Entries are unique by `name` (exact match): recording a name that is
/// already present moves it to the front instead of adding a second entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Item>,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Record a settled pick and return the updated entries.
    pub fn record(&mut self, item: Item) -> &VecDeque<Item> {
        if let Some(pos) = self.entries.iter().position(|e| e.name == item.name) {
            self.entries.remove(pos);
        }
        self.entries.push_front(item);
        self.entries.truncate(self.limit);
        &self.entries
    }

    pub fn entries(&self) -> impl Iterator<Item = &Item> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<Item> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
