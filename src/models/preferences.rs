use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// User-set filter preferences. Lives for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub only_vegetarian: bool,
    pub excluded_tags: BTreeSet<String>,
}

impl Preferences {
    pub fn new(only_vegetarian: bool, excluded_tags: &[&str]) -> Self {
        Self {
            only_vegetarian,
            excluded_tags: excluded_tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Exclude the tag if it is allowed, allow it again if it is excluded.
    ///
    /// Returns `true` when the tag is excluded afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.excluded_tags.remove(tag) {
            false
        } else {
            self.excluded_tags.insert(tag.to_string());
            true
        }
    }

    #[inline]
    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags.contains(tag)
    }
}
