//! The candidate pool: an immutable list of items plus the tag vocabulary.

mod builtin;
mod persistence;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{PickError, Result};
use crate::models::Item;

pub use builtin::{BUILTIN_TAG_LABELS, builtin_items, builtin_tag_labels};
pub use persistence::load_catalog;

/// Minimum Jaro-Winkler similarity for a fuzzy tag match.
const TAG_MATCH_THRESHOLD: f64 = 0.85;

/// Display label for a tag identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLabel {
    pub tag: String,
    pub label: String,
}

impl TagLabel {
    pub fn new(tag: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
        }
    }
}

/// Static catalog supplied at startup. Never mutated by the engine.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    tag_labels: Vec<TagLabel>,
}

impl Catalog {
    pub fn new(items: Vec<Item>, tag_labels: Vec<TagLabel>) -> Self {
        Self { items, tag_labels }
    }

    /// The lunch catalog bundled with the binary.
    pub fn builtin() -> Self {
        Self::new(builtin_items(), builtin_tag_labels())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn tag_labels(&self) -> &[TagLabel] {
        &self.tag_labels
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Label for a tag, falling back to the identifier itself.
    pub fn label_for<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_labels
            .iter()
            .find(|l| l.tag == tag)
            .map(|l| l.label.as_str())
            .unwrap_or(tag)
    }

    /// All known tags: labelled ones first, then any unlabelled tags seen on items.
    pub fn tag_vocabulary(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tag_labels.iter().map(|l| l.tag.as_str()).collect();
        for item in &self.items {
            for tag in &item.tags {
                if !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    /// Resolve user input to a known tag identifier.
    ///
    /// Matches identifiers and labels case-insensitively, then falls back to
    /// the closest fuzzy match.
    pub fn resolve_tag(&self, input: &str) -> Result<String> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Err(PickError::InvalidInput("empty tag".to_string()));
        }

        let vocabulary = self.tag_vocabulary();

        if let Some(tag) = vocabulary
            .iter()
            .find(|t| t.to_lowercase() == needle || self.label_for(t).to_lowercase() == needle)
        {
            return Ok(tag.to_string());
        }

        let best = vocabulary
            .iter()
            .map(|t| {
                let by_tag = jaro_winkler(&t.to_lowercase(), &needle);
                let by_label = jaro_winkler(&self.label_for(t).to_lowercase(), &needle);
                (*t, by_tag.max(by_label))
            })
            .filter(|(_, score)| *score >= TAG_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((tag, score)) => {
                tracing::debug!(input, tag, score, "fuzzy-matched tag");
                Ok(tag.to_string())
            }
            None => Err(PickError::InvalidInput(format!(
                "unknown tag '{}' (known: {})",
                input,
                vocabulary.join(", ")
            ))),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
