use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Catalog, TagLabel, builtin_tag_labels};
use crate::error::{PickError, Result};
use crate::models::Item;

/// Accepted catalog file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Full {
        items: Vec<Item>,
        #[serde(default, rename = "tagLabels", alias = "tag_labels")]
        tag_labels: Option<Vec<TagLabel>>,
    },
    Items(Vec<Item>),
}

/// Load a catalog from a JSON file.
///
/// Accepts either `{"items": [...], "tagLabels": [...]}` or a bare item array.
/// Without explicit labels the built-in tag labels are used. Duplicate names
/// are kept as-is.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let parsed: CatalogFile = serde_json::from_str(&content)?;

    let (items, tag_labels) = match parsed {
        CatalogFile::Full { items, tag_labels } => {
            (items, tag_labels.unwrap_or_else(builtin_tag_labels))
        }
        CatalogFile::Items(items) => (items, builtin_tag_labels()),
    };

    if let Some(blank) = items.iter().position(|i| i.name.trim().is_empty()) {
        return Err(PickError::InvalidInput(format!(
            "catalog item #{} has an empty name",
            blank + 1
        )));
    }

    if items.is_empty() {
        tracing::warn!("loaded an empty catalog; every pick will be refused");
    }

    Ok(Catalog::new(items, tag_labels))
}
