use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PickError;

/// Who the pick is for. Items may restrict themselves to a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrowdType {
    Normal,
    FatLoss,
    MuscleGain,
}

impl CrowdType {
    pub const ALL: [CrowdType; 3] = [CrowdType::Normal, CrowdType::FatLoss, CrowdType::MuscleGain];

    /// Wire and CLI identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            CrowdType::Normal => "normal",
            CrowdType::FatLoss => "fat-loss",
            CrowdType::MuscleGain => "muscle-gain",
        }
    }

    /// Human-readable label used in prompts and the generator request.
    pub fn label(self) -> &'static str {
        match self {
            CrowdType::Normal => "everyday eating",
            CrowdType::FatLoss => "losing fat",
            CrowdType::MuscleGain => "building muscle",
        }
    }
}

impl fmt::Display for CrowdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrowdType {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        CrowdType::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                PickError::InvalidInput(format!(
                    "unknown crowd type '{}' (expected normal, fat-loss or muscle-gain)",
                    s
                ))
            })
    }
}

/// A candidate lunch item.
///
/// Names are not guaranteed unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    pub emoji: String,

    /// Display label only; never used for filtering.
    pub category: String,

    #[serde(rename = "isVegetarian", alias = "is_vegetarian", default)]
    pub is_vegetarian: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    /// `None` means the item suits every crowd type.
    #[serde(
        rename = "suitableFor",
        alias = "suitable_for",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub suitable_for: Option<Vec<CrowdType>>,
}

impl Item {
    pub fn new(name: &str, emoji: &str, category: &str, is_vegetarian: bool, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            category: category.to_string(),
            is_vegetarian,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            suitable_for: None,
        }
    }

    /// Restrict the item to the given crowd types.
    pub fn for_crowds(mut self, crowds: &[CrowdType]) -> Self {
        self.suitable_for = Some(crowds.to_vec());
        self
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[inline]
    pub fn suits(&self, crowd: CrowdType) -> bool {
        self.suitable_for
            .as_ref()
            .map(|crowds| crowds.contains(&crowd))
            .unwrap_or(true)
    }

    /// Short name for compact listings: the part before the first `+`.
    pub fn short_name(&self) -> &str {
        self.name.split('+').next().unwrap_or(&self.name).trim()
    }
}
