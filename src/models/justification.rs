use serde::{Deserialize, Serialize};

/// Short reason/mood text attached to a settled item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub reason: String,
    pub mood: String,
}

impl Justification {
    pub fn new(reason: impl Into<String>, mood: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            mood: mood.into(),
        }
    }
}
