mod item;
mod justification;
mod preferences;

pub use item::{CrowdType, Item};
pub use justification::Justification;
pub use preferences::Preferences;
