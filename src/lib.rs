pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod recommend;
pub mod simulate;

pub use catalog::Catalog;
pub use error::{PickError, Result};
pub use models::{CrowdType, Item, Justification, Preferences};
