use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{CrowdType, Preferences};

/// Lunch Picker: can't decide what to eat? Let the wheel choose.
#[derive(Parser, Debug)]
#[command(name = "lunch_picker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a catalog JSON file. Uses the built-in catalog when omitted.
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to an engine config JSON file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Interactive session: pick, adjust preferences, browse history.
    #[default]
    Session,

    /// Run a single pick with the given filters and exit.
    Spin {
        #[command(flatten)]
        filters: FilterArgs,

        /// Skip the text generator and use local recommendations.
        #[arg(long)]
        offline: bool,
    },

    /// List the items that pass the given filters.
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Preference flags shared by the non-interactive commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only vegetarian items.
    #[arg(long)]
    pub vegetarian: bool,

    /// Tags to exclude (comma-separated or repeated), e.g. `-x spicy,pork`.
    #[arg(short = 'x', long = "exclude", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Crowd type: normal, fat-loss or muscle-gain.
    #[arg(long)]
    pub crowd: Option<CrowdType>,
}

impl FilterArgs {
    /// Build preferences, resolving tag names against the catalog vocabulary.
    pub fn to_preferences(&self, catalog: &Catalog) -> Result<Preferences> {
        let mut preferences = Preferences {
            only_vegetarian: self.vegetarian,
            ..Preferences::default()
        };
        for raw in &self.exclude {
            let tag = catalog.resolve_tag(raw)?;
            preferences.excluded_tags.insert(tag);
        }
        Ok(preferences)
    }
}
