//! Batch runner: drives many spins without the tick delay and tallies the
//! settled picks. Used to eyeball the fairness of the uniform draw.

mod output;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::engine::{DEFAULT_TICK_COUNT, EngineState, PickStart};
use crate::error::{PickError, Result};
use crate::models::{CrowdType, Preferences};

pub use output::{print_report, write_csv};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub spins: usize,
    pub seed: u64,
    pub tick_count: u32,
    pub preferences: Preferences,
    pub crowd: Option<CrowdType>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spins: 1000,
            seed: 123,
            tick_count: DEFAULT_TICK_COUNT,
            preferences: Preferences::default(),
            crowd: None,
        }
    }
}

/// How often one item was settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct PickCount {
    pub name: String,
    pub emoji: String,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub spins: usize,
    /// Size of the eligible set for the configured filters.
    pub eligible: usize,
    /// Spins that settled on the same item as the spin before.
    pub repeats: usize,
    /// Sorted by count, most picked first.
    pub counts: Vec<PickCount>,
    /// Final history, most recent first.
    pub history: Vec<String>,
}

impl SimulationReport {
    /// Largest deviation of any item's share from the uniform share.
    pub fn max_deviation(&self) -> f64 {
        if self.eligible == 0 {
            return 0.0;
        }
        let expected = 1.0 / self.eligible as f64;
        self.counts
            .iter()
            .map(|c| (c.share - expected).abs())
            .fold(0.0, f64::max)
    }
}

/// Run `config.spins` full spins against the catalog.
///
/// Items that share a name are tallied together.
pub fn run_simulation(catalog: &Catalog, config: &SimulationConfig) -> Result<SimulationReport> {
    if config.spins == 0 {
        return Err(PickError::InvalidInput("spins must be at least 1".to_string()));
    }
    if config.tick_count == 0 {
        return Err(PickError::InvalidInput(
            "tick_count must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut state = EngineState::new(config.tick_count);
    state.set_preferences(config.preferences.clone());
    state.set_crowd_type(config.crowd);

    let eligible = state.eligible_count(catalog);
    let mut tally: BTreeMap<String, (String, usize)> = BTreeMap::new();
    let mut previous: Option<String> = None;
    let mut repeats = 0;

    for _ in 0..config.spins {
        let PickStart::Started { .. } = state.request_pick(catalog)? else {
            return Err(PickError::InvalidInput(
                "engine was still spinning".to_string(),
            ));
        };
        for _ in 0..config.tick_count {
            state.tick(&mut rng);
        }
        let Some(settlement) = state.settle(&mut rng) else {
            return Err(PickError::InvalidInput("spin did not settle".to_string()));
        };

        let name = settlement.item.name;
        if previous.as_deref() == Some(name.as_str()) {
            repeats += 1;
        }
        tally
            .entry(name.clone())
            .or_insert_with(|| (settlement.item.emoji.clone(), 0))
            .1 += 1;
        previous = Some(name);
    }

    let mut counts: Vec<PickCount> = tally
        .into_iter()
        .map(|(name, (emoji, count))| PickCount {
            name,
            emoji,
            count,
            share: count as f64 / config.spins as f64,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    tracing::debug!(spins = config.spins, eligible, distinct = counts.len(), "simulation done");

    Ok(SimulationReport {
        spins: config.spins,
        eligible,
        repeats,
        counts,
        history: state.history().entries().map(|i| i.name.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Item::new("A", "🥗", "Salad", true, &["light"]),
                Item::new("B", "🍖", "Grill", false, &["spicy"]),
                Item::new("C", "🍜", "Noodles", false, &["soup"]),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = SimulationConfig {
            spins: 200,
            ..SimulationConfig::default()
        };
        let a = run_simulation(&catalog(), &config).unwrap();
        let b = run_simulation(&catalog(), &config).unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_counts_cover_every_spin() {
        let config = SimulationConfig {
            spins: 300,
            ..SimulationConfig::default()
        };
        let report = run_simulation(&catalog(), &config).unwrap();
        let total: usize = report.counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 300);
        assert_eq!(report.eligible, 3);
        assert_eq!(report.counts.len(), 3);
        assert!(report.history.len() <= 3);
    }

    #[test]
    fn test_vegetarian_only_always_picks_a() {
        let config = SimulationConfig {
            spins: 50,
            preferences: Preferences {
                only_vegetarian: true,
                ..Preferences::default()
            },
            ..SimulationConfig::default()
        };
        let report = run_simulation(&catalog(), &config).unwrap();
        assert_eq!(report.counts.len(), 1);
        assert_eq!(report.counts[0].name, "A");
        assert_eq!(report.repeats, 49);
        assert_eq!(report.history, vec!["A".to_string()]);
    }

    #[test]
    fn test_empty_eligible_set_is_an_error() {
        let mut preferences = Preferences::default();
        for tag in ["light", "spicy", "soup"] {
            preferences.toggle_tag(tag);
        }
        let config = SimulationConfig {
            preferences,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            run_simulation(&catalog(), &config),
            Err(PickError::EmptyEligibleSet)
        ));
    }

    #[test]
    fn test_zero_spins_rejected() {
        let config = SimulationConfig {
            spins: 0,
            ..SimulationConfig::default()
        };
        assert!(run_simulation(&catalog(), &config).is_err());
    }
}
