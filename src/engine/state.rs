use rand::Rng;

use crate::catalog::Catalog;
use crate::engine::constants::DEFAULT_TICK_COUNT;
use crate::engine::filter::{eligible_count, filter};
use crate::engine::history::History;
use crate::engine::spin::{PickStart, Settlement, SpinId, SpinScheduler, SpinState};
use crate::error::{PickError, Result};
use crate::models::{CrowdType, Item, Justification, Preferences};

/// Read-only view of the engine for a presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSnapshot {
    pub state: SpinState,
    pub current_display: Option<Item>,
    pub settled: Option<Item>,
    pub justification: Option<Justification>,
    pub justification_pending: bool,
    pub history: Vec<Item>,
    pub eligible_count: usize,
    pub preferences: Preferences,
    pub crowd: Option<CrowdType>,
}

/// All mutable session state in one place.
///
/// Every transition is a method here; the async driver only sequences them.
#[derive(Debug, Clone)]
pub struct EngineState {
    preferences: Preferences,
    crowd: Option<CrowdType>,
    spin: SpinScheduler,
    history: History,
    justification: Option<Justification>,
    justification_pending: bool,
    tick_count: u32,
}

impl EngineState {
    pub fn new(tick_count: u32) -> Self {
        Self {
            preferences: Preferences::default(),
            crowd: None,
            spin: SpinScheduler::new(),
            history: History::new(),
            justification: None,
            justification_pending: false,
            tick_count,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn crowd(&self) -> Option<CrowdType> {
        self.crowd
    }

    pub fn spin_state(&self) -> SpinState {
        self.spin.state()
    }

    pub fn current_display(&self) -> Option<&Item> {
        self.spin.current_display()
    }

    pub fn settled(&self) -> Option<&Item> {
        self.spin.settled()
    }

    pub fn justification(&self) -> Option<&Justification> {
        self.justification.as_ref()
    }

    pub fn justification_pending(&self) -> bool {
        self.justification_pending
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn eligible_count(&self, catalog: &Catalog) -> usize {
        eligible_count(catalog.items(), &self.preferences, self.crowd)
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    pub fn set_only_vegetarian(&mut self, only_vegetarian: bool) {
        self.preferences.only_vegetarian = only_vegetarian;
    }

    /// Returns `true` when the tag is excluded afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.preferences.toggle_tag(tag)
    }

    /// Change the crowd type.
    ///
    /// A new value drops the displayed item and any justification, pending or
    /// not. A running spin keeps its own snapshot and is left alone.
    pub fn set_crowd_type(&mut self, crowd: Option<CrowdType>) -> bool {
        if self.crowd == crowd {
            return false;
        }
        self.crowd = crowd;

        if self.spin.clear() {
            self.justification = None;
            self.justification_pending = false;
        }
        true
    }

    /// Handle a pick request.
    ///
    /// A request while spinning is ignored. An empty eligible set is an error
    /// and leaves the state untouched.
    pub fn request_pick(&mut self, catalog: &Catalog) -> Result<PickStart> {
        if self.spin.is_spinning() {
            tracing::debug!("pick requested while spinning; ignored");
            return Ok(PickStart::AlreadySpinning);
        }

        let eligible: Vec<Item> = filter(catalog.items(), &self.preferences, self.crowd)
            .into_iter()
            .cloned()
            .collect();

        if eligible.is_empty() {
            return Err(PickError::EmptyEligibleSet);
        }

        self.justification = None;
        self.justification_pending = false;

        let start = self.spin.start(eligible, self.crowd, self.tick_count);
        if let PickStart::Started { id, eligible } = start {
            tracing::info!(spin = %id, eligible, "spin started");
        }
        Ok(start)
    }

    /// One cosmetic draw during `Spinning`.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<&Item> {
        let shown = self.spin.tick(rng);
        if let Some(item) = shown {
            tracing::debug!(item = %item.name, "tick");
        }
        shown
    }

    /// Final draw: moves to `Settled`, records history and marks a
    /// justification as pending.
    pub fn settle<R: Rng>(&mut self, rng: &mut R) -> Option<Settlement> {
        let settlement = self.spin.settle(rng)?;
        self.history.record(settlement.item.clone());
        self.justification_pending = true;

        tracing::info!(spin = %settlement.id, item = %settlement.item.name, "spin settled");
        Some(settlement)
    }

    /// Attach a justification if it belongs to the spin currently shown.
    ///
    /// Results for superseded or invalidated spins are discarded.
    pub fn apply_justification(&mut self, id: SpinId, justification: Justification) -> bool {
        let current = self.spin.state() == SpinState::Settled && self.spin.settled_id() == Some(id);
        if !current {
            tracing::debug!(spin = %id, "discarding stale justification");
            return false;
        }

        self.justification = Some(justification);
        self.justification_pending = false;
        true
    }

    /// Give up on the pending justification when its fetch can no longer
    /// deliver. The settled item stays on display without a note.
    pub fn abandon_justification(&mut self) -> bool {
        if !self.justification_pending {
            return false;
        }
        self.justification_pending = false;
        tracing::warn!("justification fetch ended without a result");
        true
    }

    pub fn snapshot(&self, catalog: &Catalog) -> EngineSnapshot {
        EngineSnapshot {
            state: self.spin.state(),
            current_display: self.spin.current_display().cloned(),
            settled: self.spin.settled().cloned(),
            justification: self.justification.clone(),
            justification_pending: self.justification_pending,
            history: self.history.to_vec(),
            eligible_count: self.eligible_count(catalog),
            preferences: self.preferences.clone(),
            crowd: self.crowd,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_COUNT)
    }
}
