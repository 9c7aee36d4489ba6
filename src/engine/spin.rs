use std::fmt;

use rand::Rng;

use crate::models::{CrowdType, Item};

/// Phase of the reveal sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
    Settled,
}

/// Identity of one spin. Justification results carry it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinId(u64);

impl fmt::Display for SpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a pick request that passed the empty-set check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStart {
    Started { id: SpinId, eligible: usize },
    /// A spin is already running; the request had no effect.
    AlreadySpinning,
}

/// The final pick of a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub id: SpinId,
    pub item: Item,
    /// Crowd type in force when the spin started.
    pub crowd: Option<CrowdType>,
}

/// Snapshot taken when a spin starts. Later preference changes do not touch it.
#[derive(Debug, Clone)]
struct ActiveSpin {
    id: SpinId,
    eligible: Vec<Item>,
    crowd: Option<CrowdType>,
    ticks_remaining: u32,
}

/// `Idle -> Spinning -> Settled` state machine.
///
/// `Settled` accepts a new spin exactly like `Idle`; only `Spinning` refuses.
#[derive(Debug, Clone, Default)]
pub struct SpinScheduler {
    state: SpinState,
    current_display: Option<Item>,
    settled: Option<Item>,
    settled_id: Option<SpinId>,
    active: Option<ActiveSpin>,
    next_id: u64,
}

impl SpinScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    pub fn current_display(&self) -> Option<&Item> {
        self.current_display.as_ref()
    }

    pub fn settled(&self) -> Option<&Item> {
        self.settled.as_ref()
    }

    /// Identity of the spin whose result is currently shown, if any.
    pub fn settled_id(&self) -> Option<SpinId> {
        self.settled_id
    }

    /// Ticks left before the spin may settle.
    pub fn ticks_remaining(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.ticks_remaining)
    }

    /// Enter `Spinning` with a snapshot of the eligible set.
    ///
    /// The caller has already rejected empty sets.
    pub(crate) fn start(
        &mut self,
        eligible: Vec<Item>,
        crowd: Option<CrowdType>,
        tick_count: u32,
    ) -> PickStart {
        if self.is_spinning() {
            return PickStart::AlreadySpinning;
        }

        self.next_id += 1;
        let id = SpinId(self.next_id);
        let size = eligible.len();

        self.active = Some(ActiveSpin {
            id,
            eligible,
            crowd,
            ticks_remaining: tick_count,
        });
        self.settled = None;
        self.settled_id = None;
        self.state = SpinState::Spinning;

        PickStart::Started { id, eligible: size }
    }

    /// One cosmetic draw. Returns the newly displayed item, or `None` when
    /// there is no spin or no tick left.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<&Item> {
        let active = self.active.as_mut()?;
        if active.ticks_remaining == 0 {
            return None;
        }

        let index = rng.gen_range(0..active.eligible.len());
        active.ticks_remaining -= 1;
        self.current_display = Some(active.eligible[index].clone());
        self.current_display.as_ref()
    }

    /// Final independent draw. Only allowed once every tick has run.
    pub fn settle<R: Rng>(&mut self, rng: &mut R) -> Option<Settlement> {
        match &self.active {
            Some(active) if active.ticks_remaining == 0 => {}
            _ => return None,
        }
        let active = self.active.take()?;

        let index = rng.gen_range(0..active.eligible.len());
        let item = active.eligible[index].clone();

        self.current_display = Some(item.clone());
        self.settled = Some(item.clone());
        self.settled_id = Some(active.id);
        self.state = SpinState::Settled;

        Some(Settlement {
            id: active.id,
            item,
            crowd: active.crowd,
        })
    }

    /// Drop the shown result and return to `Idle`. Ignored while spinning.
    pub fn clear(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.current_display = None;
        self.settled = None;
        self.settled_id = None;
        self.state = SpinState::Idle;
        true
    }
}
