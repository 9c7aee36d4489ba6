pub mod constants;
pub mod filter;
pub mod history;
pub mod session;
pub mod spin;
pub mod state;
pub mod ticks;

pub use constants::*;
pub use filter::{eligible_count, filter, is_eligible};
pub use history::History;
pub use session::{PickOutcome, SelectionEngine};
pub use spin::{PickStart, Settlement, SpinId, SpinScheduler, SpinState};
pub use state::{EngineSnapshot, EngineState};
pub use ticks::{ImmediateTicks, TickSource, TokioTicks};
