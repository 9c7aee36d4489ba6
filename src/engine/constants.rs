/// Cosmetic draws shown before the final pick.
pub const DEFAULT_TICK_COUNT: u32 = 20;

/// Delay between two cosmetic draws, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 80;

/// Maximum number of remembered picks.
pub const HISTORY_LIMIT: usize = 5;
