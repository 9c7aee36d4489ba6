use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Justification;

/// Used when the generator returns no reason.
pub const DEFAULT_REASON: &str = "This is the best choice prepared just for you, go enjoy it! ✨";

/// Used when the generator returns no mood.
pub const DEFAULT_MOOD: &str = "Looking forward to it";

/// Mood attached to every locally synthesized justification.
pub const FALLBACK_MOOD: &str = "Lucky pick";

pub const FALLBACK_REASONS: [&str; 4] = [
    "This lunch was made for you! A full stomach is what powers the afternoon ✨",
    "Smell that? Today's most comforting bowl is calling your name! 🥘",
    "Life is hard enough already, treat yourself to something good at noon! 🍓",
    "Trust your gut: this dish will wake up every bit of afternoon energy! 🚀",
];

/// A random canned justification.
pub fn fallback_justification<R: Rng>(rng: &mut R) -> Justification {
    let reason = FALLBACK_REASONS
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_REASON);
    Justification::new(reason, FALLBACK_MOOD)
}

/// Fill in defaults for blank generator fields.
pub fn with_defaults(reason: Option<String>, mood: Option<String>) -> Justification {
    let reason = reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REASON.to_string());
    let mood = mood
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MOOD.to_string());
    Justification::new(reason, mood)
}
