pub mod client;
pub mod fallback;
pub mod gemini;

pub use client::{JustificationRequest, RecommendationClient, TextGenerator};
pub use fallback::{
    DEFAULT_MOOD, DEFAULT_REASON, FALLBACK_MOOD, FALLBACK_REASONS, fallback_justification,
    with_defaults,
};
pub use gemini::GeminiGenerator;
