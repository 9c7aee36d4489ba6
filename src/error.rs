use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("No eligible items: the current preferences exclude everything")]
    EmptyEligibleSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PickError>;

/// Failures of a text generator. These never leave the recommendation layer;
/// the client swaps them for a fallback justification.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Empty response from generator")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}
