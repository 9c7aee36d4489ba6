use async_trait::async_trait;

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::models::{CrowdType, Justification};
use crate::recommend::fallback::fallback_justification;
use crate::recommend::gemini::GeminiGenerator;

/// What the generator is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JustificationRequest {
    pub item_name: String,
    pub crowd: Option<CrowdType>,
}

impl JustificationRequest {
    pub fn new(item_name: impl Into<String>, crowd: Option<CrowdType>) -> Self {
        Self {
            item_name: item_name.into(),
            crowd,
        }
    }
}

/// A remote text-generation service. May fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(
        &self,
        request: &JustificationRequest,
    ) -> Result<Justification, RecommendError>;
}

/// Infallible front for a [`TextGenerator`].
///
/// Every failure is logged and replaced by a canned justification, so the
/// engine never sees an error from this side.
pub struct RecommendationClient {
    generator: Option<Box<dyn TextGenerator>>,
}

impl RecommendationClient {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A client that never calls out and always answers locally.
    pub fn offline() -> Self {
        Self { generator: None }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        if !config.enabled {
            tracing::info!("text generation disabled; using local justifications");
            return Self::offline();
        }
        Self::new(Box::new(GeminiGenerator::from_config(config)))
    }

    pub fn is_offline(&self) -> bool {
        self.generator.is_none()
    }

    pub async fn justify(&self, request: &JustificationRequest) -> Justification {
        let Some(generator) = &self.generator else {
            return local_justification();
        };

        match generator.generate(request).await {
            Ok(justification) => justification,
            Err(err) => {
                tracing::warn!(
                    generator = generator.name(),
                    item = %request.item_name,
                    error = %err,
                    "justification request failed; using local fallback"
                );
                local_justification()
            }
        }
    }
}

fn local_justification() -> Justification {
    let mut rng = rand::thread_rng();
    fallback_justification(&mut rng)
}
