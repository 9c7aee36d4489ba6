//! Gemini `generateContent` client that asks for a JSON `{reason, mood}` object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::models::Justification;
use crate::recommend::client::{JustificationRequest, TextGenerator};
use crate::recommend::fallback::with_defaults;

const SYSTEM_INSTRUCTION: &str = "You are a cute yet professional food critic. You speak playfully \
and love emoji. Your goal is to make the user crave the dish they just drew.";

const TEMPERATURE: f64 = 0.9;

pub struct GeminiGenerator {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// The JSON object the model is asked to produce.
#[derive(Debug, Deserialize)]
struct ReasonPayload {
    reason: Option<String>,
    mood: Option<String>,
}

impl GeminiGenerator {
    pub fn new(base_url: &str, model: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.map(String::from),
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            config.resolved_api_key().as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn prompt(request: &JustificationRequest) -> String {
        let mut prompt = format!(
            "Why is {} a great choice for lunch today? Give one short, cute and irresistible reason.",
            request.item_name
        );
        if let Some(crowd) = request.crowd {
            prompt.push_str(&format!(
                " The diner is focused on {}; tie the reason to that goal.",
                crowd.label()
            ));
        }
        prompt
    }

    fn build_request(request: &JustificationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: Self::prompt(request),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json",
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "reason": {
                            "type": "STRING",
                            "description": "Recommendation reason, at most 30 words"
                        },
                        "mood": {
                            "type": "STRING",
                            "description": "A mood phrase such as 'Full of energy' or 'Pure happiness'"
                        }
                    },
                    "required": ["reason", "mood"]
                }),
            },
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Result<String, RecommendError> {
        let text = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(RecommendError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    fn parse_payload(text: &str) -> Result<Justification, RecommendError> {
        let payload: ReasonPayload = serde_json::from_str(text)?;
        Ok(with_defaults(payload.reason, payload.mood))
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: &JustificationRequest,
    ) -> Result<Justification, RecommendError> {
        let api_key = self.api_key.as_deref().ok_or(RecommendError::MissingApiKey)?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = Self::build_request(request);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| RecommendError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RecommendError::Http(e.without_url()))?;

        if let Some(err) = result.error.as_ref() {
            return Err(RecommendError::Api {
                status: status.as_u16(),
                body: err.message.clone(),
            });
        }

        let text = Self::extract_text(&result)?;
        Self::parse_payload(&text)
    }
}
