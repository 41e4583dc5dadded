//! Gemini Advice Adapter
//!
//! Implements the `AdviceGenerator` port against the hosted Gemini
//! `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::advisor::AdvisorConfig;
use crate::domain::ports::AdviceGenerator;
use crate::error::{Error, Result};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, empty if there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Hosted Gemini model as an advice generator.
pub struct GeminiAdviceGenerator {
    config: AdvisorConfig,
    client: Client,
}

impl GeminiAdviceGenerator {
    /// Create a new Gemini adapter
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl std::fmt::Debug for GeminiAdviceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdviceGenerator")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

#[async_trait]
impl AdviceGenerator for GeminiAdviceGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.credential().ok_or(Error::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Requesting advice from {}", self.url());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(Error::AdvisorConnection)?;

        if !response.status().is_success() {
            return Err(Error::AdvisorResponse(format!(
                "Request failed with status: {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::AdvisorResponse(e.to_string()))?;

        Ok(parsed.text())
    }

    fn provider(&self) -> &str {
        "gemini"
    }
}
