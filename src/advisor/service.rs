//! Advisor service
//!
//! Wraps an [`AdviceGenerator`] and absorbs its failures.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::adapters::GeminiAdviceGenerator;
use crate::capacity::Configuration;
use crate::domain::ports::AdviceGenerator;
use crate::error::{Error, Result};

/// Shown when no API key is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "To use AI features, please configure your API Key in the environment settings.";

/// Shown when the provider answered with no text.
pub const EMPTY_ADVICE_MESSAGE: &str = "Could not generate advice at this time.";

/// Shown when the provider could not be reached or rejected the request.
pub const UNAVAILABLE_MESSAGE: &str =
    "AI Advisor is currently unavailable. Please check your network or API quota.";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the advisory service
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// API key for the hosted model; advice is disabled without one
    pub api_key: Option<String>,

    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AdvisorConfig {
    /// API key, ignoring blank values.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// =============================================================================
// Prompt
// =============================================================================

/// Build the prompt sent to the model for one configuration.
pub fn build_prompt(config: &Configuration) -> String {
    format!(
        "Act as a senior storage engineer.\n\
         I am considering a storage configuration with the following specs:\n\
         - RAID Level: {}\n\
         - Number of Drives: {}\n\
         - Drive Size: {} {}\n\
         \n\
         Please provide a concise analysis (max 150 words) covering:\n\
         1. Is this a good choice for general purpose?\n\
         2. What is the biggest risk with this specific setup?\n\
         3. A recommended use case (e.g., database, media server, backup).\n\
         \n\
         Format with clear bullet points.",
        config.scheme, config.drive_count, config.drive_size, config.size_unit
    )
}

// =============================================================================
// Advisor
// =============================================================================

/// Fail-soft front for an advice generator.
#[derive(Clone, Default)]
pub struct Advisor {
    generator: Option<Arc<dyn AdviceGenerator>>,
}

impl Advisor {
    /// Create an advisor backed by the given generator.
    pub fn new(generator: Arc<dyn AdviceGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Create an advisor with no generator; every request gets the
    /// missing-credential message.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Create an advisor from configuration, using the hosted model when a
    /// credential is present.
    pub fn from_config(config: AdvisorConfig) -> Result<Self> {
        if config.credential().is_none() {
            info!("No advisory API key configured, AI advice disabled");
            return Ok(Self::disabled());
        }

        let generator = GeminiAdviceGenerator::new(config)?;
        Ok(Self::new(Arc::new(generator)))
    }

    /// Whether a generator is configured.
    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Get advice for a configuration. Never fails.
    #[instrument(skip(self), fields(scheme = %config.scheme, drives = config.drive_count))]
    pub async fn advise(&self, config: &Configuration) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_CREDENTIAL_MESSAGE.to_string();
        };

        let prompt = build_prompt(config);
        debug!(provider = generator.provider(), "Requesting advice");

        match generator.generate(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                warn!(provider = generator.provider(), "Advisor returned no text");
                EMPTY_ADVICE_MESSAGE.to_string()
            }
            Ok(text) => text,
            Err(Error::MissingCredential) => MISSING_CREDENTIAL_MESSAGE.to_string(),
            Err(e) => {
                warn!(provider = generator.provider(), "Advisor request failed: {}", e);
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field(
                "provider",
                &self.generator.as_ref().map(|g| g.provider().to_string()),
            )
            .finish()
    }
}
