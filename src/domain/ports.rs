//! Domain Ports (DDD Port/Adapter Pattern)
//!
//! Abstractions the calculator depends on at its boundary. Infrastructure
//! adapters implement these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                    Ports (Traits)                    │    │
//! │  │                   AdviceGenerator                    │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                  Adapters (Impls)                    │    │
//! │  │     GeminiAdviceGenerator │ CannedAdviceGenerator    │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::Result;

// =============================================================================
// Advisory Port
// =============================================================================

/// Port for generating advisory prose from a prompt.
///
/// Implementations may fail; callers that must not fail wrap this in
/// [`crate::advisor::Advisor`], which maps every error to a fallback message.
///
/// # Example
///
/// ```ignore
/// struct HostedModel { /* ... */ }
///
/// #[async_trait]
/// impl AdviceGenerator for HostedModel {
///     async fn generate(&self, prompt: &str) -> Result<String> {
///         // Call the text-generation endpoint
///     }
/// }
/// ```
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Generate advice text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Short name of the backing provider, used in logs.
    fn provider(&self) -> &str;
}
