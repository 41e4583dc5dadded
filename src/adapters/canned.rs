//! Canned Advice Adapter
//!
//! In-memory `AdviceGenerator` with a fixed outcome. Used for offline runs
//! and tests.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::AdviceGenerator;
use crate::error::{Error, Result};

enum Outcome {
    Reply(String),
    Fail(fn() -> Error),
}

/// Generator that always gives the same answer and records every prompt.
pub struct CannedAdviceGenerator {
    outcome: Outcome,
    prompts: RwLock<Vec<String>>,
}

impl CannedAdviceGenerator {
    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(text.into()),
            prompts: RwLock::new(Vec::new()),
        }
    }

    /// Always fail with the error built by `error`.
    pub fn failing(error: fn() -> Error) -> Self {
        Self {
            outcome: Outcome::Fail(error),
            prompts: RwLock::new(Vec::new()),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().clone()
    }
}

impl std::fmt::Debug for CannedAdviceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CannedAdviceGenerator")
            .field("prompts", &self.prompts.read().len())
            .finish()
    }
}

#[async_trait]
impl AdviceGenerator for CannedAdviceGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.write().push(prompt.to_string());

        match &self.outcome {
            Outcome::Reply(text) => Ok(text.clone()),
            Outcome::Fail(error) => Err(error()),
        }
    }

    fn provider(&self) -> &str {
        "canned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_reply_records_prompt() {
        let generator = CannedAdviceGenerator::replying("ok");

        let reply = tokio_test::block_on(generator.generate("first"));

        assert_eq!(reply.unwrap(), "ok");
        assert_eq!(generator.prompts(), vec!["first".to_string()]);
    }

    #[test]
    fn test_failure_is_repeatable() {
        let generator = CannedAdviceGenerator::failing(|| Error::AdvisorResponse("boom".into()));

        for _ in 0..2 {
            let result = tokio_test::block_on(generator.generate("p"));
            assert_matches!(result, Err(Error::AdvisorResponse(msg)) if msg == "boom");
        }
        assert_eq!(generator.prompts().len(), 2);
    }
}
