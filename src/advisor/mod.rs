//! Advisor module
//!
//! Asks a hosted text-generation model for a short opinion on an array
//! configuration. Always yields displayable text: missing credentials and
//! provider failures turn into fixed fallback messages.

mod service;

pub use service::{
    build_prompt, Advisor, AdvisorConfig, EMPTY_ADVICE_MESSAGE, MISSING_CREDENTIAL_MESSAGE,
    UNAVAILABLE_MESSAGE,
};
