//! Domain Layer
//!
//! Boundary abstractions for the calculator. The capacity model in
//! [`crate::capacity`] is pure and needs no ports; only the advisory
//! collaborator crosses a process boundary.
//!
//! # Usage
//!
//! ```ignore
//! use raidcalc::domain::ports::AdviceGenerator;
//!
//! async fn ask<G: AdviceGenerator>(generator: &G, prompt: &str) -> Result<String> {
//!     generator.generate(prompt).await
//! }
//! ```

pub mod ports;

pub use ports::AdviceGenerator;
