//! raidcalc - RAID Capacity Calculator
//!
//! Computes usable capacity, redundancy overhead, fault tolerance and
//! qualitative performance for the common RAID levels, and renders the
//! results as reports and side-by-side comparisons.
//!
//! # Architecture
//!
//! ```text
//! Configuration → Capacity Model → CapacityResult → Reports / Comparison
//!                                        ┆
//!                         Advisor (optional, fails soft)
//! ```
//!
//! # Modules
//!
//! - [`capacity`] - Unit conversion, scheme metadata and the capacity model
//! - [`comparison`] - Multi-configuration comparison and stacked totals
//! - [`advisor`] - Fail-soft AI advice for a configuration
//! - [`adapters`] - Advice generator implementations
//! - [`domain`] - Ports (trait abstractions) at the system boundary
//! - [`report`] - Plain-text rendering
//! - [`error`] - Error types

pub mod adapters;
pub mod advisor;
pub mod capacity;
pub mod comparison;
pub mod domain;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use advisor::{Advisor, AdvisorConfig};
pub use capacity::{compute_capacity, CapacityResult, Configuration, Scheme, SizeUnit};
pub use comparison::Comparison;
pub use error::{Error, Result};
