//! Capacity Module
//!
//! The arithmetic core of the calculator.
//!
//! # Components
//!
//! - **Units** (`units.rs`): converts drive sizes to terabytes and renders
//!   capacities at a human scale
//! - **Schemes** (`scheme.rs`): the seven supported RAID levels and their
//!   static metadata (minimum drive counts, descriptions, pros and cons)
//! - **Model** (`model.rs`): `compute_capacity`, mapping a configuration to
//!   usable, protection and unused capacity plus performance and fault
//!   tolerance labels
//!
//! # Usage
//!
//! ```
//! use raidcalc::capacity::{compute_capacity, Configuration, Scheme, SizeUnit};
//!
//! let config = Configuration::new(Scheme::Raid5, 4, 4.0, SizeUnit::Tb);
//! let result = compute_capacity(&config);
//!
//! assert_eq!(result.readable_usable, "12.00 TB");
//! assert_eq!(result.efficiency, 75.0);
//! ```

pub mod model;
pub mod scheme;
pub mod units;

#[cfg(test)]
mod proptest;

pub use model::{
    compute_capacity, CapacityResult, Configuration, FaultTolerance, Throughput,
    NESTED_PARITY_GROUPS,
};
pub use scheme::{RiskProfile, Scheme, SchemeMetadata};
pub use units::{format_capacity, to_canonical_unit, SizeUnit};
