//! Drive size units
//!
//! All capacity arithmetic happens in terabytes. Sizes entered in GB or MB
//! are scaled with decimal (SI) factors, which is how drive vendors label
//! their products.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Gigabytes per terabyte.
const GB_PER_TB: f64 = 1_000.0;

/// Megabytes per terabyte.
const MB_PER_TB: f64 = 1_000_000.0;

/// Unit a drive size is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeUnit {
    #[default]
    Tb,
    Gb,
    Mb,
}

impl SizeUnit {
    /// Number of this unit in one terabyte.
    pub fn per_terabyte(&self) -> f64 {
        match self {
            SizeUnit::Tb => 1.0,
            SizeUnit::Gb => GB_PER_TB,
            SizeUnit::Mb => MB_PER_TB,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Tb => write!(f, "TB"),
            SizeUnit::Gb => write!(f, "GB"),
            SizeUnit::Mb => write!(f, "MB"),
        }
    }
}

impl FromStr for SizeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tb" | "t" => Ok(SizeUnit::Tb),
            "gb" | "g" => Ok(SizeUnit::Gb),
            "mb" | "m" => Ok(SizeUnit::Mb),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown size unit '{}' (expected TB, GB or MB)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for SizeUnit {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SizeUnit> for String {
    fn from(unit: SizeUnit) -> Self {
        unit.to_string()
    }
}

/// Convert a drive size into terabytes. No rounding is applied.
pub fn to_canonical_unit(size: f64, unit: SizeUnit) -> f64 {
    match unit {
        SizeUnit::Tb => size,
        SizeUnit::Gb | SizeUnit::Mb => size / unit.per_terabyte(),
    }
}

/// Render a terabyte value at a human scale.
///
/// `>= 1 TB` keeps two decimals, anything from 1 GB up is whole GB and the
/// rest is whole MB.
pub fn format_capacity(tb: f64) -> String {
    if tb >= 1.0 {
        format!("{:.2} TB", tb)
    } else if tb >= 0.001 {
        format!("{:.0} GB", (tb * GB_PER_TB).round())
    } else {
        format!("{:.0} MB", (tb * MB_PER_TB).round())
    }
}
