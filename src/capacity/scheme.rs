//! RAID levels and their static metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::NESTED_PARITY_GROUPS;
use crate::error::{Error, Result};

// =============================================================================
// Scheme
// =============================================================================

/// Redundancy layout of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scheme {
    /// Striping, no redundancy
    Raid0,
    /// Mirroring
    Raid1,
    /// Striping with single distributed parity
    Raid5,
    /// Striping with double distributed parity
    Raid6,
    /// Stripe of mirrors
    Raid10,
    /// Stripe of RAID 5 groups
    Raid50,
    /// Stripe of RAID 6 groups
    Raid60,
}

impl Scheme {
    /// Every scheme, in catalogue order.
    pub const ALL: [Scheme; 7] = [
        Scheme::Raid0,
        Scheme::Raid1,
        Scheme::Raid5,
        Scheme::Raid6,
        Scheme::Raid10,
        Scheme::Raid50,
        Scheme::Raid60,
    ];

    /// Static metadata record for this scheme.
    pub fn metadata(&self) -> &'static SchemeMetadata {
        match self {
            Scheme::Raid0 => &RAID0,
            Scheme::Raid1 => &RAID1,
            Scheme::Raid5 => &RAID5,
            Scheme::Raid6 => &RAID6,
            Scheme::Raid10 => &RAID10,
            Scheme::Raid50 => &RAID50,
            Scheme::Raid60 => &RAID60,
        }
    }

    /// Minimum number of drives for a valid array.
    pub fn min_drives(&self) -> u32 {
        self.metadata().min_drives
    }

    /// Numeric level as written after "RAID".
    pub fn level(&self) -> &'static str {
        match self {
            Scheme::Raid0 => "0",
            Scheme::Raid1 => "1",
            Scheme::Raid5 => "5",
            Scheme::Raid6 => "6",
            Scheme::Raid10 => "10",
            Scheme::Raid50 => "50",
            Scheme::Raid60 => "60",
        }
    }

    /// How risky the layout is to run.
    pub fn risk_profile(&self) -> RiskProfile {
        match self {
            Scheme::Raid0 => RiskProfile::Extreme,
            Scheme::Raid5 => RiskProfile::Moderate,
            Scheme::Raid1 | Scheme::Raid6 | Scheme::Raid10 | Scheme::Raid50 | Scheme::Raid60 => {
                RiskProfile::Low
            }
        }
    }

    /// Whether any two simultaneous drive failures are survivable.
    pub fn tolerates_double_failure(&self) -> bool {
        matches!(self, Scheme::Raid6 | Scheme::Raid60)
    }

    /// Number of parity groups assumed for nested parity layouts.
    pub fn parity_groups(&self) -> Option<u32> {
        match self {
            Scheme::Raid50 | Scheme::Raid60 => Some(NESTED_PARITY_GROUPS),
            Scheme::Raid0 | Scheme::Raid1 | Scheme::Raid5 | Scheme::Raid6 | Scheme::Raid10 => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAID {}", self.level())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        let level = normalized.strip_prefix("raid").unwrap_or(&normalized);

        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.level() == level)
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "unknown RAID level '{}' (expected one of 0, 1, 5, 6, 10, 50, 60)",
                    s.trim()
                ))
            })
    }
}

impl TryFrom<String> for Scheme {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Scheme> for String {
    fn from(scheme: Scheme) -> Self {
        scheme.to_string()
    }
}

// =============================================================================
// Risk Profile
// =============================================================================

/// Coarse risk classification shown in the fault tolerance guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskProfile {
    Extreme,
    Moderate,
    Low,
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskProfile::Extreme => write!(f, "Extreme Risk"),
            RiskProfile::Moderate => write!(f, "Moderate Risk"),
            RiskProfile::Low => write!(f, "Low Risk"),
        }
    }
}

// =============================================================================
// Metadata Table
// =============================================================================

/// Descriptive record for one scheme. Never mutated at runtime.
#[derive(Debug, PartialEq, Serialize)]
pub struct SchemeMetadata {
    pub id: Scheme,
    pub name: &'static str,
    pub description: &'static str,
    pub min_drives: u32,
    pub fault_tolerance_desc: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}

static RAID0: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid0,
    name: "RAID 0 (Striping)",
    description: "Splits data evenly across two or more disks, without parity information, redundancy, or fault tolerance.",
    min_drives: 2,
    fault_tolerance_desc: "0 drives. If one fails, all data is lost.",
    pros: &["Maximum speed", "100% storage efficiency"],
    cons: &["No fault tolerance", "Higher failure risk"],
};

static RAID1: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid1,
    name: "RAID 1 (Mirroring)",
    description: "Consists of an exact copy (or mirror) of a set of data on two or more disks.",
    min_drives: 2,
    fault_tolerance_desc: "N-1 drives (as long as one copy remains).",
    pros: &["High read speed", "Excellent redundancy"],
    cons: &[
        "High storage cost (50% efficiency usually)",
        "Slower write speed than RAID 0",
    ],
};

static RAID5: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid5,
    name: "RAID 5 (Striping with Parity)",
    description: "Stripes both data and parity information across three or more drives.",
    min_drives: 3,
    fault_tolerance_desc: "1 drive. Array can rebuild if one drive fails.",
    pros: &[
        "Balanced performance",
        "Good efficiency",
        "1 drive fault tolerance",
    ],
    cons: &[
        "Long rebuild times",
        "Write penalty due to parity calculation",
    ],
};

static RAID6: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid6,
    name: "RAID 6 (Striping with Double Parity)",
    description: "Similar to RAID 5, but includes a second parity block distributed across the drives.",
    min_drives: 4,
    fault_tolerance_desc: "2 drives. Can withstand two simultaneous failures.",
    pros: &["High fault tolerance", "Good read performance"],
    cons: &["Lower write performance", "More expensive than RAID 5"],
};

static RAID10: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid10,
    name: "RAID 10 (1+0)",
    description: "Combines disk mirroring and disk striping to protect data.",
    min_drives: 4,
    fault_tolerance_desc: "Up to half the drives (depends on which ones fail).",
    pros: &["High performance", "Fast rebuild"],
    cons: &["Expensive (50% efficiency)", "Minimum 4 drives"],
};

static RAID50: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid50,
    name: "RAID 50 (5+0)",
    description: "Stripes data across multiple RAID 5 arrays.",
    min_drives: 6,
    fault_tolerance_desc: "1 drive per sub-array.",
    pros: &[
        "Better write performance than RAID 5",
        "Good fault tolerance",
    ],
    cons: &["Complex configuration", "Requires many disks"],
};

static RAID60: SchemeMetadata = SchemeMetadata {
    id: Scheme::Raid60,
    name: "RAID 60 (6+0)",
    description: "Stripes data across multiple RAID 6 arrays.",
    min_drives: 8,
    fault_tolerance_desc: "2 drives per sub-array.",
    pros: &["Extremely high fault tolerance"],
    cons: &["Lower storage efficiency", "Expensive"],
};
