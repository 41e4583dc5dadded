//! Configuration Comparison
//!
//! Side-by-side evaluation of a handful of configurations, mapping the
//! capacity model over each and aggregating the stacked capacity totals.
//!
//! # Example
//!
//! ```
//! use raidcalc::comparison::Comparison;
//!
//! let comparison = Comparison::default_set();
//! let totals = comparison.totals();
//!
//! assert_eq!(comparison.entries().len(), 3);
//! assert_eq!(totals.raw(), 48.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capacity::{compute_capacity, CapacityResult, Configuration, Scheme, SizeUnit};
use crate::error::{Error, Result};

/// Most configurations compared at once.
pub const MAX_COMPARISON_ENTRIES: usize = 5;

// =============================================================================
// Input Document
// =============================================================================

/// On-disk list of configurations to compare (YAML or JSON).
///
/// ```yaml
/// configurations:
///   - { scheme: raid5, drive_count: 4, drive_size: 4, size_unit: TB }
///   - { scheme: raid10, drive_count: 8, drive_size: 960, size_unit: GB }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonDocument {
    pub configurations: Vec<Configuration>,
}

/// Read configurations from a YAML or JSON file.
pub fn load_configurations(path: impl AsRef<Path>) -> Result<Vec<Configuration>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let document: ComparisonDocument = serde_yaml::from_str(&raw)?;

    debug!(
        "Loaded {} configurations from {}",
        document.configurations.len(),
        path.display()
    );
    Ok(document.configurations)
}

// =============================================================================
// Comparison
// =============================================================================

/// One compared configuration and its result.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub label: String,
    pub configuration: Configuration,
    pub result: CapacityResult,
}

/// Capacity summed across all entries, one figure per stacked bar segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StackedTotals {
    pub usable: f64,
    pub protection: f64,
    pub unused: f64,
}

impl StackedTotals {
    /// Raw capacity across all entries.
    pub fn raw(&self) -> f64 {
        self.usable + self.protection + self.unused
    }
}

/// A set of evaluated configurations.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    entries: Vec<ComparisonEntry>,
}

impl Comparison {
    /// Evaluate between one and [`MAX_COMPARISON_ENTRIES`] configurations.
    pub fn new(configurations: Vec<Configuration>) -> Result<Self> {
        let count = configurations.len();
        if count == 0 || count > MAX_COMPARISON_ENTRIES {
            return Err(Error::ComparisonSize {
                count,
                max: MAX_COMPARISON_ENTRIES,
            });
        }

        Ok(Self::evaluate(configurations))
    }

    /// RAID 5, RAID 10 and RAID 6, each with four 4 TB drives.
    pub fn default_set() -> Self {
        let configurations = [Scheme::Raid5, Scheme::Raid10, Scheme::Raid6]
            .into_iter()
            .map(|scheme| Configuration::new(scheme, 4, 4.0, SizeUnit::Tb))
            .collect();

        Self::evaluate(configurations)
    }

    fn evaluate(configurations: Vec<Configuration>) -> Self {
        let entries = configurations
            .into_iter()
            .enumerate()
            .map(|(idx, configuration)| ComparisonEntry {
                label: format!("Config {}: {}", idx + 1, configuration.scheme),
                result: compute_capacity(&configuration),
                configuration,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    /// Sum of each capacity segment across entries.
    pub fn totals(&self) -> StackedTotals {
        self.entries
            .iter()
            .fold(StackedTotals::default(), |acc, entry| StackedTotals {
                usable: acc.usable + entry.result.usable,
                protection: acc.protection + entry.result.protection,
                unused: acc.unused + entry.result.unused,
            })
    }

    /// Entry with the highest efficiency; the earliest wins a tie.
    pub fn most_efficient(&self) -> Option<&ComparisonEntry> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.result.efficiency >= entry.result.efficiency => Some(b),
            _ => Some(entry),
        })
    }

    /// Largest raw capacity of any single entry, used to scale charts.
    pub fn max_raw(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.result.total())
            .fold(0.0, f64::max)
    }
}
