//! Capacity Model
//!
//! Maps an array configuration to its capacity breakdown, performance labels
//! and fault tolerance. Pure and infallible: configurations below a scheme's
//! minimum drive count and nonsensical sizes collapse into well-defined
//! results instead of errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use super::scheme::Scheme;
use super::units::{format_capacity, to_canonical_unit, SizeUnit};
use crate::error::{Error, Result};

/// Number of parity groups assumed for RAID 50 and RAID 60.
///
/// Fixed regardless of drive count. Real controllers let the operator pick
/// the span width; this calculator deliberately does not.
pub const NESTED_PARITY_GROUPS: u32 = 2;

/// Formatted capacity shown for the zeroed fields of an invalid result.
const ZERO_CAPACITY_LABEL: &str = "0 TB";

// =============================================================================
// Configuration
// =============================================================================

/// Array configuration as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub scheme: Scheme,
    pub drive_count: u32,
    pub drive_size: f64,
    #[serde(default)]
    pub size_unit: SizeUnit,
}

impl Configuration {
    pub fn new(scheme: Scheme, drive_count: u32, drive_size: f64, size_unit: SizeUnit) -> Self {
        Self {
            scheme,
            drive_count,
            drive_size,
            size_unit,
        }
    }

    /// Whether the drive count satisfies the scheme minimum.
    pub fn meets_minimum(&self) -> bool {
        self.drive_count >= self.scheme.min_drives()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} x {} {}",
            self.scheme, self.drive_count, self.drive_size, self.size_unit
        )
    }
}

/// Parses the compact form `SCHEME:COUNTxSIZE[UNIT]`, e.g. `raid5:4x4TB`.
/// The unit defaults to TB.
impl FromStr for Configuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::InvalidConfiguration(format!(
                "'{}' is not of the form SCHEME:COUNTxSIZE[UNIT] (e.g. raid5:4x4TB)",
                s.trim()
            ))
        };

        let (scheme, layout) = s.trim().split_once(':').ok_or_else(invalid)?;
        let scheme: Scheme = scheme.parse()?;

        let layout = layout.trim().to_ascii_lowercase();
        let (count, size) = layout.split_once('x').ok_or_else(invalid)?;
        let drive_count: u32 = count.trim().parse().map_err(|_| invalid())?;

        let size = size.trim();
        let split_at = size
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(size.len());
        let (value, unit) = size.split_at(split_at);
        let drive_size: f64 = value.trim().parse().map_err(|_| invalid())?;
        let size_unit = if unit.is_empty() {
            SizeUnit::Tb
        } else {
            unit.parse()?
        };

        Ok(Self::new(scheme, drive_count, drive_size, size_unit))
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Qualitative throughput relative to a single drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Throughput {
    /// Scales with the given multiple of one drive
    Scaled(f64),
    /// Does not scale in a simple way
    Qualitative(&'static str),
    NotApplicable,
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Throughput::Scaled(factor) => write!(f, "{}x", factor),
            Throughput::Qualitative(label) => write!(f, "{}", label),
            Throughput::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Throughput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many drive failures the array survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultTolerance {
    None,
    /// Any `k` drives
    Drives(u32),
    /// One drive in each mirrored pair
    PerMirroredPair,
    /// `k` drives in each parity group
    PerGroup(u32),
    NotApplicable,
}

impl fmt::Display for FaultTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultTolerance::None => write!(f, "None"),
            FaultTolerance::Drives(1) => write!(f, "1 drive"),
            FaultTolerance::Drives(k) => write!(f, "{} drives", k),
            FaultTolerance::PerMirroredPair => write!(f, "Up to 1 per pair"),
            FaultTolerance::PerGroup(1) => write!(f, "1 drive per group"),
            FaultTolerance::PerGroup(k) => write!(f, "{} drives per group", k),
            FaultTolerance::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for FaultTolerance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Result
// =============================================================================

/// Capacity breakdown of one configuration. Capacities are in TB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityResult {
    pub usable: f64,
    pub protection: f64,
    pub unused: f64,
    pub readable_usable: String,
    pub readable_protection: String,
    pub readable_unused: String,
    pub fault_tolerance: FaultTolerance,
    pub read_speed: Throughput,
    pub write_speed: Throughput,
    /// Usable share of raw capacity, 0-100
    pub efficiency: f64,
    pub min_drives: u32,
}

impl CapacityResult {
    /// Raw capacity of all drives.
    pub fn total(&self) -> f64 {
        self.usable + self.protection + self.unused
    }

    /// False for the degenerate result of an under-populated array.
    pub fn is_valid(&self) -> bool {
        self.fault_tolerance != FaultTolerance::NotApplicable
    }

    fn invalid(total: f64, min_drives: u32) -> Self {
        Self {
            usable: 0.0,
            protection: 0.0,
            unused: total,
            readable_usable: ZERO_CAPACITY_LABEL.to_string(),
            readable_protection: ZERO_CAPACITY_LABEL.to_string(),
            readable_unused: format_capacity(total),
            fault_tolerance: FaultTolerance::NotApplicable,
            read_speed: Throughput::NotApplicable,
            write_speed: Throughput::NotApplicable,
            efficiency: 0.0,
            min_drives,
        }
    }
}

/// Per-scheme arithmetic before clamping.
struct Layout {
    usable: f64,
    protection: f64,
    fault_tolerance: FaultTolerance,
    read_speed: Throughput,
    write_speed: Throughput,
}

fn layout(scheme: Scheme, drives: u32, drive_tb: f64) -> Layout {
    let n = drives as f64;
    let total = n * drive_tb;
    let groups = NESTED_PARITY_GROUPS as f64;

    match scheme {
        Scheme::Raid0 => Layout {
            usable: total,
            protection: 0.0,
            fault_tolerance: FaultTolerance::None,
            read_speed: Throughput::Scaled(n),
            write_speed: Throughput::Scaled(n),
        },
        Scheme::Raid1 => Layout {
            usable: drive_tb,
            protection: total - drive_tb,
            fault_tolerance: FaultTolerance::Drives(drives.saturating_sub(1)),
            read_speed: Throughput::Scaled(n),
            write_speed: Throughput::Scaled(1.0),
        },
        Scheme::Raid5 => Layout {
            usable: (n - 1.0) * drive_tb,
            protection: drive_tb,
            fault_tolerance: FaultTolerance::Drives(1),
            read_speed: Throughput::Scaled(n - 1.0),
            write_speed: Throughput::Qualitative("Slow (Parity Calc)"),
        },
        Scheme::Raid6 => Layout {
            usable: (n - 2.0) * drive_tb,
            protection: 2.0 * drive_tb,
            fault_tolerance: FaultTolerance::Drives(2),
            read_speed: Throughput::Scaled(n - 2.0),
            write_speed: Throughput::Qualitative("Very Slow (Double Parity)"),
        },
        Scheme::Raid10 => {
            let usable = (n / 2.0) * drive_tb;
            Layout {
                usable,
                protection: usable,
                fault_tolerance: FaultTolerance::PerMirroredPair,
                read_speed: Throughput::Scaled(n),
                write_speed: Throughput::Scaled(n / 2.0),
            }
        }
        Scheme::Raid50 => Layout {
            usable: (n - groups) * drive_tb,
            protection: groups * drive_tb,
            fault_tolerance: FaultTolerance::PerGroup(1),
            read_speed: Throughput::Qualitative("High"),
            write_speed: Throughput::Qualitative("Medium"),
        },
        Scheme::Raid60 => Layout {
            usable: (n - 2.0 * groups) * drive_tb,
            protection: 2.0 * groups * drive_tb,
            fault_tolerance: FaultTolerance::PerGroup(2),
            read_speed: Throughput::Qualitative("High"),
            write_speed: Throughput::Qualitative("Low"),
        },
    }
}

/// Compute the capacity breakdown of a configuration.
pub fn compute_capacity(config: &Configuration) -> CapacityResult {
    let drive_tb = to_canonical_unit(config.drive_size, config.size_unit);
    let drive_tb = if drive_tb.is_finite() && drive_tb > 0.0 {
        drive_tb
    } else {
        0.0
    };
    // Raw capacity must stay representable or every derived figure is NaN.
    let (drive_tb, total) = match config.drive_count as f64 * drive_tb {
        total if total.is_finite() => (drive_tb, total),
        _ => {
            debug!(
                drives = config.drive_count,
                drive_tb, "Raw capacity overflows, treating drive size as zero"
            );
            (0.0, 0.0)
        }
    };
    let min_drives = config.scheme.min_drives();

    if config.drive_count < min_drives {
        debug!(
            scheme = %config.scheme,
            drives = config.drive_count,
            min_drives,
            "Drive count below scheme minimum"
        );
        return CapacityResult::invalid(total, min_drives);
    }

    let layout = layout(config.scheme, config.drive_count, drive_tb);

    let usable = layout.usable.max(0.0);
    let protection = layout.protection.max(0.0);
    let unused = (total - usable - protection).max(0.0);
    let efficiency = match usable / total * 100.0 {
        share if total > 0.0 && share.is_finite() => share,
        _ => 0.0,
    };

    CapacityResult {
        usable,
        protection,
        unused,
        readable_usable: format_capacity(usable),
        readable_protection: format_capacity(protection),
        readable_unused: format_capacity(unused),
        fault_tolerance: layout.fault_tolerance,
        read_speed: layout.read_speed,
        write_speed: layout.write_speed,
        efficiency,
        min_drives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn tb(scheme: Scheme, drives: u32, size: f64) -> CapacityResult {
        compute_capacity(&Configuration::new(scheme, drives, size, SizeUnit::Tb))
    }

    // =========================================================================
    // Per-Scheme Arithmetic
    // =========================================================================

    #[test]
    fn test_raid0_uses_everything() {
        let result = tb(Scheme::Raid0, 4, 4.0);

        assert!((result.usable - 16.0).abs() < EPS);
        assert_eq!(result.protection, 0.0);
        assert_eq!(result.unused, 0.0);
        assert!((result.efficiency - 100.0).abs() < EPS);
        assert_eq!(result.fault_tolerance, FaultTolerance::None);
        assert_eq!(result.read_speed.to_string(), "4x");
        assert_eq!(result.write_speed.to_string(), "4x");
    }

    #[test]
    fn test_raid1_keeps_one_copy() {
        let result = tb(Scheme::Raid1, 3, 4.0);

        assert!((result.usable - 4.0).abs() < EPS);
        assert!((result.protection - 8.0).abs() < EPS);
        assert!((result.efficiency - 100.0 / 3.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "2 drives");
        assert_eq!(result.read_speed.to_string(), "3x");
        assert_eq!(result.write_speed.to_string(), "1x");
    }

    #[test]
    fn test_raid1_pair_survives_one_drive() {
        let result = tb(Scheme::Raid1, 2, 1.0);
        assert_eq!(result.fault_tolerance.to_string(), "1 drive");
    }

    #[test]
    fn test_raid5() {
        let result = tb(Scheme::Raid5, 4, 4.0);

        assert!((result.usable - 12.0).abs() < EPS);
        assert!((result.protection - 4.0).abs() < EPS);
        assert_eq!(result.unused, 0.0);
        assert!((result.efficiency - 75.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "1 drive");
        assert_eq!(result.read_speed.to_string(), "3x");
        assert_eq!(result.write_speed.to_string(), "Slow (Parity Calc)");
        assert_eq!(result.readable_usable, "12.00 TB");
        assert_eq!(result.readable_protection, "4.00 TB");
    }

    #[test]
    fn test_raid6() {
        let result = tb(Scheme::Raid6, 4, 4.0);

        assert!((result.usable - 8.0).abs() < EPS);
        assert!((result.protection - 8.0).abs() < EPS);
        assert_eq!(result.unused, 0.0);
        assert!((result.efficiency - 50.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "2 drives");
        assert_eq!(result.write_speed.to_string(), "Very Slow (Double Parity)");
    }

    #[test]
    fn test_raid10() {
        let result = tb(Scheme::Raid10, 4, 4.0);

        assert!((result.usable - 8.0).abs() < EPS);
        assert!((result.protection - 8.0).abs() < EPS);
        assert!((result.efficiency - 50.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "Up to 1 per pair");
        assert_eq!(result.read_speed.to_string(), "4x");
        assert_eq!(result.write_speed.to_string(), "2x");
    }

    #[test]
    fn test_raid10_odd_drive_count_halves_raw_capacity() {
        let result = tb(Scheme::Raid10, 5, 2.0);

        assert!((result.usable - 5.0).abs() < EPS);
        assert!((result.protection - 5.0).abs() < EPS);
        assert_eq!(result.write_speed.to_string(), "2.5x");
    }

    #[test]
    fn test_raid50_assumes_two_groups() {
        let result = tb(Scheme::Raid50, 6, 4.0);

        assert!((result.usable - 16.0).abs() < EPS);
        assert!((result.protection - 8.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "1 drive per group");
        assert_eq!(result.read_speed.to_string(), "High");
        assert_eq!(result.write_speed.to_string(), "Medium");

        // Group count does not grow with drive count.
        let wide = tb(Scheme::Raid50, 12, 4.0);
        assert!((wide.protection - 8.0).abs() < EPS);
    }

    #[test]
    fn test_raid60_assumes_two_groups() {
        let result = tb(Scheme::Raid60, 8, 4.0);

        assert!((result.usable - 16.0).abs() < EPS);
        assert!((result.protection - 16.0).abs() < EPS);
        assert_eq!(result.fault_tolerance.to_string(), "2 drives per group");
        assert_eq!(result.write_speed.to_string(), "Low");
    }

    // =========================================================================
    // Invalid And Edge Inputs
    // =========================================================================

    #[test]
    fn test_below_minimum_is_degenerate() {
        let result = tb(Scheme::Raid5, 2, 4.0);

        assert_eq!(result.usable, 0.0);
        assert_eq!(result.protection, 0.0);
        assert!((result.unused - 8.0).abs() < EPS);
        assert_eq!(result.efficiency, 0.0);
        assert_eq!(result.min_drives, 3);
        assert_eq!(result.fault_tolerance.to_string(), "N/A");
        assert_eq!(result.read_speed.to_string(), "N/A");
        assert_eq!(result.write_speed.to_string(), "N/A");
        assert_eq!(result.readable_usable, "0 TB");
        assert_eq!(result.readable_unused, "8.00 TB");
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_drives() {
        let result = tb(Scheme::Raid0, 0, 4.0);

        assert_eq!(result.total(), 0.0);
        assert_eq!(result.efficiency, 0.0);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_size_has_zero_efficiency() {
        let result = tb(Scheme::Raid5, 4, 0.0);

        assert!(result.is_valid());
        assert_eq!(result.usable, 0.0);
        assert_eq!(result.efficiency, 0.0);
        assert_eq!(result.readable_usable, "0 MB");
    }

    #[test]
    fn test_negative_and_nan_sizes_are_zeroed() {
        for size in [-4.0, f64::NAN, f64::INFINITY] {
            let result = tb(Scheme::Raid6, 4, size);
            assert_eq!(result.usable, 0.0);
            assert_eq!(result.protection, 0.0);
            assert_eq!(result.unused, 0.0);
            assert_eq!(result.efficiency, 0.0);
        }
    }

    #[test]
    fn test_overflowing_raw_capacity_is_zeroed() {
        for scheme in Scheme::ALL {
            let result = tb(scheme, 16, 1e308);

            assert_eq!(result.usable, 0.0, "{}", scheme);
            assert_eq!(result.protection, 0.0, "{}", scheme);
            assert_eq!(result.unused, 0.0, "{}", scheme);
            assert_eq!(result.efficiency, 0.0, "{}", scheme);
            assert_eq!(result.readable_usable, "0 MB");
        }

        let json = serde_json::to_string(&tb(Scheme::Raid10, 4, 1e308)).unwrap();
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_largest_representable_raw_capacity_is_finite() {
        let result = tb(Scheme::Raid0, 4, f64::MAX / 4.0);

        assert!(result.usable.is_finite() && result.usable > 0.0);
        assert!((result.efficiency - 100.0).abs() < EPS);
        assert!(!result.readable_usable.contains("inf"));
    }

    #[test]
    fn test_gigabyte_drives() {
        let config = Configuration::new(Scheme::Raid5, 3, 960.0, SizeUnit::Gb);
        let result = compute_capacity(&config);

        assert!((result.usable - 1.92).abs() < EPS);
        assert_eq!(result.readable_usable, "1.92 TB");
        assert_eq!(result.readable_protection, "960 GB");
    }

    #[test]
    fn test_every_scheme_at_minimum_is_valid() {
        for scheme in Scheme::ALL {
            let result = tb(scheme, scheme.min_drives(), 1.0);
            assert!(result.is_valid(), "{}", scheme);
            assert!((result.total() - scheme.min_drives() as f64).abs() < EPS);
        }
    }

    // =========================================================================
    // Configuration Parsing
    // =========================================================================

    #[test]
    fn test_parse_compact_form() {
        let config: Configuration = "raid5:4x4TB".parse().unwrap();
        assert_eq!(config, Configuration::new(Scheme::Raid5, 4, 4.0, SizeUnit::Tb));

        let config: Configuration = "RAID 10:8x960gb".parse().unwrap();
        assert_eq!(
            config,
            Configuration::new(Scheme::Raid10, 8, 960.0, SizeUnit::Gb)
        );

        let config: Configuration = "6:5x2.5".parse().unwrap();
        assert_eq!(config, Configuration::new(Scheme::Raid6, 5, 2.5, SizeUnit::Tb));
    }

    #[test]
    fn test_parse_compact_form_errors() {
        assert!("raid5".parse::<Configuration>().is_err());
        assert!("raid5:4".parse::<Configuration>().is_err());
        assert!("raid5:ax4tb".parse::<Configuration>().is_err());
        assert!("raid5:4x4pb".parse::<Configuration>().is_err());
        assert!("raid7:4x4tb".parse::<Configuration>().is_err());
    }

    #[test]
    fn test_configuration_deserializes_with_default_unit() {
        let yaml = "scheme: raid6\ndrive_count: 6\ndrive_size: 8\n";
        let config: Configuration = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.scheme, Scheme::Raid6);
        assert_eq!(config.size_unit, SizeUnit::Tb);
        assert!(config.meets_minimum());
    }

    #[test]
    fn test_result_serializes_labels_as_text() {
        let json = serde_json::to_string(&tb(Scheme::Raid5, 4, 4.0)).unwrap();

        assert!(json.contains("\"fault_tolerance\":\"1 drive\""));
        assert!(json.contains("\"read_speed\":\"3x\""));
        assert!(json.contains("\"efficiency\":75.0"));
        assert!(json.contains("\"min_drives\":3"));
    }
}
