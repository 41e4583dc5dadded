//! Property-Based Tests for the Capacity Model
//!
//! # Test Properties
//!
//! 1. **Conservation**: usable + protection + unused = raw capacity
//! 2. **Non-negativity**: no capacity figure is ever below zero
//! 3. **Degenerate Results**: under-populated arrays expose nothing
//! 4. **Unit Linearity**: 1000 GB converts to the same value as 1 TB
//! 5. **Finiteness**: any drive size, however extreme, yields finite figures

#![cfg(test)]

use proptest::prelude::*;

use super::model::{compute_capacity, Configuration};
use super::scheme::Scheme;
use super::units::{to_canonical_unit, SizeUnit};

// =============================================================================
// Property Strategies
// =============================================================================

fn scheme_strategy() -> impl Strategy<Value = Scheme> {
    prop::sample::select(Scheme::ALL.to_vec())
}

fn unit_strategy() -> impl Strategy<Value = SizeUnit> {
    prop::sample::select(vec![SizeUnit::Tb, SizeUnit::Gb, SizeUnit::Mb])
}

/// Any configuration, including drive counts below the minimum.
fn config_strategy() -> impl Strategy<Value = Configuration> {
    (scheme_strategy(), 0u32..=64, 0.0f64..100_000.0, unit_strategy())
        .prop_map(|(scheme, drives, size, unit)| Configuration::new(scheme, drives, size, unit))
}

/// Configurations that satisfy the scheme minimum.
fn valid_config_strategy() -> impl Strategy<Value = Configuration> {
    (scheme_strategy(), 0u32..=56, 0.01f64..100_000.0, unit_strategy()).prop_map(
        |(scheme, extra, size, unit)| {
            Configuration::new(scheme, scheme.min_drives() + extra, size, unit)
        },
    )
}

/// Any `f64` drive size, including huge, negative and non-finite values.
fn extreme_config_strategy() -> impl Strategy<Value = Configuration> {
    (
        scheme_strategy(),
        0u32..=u32::MAX,
        prop::num::f64::ANY,
        unit_strategy(),
    )
        .prop_map(|(scheme, drives, size, unit)| Configuration::new(scheme, drives, size, unit))
}

fn raw_capacity(config: &Configuration) -> f64 {
    config.drive_count as f64 * to_canonical_unit(config.drive_size, config.size_unit)
}

// =============================================================================
// Capacity Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: capacity is neither created nor lost.
    #[test]
    fn prop_breakdown_sums_to_raw_capacity(config in valid_config_strategy()) {
        let result = compute_capacity(&config);
        let raw = raw_capacity(&config);

        let tolerance = 1e-9 * raw.max(1.0);
        prop_assert!(
            (result.total() - raw).abs() <= tolerance,
            "{}: {} != {}", config, result.total(), raw
        );
    }

    /// Property: every capacity figure is non-negative.
    #[test]
    fn prop_capacities_non_negative(config in config_strategy()) {
        let result = compute_capacity(&config);

        prop_assert!(result.usable >= 0.0);
        prop_assert!(result.protection >= 0.0);
        prop_assert!(result.unused >= 0.0);
    }

    /// Property: efficiency is the usable share of raw capacity.
    #[test]
    fn prop_efficiency_matches_usable_share(config in config_strategy()) {
        let result = compute_capacity(&config);
        let raw = raw_capacity(&config);

        prop_assert!((0.0..=100.0 + 1e-9).contains(&result.efficiency));
        if raw > 0.0 {
            prop_assert!((result.efficiency - result.usable / raw * 100.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(result.efficiency, 0.0);
        }
    }

    /// Property: arrays below the minimum expose no usable or protection capacity.
    #[test]
    fn prop_below_minimum_is_degenerate(
        scheme in scheme_strategy(),
        size in 0.01f64..1000.0,
        seed in any::<u32>(),
    ) {
        let drives = seed % scheme.min_drives();
        let config = Configuration::new(scheme, drives, size, SizeUnit::Tb);
        let result = compute_capacity(&config);

        prop_assert_eq!(result.usable, 0.0);
        prop_assert_eq!(result.protection, 0.0);
        prop_assert!((result.unused - raw_capacity(&config)).abs() < 1e-9);
        prop_assert_eq!(result.efficiency, 0.0);
        prop_assert!(!result.is_valid());
    }

    /// Property: the medium unit is exactly one thousandth of the large unit.
    #[test]
    fn prop_medium_unit_is_linear(x in 0.0f64..1_000.0) {
        let via_gb = to_canonical_unit(1000.0 * x, SizeUnit::Gb);
        let via_tb = to_canonical_unit(x, SizeUnit::Tb);

        prop_assert!((via_gb - via_tb).abs() <= 1e-12 * via_tb.max(1.0));
    }

    /// Property: every figure stays finite and efficiency stays a percentage.
    #[test]
    fn prop_extreme_sizes_stay_finite(config in extreme_config_strategy()) {
        let result = compute_capacity(&config);

        for figure in [result.usable, result.protection, result.unused] {
            prop_assert!(figure.is_finite() && figure >= 0.0, "{}: {}", config, figure);
        }
        prop_assert!(result.efficiency.is_finite(), "{}: {}", config, result.efficiency);
        prop_assert!((0.0..=100.0 + 1e-9).contains(&result.efficiency));
        prop_assert!(!result.readable_usable.contains("inf"));
        prop_assert!(!result.readable_usable.contains("NaN"));
    }

    /// Property: same input, same output.
    #[test]
    fn prop_deterministic(config in config_strategy()) {
        prop_assert_eq!(compute_capacity(&config), compute_capacity(&config));
    }
}
