//! Plain-text reports
//!
//! Terminal renderings of capacity results, comparisons, the scheme
//! catalogue and the fault tolerance guide. Each report is a `Display`
//! wrapper so callers can `print!` it or `to_string()` it.

use std::fmt;

use crate::capacity::{format_capacity, CapacityResult, Configuration, Scheme};
use crate::comparison::Comparison;

/// Width of a full-scale capacity bar, in characters.
const BAR_WIDTH: usize = 40;

const USABLE_GLYPH: char = '#';
const PROTECTION_GLYPH: char = '=';
const UNUSED_GLYPH: char = '.';

/// Guidance printed under the fault tolerance guide.
const REBUILD_NOTE: &str = "\
Fault tolerance refers to drives failing simultaneously. The most dangerous
time for an array is the rebuild: replacing a failed RAID 5 drive forces a
read of every sector on the survivors, and an unrecoverable read error on an
aging drive during that window loses the whole array. RAID 6 is recommended
for modern large-capacity drives.";

/// Stacked bar of usable, protection and unused capacity.
///
/// `scale` is the capacity that maps to a full-width bar. Segment edges are
/// rounded cumulatively so the bar length tracks the total.
pub fn capacity_bar(result: &CapacityResult, scale: f64, width: usize) -> String {
    if scale <= 0.0 {
        return String::new();
    }

    let edge = |value: f64| ((value / scale) * width as f64).round().clamp(0.0, width as f64) as usize;
    let usable_end = edge(result.usable);
    let protection_end = edge(result.usable + result.protection).max(usable_end);
    let unused_end = edge(result.total()).max(protection_end);

    let mut bar = String::with_capacity(unused_end);
    bar.extend(std::iter::repeat(USABLE_GLYPH).take(usable_end));
    bar.extend(std::iter::repeat(PROTECTION_GLYPH).take(protection_end - usable_end));
    bar.extend(std::iter::repeat(UNUSED_GLYPH).take(unused_end - protection_end));
    bar
}

fn write_legend(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        "  {} usable   {} protection/parity   {} unused/lost",
        USABLE_GLYPH, PROTECTION_GLYPH, UNUSED_GLYPH
    )
}

// =============================================================================
// Single Result
// =============================================================================

/// Report for one configuration.
pub struct ResultReport<'a> {
    pub configuration: &'a Configuration,
    pub result: &'a CapacityResult,
}

impl<'a> ResultReport<'a> {
    pub fn new(configuration: &'a Configuration, result: &'a CapacityResult) -> Self {
        Self {
            configuration,
            result,
        }
    }
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.configuration;
        let result = self.result;
        let meta = config.scheme.metadata();

        writeln!(f, "{}", meta.name)?;
        writeln!(
            f,
            "  Drives:          {} x {} {}",
            config.drive_count, config.drive_size, config.size_unit
        )?;
        writeln!(f, "  Raw capacity:    {}", format_capacity(result.total()))?;

        if !result.is_valid() {
            writeln!(f)?;
            writeln!(
                f,
                "  Invalid configuration: {} requires at least {} drives.",
                config.scheme, result.min_drives
            )?;
            return writeln!(f, "  Unused:          {}", result.readable_unused);
        }

        writeln!(f, "  Usable:          {}", result.readable_usable)?;
        writeln!(f, "  Protection:      {}", result.readable_protection)?;
        writeln!(f, "  Unused:          {}", result.readable_unused)?;
        writeln!(f, "  Efficiency:      {:.1}%", result.efficiency)?;
        writeln!(f, "  Fault tolerance: {}", result.fault_tolerance)?;
        writeln!(f, "  Read speed:      {}", result.read_speed)?;
        writeln!(f, "  Write speed:     {}", result.write_speed)?;
        writeln!(f, "  Minimum drives:  {}", result.min_drives)?;
        writeln!(f)?;
        writeln!(f, "  [{}]", capacity_bar(result, result.total(), BAR_WIDTH))?;
        write_legend(f)?;
        writeln!(f)?;
        writeln!(f, "  {}", meta.description)?;
        for pro in meta.pros {
            writeln!(f, "  + {}", pro)?;
        }
        for con in meta.cons {
            writeln!(f, "  - {}", con)?;
        }
        Ok(())
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Table, stacked bar chart and per-entry summary of a comparison.
pub struct ComparisonReport<'a>(pub &'a Comparison);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.0;

        writeln!(
            f,
            "{:<20} {:>6} {:>10} {:>12} {:>12} {:>12} {:>8}",
            "Config", "Drives", "Size", "Usable", "Protection", "Unused", "Eff."
        )?;
        for entry in comparison.entries() {
            let config = &entry.configuration;
            let result = &entry.result;
            writeln!(
                f,
                "{:<20} {:>6} {:>10} {:>12} {:>12} {:>12} {:>7.1}%",
                entry.label,
                config.drive_count,
                format!("{} {}", config.drive_size, config.size_unit),
                result.readable_usable,
                result.readable_protection,
                result.readable_unused,
                result.efficiency
            )?;
        }

        let totals = comparison.totals();
        writeln!(
            f,
            "{:<20} {:>6} {:>10} {:>12} {:>12} {:>12}",
            "Total",
            "",
            "",
            format_capacity(totals.usable),
            format_capacity(totals.protection),
            format_capacity(totals.unused)
        )?;

        writeln!(f)?;
        writeln!(f, "Capacity comparison (TB)")?;
        let scale = comparison.max_raw();
        for entry in comparison.entries() {
            writeln!(
                f,
                "  {:<20} |{:<width$}| {:.2}",
                entry.label,
                capacity_bar(&entry.result, scale, BAR_WIDTH),
                entry.result.total(),
                width = BAR_WIDTH
            )?;
        }
        write_legend(f)?;

        writeln!(f)?;
        writeln!(f, "Detailed analysis")?;
        for entry in comparison.entries() {
            writeln!(f, "  {}", entry.label)?;
            writeln!(f, "    Usable:          {:.2} TB", entry.result.usable)?;
            writeln!(f, "    Efficiency:      {:.1}%", entry.result.efficiency)?;
            writeln!(
                f,
                "    Fault tolerance: {}",
                entry.configuration.scheme.metadata().fault_tolerance_desc
            )?;
        }

        if let Some(best) = comparison.most_efficient() {
            writeln!(f)?;
            writeln!(
                f,
                "Most efficient: {} ({:.1}%)",
                best.label, best.result.efficiency
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// Scheme Catalogue
// =============================================================================

/// Description, minimum drive count, pros and cons of every scheme.
pub struct SchemeCatalogue;

impl fmt::Display for SchemeCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, scheme) in Scheme::ALL.iter().enumerate() {
            let meta = scheme.metadata();
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", meta.name)?;
            writeln!(f, "  {}", meta.description)?;
            writeln!(f, "  Minimum drives:  {}", meta.min_drives)?;
            writeln!(f, "  Fault tolerance: {}", meta.fault_tolerance_desc)?;
            writeln!(f, "  Pros: {}", meta.pros.join("; "))?;
            writeln!(f, "  Cons: {}", meta.cons.join("; "))?;
        }
        Ok(())
    }
}

// =============================================================================
// Fault Tolerance Guide
// =============================================================================

/// Survival limit and risk profile of every scheme.
pub struct FaultToleranceGuide;

impl fmt::Display for FaultToleranceGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:<14} {:>10}  Survival limit",
            "Level", "Risk", "Min drives"
        )?;
        for scheme in Scheme::ALL {
            let meta = scheme.metadata();
            let marker = if scheme.tolerates_double_failure() {
                "*"
            } else {
                " "
            };
            writeln!(
                f,
                "{:<8} {:<14} {:>10}{} {}",
                scheme.to_string(),
                scheme.risk_profile().to_string(),
                meta.min_drives,
                marker,
                meta.fault_tolerance_desc
            )?;
        }
        writeln!(f, "  * survives any two simultaneous drive failures")?;
        writeln!(f)?;
        writeln!(f, "Important note on rebuilds")?;
        writeln!(f, "{}", REBUILD_NOTE)
    }
}
