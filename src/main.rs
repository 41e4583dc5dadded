//! RAID Capacity Calculator
//!
//! Command-line front end for the capacity model.
//!
//! ```text
//! raidcalc calc --scheme raid6 --drives 8 --size 12
//! raidcalc compare raid5:4x4TB raid10:4x4TB raid6:4x4TB
//! raidcalc schemes
//! raidcalc guide
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use raidcalc::advisor::{Advisor, AdvisorConfig};
use raidcalc::capacity::{compute_capacity, Configuration, Scheme, SchemeMetadata, SizeUnit};
use raidcalc::comparison::{load_configurations, Comparison};
use raidcalc::error::Result;
use raidcalc::report::{ComparisonReport, FaultToleranceGuide, ResultReport, SchemeCatalogue};

// =============================================================================
// CLI Arguments
// =============================================================================

/// RAID capacity calculator - usable space, overhead and fault tolerance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(flatten)]
    advisor: AdvisorArgs,
}

#[derive(clap::Args, Debug)]
struct AdvisorArgs {
    /// API key for the AI advisor (falls back to API_KEY)
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used by the AI advisor
    #[arg(
        long,
        global = true,
        env = "ADVISOR_MODEL",
        default_value = "gemini-3-flash-preview"
    )]
    advisor_model: String,

    /// Base URL of the generative language API
    #[arg(
        long,
        global = true,
        env = "ADVISOR_ENDPOINT",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    advisor_endpoint: String,

    /// AI advisor request timeout in seconds
    #[arg(long, global = true, env = "ADVISOR_TIMEOUT_SECONDS", default_value = "30")]
    advisor_timeout_secs: u64,
}

impl AdvisorArgs {
    fn to_config(&self) -> AdvisorConfig {
        AdvisorConfig {
            api_key: self
                .api_key
                .clone()
                .or_else(|| std::env::var("API_KEY").ok()),
            endpoint: self.advisor_endpoint.clone(),
            model: self.advisor_model.clone(),
            timeout: Duration::from_secs(self.advisor_timeout_secs),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate capacity for one configuration
    Calc {
        /// RAID level (0, 1, 5, 6, 10, 50, 60)
        #[arg(long, short)]
        scheme: Scheme,

        /// Number of drives
        #[arg(long, short)]
        drives: u32,

        /// Size of each drive
        #[arg(long)]
        size: f64,

        /// Unit of the drive size
        #[arg(long, short, default_value = "TB")]
        unit: SizeUnit,

        /// Ask the AI advisor for an opinion
        #[arg(long)]
        advise: bool,
    },

    /// Compare up to five configurations
    Compare {
        /// YAML or JSON file with a `configurations` list
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Configurations as SCHEME:COUNTxSIZE[UNIT], e.g. raid5:4x4TB
        configs: Vec<Configuration>,
    },

    /// Describe every RAID level
    Schemes,

    /// Show how many failures each RAID level survives
    Guide,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    debug!("Output format: {:?}", args.format);

    match &args.command {
        Command::Calc {
            scheme,
            drives,
            size,
            unit,
            advise,
        } => {
            let config = Configuration::new(*scheme, *drives, *size, *unit);
            run_calc(&args, config, *advise).await
        }
        Command::Compare { file, configs } => run_compare(&args, file.as_ref(), configs),
        Command::Schemes => {
            let catalogue: Vec<&SchemeMetadata> =
                Scheme::ALL.iter().map(|s| s.metadata()).collect();
            emit(args.format, &SchemeCatalogue, &catalogue)
        }
        Command::Guide => {
            let guide: Vec<GuideRow> = Scheme::ALL.iter().map(GuideRow::from).collect();
            emit(args.format, &FaultToleranceGuide, &guide)
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Serialize)]
struct CalcOutput<'a> {
    configuration: &'a Configuration,
    result: &'a raidcalc::CapacityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<String>,
}

async fn run_calc(args: &Args, config: Configuration, advise: bool) -> Result<()> {
    let result = compute_capacity(&config);
    info!(
        "Computed {}: usable {} ({:.1}%)",
        config, result.readable_usable, result.efficiency
    );

    // Advice for an invalid array would be meaningless
    let advice = if advise && result.is_valid() {
        let advisor = advisor_or_disabled(Advisor::from_config(args.advisor.to_config()));
        Some(advisor.advise(&config).await)
    } else {
        None
    };

    let output = CalcOutput {
        configuration: &config,
        result: &result,
        advice,
    };

    let mut text = ResultReport::new(&config, &result).to_string();
    if let Some(advice) = &output.advice {
        text.push_str("\nAI advisor\n");
        text.push_str(advice);
        text.push('\n');
    }

    emit(args.format, &text, &output)
}

/// Advice never fails the command, not even when the client cannot be built.
fn advisor_or_disabled(advisor: Result<Advisor>) -> Advisor {
    advisor.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to initialize AI advisor, advice disabled");
        Advisor::disabled()
    })
}

fn run_compare(
    args: &Args,
    file: Option<&PathBuf>,
    configs: &[Configuration],
) -> Result<()> {
    let mut configurations = match file {
        Some(path) => load_configurations(path)?,
        None => Vec::new(),
    };
    configurations.extend_from_slice(configs);

    let comparison = if configurations.is_empty() {
        info!("No configurations given, comparing the default set");
        Comparison::default_set()
    } else {
        Comparison::new(configurations)?
    };

    emit(args.format, &ComparisonReport(&comparison), &comparison)
}

#[derive(Serialize)]
struct GuideRow {
    scheme: Scheme,
    risk: String,
    min_drives: u32,
    survival_limit: &'static str,
    tolerates_double_failure: bool,
}

impl From<&Scheme> for GuideRow {
    fn from(scheme: &Scheme) -> Self {
        let meta = scheme.metadata();
        Self {
            scheme: *scheme,
            risk: scheme.risk_profile().to_string(),
            min_drives: meta.min_drives,
            survival_limit: meta.fault_tolerance_desc,
            tolerates_double_failure: scheme.tolerates_double_failure(),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn emit<T, S>(format: OutputFormat, text: &T, structured: &S) -> Result<()>
where
    T: std::fmt::Display + ?Sized,
    S: Serialize + ?Sized,
{
    match format {
        OutputFormat::Text => print!("{}", text),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(structured)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(structured)?),
    }
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "reqwest=warn", "rustls=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
