//! Workout CLI - Command-line interface for Workout Flux
//!
//! Commands:
//! - summary: Process sensor packages from a file or stdin (batch mode)
//! - compute: Process a single package given on the command line
//! - demo: Process the built-in demo packages
//! - kinds: Print the supported workout tags and their value layouts

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use workout_flux::package::demo_packages;
use workout_flux::{
    ActivityKind, BatchReport, MessageLocale, SensorPackage, WorkoutError, WorkoutProcessor,
    FLUX_VERSION,
};

/// Workout - derived workout metrics from raw sensor packages
#[derive(Parser)]
#[command(name = "workout")]
#[command(author = "Synheart AI Inc")]
#[command(version = FLUX_VERSION)]
#[command(about = "Compute distance, speed and calories from workout packages", long_about = None)]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "workout_flux=info"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process sensor packages (batch mode)
    Summary {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Summary language
        #[arg(long, default_value = "en")]
        locale: Locale,

        /// Skip invalid packages instead of failing the batch
        #[arg(long)]
        lenient: bool,
    },

    /// Process a single package
    Compute {
        /// Workout tag (SWM, RUN, WLK)
        #[arg(short = 't', long = "type")]
        workout_type: String,

        /// Comma-separated raw values, e.g. 15000,1,75
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        data: Vec<f64>,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Summary language
        #[arg(long, default_value = "en")]
        locale: Locale,
    },

    /// Process the built-in demo packages
    Demo {
        /// Summary language
        #[arg(long, default_value = "en")]
        locale: Locale,
    },

    /// Print supported workout tags
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one package per line)
    Ndjson,
    /// JSON array of packages
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary line per package
    Text,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON batch report
    Json,
    /// Pretty-printed JSON batch report
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum Locale {
    En,
    Ru,
}

impl From<Locale> for MessageLocale {
    fn from(locale: Locale) -> Self {
        match locale {
            Locale::En => MessageLocale::En,
            Locale::Ru => MessageLocale::Ru,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only summaries
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), WorkoutCliError> {
    match cli.command {
        Commands::Summary {
            input,
            input_format,
            output_format,
            locale,
            lenient,
        } => cmd_summary(&input, input_format, output_format, locale, lenient),

        Commands::Compute {
            workout_type,
            data,
            output_format,
            locale,
        } => {
            let packages = vec![SensorPackage::new(workout_type, data)];
            let processor = WorkoutProcessor::new().with_locale(locale.into());
            let report = processor.process(&packages)?;
            print!("{}", format_output(&report, &output_format)?);
            Ok(())
        }

        Commands::Demo { locale } => {
            let processor = WorkoutProcessor::new().with_locale(locale.into());
            let report = processor.process(&demo_packages())?;
            print!("{}", format_output(&report, &OutputFormat::Text)?);
            Ok(())
        }

        Commands::Kinds { json } => cmd_kinds(json),
    }
}

fn cmd_summary(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    locale: Locale,
    lenient: bool,
) -> Result<(), WorkoutCliError> {
    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            warn!("reading packages from an interactive terminal, end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    // Parse packages
    let packages = match input_format {
        InputFormat::Ndjson => SensorPackage::parse_ndjson(&input_data)?,
        InputFormat::Json => SensorPackage::parse_array(&input_data)?,
    };

    if packages.is_empty() {
        return Err(WorkoutCliError::NoPackages);
    }
    debug!(count = packages.len(), "read sensor packages");

    let mut processor = WorkoutProcessor::new().with_locale(locale.into());
    if lenient {
        processor = processor.lenient();
    }

    let report = processor.process(&packages)?;
    print!("{}", format_output(&report, &output_format)?);

    Ok(())
}

fn cmd_kinds(json: bool) -> Result<(), WorkoutCliError> {
    let kinds: Vec<KindInfo> = ActivityKind::ALL
        .into_iter()
        .map(|kind| KindInfo {
            tag: kind.code(),
            kind: kind.as_str(),
            values: value_layout(kind),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&kinds)?);
    } else {
        println!("Supported workout tags");
        println!("======================");
        for info in &kinds {
            println!("  {} ({}): {}", info.tag, info.kind, info.values.join(", "));
        }
    }

    Ok(())
}

// Helper functions

fn value_layout(kind: ActivityKind) -> Vec<&'static str> {
    let mut values = vec!["action", "duration_h", "weight_kg"];
    match kind {
        ActivityKind::Running => {}
        ActivityKind::SportsWalking => values.push("height_cm"),
        ActivityKind::Swimming => values.extend(["pool_length_m", "pool_count"]),
    }
    values
}

fn format_output(report: &BatchReport, format: &OutputFormat) -> Result<String, WorkoutCliError> {
    match format {
        OutputFormat::Text => Ok(report.summaries().map(|line| format!("{line}\n")).collect()),
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for processed in &report.processed {
                output.push_str(&serde_json::to_string(processed)?);
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string(report)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum WorkoutCliError {
    Io(io::Error),
    Workout(WorkoutError),
    Json(serde_json::Error),
    NoPackages,
}

impl From<io::Error> for WorkoutCliError {
    fn from(e: io::Error) -> Self {
        WorkoutCliError::Io(e)
    }
}

impl From<WorkoutError> for WorkoutCliError {
    fn from(e: WorkoutError) -> Self {
        WorkoutCliError::Workout(e)
    }
}

impl From<serde_json::Error> for WorkoutCliError {
    fn from(e: serde_json::Error) -> Self {
        WorkoutCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WorkoutCliError> for CliError {
    fn from(e: WorkoutCliError) -> Self {
        match e {
            WorkoutCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WorkoutCliError::Workout(WorkoutError::UnknownKind(tag)) => CliError {
                code: "UNKNOWN_KIND".to_string(),
                message: format!("Unknown workout type: {tag}"),
                hint: Some("Run 'workout kinds' for supported tags".to_string()),
            },
            WorkoutCliError::Workout(e @ WorkoutError::InvalidInput(_)) => CliError {
                code: "INVALID_INPUT".to_string(),
                message: e.to_string(),
                hint: Some("Check the value count and ranges for the workout type".to_string()),
            },
            WorkoutCliError::Workout(WorkoutError::JsonError(e)) | WorkoutCliError::Json(e) => {
                CliError {
                    code: "JSON_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some("Check JSON syntax".to_string()),
                }
            }
            WorkoutCliError::NoPackages => CliError {
                code: "NO_PACKAGES".to_string(),
                message: "No packages found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct KindInfo {
    tag: &'static str,
    kind: &'static str,
    values: Vec<&'static str>,
}
