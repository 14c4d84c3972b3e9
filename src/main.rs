//! CLI entry point for the bikeshare statistics tool.
//!
//! Runs the interactive explorer by default, or a single non-interactive
//! report for a city/month/day given on the command line.

use anyhow::Result;
use bikeshare_stats::analyzers::TripReport;
use bikeshare_stats::config::CityConfig;
use bikeshare_stats::driver::{run_session, write_report};
use bikeshare_stats::filters::FilterSelection;
use bikeshare_stats::loader::load_data;
use bikeshare_stats::output::{export_trips, write_json};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV file names
    #[arg(long, value_name = "FILE", global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for filters and print reports until told to stop (default)
    Explore,
    /// Print one report for the given filters
    Report {
        /// chicago, new york city or washington
        #[arg(short, long)]
        city: String,

        /// January to June, or all
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Monday to Sunday, or all
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the filtered trips to this CSV file
        #[arg(short, long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file. Stdout is the report.
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // Kept at warn by default so log lines do not interleave with the prompts.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = CityConfig::new(&cli.data_dir);
    if let Some(path) = &cli.cities {
        config = config.with_overrides(path)?;
    }
    info!(data_dir = %config.data_dir().display(), "Configuration loaded");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout().lock();
            run_session(&config, &mut input, &mut output)?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
            export,
        } => {
            let selection = FilterSelection::from_args(&city, &month, &day)?;
            let mut table = load_data(&config, &selection)?;
            let mut output = std::io::stdout().lock();

            if json {
                let report = TripReport::build(&selection, &mut table);
                write_json(&mut output, &report)?;
            } else {
                writeln!(
                    output,
                    "City: {}, Month: {}, Day: {}, Trips: {}",
                    selection.city,
                    selection.month.name(),
                    selection.day.name(),
                    table.len()
                )?;
                write_report(&mut output, &mut table)?;
            }

            if let Some(path) = export {
                export_trips(&path, &table)?;
            }
        }
    }

    Ok(())
}
