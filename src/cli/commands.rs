//! Command implementation for the station summary CLI
//!
//! This module contains the run logic: logging set-up, layered configuration,
//! the timed summary run, and the timing diagnostic on stderr.

use crate::app::adapters::filesystem::{format_gigabytes, open_input};
use crate::app::services::aggregator::Aggregator;
use crate::app::services::line_parser::ParseStats;
use crate::app::services::reporter::Report;
use crate::cli::args::Args;
use crate::cli::profiling::{CpuProfiler, HeapProfiler};
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::Result;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of one summary run, for reporting
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Input file that was summarised
    pub input_path: PathBuf,
    /// Input size in bytes
    pub input_bytes: u64,
    /// Number of distinct stations reported
    pub stations: usize,
    /// What happened to each input line
    pub parse_stats: ParseStats,
    /// Wall-clock time to open, aggregate and sort, excluding the write
    pub elapsed: Duration,
}

impl SummaryOutcome {
    /// Timing diagnostic line printed to stderr
    pub fn timing_line(&self) -> String {
        format!(
            "Processed {:.1}GB in {:.2?}",
            format_gigabytes(self.input_bytes),
            self.elapsed
        )
    }
}

/// Main command runner
///
/// 1. Load layered configuration and apply CLI overrides
/// 2. Set up logging
/// 3. Run the summary, writing it to stdout
/// 4. Print the timing diagnostic to stderr
pub fn run(args: Args) -> Result<SummaryOutcome> {
    args.validate()?;

    let config = load_configuration(&args)?;
    setup_logging(&args, &config);

    info!("Starting station summary");
    debug!("Command line arguments: {:?}", args);
    debug!("Effective configuration: {:?}", config);

    let mut stdout = std::io::stdout().lock();
    let outcome = summarise(&config, &mut stdout)?;

    if !config.output.quiet {
        eprintln!("{}", outcome.timing_line());
    }

    Ok(outcome)
}

/// Summarise the configured input and write the report to `out`
///
/// The report is only written once the whole input has been aggregated, so a
/// failure part-way through leaves `out` untouched. The measured time stops
/// once the stations are sorted. Writing the report and profiler set-up and
/// teardown fall outside it.
pub fn summarise<W: Write>(config: &Config, out: &mut W) -> Result<SummaryOutcome> {
    config.validate()?;
    let input_path = config.input_path()?.to_path_buf();

    let cpu_profiler = CpuProfiler::start(&config.profiling)?;
    let heap_profiler = HeapProfiler::start(&config.profiling)?;
    let start_time = Instant::now();

    let mut input = open_input(
        &input_path,
        config.input.read_buffer_kb,
        config.input.show_progress,
    )?;
    let aggregated = Aggregator::new(config.parse_options()).aggregate(input.reader());
    input.finish();
    let aggregated = aggregated?;

    let report = Report::from_table(&aggregated.table);
    let elapsed = start_time.elapsed();

    report.write_to(out, config.output.format)?;

    if let Some(profiler) = cpu_profiler {
        profiler.finish()?;
    }
    if let Some(profiler) = heap_profiler {
        profiler.finish()?;
    }

    let outcome = SummaryOutcome {
        input_path,
        input_bytes: input.size_bytes(),
        stations: aggregated.station_count(),
        parse_stats: aggregated.stats,
        elapsed,
    };
    info!(
        "Summarised {} stations from {} in {:.2?}",
        outcome.stations,
        outcome.input_path.display(),
        outcome.elapsed
    );

    Ok(outcome)
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    let mut config = Config::load_layered(config_file)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Set up structured logging on stderr based on CLI arguments
fn setup_logging(args: &Args, config: &Config) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let span_events = if config.profiling.trace_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let initialised = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_span_events(span_events)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if initialised.is_err() {
        debug!("Logging already initialized; keeping existing subscriber");
    } else {
        debug!("Logging initialized at level: {}", log_level);
    }
}
