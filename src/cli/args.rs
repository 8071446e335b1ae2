//! Command-line argument definitions for the station summary tool
//!
//! This module defines the CLI interface using the clap derive API. Every
//! flag maps onto a field of [`Config`]; flags given on the command line
//! override the config file and environment.

use crate::app::services::reporter::ReportFormat;
use crate::config::{Config, InvalidValuePolicy, MalformedLinePolicy};
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the station summary tool
///
/// Reads a `<station>;<value>` observation file in one pass and prints the
/// minimum, mean and maximum value per station, sorted by station name.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "station-summary",
    version,
    about = "Per-station min/mean/max summary of a delimited observation file",
    long_about = "Reads a delimited observation file (one '<station>;<value>' pair per line, \
                  '#' comment lines ignored) in a single sequential pass and prints \
                  '{station=min/mean/max...}' with stations in ascending order. \
                  Timing diagnostics and logs go to stderr; stdout carries only the summary."
)]
pub struct Args {
    /// Path to the observation file
    #[arg(value_name = "INPUT", conflicts_with = "input_path")]
    pub input: Option<PathBuf>,

    /// Path to the observation file (alternative to the positional argument)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Path to the observation file"
    )]
    pub input_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/station-summary/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Field separator between station and value
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "Field separator between station and value [default: ;]"
    )]
    pub delimiter: Option<char>,

    /// Skip lines without a station/value pair instead of failing
    #[arg(
        long = "skip-malformed",
        help = "Skip lines without a station/value pair instead of failing"
    )]
    pub skip_malformed: bool,

    /// Fail on values that do not parse as numbers
    ///
    /// By default such values are recorded as 0.0 and counted in the log.
    #[arg(
        long = "reject-invalid-values",
        help = "Fail on values that do not parse instead of recording 0.0"
    )]
    pub reject_invalid_values: bool,

    /// Output format for the summary line
    #[arg(long = "format", value_enum, help = "Output format for the summary line")]
    pub output_format: Option<OutputFormat>,

    /// Show a byte progress bar on stderr while reading
    #[arg(long = "progress", help = "Show a progress bar while reading")]
    pub progress: bool,

    /// Write a CPU flamegraph (SVG) of the summary run to this file
    #[arg(
        long = "cpu-profile",
        value_name = "FILE",
        help = "Write a CPU flamegraph (SVG) to FILE"
    )]
    pub cpu_profile: Option<PathBuf>,

    /// CPU profiler sampling frequency
    #[arg(
        long = "profile-frequency",
        value_name = "HZ",
        help = "CPU profiler sampling frequency in Hz"
    )]
    pub profile_frequency: Option<i32>,

    /// Write a dhat heap profile of the summary run to this file
    #[arg(
        long = "mem-profile",
        value_name = "FILE",
        help = "Write a heap profile (dhat JSON) to FILE; needs the dhat-heap feature"
    )]
    pub mem_profile: Option<PathBuf>,

    /// Log span timings for the aggregation and report phases
    #[arg(long = "trace-spans", help = "Log timing of the aggregation and report phases")]
    pub trace_spans: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only errors are logged and the timing line is not printed.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logs and timing output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for the summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// {name=min/mean/max...}
    Braced,
    /// JSON object keyed by station
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Braced => ReportFormat::Braced,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Args {
    /// Input path from either the positional argument or `--input`
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().or(self.input_path.as_deref())
    }

    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = self.input_path() {
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }

            if !input.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(frequency) = self.profile_frequency {
            if frequency <= 0 {
                return Err(Error::configuration(
                    "Profiler frequency must be greater than 0 Hz",
                ));
            }
        }

        Ok(())
    }

    /// Get the log level from the quiet/verbose flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply command-line overrides on top of a layered configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(input) = self.input_path() {
            config.input.path = Some(input.to_path_buf());
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter;
        }
        if self.progress {
            config.input.show_progress = true;
        }

        if self.skip_malformed {
            config.parsing.malformed_lines = MalformedLinePolicy::Skip;
        }
        if self.reject_invalid_values {
            config.parsing.invalid_values = InvalidValuePolicy::Reject;
        }

        if let Some(format) = self.output_format {
            config.output.format = format.into();
        }
        if self.quiet {
            config.output.quiet = true;
        }

        if let Some(path) = &self.cpu_profile {
            config.profiling.cpu_profile = Some(path.clone());
        }
        if let Some(frequency) = self.profile_frequency {
            config.profiling.frequency_hz = frequency;
        }
        if let Some(path) = &self.mem_profile {
            config.profiling.mem_profile = Some(path.clone());
        }
        if self.trace_spans {
            config.profiling.trace_spans = true;
        }
    }
}
