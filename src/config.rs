//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line overrides. The result is a
//! single [`Config`] value built once at start-up and passed down explicitly.

use crate::app::services::line_parser::ParseOptions;
use crate::app::services::reporter::ReportFormat;
use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_COMMENT_PREFIX, DEFAULT_DELIMITER,
    DEFAULT_PROFILE_FREQUENCY_HZ, DEFAULT_READ_BUFFER_KB, ENV_INPUT_PATH, MAX_READ_BUFFER_KB,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for a summary run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input file and line format
    pub input: InputConfig,

    /// Handling of lines that do not parse cleanly
    pub parsing: ParsingConfig,

    /// Summary rendering
    pub output: OutputConfig,

    /// Optional profiling around the summary run
    pub profiling: ProfilingConfig,
}

/// Input file and line format settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the observation file
    pub path: Option<PathBuf>,

    /// Separator between station and value
    pub delimiter: char,

    /// Lines starting with this character are skipped
    pub comment_prefix: char,

    /// Read buffer size in KiB
    pub read_buffer_kb: usize,

    /// Show a byte progress bar on stderr while reading
    pub show_progress: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: DEFAULT_DELIMITER,
            comment_prefix: DEFAULT_COMMENT_PREFIX,
            read_buffer_kb: DEFAULT_READ_BUFFER_KB,
            show_progress: false,
        }
    }
}

/// What to do with a line that has no station/value pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Abort the run with an error naming the line
    #[default]
    Fail,
    /// Skip the line and count it
    Skip,
}

/// What to do with a value field that is not a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidValuePolicy {
    /// Record the observation as `0.0` and count it
    #[default]
    Zero,
    /// Abort the run with an error naming the line
    Reject,
}

/// Parsing behaviour for imperfect input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub malformed_lines: MalformedLinePolicy,
    pub invalid_values: InvalidValuePolicy,
}

/// Summary output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,

    /// Suppress the timing diagnostic on stderr
    pub quiet: bool,
}

/// Profiling hooks wrapped around the summary run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Write a CPU flamegraph (SVG) to this path
    pub cpu_profile: Option<PathBuf>,

    /// Sampling frequency for the CPU profiler
    pub frequency_hz: i32,

    /// Write a dhat heap profile (JSON) to this path after the run
    pub mem_profile: Option<PathBuf>,

    /// Emit span timing events in the log
    pub trace_spans: bool,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            cpu_profile: None,
            frequency_hz: DEFAULT_PROFILE_FREQUENCY_HZ,
            mem_profile: None,
            trace_spans: false,
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/station-summary/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration { message } => {
                Error::configuration(format!("{} ({})", message, path.display()))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid config file: {}", e)))
    }

    /// Load configuration layered as defaults -> file -> environment
    ///
    /// Command-line overrides are applied afterwards by the caller.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        debug!("Layered configuration: {:?}", config);

        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_INPUT_PATH).filter(|p| !p.trim().is_empty()) {
            self.input.path = Some(PathBuf::from(path));
        }
    }

    /// Check that the configuration describes a runnable summary
    pub fn validate(&self) -> Result<()> {
        if self.input.path.is_none() {
            return Err(Error::configuration(
                "No input file given (pass a path, use --input, or set STATION_SUMMARY_INPUT)",
            ));
        }

        let delimiter = self.input.delimiter;
        if delimiter == '\n' || delimiter == '\r' {
            return Err(Error::configuration(
                "Delimiter cannot be a line terminator",
            ));
        }

        if delimiter == self.input.comment_prefix {
            return Err(Error::configuration(format!(
                "Delimiter and comment prefix must differ (both '{}')",
                delimiter
            )));
        }

        if self.input.read_buffer_kb == 0 {
            return Err(Error::configuration(
                "Read buffer size must be greater than 0 KiB",
            ));
        }

        if self.input.read_buffer_kb > MAX_READ_BUFFER_KB {
            return Err(Error::configuration(format!(
                "Read buffer size must be at most {} KiB (got {})",
                MAX_READ_BUFFER_KB, self.input.read_buffer_kb
            )));
        }

        if self.profiling.frequency_hz <= 0 {
            return Err(Error::configuration(
                "Profiler frequency must be greater than 0 Hz",
            ));
        }

        Ok(())
    }

    /// The validated input path
    pub fn input_path(&self) -> Result<&Path> {
        self.input
            .path
            .as_deref()
            .ok_or_else(|| Error::configuration("No input file given"))
    }

    /// Line parser options derived from this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            delimiter: self.input.delimiter,
            comment_prefix: self.input.comment_prefix,
            malformed_lines: self.parsing.malformed_lines,
            invalid_values: self.parsing.invalid_values,
        }
    }
}
