//! Station Summary Library
//!
//! Computes per-station minimum, mean and maximum values from large delimited
//! observation files (`<station>;<value>` per line) in a single sequential pass.
//!
//! This library provides tools for:
//! - Parsing observation lines with configurable handling of malformed input
//! - Folding observations into per-station running statistics
//! - Rendering a deterministic, key-sorted summary line
//! - Layered configuration, structured logging and optional CPU and heap profiling

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod line_parser;
        pub mod reporter;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod profiling;
}

// Re-export commonly used types
pub use app::models::{Observation, StationStats};
pub use config::Config;

use std::path::PathBuf;

/// Result type alias for station summary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for station summary operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input file is missing or cannot be opened
    #[error("Input file not found: {path}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input line is not valid UTF-8
    #[error("Invalid UTF-8 on line {line_number}")]
    InvalidUtf8 {
        line_number: u64,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Line has no key/value pair
    #[error("Malformed line {line_number}: '{line}' (expected <station><delimiter><value>)")]
    MalformedLine { line_number: u64, line: String },

    /// Value field is not a number
    #[error("Invalid value on line {line_number}: '{value}'")]
    InvalidValue { line_number: u64, value: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Profiler could not be started or its report written
    #[error("Profiling error: {message}")]
    Profiling { message: String },
}

impl Error {
    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid UTF-8 error
    pub fn invalid_utf8(line_number: u64, source: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            line_number,
            source,
        }
    }

    /// Create a malformed line error
    pub fn malformed_line(line_number: u64, line: impl Into<String>) -> Self {
        Self::MalformedLine {
            line_number,
            line: line.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(line_number: u64, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            line_number,
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a profiling error
    pub fn profiling(message: impl Into<String>) -> Self {
        Self::Profiling {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
