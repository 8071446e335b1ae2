//! Line parser for `<station>;<value>` observation files
//!
//! This module turns raw text lines into [`Observation`]s, deciding for each
//! line whether it is a comment, an observation, or malformed, and applying
//! the configured policies for malformed lines and unparseable values.
//!
//! ## Architecture
//!
//! - [`parser`] - Single-line classification and policy application
//! - [`stats`] - Per-pass counters for comments, skips and defaulted values
//!
//! ## Usage
//!
//! ```rust
//! use station_summary::app::services::line_parser::{LineParser, ParseOptions};
//!
//! # fn example() -> station_summary::Result<()> {
//! let mut parser = LineParser::new(ParseOptions::default());
//! let observation = parser.parse(1, "Hamburg;12.0")?.expect("observation");
//! assert_eq!(observation.station, "Hamburg");
//! assert_eq!(parser.stats().observations, 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`Observation`]: crate::app::models::Observation

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{LineParser, ParseOptions, ParsedLine, parse_line, parse_value};
pub use stats::ParseStats;
