//! Core line parsing implementation
//!
//! [`parse_line`] classifies a single line without side effects.
//! [`LineParser`] wraps it with the configured policies and keeps the
//! counters for the pass.

use tracing::{debug, trace};

use super::stats::ParseStats;
use crate::app::models::Observation;
use crate::config::{InvalidValuePolicy, MalformedLinePolicy};
use crate::constants::{DEFAULT_COMMENT_PREFIX, DEFAULT_DELIMITER};
use crate::{Error, Result};

/// Line format and policy settings for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Separator between station and value
    pub delimiter: char,
    /// Lines starting with this character are comments
    pub comment_prefix: char,
    pub malformed_lines: MalformedLinePolicy,
    pub invalid_values: InvalidValuePolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            comment_prefix: DEFAULT_COMMENT_PREFIX,
            malformed_lines: MalformedLinePolicy::default(),
            invalid_values: InvalidValuePolicy::default(),
        }
    }
}

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedLine<'a> {
    /// Line starts with the comment prefix
    Comment,
    /// Line carries a station and a value
    Observation(Observation<'a>),
    /// Line has no delimiter or an empty station name
    Malformed,
}

/// Classify a single line (without its trailing `\n`)
///
/// A trailing `\r` is ignored. Only the first two fields are read; anything
/// after a second delimiter is ignored. A value that does not parse yields an
/// observation of `0.0` marked as defaulted.
pub fn parse_line<'a>(line: &'a str, options: &ParseOptions) -> ParsedLine<'a> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.starts_with(options.comment_prefix) {
        return ParsedLine::Comment;
    }

    let mut fields = line.splitn(3, options.delimiter);
    let station = fields.next().unwrap_or_default();
    let Some(value) = fields.next() else {
        return ParsedLine::Malformed;
    };

    if station.is_empty() {
        return ParsedLine::Malformed;
    }

    match parse_value(value) {
        Some(value) => ParsedLine::Observation(Observation::new(station, value)),
        None => ParsedLine::Observation(Observation::defaulted(station)),
    }
}

/// Parse a value field at 32-bit precision
///
/// `nan`, `inf` and magnitudes beyond `f32::MAX` are not valid readings and
/// are treated like any other unparseable value.
pub fn parse_value(field: &str) -> Option<f32> {
    field.parse::<f32>().ok().filter(|value| value.is_finite())
}

/// Stateful parser applying the configured policies across a pass
#[derive(Debug)]
pub struct LineParser {
    options: ParseOptions,
    stats: ParseStats,
}

impl LineParser {
    /// Create a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            stats: ParseStats::new(),
        }
    }

    /// Parse one line, returning the observation it carries, if any
    ///
    /// Comments and skipped malformed lines yield `Ok(None)`. Malformed lines
    /// under [`MalformedLinePolicy::Fail`] and unparseable values under
    /// [`InvalidValuePolicy::Reject`] are errors.
    pub fn parse<'a>(&mut self, line_number: u64, line: &'a str) -> Result<Option<Observation<'a>>> {
        self.stats.lines_read += 1;

        match parse_line(line, &self.options) {
            ParsedLine::Comment => {
                self.stats.comments += 1;
                Ok(None)
            }
            ParsedLine::Malformed => match self.options.malformed_lines {
                MalformedLinePolicy::Fail => Err(Error::malformed_line(line_number, line)),
                MalformedLinePolicy::Skip => {
                    self.stats.malformed_skipped += 1;
                    debug!("Skipped malformed line {}: {:?}", line_number, line);
                    Ok(None)
                }
            },
            ParsedLine::Observation(observation) if observation.value_defaulted => {
                match self.options.invalid_values {
                    InvalidValuePolicy::Reject => {
                        let value = line
                            .split(self.options.delimiter)
                            .nth(1)
                            .unwrap_or_default();
                        Err(Error::invalid_value(line_number, value.trim_end_matches('\r')))
                    }
                    InvalidValuePolicy::Zero => {
                        self.stats.values_defaulted += 1;
                        self.stats.observations += 1;
                        debug!(
                            "Line {}: value for '{}' did not parse, recorded as 0.0",
                            line_number, observation.station
                        );
                        Ok(Some(observation))
                    }
                }
            }
            ParsedLine::Observation(observation) => {
                self.stats.observations += 1;
                trace!("Line {}: {} = {}", line_number, observation.station, observation.value);
                Ok(Some(observation))
            }
        }
    }

    /// Counters for the lines parsed so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Consume the parser, returning its counters
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }
}
