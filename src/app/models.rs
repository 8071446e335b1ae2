//! Data models for station summaries
//!
//! This module contains the core data structures for one parsed observation and
//! the running statistics kept per station while the input is folded.

use serde::{Deserialize, Serialize};

// =============================================================================
// Observation
// =============================================================================

/// A single value tagged with the station it was recorded at
///
/// Borrowed from the current line buffer and folded into a [`StationStats`]
/// immediately, so it never outlives the line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    /// Station name (field 0 of the line, never empty)
    pub station: &'a str,

    /// Parsed value at 32-bit precision
    pub value: f32,

    /// True when the value field did not parse and `0.0` was substituted
    pub value_defaulted: bool,
}

impl<'a> Observation<'a> {
    /// Create an observation from a successfully parsed value
    pub fn new(station: &'a str, value: f32) -> Self {
        Self {
            station,
            value,
            value_defaulted: false,
        }
    }

    /// Create an observation whose value failed to parse
    pub fn defaulted(station: &'a str) -> Self {
        Self {
            station,
            value: 0.0,
            value_defaulted: true,
        }
    }
}

// =============================================================================
// Station Statistics
// =============================================================================

/// Running min/max/sum/count summary for one station
///
/// Invariant: `min <= every recorded value <= max` and `count >= 1`.
/// Values are compared at `f32` precision; the sum is carried in `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationStats {
    /// Smallest value seen
    pub min: f32,

    /// Largest value seen
    pub max: f32,

    /// Total of all values seen
    pub sum: f64,

    /// Number of values seen
    pub count: u64,
}

impl StationStats {
    /// Start a summary from the first observation of a station
    pub fn new(value: f32) -> Self {
        Self {
            min: value,
            max: value,
            sum: f64::from(value),
            count: 1,
        }
    }

    /// Fold one more value into the summary
    #[inline]
    pub fn record(&mut self, value: f32) {
        self.count += 1;
        self.sum += f64::from(value);
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Arithmetic mean of all recorded values
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
