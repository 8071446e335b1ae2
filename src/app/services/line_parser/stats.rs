//! Parsing statistics for a single pass over the input
//!
//! Tracks how many lines were read and what became of them, so that skipped
//! and defaulted lines are visible in the log even though they do not stop
//! the run.

/// Counters for one pass of the line parser
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines read
    pub lines_read: u64,

    /// Lines skipped as comments
    pub comments: u64,

    /// Observations handed to the aggregator (including defaulted ones)
    pub observations: u64,

    /// Malformed lines skipped under the skip policy
    pub malformed_skipped: u64,

    /// Observations whose value failed to parse and was recorded as 0.0
    pub values_defaulted: u64,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            comments: 0,
            observations: 0,
            malformed_skipped: 0,
            values_defaulted: 0,
        }
    }

    /// True when any line was skipped or any value defaulted
    pub fn has_issues(&self) -> bool {
        self.malformed_skipped > 0 || self.values_defaulted > 0
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines: {} observations, {} comments, {} malformed skipped, {} values defaulted to 0.0",
            self.lines_read,
            self.observations,
            self.comments,
            self.malformed_skipped,
            self.values_defaulted
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
