//! Streaming aggregation over a buffered reader
//!
//! One line buffer is reused for the whole pass. Any read or decoding error
//! aborts the pass; the partially filled table is dropped with it.

use std::io::BufRead;
use tracing::{info, info_span, warn};

use super::table::StationTable;
use crate::app::services::line_parser::{LineParser, ParseOptions, ParseStats};
use crate::constants::INITIAL_STATION_CAPACITY;
use crate::{Error, Result};

/// Completed aggregation: the station table plus parsing counters
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Per-station statistics for the whole input
    pub table: StationTable,

    /// What happened to each line of the input
    pub stats: ParseStats,
}

impl AggregationResult {
    /// Number of distinct stations seen
    pub fn station_count(&self) -> usize {
        self.table.len()
    }
}

/// Folds an input stream into a [`StationTable`] in one pass
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    options: ParseOptions,
}

impl Aggregator {
    /// Create an aggregator with the given parse options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Read every line of `reader` and fold its observation into the table
    pub fn aggregate<R: BufRead>(&self, mut reader: R) -> Result<AggregationResult> {
        let _span = info_span!("aggregate").entered();

        let mut parser = LineParser::new(self.options);
        let mut table = StationTable::with_capacity(INITIAL_STATION_CAPACITY);
        let mut buf: Vec<u8> = Vec::with_capacity(128);
        let mut line_number: u64 = 0;

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).map_err(|e| {
                Error::io(format!("Failed to read line {}", line_number + 1), e)
            })?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let line =
                std::str::from_utf8(bytes).map_err(|e| Error::invalid_utf8(line_number, e))?;

            if let Some(observation) = parser.parse(line_number, line)? {
                table.record(&observation);
            }
        }

        let stats = parser.into_stats();
        info!(
            "Aggregated {} stations from {}",
            table.len(),
            stats.summary()
        );
        if stats.values_defaulted > 0 {
            warn!(
                "{} values could not be parsed and were recorded as 0.0",
                stats.values_defaulted
            );
        }
        if stats.malformed_skipped > 0 {
            warn!("{} malformed lines were skipped", stats.malformed_skipped);
        }

        Ok(AggregationResult { table, stats })
    }
}
