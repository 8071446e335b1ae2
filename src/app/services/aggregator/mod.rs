//! Single-pass aggregation of observations into per-station statistics
//!
//! The aggregator reads the input line by line, hands each line to the
//! [`LineParser`](crate::app::services::line_parser::LineParser), and folds
//! every observation into a [`StationTable`] in input order. Each line is
//! processed exactly once with one hash lookup per observation; only a
//! fixed-size summary is kept per station, so memory grows with the number of
//! distinct stations rather than with the input.
//!
//! # Example Usage
//!
//! ```rust
//! use station_summary::app::services::aggregator::Aggregator;
//! use station_summary::app::services::line_parser::ParseOptions;
//!
//! # fn example() -> station_summary::Result<()> {
//! let input = "A;1.0\nA;3.0\nB;2.0\n";
//! let result = Aggregator::new(ParseOptions::default()).aggregate(input.as_bytes())?;
//!
//! assert_eq!(result.table.len(), 2);
//! assert_eq!(result.table.get("A").map(|s| s.mean()), Some(2.0));
//! # Ok(())
//! # }
//! ```

pub mod streaming;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use streaming::{AggregationResult, Aggregator};
pub use table::StationTable;
