//! Test utilities for aggregator testing

use std::io::{self, BufRead, Read};

use super::streaming::{AggregationResult, Aggregator};
use crate::Result;
use crate::app::services::line_parser::ParseOptions;


/// Aggregate an in-memory input with default options
pub fn aggregate_str(input: &str) -> Result<AggregationResult> {
    Aggregator::new(ParseOptions::default()).aggregate(input.as_bytes())
}

/// Reader that yields `data` and then fails
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: io::Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(io::Error::other("disk went away"));
        }
        Ok(n)
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.data.position() as usize >= self.data.get_ref().len() {
            return Err(io::Error::other("disk went away"));
        }
        self.data.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt)
    }
}
