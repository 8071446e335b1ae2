//! Test utilities for line parser testing

use super::parser::ParseOptions;
use crate::config::{InvalidValuePolicy, MalformedLinePolicy};

// Test modules
mod parser_tests;

/// Options that skip malformed lines instead of failing
pub fn skipping_options() -> ParseOptions {
    ParseOptions {
        malformed_lines: MalformedLinePolicy::Skip,
        ..ParseOptions::default()
    }
}

/// Options that reject unparseable values
pub fn strict_value_options() -> ParseOptions {
    ParseOptions {
        invalid_values: InvalidValuePolicy::Reject,
        ..ParseOptions::default()
    }
}
