//! Summary reporting for a completed station table
//!
//! The reporter sorts stations by name (ascending byte order, which is code
//! point order for UTF-8 and therefore case-sensitive) and renders one line:
//!
//! ```text
//! {A=1.0/2.0/3.0B=2.0/2.0/2.0}
//! ```
//!
//! Each number is printed with one decimal place using Rust's `{:.1}`
//! formatting, which rounds the exact binary value and breaks ties to even
//! (`9.25` renders as `9.2`). A JSON rendering of the same entries is also
//! available for scripting.

pub mod report;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use report::{Report, ReportEntry, ReportFormat};
