//! Application constants for the station summary tool
//!
//! Default values and fixed figures shared by the parser, configuration
//! and CLI layers.

// =============================================================================
// Input Format
// =============================================================================

/// Separator between the station name and the value on each line
pub const DEFAULT_DELIMITER: char = ';';

/// Lines starting with this character are ignored
pub const DEFAULT_COMMENT_PREFIX: char = '#';

/// Default read buffer size in KiB
pub const DEFAULT_READ_BUFFER_KB: usize = 256;

/// Largest accepted read buffer (1 GiB)
pub const MAX_READ_BUFFER_KB: usize = 1 << 20;

/// Expected station count; sizes the table up front to avoid early rehashing
pub const INITIAL_STATION_CAPACITY: usize = 1 << 10;

// =============================================================================
// Reporting
// =============================================================================

/// Decimal places used for min/mean/max in the summary
pub const REPORT_PRECISION: usize = 1;

/// Bytes per gigabyte in the timing diagnostic
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

// =============================================================================
// Configuration and Environment
// =============================================================================

/// Application directory name under the user config directory
pub const APP_CONFIG_DIR: &str = "station-summary";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that supplies the input path
pub const ENV_INPUT_PATH: &str = "STATION_SUMMARY_INPUT";

/// Crate name used as the default log filter target
pub const LOG_TARGET: &str = "station_summary";

// =============================================================================
// Profiling
// =============================================================================

/// Default CPU profiler sampling frequency in Hz
pub const DEFAULT_PROFILE_FREQUENCY_HZ: i32 = 1000;

/// Libraries excluded from CPU profile stacks
pub const PROFILE_BLOCKLIST: &[&str] = &["libc", "libgcc", "pthread", "vdso"];
