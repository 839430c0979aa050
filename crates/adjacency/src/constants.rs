/// Expected header of a dense table file
pub const EXPECTED_HEADER: [&str; 5] = ["r", "c", "o", "a", "count"];

/// Last line of a complete dense table file
pub const DONE_SENTINEL: &str = ".DONE.";

/// Extension of dense table files
pub const TABLE_EXTENSION: &str = "csv";

/// Mismatches listed per bound when `--show` is given
pub const DEFAULT_MAX_SHOW: usize = 20;

/// Per-o sum failures listed before only the total is reported
pub const MAX_REPORTED_SUM_FAILURES: usize = 10;

/// Widest row mask the transfer-matrix DP accepts (2^16 states)
pub const MAX_DP_WIDTH: u64 = 16;

/// Exit codes shared by the single-file verifiers
pub const EXIT_OK: i32 = 0;
pub const EXIT_MISMATCH: i32 = 1;
pub const EXIT_BAD_DATA: i32 = 2;
