use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdjacencyError>;

#[derive(Debug, Error)]
pub enum AdjacencyError {
    #[error("Invalid grid shape {rows}x{cols}: both dimensions must be at least 1")]
    InvalidShape { rows: u64, cols: u64 },

    #[error("Grid shape {rows}x{cols} is too large: edge count overflows u64")]
    ShapeTooLarge { rows: u64, cols: u64 },

    #[error("Occupancy {occupied} is out of range for a grid with {cells} cells")]
    OccupancyOutOfRange { occupied: u64, cells: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File does not end with .DONE.")]
    MissingSentinel,

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected 5 columns, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Invalid integer at row {row}: {value}")]
    IntParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Invalid count at row {row}: {value}")]
    CountParse {
        row: usize,
        value: String,
        #[source]
        source: num_bigint::ParseBigIntError,
    },

    #[error("Table has no data rows")]
    EmptyTable,

    #[error("Mixed (r,c) values in file: row {row} has ({rows},{cols})")]
    MixedShape { row: usize, rows: u64, cols: u64 },

    #[error("Expected {expected} rows, found {found}")]
    RowCount { expected: u64, found: u64 },

    #[error("Out-of-range (o,a)=({occupied},{adjacency}) at row {row}")]
    OutOfRange {
        row: usize,
        occupied: u64,
        adjacency: u64,
    },

    #[error("Duplicate entry for (o,a)=({occupied},{adjacency}) at row {row}")]
    DuplicateEntry {
        row: usize,
        occupied: u64,
        adjacency: u64,
    },

    #[error("Negative count at (o,a)=({occupied},{adjacency})")]
    NegativeCount { occupied: u64, adjacency: u64 },

    #[error("sum(count)={found}, expected 2^{cells}")]
    TotalMismatch { cells: u64, found: String },

    #[error("per-o sums failed for {failed} values")]
    OccupancySumMismatch { failed: usize },

    #[error("Boundary conditions failed: count(0,0)={empty}, count({cells},{edges})={full}")]
    BoundaryCondition {
        cells: u64,
        edges: u64,
        empty: String,
        full: String,
    },

    #[error("Grid width {width} exceeds the supported transfer-matrix width {max}")]
    WidthTooLarge { width: u64, max: u64 },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("No CSV files found in {path}")]
    NoTableFiles { path: PathBuf },

    #[error("Failed to run verifier on {path}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
