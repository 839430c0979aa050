pub mod batch;
pub mod bounds;
pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod csv_writer;
pub mod dp;
pub mod error;
pub mod shape;
pub mod table;
pub mod verify;

pub use batch::{BatchSummary, CheckKind, FileVerifier, InProcessVerifier, SubprocessVerifier};
pub use bounds::{AdjacencyBounds, max_adjacency, min_adjacency};
pub use config::Config;
pub use constants::{DONE_SENTINEL, EXPECTED_HEADER};
pub use csv_reader::{RawTable, TableRow, read_dense_table};
pub use csv_writer::write_dense_table;
pub use dp::compute_table;
pub use error::AdjacencyError;
pub use shape::GridShape;
pub use table::DenseTable;
pub use verify::{BoundsReport, Mismatch, check_table, compare_bounds};
