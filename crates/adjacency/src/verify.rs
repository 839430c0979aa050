//! Data-correctness checks on dense tables and comparison of the closed-form
//! bounds against the bounds a table actually supports.

use crate::constants::MAX_REPORTED_SUM_FAILURES;
use crate::csv_reader::{RawTable, read_dense_table};
use crate::error::{AdjacencyError, Result};
use crate::shape::GridShape;
use crate::table::DenseTable;

use log::{error, info};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::Serialize;
use std::path::Path;

/// Runs every data-correctness check and returns the validated table.
///
/// Checks, in order: row count, `(o,a)` ranges, duplicates, negative counts,
/// `sum(count) = 2^(rc)`, per-o sums against `C(rc, o)`, and the two
/// boundary entries.
pub fn check_table(raw: &RawTable) -> Result<DenseTable> {
    let shape = raw.shape;
    let n = shape.cells();
    let max_a = shape.edge_count();

    // saturates for shapes no file could describe densely
    let expected = (n + 1).saturating_mul(max_a + 1);
    let found = raw.rows.len() as u64;
    if found != expected {
        return Err(AdjacencyError::RowCount { expected, found });
    }
    info!("Dense format confirmed.");

    let mut table = DenseTable::zeroed(shape);
    let mut seen = vec![false; table.len()];
    let mut total = BigUint::zero();
    let mut per_o = vec![BigUint::zero(); n as usize + 1];

    for entry in &raw.rows {
        let (o, a) = (entry.occupied, entry.adjacency);
        if o > n || a > max_a {
            return Err(AdjacencyError::OutOfRange {
                row: entry.row,
                occupied: o,
                adjacency: a,
            });
        }
        let idx = (o * (max_a + 1) + a) as usize;
        if std::mem::replace(&mut seen[idx], true) {
            return Err(AdjacencyError::DuplicateEntry {
                row: entry.row,
                occupied: o,
                adjacency: a,
            });
        }
        let cnt = entry
            .count
            .to_biguint()
            .ok_or(AdjacencyError::NegativeCount {
                occupied: o,
                adjacency: a,
            })?;
        total += &cnt;
        per_o[o as usize] += &cnt;
        *table.get_mut(o, a) = cnt;
    }

    if total != BigUint::one() << n {
        return Err(AdjacencyError::TotalMismatch {
            cells: n,
            found: total.to_string(),
        });
    }
    info!("sum(count) = 2^(r*c)");

    let mut failed = 0;
    for (o, (sum, want)) in per_o.iter().zip(binomial_row(n)).enumerate() {
        if *sum != want {
            if failed < MAX_REPORTED_SUM_FAILURES {
                error!("sum_a(o={o})={sum}, expected {want}");
            }
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(AdjacencyError::OccupancySumMismatch { failed });
    }
    info!("per-o sums match binomial coefficients");

    let empty = table.get(0, 0);
    let full = table.get(n, max_a);
    if !empty.is_one() || !full.is_one() {
        return Err(AdjacencyError::BoundaryCondition {
            cells: n,
            edges: max_a,
            empty: empty.to_string(),
            full: full.to_string(),
        });
    }
    info!("boundary conditions OK");

    Ok(table)
}

/// `C(n, 0), C(n, 1), ..., C(n, n)`
fn binomial_row(n: u64) -> Vec<BigUint> {
    let mut row = Vec::with_capacity(n as usize + 1);
    let mut current = BigUint::one();
    for k in 0..=n {
        row.push(current.clone());
        current = current * (n - k) / (k + 1);
    }
    row
}

/// Reads a dense table file and runs [`check_table`] on it
pub fn verify_csv_file<P: AsRef<Path>>(path: P) -> Result<DenseTable> {
    let raw = read_dense_table(path)?;
    check_table(&raw)
}

/// Closed-form value that disagrees with the table for one occupancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub occupied: u64,
    /// `None` when the table has no nonzero count for this occupancy
    pub expected: Option<u64>,
    pub computed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundsReport {
    pub shape: GridShape,
    pub min_mismatches: Vec<Mismatch>,
    pub max_mismatches: Vec<Mismatch>,
}

impl BoundsReport {
    pub fn is_clean(&self) -> bool {
        self.min_mismatches.is_empty() && self.max_mismatches.is_empty()
    }

    /// Logs the mismatch counts and, if `show`, up to `max_show` of each kind
    pub fn log_summary(&self, show: bool, max_show: usize) {
        if self.is_clean() {
            info!("No amin/amax mismatches.");
            return;
        }

        error!("MISMATCHES FOUND");
        for (label, list) in [("amin", &self.min_mismatches), ("amax", &self.max_mismatches)] {
            if list.is_empty() {
                continue;
            }
            error!("  {label} mismatches: {}", list.len());
            if show {
                for m in list.iter().take(max_show) {
                    let truth = m
                        .expected
                        .map_or_else(|| "-".to_string(), |v| v.to_string());
                    error!("    o={:3}  true={:>3}  cf={:3}", m.occupied, truth, m.computed);
                }
            }
        }
    }
}

/// Compares the closed-form bounds against the support of `table`
pub fn compare_bounds(table: &DenseTable) -> BoundsReport {
    let shape = table.shape();
    let mut report = BoundsReport {
        shape,
        min_mismatches: Vec::new(),
        max_mismatches: Vec::new(),
    };

    for (closed, truth) in shape.bounds_profile().into_iter().zip(table.true_bounds()) {
        let o = closed.occupied;
        if truth.map(|t| t.min) != Some(closed.min) {
            report.min_mismatches.push(Mismatch {
                occupied: o,
                expected: truth.map(|t| t.min),
                computed: closed.min,
            });
        }
        if truth.map(|t| t.max) != Some(closed.max) {
            report.max_mismatches.push(Mismatch {
                occupied: o,
                expected: truth.map(|t| t.max),
                computed: closed.max,
            });
        }
    }
    report
}

/// Reads, checks and compares one dense table file
pub fn verify_bounds_file<P: AsRef<Path>>(path: P) -> Result<BoundsReport> {
    let table = verify_csv_file(path)?;
    Ok(compare_bounds(&table))
}
