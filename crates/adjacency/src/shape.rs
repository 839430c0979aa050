use crate::error::{AdjacencyError, Result};
use serde::Serialize;
use std::fmt;

/// Rows and columns of a grid graph with 4-neighbour adjacency.
///
/// A shape is only constructed through [`GridShape::new`], so every value
/// has both dimensions at least 1 and an edge count that fits in `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridShape {
    rows: u64,
    cols: u64,
}

impl GridShape {
    pub fn new(rows: u64, cols: u64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(AdjacencyError::InvalidShape { rows, cols });
        }
        // 2rc - r - c must be representable, which also bounds rc
        rows.checked_mul(cols)
            .and_then(|cells| cells.checked_mul(2))
            .ok_or(AdjacencyError::ShapeTooLarge { rows, cols })?;
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn cols(&self) -> u64 {
        self.cols
    }

    pub fn cells(&self) -> u64 {
        self.rows * self.cols
    }

    /// Total number of grid edges, `2rc - r - c`
    pub fn edge_count(&self) -> u64 {
        2 * self.cells() - self.rows - self.cols
    }

    /// A single row or column degenerates to a path on `max(r, c)` vertices
    pub fn is_path(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Same grid with `rows <= cols`
    pub fn normalized(&self) -> Self {
        if self.rows > self.cols {
            self.transposed()
        } else {
            *self
        }
    }

    pub(crate) fn check_occupancy(&self, occupied: u64) -> Result<()> {
        if occupied > self.cells() {
            return Err(AdjacencyError::OccupancyOutOfRange {
                occupied,
                cells: self.cells(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
