//! Closed-form bounds on the on-on adjacency count of a grid graph.
//!
//! For an r×c grid with exactly `o` marked cells, [`min_adjacency`] and
//! [`max_adjacency`] return the smallest and largest number of grid edges
//! whose endpoints are both marked, over every choice of the `o` cells.
//! Neither function enumerates configurations: the minimum is O(1) and the
//! maximum scans at most `min(r, c)` candidate block heights.

use crate::error::Result;
use crate::shape::GridShape;

/// Minimum on-on adjacency count for `occupied` cells on a `rows`×`cols` grid.
///
/// # Errors
/// Returns an error for a zero dimension, an overflowing shape, or
/// `occupied > rows * cols`.
pub fn min_adjacency(rows: u64, cols: u64, occupied: u64) -> Result<u64> {
    GridShape::new(rows, cols)?.min_adjacency(occupied)
}

/// Maximum on-on adjacency count for `occupied` cells on a `rows`×`cols` grid.
///
/// # Errors
/// Returns an error for a zero dimension, an overflowing shape, or
/// `occupied > rows * cols`.
pub fn max_adjacency(rows: u64, cols: u64, occupied: u64) -> Result<u64> {
    GridShape::new(rows, cols)?.max_adjacency(occupied)
}

/// Lower and upper adjacency bound for one occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyBounds {
    pub occupied: u64,
    pub min: u64,
    pub max: u64,
}

impl GridShape {
    pub fn min_adjacency(&self, occupied: u64) -> Result<u64> {
        self.check_occupancy(occupied)?;
        Ok(min_unchecked(self.rows(), self.cols(), occupied))
    }

    pub fn max_adjacency(&self, occupied: u64) -> Result<u64> {
        self.check_occupancy(occupied)?;
        let norm = self.normalized();
        Ok(max_unchecked(norm.rows(), norm.cols(), occupied))
    }

    /// Bounds for every occupancy `0..=cells`
    pub fn bounds_profile(&self) -> Vec<AdjacencyBounds> {
        let norm = self.normalized();
        (0..=self.cells())
            .map(|o| AdjacencyBounds {
                occupied: o,
                min: min_unchecked(self.rows(), self.cols(), o),
                max: max_unchecked(norm.rows(), norm.cols(), o),
            })
            .collect()
    }
}

fn min_unchecked(r: u64, c: u64, o: u64) -> u64 {
    if r == 1 || c == 1 {
        let n = r.max(c);
        let alpha = n.div_ceil(2);
        if o <= alpha {
            return 0;
        }
        return 2 * o - n - 1;
    }

    // checkerboard colouring: one colour class is an independent set
    let alpha = (r * c).div_ceil(2);
    if o <= alpha {
        return 0;
    }
    let t = o - alpha;

    let perimeter = 2 * r + 2 * c - 4;
    let interior_cost = if r.min(c) == 2 { 3 } else { 4 };
    let both_odd = r % 2 == 1 && c % 2 == 1;
    // last overflow still placed on the boundary
    let t3 = if both_odd {
        perimeter / 2 - 1
    } else {
        perimeter / 2
    };

    if t <= t3 {
        boundary_cost(t, both_odd)
    } else {
        boundary_cost(t3, both_odd) + interior_cost * (t - t3)
    }
}

/// Forced adjacencies after `t >= 1` overflow cells on the boundary.
///
/// An odd×odd grid has one more cell of the majority colour, which shifts
/// the first two steps and the slope offset.
fn boundary_cost(t: u64, both_odd: bool) -> u64 {
    match (both_odd, t) {
        (true, 1) => 3,
        (true, 2) => 6,
        (true, _) => 3 * t - 1,
        (false, 1) => 2,
        (false, _) => 3 * t - 2,
    }
}

/// Expects `r <= c`.
fn max_unchecked(r: u64, c: u64, o: u64) -> u64 {
    if o == 0 {
        return 0;
    }
    if r == 1 || c == 1 {
        return o - 1;
    }
    match o {
        1 => return 0,
        2 => return 1,
        3 => return 2,
        _ => {}
    }

    // q full columns of height h plus one partial column of height t
    (1..=r)
        .filter_map(|h| {
            let q = o / h;
            let t = o - h * q;
            let width = q + u64::from(t > 0);
            if width == 0 || width > c {
                return None;
            }
            if q == 0 {
                return Some(t - 1);
            }
            let rect = 2 * h * q - h - q;
            let extra = if t == 0 { 0 } else { 2 * t - 1 };
            Some(rect + extra)
        })
        .max()
        .unwrap_or(0)
}
