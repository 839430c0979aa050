//! Exact dense tables by a row-by-row transfer-matrix DP.
//!
//! The grid is swept one row of width `min(r, c)` at a time. The state is
//! the occupancy mask of the last row together with a sparse map from the
//! packed `(o, a)` pair to the number of partial configurations reaching it.

use crate::constants::MAX_DP_WIDTH;
use crate::error::{AdjacencyError, Result};
use crate::shape::GridShape;
use crate::table::DenseTable;

use log::debug;
use num_bigint::BigUint;
use num_traits::One;
use std::collections::HashMap;

type PackedCounts = HashMap<u64, BigUint>;

/// Computes the dense `(o, a) -> count` table of `shape`.
///
/// # Errors
/// Returns [`AdjacencyError::WidthTooLarge`] when `min(r, c)` exceeds
/// [`MAX_DP_WIDTH`].
pub fn compute_table(shape: GridShape) -> Result<DenseTable> {
    let norm = shape.normalized();
    let width = norm.rows();
    if width > MAX_DP_WIDTH {
        return Err(AdjacencyError::WidthTooLarge {
            width,
            max: MAX_DP_WIDTH,
        });
    }
    let height = norm.cols();
    let stride = shape.edge_count() + 1;
    let states = 1usize << width;

    let occupied: Vec<u64> = (0..states).map(|m| u64::from(m.count_ones())).collect();
    let horizontal: Vec<u64> = (0..states)
        .map(|m| u64::from((m & (m << 1)).count_ones()))
        .collect();

    let mut prev: Vec<PackedCounts> = vec![PackedCounts::new(); states];
    prev[0].insert(0, BigUint::one());

    for k in 0..height {
        let mut next: Vec<PackedCounts> = vec![PackedCounts::new(); states];
        for (t, counts) in prev.iter().enumerate() {
            if counts.is_empty() {
                continue;
            }
            for (s, out) in next.iter_mut().enumerate() {
                let gained_o = occupied[s];
                let gained_a = horizontal[s] + u64::from((t & s).count_ones());
                for (&key, cnt) in counts {
                    let (o, a) = (key / stride, key % stride);
                    let packed = (o + gained_o) * stride + a + gained_a;
                    *out.entry(packed).or_default() += cnt;
                }
            }
        }
        prev = next;

        let active = prev.iter().filter(|m| !m.is_empty()).count();
        let keys: usize = prev.iter().map(HashMap::len).sum();
        debug!(
            "{shape}: row {}/{height}, active masks={active}, total keys={keys}",
            k + 1
        );
    }

    let mut table = DenseTable::zeroed(shape);
    for counts in prev {
        for (key, cnt) in counts {
            *table.get_mut(key / stride, key % stride) += cnt;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    /// Direct enumeration over all 2^(rc) subsets
    fn enumerate_table(shape: GridShape) -> DenseTable {
        let (r, c) = (shape.rows() as usize, shape.cols() as usize);
        let n = r * c;
        let mut edges = Vec::new();
        for i in 0..r {
            for j in 0..c {
                let k = i * c + j;
                if j + 1 < c {
                    edges.push((k, k + 1));
                }
                if i + 1 < r {
                    edges.push((k, k + c));
                }
            }
        }
        let mut table = DenseTable::zeroed(shape);
        for mask in 0u32..(1 << n) {
            let o = u64::from(mask.count_ones());
            let a = edges
                .iter()
                .filter(|&&(x, y)| (mask >> x) & 1 == 1 && (mask >> y) & 1 == 1)
                .count() as u64;
            *table.get_mut(o, a) += 1u32;
        }
        table
    }

    #[test]
    fn test_single_cell() {
        let table = compute_table(GridShape::new(1, 1).unwrap()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(*table.get(0, 0), BigUint::one());
        assert_eq!(*table.get(1, 0), BigUint::one());
    }

    #[test]
    fn test_two_by_two() {
        let table = compute_table(GridShape::new(2, 2).unwrap()).unwrap();
        // o=2: 4 adjacent pairs, 2 diagonal pairs
        assert_eq!(*table.get(2, 0), BigUint::from(2u32));
        assert_eq!(*table.get(2, 1), BigUint::from(4u32));
        assert_eq!(*table.get(3, 2), BigUint::from(4u32));
        assert_eq!(*table.get(4, 4), BigUint::one());
        assert!(table.get(4, 3).is_zero());
    }

    #[test]
    fn test_matches_enumeration() {
        for (r, c) in [(1, 4), (2, 3), (3, 2), (3, 3), (2, 5), (3, 4), (4, 3)] {
            let shape = GridShape::new(r, c).unwrap();
            assert_eq!(compute_table(shape).unwrap(), enumerate_table(shape), "{shape}");
        }
    }

    #[test]
    fn test_transpose_gives_same_counts() {
        let wide = compute_table(GridShape::new(2, 5).unwrap()).unwrap();
        let tall = compute_table(GridShape::new(5, 2).unwrap()).unwrap();
        let a: Vec<_> = wide.entries().map(|(o, a, c)| (o, a, c.clone())).collect();
        let b: Vec<_> = tall.entries().map(|(o, a, c)| (o, a, c.clone())).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_wide_grids() {
        let shape = GridShape::new(MAX_DP_WIDTH + 1, MAX_DP_WIDTH + 1).unwrap();
        assert!(matches!(
            compute_table(shape),
            Err(AdjacencyError::WidthTooLarge { .. })
        ));
    }
}
