use crate::bounds::AdjacencyBounds;
use crate::shape::GridShape;

use itertools::{Itertools, MinMaxResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// Dense count table: for every `(o, a)`, the number of size-`o` subsets
/// of the grid whose on-on adjacency count is `a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseTable {
    shape: GridShape,
    /// row-major over `o`, `edge_count + 1` entries per occupancy
    counts: Vec<BigUint>,
}

impl DenseTable {
    /// Creates an all-zero table for `shape`
    pub fn zeroed(shape: GridShape) -> Self {
        let len = Self::row_len(&shape) * (shape.cells() as usize + 1);
        Self {
            shape,
            counts: vec![BigUint::zero(); len],
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of `(o, a)` entries, `(rc + 1)(2rc - r - c + 1)`
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// # Panics
    /// Panics if `(occupied, adjacency)` lies outside the table.
    pub fn get(&self, occupied: u64, adjacency: u64) -> &BigUint {
        &self.counts[self.index(occupied, adjacency)]
    }

    pub(crate) fn get_mut(&mut self, occupied: u64, adjacency: u64) -> &mut BigUint {
        let idx = self.index(occupied, adjacency);
        &mut self.counts[idx]
    }

    /// Counts for a fixed occupancy, indexed by adjacency
    pub fn occupancy_row(&self, occupied: u64) -> &[BigUint] {
        let len = Self::row_len(&self.shape);
        let start = occupied as usize * len;
        &self.counts[start..start + len]
    }

    /// Iterates `(o, a, count)` in file order
    pub fn entries(&self) -> impl Iterator<Item = (u64, u64, &BigUint)> + '_ {
        let len = Self::row_len(&self.shape);
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, cnt)| ((i / len) as u64, (i % len) as u64, cnt))
    }

    /// Smallest and largest adjacency with a nonzero count for `occupied`,
    /// or `None` if every count in that row is zero
    pub fn support(&self, occupied: u64) -> Option<AdjacencyBounds> {
        let nonzero = self
            .occupancy_row(occupied)
            .iter()
            .positions(|cnt| !cnt.is_zero());
        match nonzero.minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(a) => Some(AdjacencyBounds {
                occupied,
                min: a as u64,
                max: a as u64,
            }),
            MinMaxResult::MinMax(lo, hi) => Some(AdjacencyBounds {
                occupied,
                min: lo as u64,
                max: hi as u64,
            }),
        }
    }

    /// Ground-truth bounds for every occupancy `0..=cells`
    pub fn true_bounds(&self) -> Vec<Option<AdjacencyBounds>> {
        (0..=self.shape.cells()).map(|o| self.support(o)).collect()
    }

    fn row_len(shape: &GridShape) -> usize {
        shape.edge_count() as usize + 1
    }

    fn index(&self, occupied: u64, adjacency: u64) -> usize {
        let len = Self::row_len(&self.shape);
        assert!(
            occupied <= self.shape.cells() && (adjacency as usize) < len,
            "(o,a)=({occupied},{adjacency}) outside {} table",
            self.shape
        );
        occupied as usize * len + adjacency as usize
    }
}
