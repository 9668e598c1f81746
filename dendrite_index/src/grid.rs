// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform 3D hash grid of entity indices.
//!
//! Space is cut into cubes of side `cell_size` anchored at the origin. Only
//! occupied cells are stored. Each cell holds indices into a caller-owned
//! entity list.

use glam::Vec3;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Integer coordinate of a grid cell.
pub(crate) type CellKey = (i32, i32, i32);

/// Map a coordinate to its cell along one axis, rounding toward -∞.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
pub(crate) fn cell_coord(value: f32, cell_size: f32) -> i32 {
    debug_assert!(cell_size > 0.0, "grid cell_size must be strictly positive");
    let t = value / cell_size;
    let coord = t as i32;

    // Round towards -∞ (the cast above has already truncated).
    if t < 0.0 && (coord as f32) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

#[inline]
pub(crate) fn cell_of(p: Vec3, cell_size: f32) -> CellKey {
    (
        cell_coord(p.x, cell_size),
        cell_coord(p.y, cell_size),
        cell_coord(p.z, cell_size),
    )
}

#[derive(Clone, Default)]
pub(crate) struct Grid {
    cells: HashMap<CellKey, SmallVec<[usize; 8]>>,
}

impl Grid {
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    pub(crate) fn insert(&mut self, key: CellKey, index: usize) {
        self.cells.entry(key).or_default().push(index);
    }

    pub(crate) fn occupied(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn get(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map_or(&[], |c| c.as_slice())
    }

    /// Visit every index stored in the cube of cells within `reach` of `center`.
    ///
    /// The cube is clipped to the `i32` cell range, so each cell is visited once.
    pub(crate) fn visit_block<F: FnMut(usize)>(&self, center: CellKey, reach: i32, mut f: F) {
        let (cx, cy, cz) = center;
        let span = |c: i32| c.saturating_sub(reach)..=c.saturating_add(reach);
        for x in span(cx) {
            for y in span(cy) {
                for z in span(cz) {
                    for &index in self.get((x, y, z)) {
                        f(index);
                    }
                }
            }
        }
    }

    /// Visit every stored index, cell by cell.
    pub(crate) fn visit_all<F: FnMut(usize)>(&self, mut f: F) {
        for cell in self.cells.values() {
            for &index in cell {
                f(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn cells_round_toward_negative_infinity() {
        assert_eq!(cell_coord(0.0, 5.0), 0);
        assert_eq!(cell_coord(4.99, 5.0), 0);
        assert_eq!(cell_coord(5.0, 5.0), 1);
        assert_eq!(cell_coord(-0.01, 5.0), -1);
        assert_eq!(cell_coord(-5.0, 5.0), -1);
        assert_eq!(cell_coord(-5.01, 5.0), -2);
    }

    #[test]
    fn cell_coord_saturates() {
        assert_eq!(cell_coord(1e20, 1.0), i32::MAX);
        assert_eq!(cell_coord(-1e20, 1.0), i32::MIN);
    }

    #[test]
    fn block_visits_neighbors_only() {
        let mut grid = Grid::default();
        grid.insert((0, 0, 0), 0);
        grid.insert((1, -1, 1), 1);
        grid.insert((2, 0, 0), 2);

        let mut hits = Vec::new();
        grid.visit_block((0, 0, 0), 1, |i| hits.push(i));
        hits.sort_unstable();
        assert_eq!(hits, [0, 1]);

        hits.clear();
        grid.visit_block((0, 0, 0), 2, |i| hits.push(i));
        hits.sort_unstable();
        assert_eq!(hits, [0, 1, 2]);
        assert_eq!(grid.occupied(), 3);
    }

    #[test]
    fn block_at_extreme_cells_does_not_overflow() {
        let mut grid = Grid::default();
        grid.insert((i32::MAX, i32::MAX, i32::MAX), 7);
        let mut hits = Vec::new();
        grid.visit_block((i32::MAX, i32::MAX, i32::MAX), 1, |i| hits.push(i));
        assert_eq!(hits, [7]);
    }

    #[test]
    fn block_at_extreme_cells_visits_each_cell_once() {
        let mut grid = Grid::default();
        grid.insert((i32::MIN, 0, i32::MAX), 3);
        grid.insert((i32::MIN + 1, 0, i32::MAX), 4);
        let mut hits = Vec::new();
        grid.visit_block((i32::MIN, 0, i32::MAX), 2, |i| hits.push(i));
        hits.sort_unstable();
        assert_eq!(hits, [3, 4]);
    }
}
