// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spatial index over node markers and branch segments.

use alloc::vec::Vec;
use core::fmt::Debug;

use dendrite_turtle::{Aabb3, BranchSegment, NodeMarker, TreeGeometry};
use glam::Vec3;

use crate::grid::{CellKey, Grid, cell_of};
use crate::util::{ceil_to_usize, isqrt_ceil};

/// Cell size used until a rebuild derives one from bounds.
pub const DEFAULT_CELL_SIZE: f32 = 5.0;

/// Lower clamp on the number of cells along the longest axis when deriving a cell size.
pub const MIN_TARGET_CELLS: usize = 8;

/// Upper clamp on the number of cells along the longest axis when deriving a cell size.
pub const MAX_TARGET_CELLS: usize = 20;

/// Squared segment length below which a segment is treated as a point.
pub const DEGENERATE_LENGTH_SQ: f32 = 1e-10;

/// Closest point on a segment to a query point.
///
/// Returns the clamped parameter `t` in `[0, 1]` and the point
/// `start + t * (end - start)`. Zero-length segments yield `t = 0`.
///
/// ```rust
/// use dendrite_index::project_onto_segment;
/// use glam::Vec3;
///
/// let (t, p) = project_onto_segment(Vec3::new(5.0, 1.0, 0.0), Vec3::ZERO, Vec3::X * 10.0);
/// assert_eq!(t, 0.5);
/// assert_eq!(p, Vec3::new(5.0, 0.0, 0.0));
/// ```
pub fn project_onto_segment(point: Vec3, start: Vec3, end: Vec3) -> (f32, Vec3) {
    let axis = end - start;
    let len_sq = axis.length_squared();
    let t = if len_sq < DEGENERATE_LENGTH_SQ {
        0.0
    } else {
        ((point - start).dot(axis) / len_sq).clamp(0.0, 1.0)
    };
    (t, start + axis * t)
}

/// Result of [`SpatialIndex::nearest_segment`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentHit<'a> {
    /// The closest segment.
    pub segment: &'a BranchSegment,
    /// Its index in the segment list the index was built from.
    pub index: usize,
    /// Parameter of the closest point along the segment, `0` at start and `1` at end.
    pub t: f32,
    /// Distance from the query point to [`point`](Self::point).
    pub distance: f32,
    /// Closest point on the segment axis.
    pub point: Vec3,
}

/// 3D hash grid over node markers and branch segments.
///
/// Nodes are bucketed by the cell containing their position. Segments are
/// bucketed into every cell their axis passes through. Proximity queries then
/// only touch the cells around the query point.
///
/// The index owns copies of the markers and segments it was built from, so
/// segment indices in results refer to that list. A rebuilt index is
/// self-contained: build a fresh one and swap it in to publish an update.
#[derive(Clone)]
pub struct SpatialIndex {
    cell_size: f32,
    nodes: Vec<NodeMarker>,
    segments: Vec<BranchSegment>,
    node_cells: Grid,
    segment_cells: Grid,
}

impl Debug for SpatialIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("cell_size", &self.cell_size)
            .field("nodes", &self.nodes.len())
            .field("segments", &self.segments.len())
            .field("node_cells", &self.node_cells.occupied())
            .field("segment_cells", &self.segment_cells.occupied())
            .finish_non_exhaustive()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialIndex {
    /// Create an empty index with the given cell size.
    ///
    /// Non-positive or non-finite sizes fall back to [`DEFAULT_CELL_SIZE`].
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: sanitize_cell_size(cell_size),
            nodes: Vec::new(),
            segments: Vec::new(),
            node_cells: Grid::default(),
            segment_cells: Grid::default(),
        }
    }

    /// Build a fresh index, deriving the cell size from `bounds` when given.
    pub fn build(nodes: &[NodeMarker], segments: &[BranchSegment], bounds: Option<&Aabb3>) -> Self {
        let mut index = Self::default();
        index.rebuild(nodes, segments, bounds);
        index
    }

    /// Build a fresh index over everything in `geometry`.
    pub fn from_geometry(geometry: &TreeGeometry) -> Self {
        Self::build(&geometry.nodes, &geometry.branches, Some(&geometry.bounds))
    }

    /// Replace the contents of the index.
    ///
    /// When `bounds` is given, the cell size becomes
    /// `max(1, max_extent / clamp(ceil(sqrt(nodes)), 8, 20))`, so a box with
    /// no nodes is cut into 8 cells along its longest axis. Without bounds the
    /// current cell size is kept.
    pub fn rebuild(
        &mut self,
        nodes: &[NodeMarker],
        segments: &[BranchSegment],
        bounds: Option<&Aabb3>,
    ) {
        self.node_cells.clear();
        self.segment_cells.clear();
        self.nodes.clear();
        self.nodes.extend_from_slice(nodes);
        self.segments.clear();
        self.segments.extend_from_slice(segments);

        if let Some(bounds) = bounds {
            let target = isqrt_ceil(nodes.len()).clamp(MIN_TARGET_CELLS, MAX_TARGET_CELLS);
            #[allow(
                clippy::cast_precision_loss,
                reason = "target is clamped to a small range."
            )]
            let derived = (bounds.max_extent() / target as f32).max(1.0);
            self.cell_size = sanitize_cell_size(derived);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            self.node_cells.insert(cell_of(node.position, self.cell_size), i);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            for key in segment_cells(segment, self.cell_size) {
                self.segment_cells.insert(key, i);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = self.nodes.len(),
            segments = self.segments.len(),
            node_cells = self.node_cells.occupied(),
            segment_cells = self.segment_cells.occupied(),
            cell_size = self.cell_size,
            "rebuilt spatial index"
        );
    }

    /// Closest node to `point` among the cells adjacent to its cell.
    ///
    /// Returns `None` when the index holds no nodes nearby. Among equally
    /// distant nodes the one placed first wins.
    pub fn nearest_node(&self, point: Vec3) -> Option<&NodeMarker> {
        self.nearest_node_within(point, f32::INFINITY)
    }

    /// Like [`nearest_node`](Self::nearest_node), but only considers nodes
    /// strictly closer than `max_radius`.
    pub fn nearest_node_within(&self, point: Vec3, max_radius: f32) -> Option<&NodeMarker> {
        if max_radius.is_nan() || max_radius < 0.0 {
            return None;
        }
        let limit = max_radius * max_radius;
        let mut best: Option<(usize, f32)> = None;
        self.node_cells
            .visit_block(cell_of(point, self.cell_size), 1, |i| {
                let d = point.distance_squared(self.nodes[i].position);
                if d < limit && is_better(best, i, d) {
                    best = Some((i, d));
                }
            });
        best.map(|(i, _)| &self.nodes[i])
    }

    /// Every node within `radius` of `point` (inclusive), in placement order.
    ///
    /// A negative or NaN radius yields nothing.
    pub fn query_radius(&self, point: Vec3, radius: f32) -> Vec<&NodeMarker> {
        if radius.is_nan() || radius < 0.0 || self.nodes.is_empty() {
            return Vec::new();
        }
        let r2 = radius * radius;
        let mut hits = Vec::new();
        let mut collect = |i: usize| {
            if point.distance_squared(self.nodes[i].position) <= r2 {
                hits.push(i);
            }
        };

        match self.block_reach(radius) {
            Some(reach) => {
                self.node_cells
                    .visit_block(cell_of(point, self.cell_size), reach, &mut collect);
            }
            None => self.node_cells.visit_all(&mut collect),
        }

        hits.sort_unstable();
        hits.into_iter().map(|i| &self.nodes[i]).collect()
    }

    /// Closest segment to `point` among the cells adjacent to its cell.
    ///
    /// Distances are measured to the closest point on each segment axis.
    /// Among equally distant segments the lowest index wins.
    pub fn nearest_segment(&self, point: Vec3) -> Option<SegmentHit<'_>> {
        let mut best: Option<(usize, f32, f32, Vec3)> = None;
        self.segment_cells
            .visit_block(cell_of(point, self.cell_size), 1, |i| {
                let segment = &self.segments[i];
                let (t, closest) = project_onto_segment(point, segment.start, segment.end);
                let d = point.distance(closest);
                if is_better(best.map(|(bi, bd, ..)| (bi, bd)), i, d) {
                    best = Some((i, d, t, closest));
                }
            });
        best.map(|(index, distance, t, point)| SegmentHit {
            segment: &self.segments[index],
            index,
            t,
            distance,
            point,
        })
    }

    /// Edge length of a grid cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of indexed nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of indexed segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of cells holding at least one node.
    pub fn node_cell_count(&self) -> usize {
        self.node_cells.occupied()
    }

    /// Number of cells holding at least one segment.
    pub fn segment_cell_count(&self) -> usize {
        self.segment_cells.occupied()
    }

    /// The indexed nodes, in placement order.
    pub fn nodes(&self) -> &[NodeMarker] {
        &self.nodes
    }

    /// The indexed segments, in drawing order.
    pub fn segments(&self) -> &[BranchSegment] {
        &self.segments
    }

    /// Cells to search on each side for a radius query, or `None` when a
    /// block that wide would visit more cells than are occupied.
    fn block_reach(&self, radius: f32) -> Option<i32> {
        let reach = i32::try_from(ceil_to_usize(radius / self.cell_size)).ok()?;
        let side = usize::try_from(reach).ok()?.checked_mul(2)?.checked_add(1)?;
        let block = side.checked_mul(side)?.checked_mul(side)?;
        (block <= self.node_cells.occupied()).then_some(reach)
    }
}

fn sanitize_cell_size(cell_size: f32) -> f32 {
    if cell_size.is_finite() && cell_size > 0.0 {
        cell_size
    } else {
        DEFAULT_CELL_SIZE
    }
}

fn is_better(best: Option<(usize, f32)>, index: usize, distance: f32) -> bool {
    match best {
        None => true,
        Some((bi, bd)) => distance < bd || (distance == bd && index < bi),
    }
}

/// Distinct cells visited by sampling the segment axis.
///
/// A segment that starts and ends in the same cell occupies only that cell.
/// Otherwise `ceil(length / cell_size) + 1` evenly spaced steps are taken
/// from start to end inclusive.
fn segment_cells(segment: &BranchSegment, cell_size: f32) -> Vec<CellKey> {
    let first = cell_of(segment.start, cell_size);
    let last = cell_of(segment.end, cell_size);
    if first == last {
        return alloc::vec![first];
    }

    let length = segment.length();
    if !length.is_finite() {
        return alloc::vec![first, last];
    }

    let steps = ceil_to_usize(length / cell_size).saturating_add(1);
    let mut cells: Vec<CellKey> = Vec::new();
    for s in 0..=steps {
        #[allow(
            clippy::cast_precision_loss,
            reason = "step counts stay far below f32 precision limits for real geometry."
        )]
        let t = s as f32 / steps as f32;
        let key = cell_of(segment.start.lerp(segment.end, t), cell_size);
        // A straight line crosses each convex cell in a single run, so
        // repeated keys are always adjacent.
        if cells.last() != Some(&key) {
            cells.push(key);
        }
    }
    cells
}
