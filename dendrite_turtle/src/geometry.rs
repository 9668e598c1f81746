// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output geometry: branch segments, node markers and their bounds.

use alloc::string::String;
use alloc::vec::Vec;

use glam::Vec3;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb3 {
    /// The degenerate box at the origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create a box from its corners.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The smallest box containing every point, or `None` for no points.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.expand_to(p);
        }
        Some(aabb)
    }

    /// Grow the box to include `p`.
    #[inline]
    pub fn expand_to(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Whether `p` lies inside or on the boundary.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// Extent along each axis (zero for degenerate boxes).
    #[inline]
    pub fn size(&self) -> Vec3 {
        (self.max - self.min).max(Vec3::ZERO)
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The longest extent.
    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// Whether the box has no volume.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.cmple(self.min).any()
    }
}

/// One drawn piece of branch.
///
/// Segments form a tree through [`parent`](Self::parent) indices into the
/// segment list they were produced with. Indices are only meaningful against
/// that list.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchSegment {
    /// Start point.
    pub start: Vec3,
    /// End point.
    pub end: Vec3,
    /// Radius at the start.
    pub start_radius: f32,
    /// Radius at the end.
    pub end_radius: f32,
    /// Branch depth (0 = trunk).
    pub depth: u32,
    /// Index of the segment this one grew from, `None` for a root.
    pub parent: Option<usize>,
}

impl BranchSegment {
    /// Vector from start to end.
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.end - self.start
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Mean of the start and end radii.
    #[inline]
    pub fn mean_radius(&self) -> f32 {
        0.5 * (self.start_radius + self.end_radius)
    }
}

/// Whether a marker stands for a file or a directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// File marker (`@(f:…)`).
    File,
    /// Directory marker (`@(d:…)`).
    Directory,
}

/// A point of interest placed by `@`.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
    /// Position at placement time.
    pub position: Vec3,
    /// Logical path of the node.
    pub path: String,
    /// File or directory.
    pub kind: MarkerKind,
    /// Turtle depth at placement.
    pub depth: u32,
    /// Branch radius at placement.
    pub radius: f32,
    /// Heading at placement (unit length).
    pub direction: Vec3,
}

/// Everything produced by one interpretation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeGeometry {
    /// Branch segments in drawing order.
    pub branches: Vec<BranchSegment>,
    /// Node markers in placement order.
    pub nodes: Vec<NodeMarker>,
    /// Bounds of every segment endpoint and marker; [`Aabb3::ZERO`] when both lists are empty.
    pub bounds: Aabb3,
}

impl TreeGeometry {
    /// Assemble geometry and compute its bounds.
    pub fn new(branches: Vec<BranchSegment>, nodes: Vec<NodeMarker>) -> Self {
        let points = branches
            .iter()
            .flat_map(|b| [b.start, b.end])
            .chain(nodes.iter().map(|n| n.position));
        let bounds = Aabb3::from_points(points).unwrap_or(Aabb3::ZERO);
        Self {
            branches,
            nodes,
            bounds,
        }
    }

    /// Whether nothing was drawn or placed.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.nodes.is_empty()
    }

    /// Indices of the direct children of segment `index`, in segment order.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.branches
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.parent == Some(index))
            .map(|(i, _)| i)
    }
}
