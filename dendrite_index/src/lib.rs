// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendrite Index: a 3D spatial hash grid over turtle geometry.
//!
//! [`SpatialIndex`] answers the proximity questions a camera asks every few
//! frames: which node marker is nearest, which markers lie within a radius,
//! and which branch segment axis is closest (with the projection parameter
//! along it).
//!
//! - Nodes live in the single cell containing their position.
//! - Segments live in every cell their axis crosses.
//! - Nearest queries search the 3×3×3 block of cells around the query point;
//!   radius queries widen the block to cover the radius.
//!
//! The cell size is either fixed at construction or derived from the scene
//! bounds on rebuild, aiming for 8 to 20 cells along the longest axis.
//!
//! # Example
//!
//! ```rust
//! use dendrite_index::SpatialIndex;
//! use dendrite_turtle::TurtleInterpreter;
//! use glam::Vec3;
//!
//! let geo = TurtleInterpreter::default().interpret("G(4)[+(30)G(3)@(f:a.rs)][-(30)G(3)@(f:b.rs)]");
//! let index = SpatialIndex::from_geometry(&geo);
//!
//! let hit = index.nearest_segment(Vec3::new(0.2, 2.0, 0.0)).unwrap();
//! assert_eq!(hit.index, 0);
//! assert!(hit.t > 0.0 && hit.t < 1.0);
//!
//! let node = index.nearest_node(geo.nodes[1].position).unwrap();
//! assert_eq!(node.path, "b.rs");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod grid;
mod index;
mod util;

pub use index::{
    DEFAULT_CELL_SIZE, DEGENERATE_LENGTH_SQ, MAX_TARGET_CELLS, MIN_TARGET_CELLS, SegmentHit,
    SpatialIndex, project_onto_segment,
};
