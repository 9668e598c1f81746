// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendrite Turtle: turn L-system strings into 3D branch geometry.
//!
//! A virtual turtle walks the string once, left to right, carrying a pose
//! (position, orientation, radius, depth) and an explicit stack for `[`/`]`.
//! It emits [`BranchSegment`]s for drawing moves and [`NodeMarker`]s for `@`
//! symbols, and finally the [`Aabb3`] bounds of both.
//!
//! Orientation is a unit quaternion. Every rotation symbol multiplies it on the
//! right by a rotation about a fixed *local* axis, so turns always happen in the
//! turtle's own frame and never suffer gimbal lock:
//!
//! | Symbols      | Rotation                     | Local axis            |
//! |--------------|------------------------------|-----------------------|
//! | `+` / `-`    | yaw                          | up, [`LOCAL_UP`] (+Z) |
//! | `^` / `&`    | pitch                        | right, [`LOCAL_RIGHT`] (+X) |
//! | `/` / `\`    | roll                         | forward, [`LOCAL_FORWARD`] (+Y) |
//!
//! Other symbols: `F`/`G` draw forward, `f` moves without drawing, `!` sets the
//! radius, `@(k:path)` places a marker. Parameters follow in parentheses and
//! default to 1 for lengths and to the interpreter's angle for rotations.
//! Segments taper by [`TAPER`] per draw.
//!
//! # Example
//!
//! ```rust
//! use dendrite_turtle::TurtleInterpreter;
//!
//! let geo = TurtleInterpreter::default().interpret("!(0.3)G(3)[+(45)F@(f:src/main.rs)][-(45)F]");
//! assert_eq!(geo.branches.len(), 3);
//! assert_eq!(geo.branches[1].parent, Some(0));
//! assert_eq!(geo.branches[2].parent, Some(0));
//! assert_eq!(geo.nodes[0].path, "src/main.rs");
//! assert!(geo.bounds.contains_point(geo.nodes[0].position));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod interpreter;

pub use geometry::{Aabb3, BranchSegment, MarkerKind, NodeMarker, TreeGeometry};
pub use interpreter::{
    DEFAULT_SET_RADIUS, INITIAL_RADIUS, LOCAL_FORWARD, LOCAL_RIGHT, LOCAL_UP, TAPER,
    TurtleInterpreter, TurtleState,
};

/// Re-export of the vector and quaternion types used throughout the API.
pub use glam::{Quat, Vec3};
