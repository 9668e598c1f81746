// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nest placement at fork junctions.

use alloc::vec::Vec;

use dendrite_turtle::BranchSegment;
use glam::{Quat, Vec3};

use crate::fork::{find_fork_junction, find_trunk_tip};
use crate::platform::PlatformConfig;

/// Nest radius as a multiple of the wider of the child spread and the trunk diameter.
pub const NEST_RADIUS_FACTOR: f32 = 1.3;
/// Bowl depth as a fraction of the nest radius.
pub const NEST_DEPTH_FACTOR: f32 = 0.3;
/// Inner view radius as a multiple of the nest radius.
pub const VIEW_NEAR_FACTOR: f32 = 1.5;
/// Lower bound on the outer view radius, as a multiple of the nest radius.
pub const VIEW_FAR_FACTOR: f32 = 5.0;
/// Height of the nest above its fork, as a fraction of the nest radius.
pub const NEST_ELEVATION_FACTOR: f32 = 0.5;

/// Where a child branch leaves the nest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NestBranchAnchor {
    /// Start point of the child segment.
    pub position: Vec3,
    /// Unit heading of the child segment, zero for a degenerate segment.
    pub direction: Vec3,
    /// Index of the child segment.
    pub branch_index: usize,
}

/// A bowl-shaped landmark seated on a fork junction.
#[derive(Clone, Debug, PartialEq)]
pub struct NestConfig {
    /// Index of the segment whose end is the fork.
    pub parent_index: usize,
    /// Center of the nest, raised above the fork along [`up`](Self::up).
    pub position: Vec3,
    /// Radius of the bowl.
    pub radius: f32,
    /// Unit direction of the parent segment.
    pub up: Vec3,
    /// Rotation taking world +Y onto [`up`](Self::up).
    pub orientation: Quat,
    /// One anchor per child segment, in segment order.
    pub anchors: Vec<NestBranchAnchor>,
    /// Radius of the interaction zone.
    pub view_near_radius: f32,
    /// Radius of the draw-distance boundary.
    pub view_far_radius: f32,
    /// Depth of the bowl.
    pub depth: f32,
}

/// Derive the nest seated on the fork at the end of segment `parent_index`.
///
/// Returns `None` when that segment does not exist or has no children.
///
/// The radius is `max(farthest child start from the fork, 2 × trunk radius) × 1.3`.
/// Depth, view radii and elevation all follow from it.
pub fn compute_nest_config(
    segments: &[BranchSegment],
    parent_index: usize,
    platform: &PlatformConfig,
) -> Option<NestConfig> {
    let fork = find_fork_junction(segments, parent_index)?;
    let parent = &segments[parent_index];

    let up = parent.axis().try_normalize().unwrap_or(Vec3::Y);
    let orientation = Quat::from_rotation_arc(Vec3::Y, up);

    let mut spread = 0.0_f32;
    let anchors: Vec<NestBranchAnchor> = fork
        .child_indices
        .iter()
        .map(|&i| {
            let child = &segments[i];
            spread = spread.max(fork.fork_point.distance(child.start));
            NestBranchAnchor {
                position: child.start,
                direction: child.axis().normalize_or_zero(),
                branch_index: i,
            }
        })
        .collect();

    let radius = spread.max(platform.trunk_radius * 2.0) * NEST_RADIUS_FACTOR;
    let nest = NestConfig {
        parent_index,
        position: fork.fork_point + up * (radius * NEST_ELEVATION_FACTOR),
        radius,
        up,
        orientation,
        anchors,
        view_near_radius: radius * VIEW_NEAR_FACTOR,
        view_far_radius: (platform.tree_span * 0.5).max(radius * VIEW_FAR_FACTOR),
        depth: radius * NEST_DEPTH_FACTOR,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        parent_index,
        children = nest.anchors.len(),
        radius = nest.radius,
        "computed nest"
    );
    Some(nest)
}

/// Derive the nest on the first fork of the trunk.
///
/// Follows the chain of trunk segments from index 0 to its tip, then seats
/// the nest there. Returns `None` for an empty list or a trunk that never forks.
pub fn compute_root_nest(segments: &[BranchSegment], platform: &PlatformConfig) -> Option<NestConfig> {
    compute_nest_config(segments, find_trunk_tip(segments)?, platform)
}
