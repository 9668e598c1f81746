// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendrite Nest: landmarks and camera paths derived from grown tree geometry.
//!
//! - [`find_fork_junction`] and [`find_trunk_tip`] read the implicit tree held
//!   in a segment list's parent indices.
//! - [`compute_nest_config`] seats a bowl-shaped nest on a fork, and
//!   [`compute_root_nest`] does so on the first fork of the trunk.
//! - [`create_bowl_profile`] gives the 2D profile to lathe into the bowl mesh.
//! - [`falcon_orbit_position`] flies the introductory camera around the nest
//!   and into it, as a pure function of elapsed time.
//! - [`PlatformConfig`] measures the tree; every size scales from its trunk radius.
//! - [`validate_camera_view`] scores a player camera pose against the nest and
//!   a [`SpatialIndex`](dendrite_index::SpatialIndex).
//!
//! # Example
//!
//! ```rust
//! use dendrite_nest::{
//!     FalconParams, FalconPhase, PlatformConfig, compute_root_nest, falcon_orbit_position,
//! };
//! use dendrite_turtle::TurtleInterpreter;
//!
//! let geo = TurtleInterpreter::default().interpret("!(0.3)G(3)G(2)[+(40)F(2)][-(40)F(2)]");
//! let platform = PlatformConfig::from_geometry(&geo);
//! let nest = compute_root_nest(&geo.branches, &platform).unwrap();
//! assert_eq!(nest.parent_index, 1);
//!
//! let params = FalconParams::default();
//! let start = falcon_orbit_position(0.0, &nest, &platform, &params);
//! assert_eq!(start.phase, FalconPhase::Orbit);
//! assert_eq!(start.target, nest.position);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bowl;
mod falcon;
mod fork;
mod nest;
mod platform;
mod view;

pub use bowl::create_bowl_profile;
pub use falcon::{
    FalconParams, FalconPhase, FalconPose, falcon_arrival_point, falcon_orbit_at_angle,
    falcon_orbit_position, falcon_path_points,
};
pub use fork::{ForkJunction, find_fork_junction, find_trunk_tip};
pub use nest::{
    NEST_DEPTH_FACTOR, NEST_ELEVATION_FACTOR, NEST_RADIUS_FACTOR, NestBranchAnchor, NestConfig,
    VIEW_FAR_FACTOR, VIEW_NEAR_FACTOR, compute_nest_config, compute_root_nest,
};
pub use platform::{PlatformConfig, PlatformDimensions, REF_TRUNK_RADIUS};
pub use view::{
    CameraMode, CameraView, Severity, ViewIssue, ViewIssueFlags, ViewQualityParams,
    ViewQualityReport, validate_camera_view,
};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use dendrite_grammar::{FileTreeNode, Hotspot, LSystem};
    use dendrite_index::SpatialIndex;
    use dendrite_turtle::TurtleInterpreter;

    fn sample_tree() -> FileTreeNode {
        FileTreeNode::directory(
            "repo",
            "repo",
            vec![
                FileTreeNode::directory(
                    "src",
                    "repo/src",
                    vec![
                        FileTreeNode::file("lib.rs", "repo/src/lib.rs", 420),
                        FileTreeNode::file("grid.rs", "repo/src/grid.rs", 180),
                        FileTreeNode::file("util.rs", "repo/src/util.rs", 40),
                    ],
                ),
                FileTreeNode::directory(
                    "docs",
                    "repo/docs",
                    vec![FileTreeNode::file("guide.md", "repo/docs/guide.md", 90)],
                ),
                FileTreeNode::file("Cargo.toml", "repo/Cargo.toml", 30),
            ],
        )
    }

    #[test]
    fn topology_to_falcon_flight() {
        let hotspots = [Hotspot {
            path: "repo/src/lib.rs".into(),
            churn_rate: 0.8,
            complexity: 12.0,
            risk_score: 0.9,
        }];
        let system = LSystem::from_topology(&sample_tree(), &hotspots, 42);
        let expanded = system.expand();
        let geo = TurtleInterpreter::new(system.angle).interpret(&expanded);

        assert_eq!(geo.nodes.len(), 5);
        for b in &geo.branches {
            assert!(geo.bounds.contains_point(b.start) && geo.bounds.contains_point(b.end));
        }

        let index = SpatialIndex::from_geometry(&geo);
        assert_eq!(index.node_count(), 5);
        for node in &geo.nodes {
            let found = index.nearest_node(node.position).unwrap();
            assert_eq!(found.position, node.position);
        }
        let trunk_mid = geo.branches[0].start.lerp(geo.branches[0].end, 0.5);
        let hit = index.nearest_segment(trunk_mid).unwrap();
        assert!(hit.distance < 1e-4);

        let platform = PlatformConfig::from_geometry(&geo);
        assert!((platform.trunk_radius - 0.3).abs() < 1e-6);
        let nest = compute_root_nest(&geo.branches, &platform).unwrap();
        assert_eq!(nest.parent_index, 0);
        // Three top-level children: two directories and a file.
        assert_eq!(nest.anchors.len(), 3);

        let params = FalconParams::default();
        let path = falcon_path_points(&nest, &platform, &params, 32);
        assert!(path.iter().all(|p| p.is_finite()));
        let landed = falcon_orbit_position(params.total_duration() + 1.0, &nest, &platform, &params);
        assert_eq!(landed.phase, FalconPhase::Arrived);

        let looking_at_nest = CameraView {
            position: landed.position,
            forward: (nest.position - landed.position).normalize(),
            mode: CameraMode::ThirdPerson,
            player: None,
            since_transition: 0.0,
        };
        let report = validate_camera_view(
            &looking_at_nest,
            Some(&nest),
            Some(&index),
            &ViewQualityParams::default(),
        );
        assert!(!report.flags().contains(ViewIssueFlags::OFF_PLATFORM));
    }

    #[test]
    fn pipeline_is_deterministic() {
        let run = || {
            let system = LSystem::from_topology(&sample_tree(), &[], 7);
            let geo = TurtleInterpreter::new(system.angle).interpret(&system.expand());
            let platform = PlatformConfig::from_geometry(&geo);
            compute_root_nest(&geo.branches, &platform)
        };
        assert_eq!(run(), run());
    }
}
