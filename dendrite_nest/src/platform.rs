// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform scale: the handful of measurements every other size derives from.
//!
//! The root trunk radius is the unit. A small repository grows a thin trunk
//! and a large one a thick trunk; platform, character and camera sizes all
//! scale linearly with it so the scene keeps the same feel at any size.

use dendrite_turtle::TreeGeometry;
use glam::Vec3;

/// Trunk radius that the reference character and camera values were tuned for.
pub const REF_TRUNK_RADIUS: f32 = 0.3;

/// Scale descriptor measured from a grown tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlatformConfig {
    /// Base of the root trunk.
    pub origin: Vec3,
    /// Start radius of the root trunk segment.
    pub trunk_radius: f32,
    /// Length of the root trunk segment.
    pub trunk_length: f32,
    /// Vertical extent of the tree bounds.
    pub tree_height: f32,
    /// Larger of the X and Z extents of the tree bounds.
    pub tree_span: f32,
}

impl PlatformConfig {
    /// Configuration used when there is no geometry to measure.
    pub const FALLBACK: Self = Self {
        origin: Vec3::ZERO,
        trunk_radius: REF_TRUNK_RADIUS,
        trunk_length: 3.0,
        tree_height: 15.0,
        tree_span: 10.0,
    };

    /// Measure a grown tree.
    ///
    /// The first segment is taken as the root trunk. Geometry without
    /// segments yields [`FALLBACK`](Self::FALLBACK).
    pub fn from_geometry(geometry: &TreeGeometry) -> Self {
        let Some(root) = geometry.branches.first() else {
            return Self::FALLBACK;
        };
        let size = geometry.bounds.size();
        Self {
            origin: root.start,
            trunk_radius: root.start_radius,
            trunk_length: root.length(),
            tree_height: size.y,
            tree_span: size.x.max(size.z),
        }
    }

    /// Ratio of the trunk radius to [`REF_TRUNK_RADIUS`].
    pub fn scale(&self) -> f32 {
        self.trunk_radius / REF_TRUNK_RADIUS
    }

    /// Derive every concrete platform, character and camera dimension.
    pub fn derive_dimensions(&self) -> PlatformDimensions {
        let r = self.trunk_radius;
        let scale = self.scale();

        let platform_radius = r * 10.0;
        let ring_width = r * 0.33;
        let inner_center = platform_radius * 0.33;
        let outer_center = platform_radius * 0.83;

        let extent = self
            .tree_height
            .max(self.tree_span)
            .max(platform_radius * 2.0);
        let falcon_distance = extent * 1.2;
        let falcon_y = self.tree_height * 0.6 + self.origin.y;
        let player_height = 1.5 * scale;
        let o = self.origin;

        PlatformDimensions {
            platform_radius,
            platform_thickness: r * 0.5,
            well_radius: r * 1.17,
            well_height: r,
            rim_tube_radius: r * 0.1,
            inner_ring_inner: inner_center - ring_width / 2.0,
            inner_ring_outer: inner_center + ring_width / 2.0,
            outer_ring_inner: outer_center - ring_width / 2.0,
            outer_ring_outer: outer_center + ring_width / 2.0,
            route_length: r * 5.0,
            route_radius_base: r * 0.067,
            route_radius_tip: r * 0.05,

            player_height,
            move_speed: 4.0 * scale,
            strafe_speed: 2.0 * scale,
            jump_strength: 5.0 * scale,
            gravity_strength: 12.0 * scale,
            look_ahead_distance: 3.0 * scale,
            surface_damping: 0.15,

            falcon_position: Vec3::new(
                o.x + falcon_distance * 0.6,
                falcon_y,
                o.z - falcon_distance * 0.8,
            ),
            falcon_target: Vec3::new(o.x, o.y + self.trunk_length * 0.5, o.z),
            spawn_point: Vec3::new(o.x, o.y + player_height, o.z - platform_radius * 0.8),
            falcon_min_distance: extent * 0.15,
            falcon_max_distance: extent * 4.0,

            platform_radius_sq: platform_radius * platform_radius,
            platform_y_threshold: o.y + player_height,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Concrete sizes derived from a [`PlatformConfig`].
///
/// Lengths scale with the trunk radius; `surface_damping` is a ratio and does not.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlatformDimensions {
    /// Radius of the platform disc.
    pub platform_radius: f32,
    /// Thickness of the platform disc.
    pub platform_thickness: f32,
    /// Radius of the central well.
    pub well_radius: f32,
    /// Height of the central well.
    pub well_height: f32,
    /// Tube radius of the rim torus.
    pub rim_tube_radius: f32,
    /// Inner edge of the inner ring groove.
    pub inner_ring_inner: f32,
    /// Outer edge of the inner ring groove.
    pub inner_ring_outer: f32,
    /// Inner edge of the outer ring groove.
    pub outer_ring_inner: f32,
    /// Outer edge of the outer ring groove.
    pub outer_ring_outer: f32,
    /// Length of a route indicator.
    pub route_length: f32,
    /// Base radius of a route indicator.
    pub route_radius_base: f32,
    /// Tip radius of a route indicator.
    pub route_radius_tip: f32,

    /// Eye height of the player character.
    pub player_height: f32,
    /// Forward movement speed.
    pub move_speed: f32,
    /// Sideways movement speed.
    pub strafe_speed: f32,
    /// Initial jump velocity.
    pub jump_strength: f32,
    /// Gravity acceleration.
    pub gravity_strength: f32,
    /// Distance probed ahead of the player along the surface.
    pub look_ahead_distance: f32,
    /// Damping ratio for surface following.
    pub surface_damping: f32,

    /// Default overview camera position.
    pub falcon_position: Vec3,
    /// Default overview camera target, halfway up the trunk.
    pub falcon_target: Vec3,
    /// Player spawn point on the platform.
    pub spawn_point: Vec3,
    /// Closest zoom distance for the overview camera.
    pub falcon_min_distance: f32,
    /// Farthest zoom distance for the overview camera.
    pub falcon_max_distance: f32,

    /// Squared platform radius, for cheap on-platform tests.
    pub platform_radius_sq: f32,
    /// Height below which the player counts as standing on the platform.
    pub platform_y_threshold: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dendrite_turtle::TurtleInterpreter;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn measures_root_trunk_and_bounds() {
        let geo = TurtleInterpreter::default().interpret("!(0.6)G(4)[+(90)F(3)][-(90)F(2)]");
        let config = PlatformConfig::from_geometry(&geo);
        assert_eq!(config.origin, Vec3::ZERO);
        assert!(close(config.trunk_radius, 0.6));
        assert!(close(config.trunk_length, 4.0));
        assert!(close(config.tree_height, 4.0));
        assert!(close(config.tree_span, 5.0), "span = {}", config.tree_span);
    }

    #[test]
    fn empty_geometry_falls_back() {
        let geo = TurtleInterpreter::default().interpret("");
        assert_eq!(PlatformConfig::from_geometry(&geo), PlatformConfig::FALLBACK);
        assert_eq!(PlatformConfig::default(), PlatformConfig::FALLBACK);
    }

    #[test]
    fn reference_trunk_gives_reference_character() {
        let dims = PlatformConfig::FALLBACK.derive_dimensions();
        assert!(close(dims.player_height, 1.5));
        assert!(close(dims.move_speed, 4.0));
        assert!(close(dims.platform_radius, 3.0));
        assert!(close(dims.platform_radius_sq, 9.0));
        // Height 15 dominates span 10 and platform diameter 6.
        assert!(close(dims.falcon_min_distance, 15.0 * 0.15));
        assert!(close(dims.falcon_position.y, 9.0));
    }

    #[test]
    fn dimensions_scale_linearly_with_trunk() {
        let base = PlatformConfig::FALLBACK;
        let double = PlatformConfig {
            trunk_radius: base.trunk_radius * 2.0,
            ..base
        };
        let a = base.derive_dimensions();
        let b = double.derive_dimensions();
        assert!(close(b.platform_radius, a.platform_radius * 2.0));
        assert!(close(b.player_height, a.player_height * 2.0));
        assert!(close(b.gravity_strength, a.gravity_strength * 2.0));
        assert!(close(b.route_radius_tip, a.route_radius_tip * 2.0));
        assert_eq!(b.surface_damping, a.surface_damping);
        assert!(a.inner_ring_inner < a.inner_ring_outer);
        assert!(a.inner_ring_outer < a.outer_ring_inner);
        assert!(a.outer_ring_outer < a.platform_radius);
    }
}
