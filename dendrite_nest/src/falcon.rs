// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The falcon flight: an introductory camera path around and into the nest.
//!
//! The path is a pure function of elapsed time. It orbits the nest on an
//! ellipse for a number of laps, then flies a quadratic Bézier from where the
//! orbit ended to a hover point above the nest, then holds that hover.

use alloc::vec::Vec;
use core::f32::consts::TAU;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::Vec3;

use crate::nest::NestConfig;
use crate::platform::PlatformConfig;

/// Timing of the falcon flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FalconParams {
    /// Angular speed of the orbit, in radians per second.
    pub orbit_speed: f32,
    /// Number of full revolutions before the approach.
    pub orbit_laps: f32,
    /// Duration of the approach, in seconds.
    pub approach_duration: f32,
}

impl FalconParams {
    /// Default timing: 1.5 laps at 0.15 rad/s, then a 4 s approach.
    pub const DEFAULT: Self = Self {
        orbit_speed: 0.15,
        orbit_laps: 1.5,
        approach_duration: 4.0,
    };

    /// Time spent orbiting, in seconds.
    ///
    /// Zero when the speed or lap count is not a positive finite number.
    pub fn orbit_duration(&self) -> f32 {
        let duration = self.orbit_laps * TAU / self.orbit_speed;
        if self.orbit_speed > 0.0 && self.orbit_laps > 0.0 && duration.is_finite() {
            duration
        } else {
            0.0
        }
    }

    /// Time from the start of the flight until arrival, in seconds.
    pub fn total_duration(&self) -> f32 {
        self.orbit_duration() + self.approach_duration.max(0.0)
    }
}

impl Default for FalconParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stage of the falcon flight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FalconPhase {
    /// Circling the nest.
    Orbit,
    /// Flying in towards the hover point.
    Approach,
    /// Hovering above the nest.
    Arrived,
}

/// Camera pose at one instant of the flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FalconPose {
    /// Camera position.
    pub position: Vec3,
    /// Point the camera looks at; always the nest center.
    pub target: Vec3,
    /// Current stage.
    pub phase: FalconPhase,
}

/// Position on the orbit ellipse at `angle` radians.
///
/// The ellipse is centered on the nest with semi-axes `0.8 × span` along X
/// and `0.5 × span` along Z. It floats at `0.6 × height` above the nest and
/// bobs by `0.15 × height` with `elapsed` seconds.
pub fn falcon_orbit_at_angle(
    angle: f32,
    elapsed: f32,
    nest: &NestConfig,
    platform: &PlatformConfig,
) -> Vec3 {
    let semi_major = platform.tree_span * 0.8;
    let semi_minor = platform.tree_span * 0.5;
    let base_y = nest.position.y + platform.tree_height * 0.6;
    let bob = 0.15 * platform.tree_height * (0.7 * elapsed).sin();
    Vec3::new(
        nest.position.x + semi_major * angle.cos(),
        base_y + bob,
        nest.position.z + semi_minor * angle.sin(),
    )
}

/// Hover point the approach ends at.
pub fn falcon_arrival_point(nest: &NestConfig) -> Vec3 {
    Vec3::new(
        nest.position.x,
        nest.position.y + nest.depth + nest.radius * 0.8,
        nest.position.z,
    )
}

/// Camera pose `elapsed` seconds into the flight.
///
/// The approach starts exactly where the orbit formula puts the camera at
/// the end of the orbit, so the path is continuous across the transition.
pub fn falcon_orbit_position(
    elapsed: f32,
    nest: &NestConfig,
    platform: &PlatformConfig,
    params: &FalconParams,
) -> FalconPose {
    let target = nest.position;
    let orbit_duration = params.orbit_duration();

    if elapsed < orbit_duration {
        return FalconPose {
            position: falcon_orbit_at_angle(elapsed * params.orbit_speed, elapsed, nest, platform),
            target,
            phase: FalconPhase::Orbit,
        };
    }

    let arrival = falcon_arrival_point(nest);
    let approach_time = elapsed - orbit_duration;
    if approach_time >= params.approach_duration || params.approach_duration.is_nan() {
        return FalconPose {
            position: arrival,
            target,
            phase: FalconPhase::Arrived,
        };
    }

    let start = falcon_orbit_at_angle(
        orbit_duration * params.orbit_speed,
        orbit_duration,
        nest,
        platform,
    );
    let control = Vec3::new(
        (start.x + arrival.x) * 0.5,
        start.y.max(arrival.y) + platform.tree_height * 0.2,
        (start.z + arrival.z) * 0.5,
    );
    let s = ease_in_out_cubic((approach_time / params.approach_duration).clamp(0.0, 1.0));
    FalconPose {
        position: quadratic_bezier(start, control, arrival, s),
        target,
        phase: FalconPhase::Approach,
    }
}

/// Polyline through the whole flight, for debug drawing.
///
/// Takes `ceil(samples_per_lap × laps) + 1` orbit samples (the last one is the
/// approach start) followed by `ceil(samples_per_lap / 2)` approach samples
/// ending on the hover point.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "sample counts are small and the lap count is clamped to be non-negative."
)]
pub fn falcon_path_points(
    nest: &NestConfig,
    platform: &PlatformConfig,
    params: &FalconParams,
    samples_per_lap: usize,
) -> Vec<Vec3> {
    let samples_per_lap = samples_per_lap.max(1);
    let orbit_duration = params.orbit_duration();
    let approach_duration = params.approach_duration.max(0.0);

    let orbit_samples = ((samples_per_lap as f32 * params.orbit_laps.max(0.0)).ceil() as usize).max(1);
    let approach_samples = samples_per_lap.div_ceil(2);

    let at = |t: f32| falcon_orbit_position(t, nest, platform, params).position;
    let mut points = Vec::with_capacity(orbit_samples + approach_samples + 1);
    for i in 0..=orbit_samples {
        points.push(at(i as f32 / orbit_samples as f32 * orbit_duration));
    }
    for i in 1..=approach_samples {
        points.push(at(
            orbit_duration + i as f32 / approach_samples as f32 * approach_duration,
        ));
    }
    points
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use glam::Quat;

    fn nest() -> NestConfig {
        NestConfig {
            parent_index: 0,
            position: Vec3::new(1.0, 5.0, -2.0),
            radius: 1.0,
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
            anchors: vec![],
            view_near_radius: 1.5,
            view_far_radius: 5.0,
            depth: 0.3,
        }
    }

    fn platform() -> PlatformConfig {
        PlatformConfig {
            tree_height: 20.0,
            tree_span: 12.0,
            ..PlatformConfig::FALLBACK
        }
    }

    #[test]
    fn default_orbit_duration() {
        let params = FalconParams::default();
        assert!((params.orbit_duration() - 1.5 * TAU / 0.15).abs() < 1e-3);
        assert!((params.total_duration() - params.orbit_duration() - 4.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_speed_skips_orbit() {
        let params = FalconParams {
            orbit_speed: 0.0,
            ..FalconParams::DEFAULT
        };
        assert_eq!(params.orbit_duration(), 0.0);
        let pose = falcon_orbit_position(0.0, &nest(), &platform(), &params);
        assert_eq!(pose.phase, FalconPhase::Approach);
    }

    #[test]
    fn orbit_keeps_target_and_moves() {
        let (nest, platform, params) = (nest(), platform(), FalconParams::DEFAULT);
        let mut t = 0.0;
        let mut previous: Option<FalconPose> = None;
        while t < params.orbit_duration() {
            let pose = falcon_orbit_position(t, &nest, &platform, &params);
            assert_eq!(pose.phase, FalconPhase::Orbit);
            assert_eq!(pose.target, nest.position);
            if let Some(prev) = previous {
                assert!(
                    pose.position.distance(prev.position) > 1e-3,
                    "camera stalled at t = {t}"
                );
            }
            previous = Some(pose);
            t += 10.0;
        }
    }

    #[test]
    fn orbit_is_an_ellipse_around_the_nest() {
        let (nest, platform) = (nest(), platform());
        let p = falcon_orbit_at_angle(0.0, 0.0, &nest, &platform);
        assert!(p.abs_diff_eq(Vec3::new(1.0 + 9.6, 5.0 + 12.0, -2.0), 1e-4), "p = {p:?}");
        let q = falcon_orbit_at_angle(TAU / 4.0, 0.0, &nest, &platform);
        assert!((q.z - (-2.0 + 6.0)).abs() < 1e-4, "q = {q:?}");
    }

    #[test]
    fn approach_is_continuous_with_orbit() {
        let (nest, platform, params) = (nest(), platform(), FalconParams::DEFAULT);
        let end = params.orbit_duration();
        let before = falcon_orbit_position(end - 1e-3, &nest, &platform, &params);
        let after = falcon_orbit_position(end, &nest, &platform, &params);
        assert_eq!(before.phase, FalconPhase::Orbit);
        assert_eq!(after.phase, FalconPhase::Approach);
        assert!(before.position.distance(after.position) < 1e-2);
    }

    #[test]
    fn approach_ends_at_the_hover_point() {
        let (nest, platform, params) = (nest(), platform(), FalconParams::DEFAULT);
        let hover = falcon_arrival_point(&nest);
        assert!(hover.abs_diff_eq(Vec3::new(1.0, 5.0 + 0.3 + 0.8, -2.0), 1e-5));

        let almost = falcon_orbit_position(params.total_duration() - 1e-3, &nest, &platform, &params);
        assert_eq!(almost.phase, FalconPhase::Approach);
        assert!(almost.position.distance(hover) < 1e-2);

        let done = falcon_orbit_position(params.total_duration() + 30.0, &nest, &platform, &params);
        assert_eq!(done.phase, FalconPhase::Arrived);
        assert_eq!(done.position, hover);
        assert_eq!(done.target, nest.position);
    }

    #[test]
    fn approach_arcs_above_both_ends() {
        let (nest, platform, params) = (nest(), platform(), FalconParams::DEFAULT);
        let mid = falcon_orbit_position(
            params.orbit_duration() + params.approach_duration * 0.5,
            &nest,
            &platform,
            &params,
        );
        let start = falcon_orbit_position(params.orbit_duration(), &nest, &platform, &params);
        let hover = falcon_arrival_point(&nest);
        assert!(mid.position.y > hover.y);
        // Lifted above the straight line between the two ends.
        assert!(mid.position.y > (start.position.y + hover.y) * 0.5);
    }

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn path_points_cover_the_flight() {
        let (nest, platform, params) = (nest(), platform(), FalconParams::DEFAULT);
        let points = falcon_path_points(&nest, &platform, &params, 64);
        // 96 orbit intervals + 1, then 32 approach samples.
        assert_eq!(points.len(), 97 + 32);
        assert!(points[0].abs_diff_eq(falcon_orbit_at_angle(0.0, 0.0, &nest, &platform), 1e-5));
        let last = points[points.len() - 1];
        assert!(last.distance(falcon_arrival_point(&nest)) < 1e-3);
    }
}
