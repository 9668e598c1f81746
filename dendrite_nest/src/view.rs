// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera view quality checks for the player camera modes.
//!
//! [`validate_camera_view`] is a pure function meant to be polled a few
//! times per second. It looks for four problems:
//!
//! - the camera is inside, or pressed against, a branch;
//! - a first-person camera looks straight along the branch it stands on;
//! - the nest is out of view right after a camera transition;
//! - a branch sits between a third-person camera and the player.

use alloc::vec::Vec;

use dendrite_index::SpatialIndex;
use glam::Vec3;

use crate::nest::NestConfig;

bitflags::bitflags! {
    /// The kinds of view problem [`validate_camera_view`] can report.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ViewIssueFlags: u8 {
        /// Camera is inside or very near a branch surface.
        const FACE_INTO_WALL   = 0b0000_0001;
        /// First-person camera looks along the nearest branch axis.
        const BAD_AZIMUTH      = 0b0000_0010;
        /// Nest is outside the view shortly after a transition.
        const OFF_PLATFORM     = 0b0000_0100;
        /// A branch blocks the line from a third-person camera to the player.
        const BRANCH_OCCLUSION = 0b0000_1000;
    }
}

/// How bad an issue is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Noticeable but usable.
    Warning,
    /// The view is broken.
    Error,
}

/// Player camera mode being checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Camera at the player's eyes.
    FirstPerson,
    /// Chase camera behind the player.
    ThirdPerson,
}

/// The camera pose under test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraView {
    /// Camera position.
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Active mode.
    pub mode: CameraMode,
    /// Player position, used by the third-person occlusion check.
    pub player: Option<Vec3>,
    /// Seconds since the last camera mode transition.
    pub since_transition: f32,
}

/// Thresholds and penalties used by [`validate_camera_view`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewQualityParams {
    /// Warn when the nearest branch axis is closer than this multiple of its radius.
    pub wall_factor: f32,
    /// Warn when the view aligns with the branch axis by more than this.
    pub azimuth_warning: f32,
    /// Escalate the alignment warning to an error above this.
    pub azimuth_error: f32,
    /// Seconds after a transition during which the nest must be in view.
    pub placement_window: f32,
    /// Minimum cosine between the view and the direction to the nest.
    pub nest_min_alignment: f32,
    /// Report occlusion when a branch axis passes closer than this multiple
    /// of its radius to the camera-player midpoint.
    pub occlusion_factor: f32,
    /// Skip the occlusion check when the camera is this close to the player.
    pub min_player_distance: f32,
    /// Points deducted per error.
    pub error_penalty: u32,
    /// Points deducted per warning.
    pub warning_penalty: u32,
}

impl ViewQualityParams {
    /// Default thresholds.
    pub const DEFAULT: Self = Self {
        wall_factor: 1.2,
        azimuth_warning: 0.95,
        azimuth_error: 0.98,
        placement_window: 2.0,
        nest_min_alignment: 0.1,
        occlusion_factor: 1.5,
        min_player_distance: 0.01,
        error_penalty: 30,
        warning_penalty: 15,
    };
}

impl Default for ViewQualityParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One detected problem.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewIssue {
    /// Which problem, as a single flag.
    pub kind: ViewIssueFlags,
    /// How bad it is.
    pub severity: Severity,
    /// The measured quantity (a distance or an alignment cosine).
    pub measured: f32,
    /// The threshold it was compared against.
    pub threshold: f32,
}

/// Outcome of [`validate_camera_view`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewQualityReport {
    /// 100 for a clean view, lowered by every issue, never below 0.
    pub score: u32,
    /// Issues in check order.
    pub issues: Vec<ViewIssue>,
}

impl ViewQualityReport {
    /// Union of the issue kinds found.
    pub fn flags(&self) -> ViewIssueFlags {
        self.issues
            .iter()
            .fold(ViewIssueFlags::empty(), |acc, issue| acc | issue.kind)
    }

    /// Whether any issue is an error.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Whether no issue was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Score a camera pose.
///
/// Checks that need a spatial index or a nest are skipped when it is `None`.
/// Branch radii are taken as the mean of each segment's start and end radius.
pub fn validate_camera_view(
    view: &CameraView,
    nest: Option<&NestConfig>,
    index: Option<&SpatialIndex>,
    params: &ViewQualityParams,
) -> ViewQualityReport {
    let mut issues = Vec::new();
    let nearest = index.and_then(|index| index.nearest_segment(view.position));

    if let Some(hit) = nearest {
        let radius = hit.segment.mean_radius();
        let threshold = radius * params.wall_factor;
        if hit.distance < threshold {
            issues.push(ViewIssue {
                kind: ViewIssueFlags::FACE_INTO_WALL,
                severity: if hit.distance < radius {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                measured: hit.distance,
                threshold,
            });
        }
    }

    if view.mode == CameraMode::FirstPerson
        && let Some(hit) = nearest
    {
        let alignment = view.forward.dot(hit.segment.axis().normalize_or_zero()).abs();
        if alignment > params.azimuth_warning {
            issues.push(ViewIssue {
                kind: ViewIssueFlags::BAD_AZIMUTH,
                severity: if alignment > params.azimuth_error {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                measured: alignment,
                threshold: params.azimuth_warning,
            });
        }
    }

    if let Some(nest) = nest
        && view.since_transition < params.placement_window
    {
        let to_nest = (nest.position - view.position).normalize_or_zero();
        let alignment = to_nest.dot(view.forward);
        if alignment < params.nest_min_alignment {
            issues.push(ViewIssue {
                kind: ViewIssueFlags::OFF_PLATFORM,
                severity: Severity::Warning,
                measured: alignment,
                threshold: params.nest_min_alignment,
            });
        }
    }

    if view.mode == CameraMode::ThirdPerson
        && let (Some(player), Some(index)) = (view.player, index)
        && view.position.distance(player) > params.min_player_distance
    {
        let midpoint = (view.position + player) * 0.5;
        if let Some(hit) = index.nearest_segment(midpoint) {
            let threshold = hit.segment.mean_radius() * params.occlusion_factor;
            if hit.distance < threshold {
                issues.push(ViewIssue {
                    kind: ViewIssueFlags::BRANCH_OCCLUSION,
                    severity: Severity::Warning,
                    measured: hit.distance,
                    threshold,
                });
            }
        }
    }

    let penalty: u32 = issues
        .iter()
        .map(|issue| match issue.severity {
            Severity::Error => params.error_penalty,
            Severity::Warning => params.warning_penalty,
        })
        .fold(0, u32::saturating_add);

    ViewQualityReport {
        score: 100_u32.saturating_sub(penalty),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use dendrite_turtle::BranchSegment;
    use glam::Quat;

    fn trunk_index() -> SpatialIndex {
        let trunk = BranchSegment {
            start: Vec3::ZERO,
            end: Vec3::new(0.0, 10.0, 0.0),
            start_radius: 0.5,
            end_radius: 0.5,
            depth: 0,
            parent: None,
        };
        SpatialIndex::build(&[], &[trunk], None)
    }

    fn nest_at(position: Vec3) -> NestConfig {
        NestConfig {
            parent_index: 0,
            position,
            radius: 1.0,
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
            anchors: vec![],
            view_near_radius: 1.5,
            view_far_radius: 5.0,
            depth: 0.3,
        }
    }

    fn view(position: Vec3, forward: Vec3, mode: CameraMode) -> CameraView {
        CameraView {
            position,
            forward,
            mode,
            player: None,
            since_transition: 10.0,
        }
    }

    #[test]
    fn clear_view_scores_full() {
        let index = trunk_index();
        let v = view(Vec3::new(3.0, 2.0, 0.0), Vec3::NEG_X, CameraMode::FirstPerson);
        let report = validate_camera_view(&v, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.score, 100);
    }

    #[test]
    fn inside_a_branch_is_an_error() {
        let index = trunk_index();
        let v = view(Vec3::new(0.2, 2.0, 0.0), Vec3::NEG_X, CameraMode::ThirdPerson);
        let report = validate_camera_view(&v, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert_eq!(report.flags(), ViewIssueFlags::FACE_INTO_WALL);
        assert!(report.has_errors());
        assert_eq!(report.score, 70);
    }

    #[test]
    fn near_a_branch_is_a_warning() {
        let index = trunk_index();
        // Between the radius (0.5) and 1.2x the radius.
        let v = view(Vec3::new(0.55, 2.0, 0.0), Vec3::X, CameraMode::ThirdPerson);
        let report = validate_camera_view(&v, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].severity, Severity::Warning);
        assert_eq!(report.score, 85);
    }

    #[test]
    fn looking_along_the_branch() {
        let index = trunk_index();
        let up = view(Vec3::new(3.0, 2.0, 0.0), Vec3::Y, CameraMode::FirstPerson);
        let report = validate_camera_view(&up, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert_eq!(report.flags(), ViewIssueFlags::BAD_AZIMUTH);
        assert!(report.has_errors());

        let slanted = view(
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(0.3, 1.0, 0.0).normalize(),
            CameraMode::FirstPerson,
        );
        let report = validate_camera_view(&slanted, None, Some(&index), &ViewQualityParams::DEFAULT);
        // cos = 1 / sqrt(1.09) ≈ 0.958
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].severity, Severity::Warning);

        let third = CameraView {
            mode: CameraMode::ThirdPerson,
            ..up
        };
        let report = validate_camera_view(&third, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert!(report.is_clean());
    }

    #[test]
    fn nest_behind_camera_after_transition() {
        let nest = nest_at(Vec3::new(0.0, 0.0, 10.0));
        let mut v = view(Vec3::ZERO, Vec3::NEG_Z, CameraMode::FirstPerson);
        v.since_transition = 0.5;
        let report = validate_camera_view(&v, Some(&nest), None, &ViewQualityParams::DEFAULT);
        assert_eq!(report.flags(), ViewIssueFlags::OFF_PLATFORM);
        assert_eq!(report.score, 85);

        v.since_transition = 3.0;
        let report = validate_camera_view(&v, Some(&nest), None, &ViewQualityParams::DEFAULT);
        assert!(report.is_clean());

        v.since_transition = 0.5;
        v.forward = Vec3::Z;
        let report = validate_camera_view(&v, Some(&nest), None, &ViewQualityParams::DEFAULT);
        assert!(report.is_clean());
    }

    #[test]
    fn branch_between_camera_and_player() {
        let index = trunk_index();
        let mut v = view(Vec3::new(-4.0, 5.0, 0.0), Vec3::X, CameraMode::ThirdPerson);
        v.player = Some(Vec3::new(4.0, 5.0, 0.0));
        let report = validate_camera_view(&v, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert_eq!(report.flags(), ViewIssueFlags::BRANCH_OCCLUSION);
        assert_eq!(report.score, 85);

        v.player = Some(Vec3::new(-4.0, 5.0, 6.0));
        let report = validate_camera_view(&v, None, Some(&index), &ViewQualityParams::DEFAULT);
        assert!(report.is_clean());
    }

    #[test]
    fn score_never_drops_below_zero() {
        let index = trunk_index();
        let nest = nest_at(Vec3::new(0.0, -20.0, 0.0));
        let mut v = view(Vec3::new(0.1, 5.0, 0.0), Vec3::Y, CameraMode::FirstPerson);
        v.since_transition = 0.0;
        let harsh = ViewQualityParams {
            error_penalty: 60,
            ..ViewQualityParams::DEFAULT
        };
        let report = validate_camera_view(&v, Some(&nest), Some(&index), &harsh);
        assert_eq!(
            report.flags(),
            ViewIssueFlags::FACE_INTO_WALL | ViewIssueFlags::BAD_AZIMUTH | ViewIssueFlags::OFF_PLATFORM
        );
        assert_eq!(report.score, 0);
    }

    #[test]
    fn missing_inputs_skip_checks() {
        let v = view(Vec3::ZERO, Vec3::X, CameraMode::ThirdPerson);
        let report = validate_camera_view(&v, None, None, &ViewQualityParams::DEFAULT);
        assert!(report.is_clean());
        assert_eq!(report.score, 100);
    }
}
