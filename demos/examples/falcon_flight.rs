// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seat a nest on the trunk fork and fly the falcon camera into it.
//!
//! This example shows how to combine:
//! - `dendrite_nest` for platform scale, nest placement and the bowl profile,
//! - the falcon flight sampled over time with explicit `FalconParams`,
//! - view quality checks against a `dendrite_index` spatial index.
//!
//! Run:
//! - `cargo run -p dendrite_demos --example falcon_flight`

use dendrite_grammar::{FileTreeNode, LSystem};
use dendrite_index::SpatialIndex;
use dendrite_nest::{
    CameraMode, CameraView, FalconParams, FalconPhase, PlatformConfig, ViewQualityParams,
    compute_root_nest, create_bowl_profile, falcon_orbit_position, falcon_path_points,
    validate_camera_view,
};
use dendrite_turtle::TurtleInterpreter;

fn main() {
    let tree = FileTreeNode::directory(
        "site",
        "site",
        vec![
            FileTreeNode::file("index.html", "site/index.html", 120),
            FileTreeNode::file("app.js", "site/app.js", 880),
            FileTreeNode::directory(
                "css",
                "site/css",
                vec![FileTreeNode::file("main.css", "site/css/main.css", 300)],
            ),
        ],
    );
    let system = LSystem::from_topology(&tree, &[], 7);
    let geo = TurtleInterpreter::new(system.angle).interpret(&system.expand());
    let index = SpatialIndex::from_geometry(&geo);

    let platform = PlatformConfig::from_geometry(&geo);
    let dims = platform.derive_dimensions();
    println!("{platform:?}");
    println!(
        "platform radius {:.2}, player height {:.2}, move speed {:.2}",
        dims.platform_radius, dims.player_height, dims.move_speed
    );

    let Some(nest) = compute_root_nest(&geo.branches, &platform) else {
        println!("the trunk never forks; nothing to fly to");
        return;
    };
    println!(
        "nest on segment {} at {:?}, radius {:.2}, {} branches",
        nest.parent_index,
        nest.position,
        nest.radius,
        nest.anchors.len()
    );

    let profile = create_bowl_profile(f64::from(nest.radius), f64::from(nest.depth), 0.1, 12);
    let arc: f64 = profile.windows(2).map(|w| w[0].distance(w[1])).sum();
    println!("bowl profile: {} points, arc length {arc:.2}", profile.len());

    // Speed the orbit up a little; callers own the flight parameters.
    let params = FalconParams {
        orbit_speed: 0.2,
        ..FalconParams::default()
    };
    let mut phase = None;
    let mut t = 0.0_f32;
    while t <= params.total_duration() + 1.0 {
        let pose = falcon_orbit_position(t, &nest, &platform, &params);
        if phase != Some(pose.phase) {
            println!("t = {t:6.2}s  {:?} from {:?}", pose.phase, pose.position);
            phase = Some(pose.phase);
        }
        t += 0.25;
    }
    let path = falcon_path_points(&nest, &platform, &params, 48);
    println!("debug path: {} points", path.len());

    let landed = falcon_orbit_position(params.total_duration() + 0.5, &nest, &platform, &params);
    assert_eq!(landed.phase, FalconPhase::Arrived);
    let view = CameraView {
        position: landed.position,
        forward: (landed.target - landed.position).normalize_or_zero(),
        mode: CameraMode::FirstPerson,
        player: None,
        since_transition: 0.0,
    };
    let report = validate_camera_view(&view, Some(&nest), Some(&index), &ViewQualityParams::default());
    println!("view score {} ({:?})", report.score, report.flags());
}
