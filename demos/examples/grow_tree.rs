// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grow a tree from a small file hierarchy and query it.
//!
//! This example shows how to combine:
//! - `dendrite_grammar` to encode a hierarchy as an axiom and expand it,
//! - `dendrite_turtle` to turn the expanded string into segments and markers,
//! - `dendrite_index` to answer proximity queries against the result.
//!
//! Run:
//! - `cargo run -p dendrite_demos --example grow_tree`

use dendrite_grammar::{FileTreeNode, Hotspot, LSystem};
use dendrite_index::SpatialIndex;
use dendrite_turtle::{MarkerKind, TurtleInterpreter};
use glam::Vec3;

fn hierarchy() -> FileTreeNode {
    FileTreeNode::directory(
        "engine",
        "engine",
        vec![
            FileTreeNode::directory(
                "src",
                "engine/src",
                vec![
                    FileTreeNode::file("lib.rs", "engine/src/lib.rs", 320),
                    FileTreeNode::file("parser.rs", "engine/src/parser.rs", 910),
                    FileTreeNode::file("lexer.rs", "engine/src/lexer.rs", 260),
                    FileTreeNode::directory(
                        "backend",
                        "engine/src/backend",
                        vec![
                            FileTreeNode::file("x86.rs", "engine/src/backend/x86.rs", 1400),
                            FileTreeNode::file("wasm.rs", "engine/src/backend/wasm.rs", 700),
                        ],
                    ),
                ],
            ),
            FileTreeNode::directory(
                "tests",
                "engine/tests",
                vec![FileTreeNode::file("parse.rs", "engine/tests/parse.rs", 150)],
            ),
            FileTreeNode::file("README.md", "engine/README.md", 60),
        ],
    )
}

fn main() {
    let hotspots = [Hotspot {
        path: "engine/src/parser.rs".into(),
        churn_rate: 42.0,
        complexity: 31.0,
        risk_score: 0.85,
    }];

    let system = LSystem::from_topology(&hierarchy(), &hotspots, 42);
    let expanded = system.expand();
    println!("axiom:    {} symbols", system.axiom.len());
    println!("expanded: {} symbols", expanded.len());

    let geo = TurtleInterpreter::new(system.angle).interpret(&expanded);
    println!(
        "geometry: {} segments, {} markers, bounds {:?} .. {:?}",
        geo.branches.len(),
        geo.nodes.len(),
        geo.bounds.min,
        geo.bounds.max
    );

    let index = SpatialIndex::from_geometry(&geo);
    println!("{index:?}");

    for node in geo.nodes.iter().filter(|n| n.kind == MarkerKind::File) {
        println!(
            "  {:<28} at ({:6.2}, {:6.2}, {:6.2}) depth {}",
            node.path, node.position.x, node.position.y, node.position.z, node.depth
        );
    }

    // A point a little beside the trunk, as a walking camera would be.
    let probe = geo.branches[0].start.lerp(geo.branches[0].end, 0.7) + Vec3::X * 0.5;
    if let Some(hit) = index.nearest_segment(probe) {
        println!(
            "nearest segment to {probe:?}: #{} at t = {:.2}, {:.2} away",
            hit.index, hit.t, hit.distance
        );
    }
    if let Some(node) = index.nearest_node(probe) {
        println!("nearest marker: {}", node.path);
    }
    let around = index.query_radius(probe, 6.0);
    println!("{} markers within 6 units", around.len());
}
