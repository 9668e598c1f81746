// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoding a file tree as an axiom string.
//!
//! Interior nodes become a structural `G` trunk followed by one bracketed
//! sub-expression per child. Leaves become `@` markers. File children also get
//! a thin organic `F` tip that the default rules expand into a small cluster.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::rng::{Mulberry32, node_seed};

/// Radius of the root trunk.
pub const ROOT_RADIUS: f64 = 0.3;
/// Minimum length of a child branch.
pub const MIN_BRANCH_LENGTH: f64 = 1.5;
/// Maximum length of a child branch (before perturbation).
pub const MAX_BRANCH_LENGTH: f64 = 6.0;
/// Branch length used when a node carries no size metadata.
pub const DEFAULT_BRANCH_LENGTH: f64 = 2.5;
/// Lines of code per unit of branch length.
pub const LOC_PER_UNIT: f64 = 40.0;
/// Base yaw deflection of every child branch, in degrees.
pub const BASE_BRANCH_ANGLE: f64 = 45.0;
/// Extra yaw per unit of hotspot risk, in degrees.
pub const RISK_TWIST: f64 = 5.0;

/// Whether a node is a file or a directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A leaf file.
    File,
    /// A directory (may still have no children).
    Directory,
}

impl NodeKind {
    /// The one-letter tag used in `@(k:path)` markers.
    pub const fn tag(self) -> char {
        match self {
            Self::File => 'f',
            Self::Directory => 'd',
        }
    }
}

/// Size and ownership metrics attached to a file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileMetadata {
    /// Lines of code.
    pub loc: u32,
    /// Cyclomatic complexity.
    pub complexity: u32,
    /// Most recent author.
    pub author: String,
}

/// A node of the source hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct FileTreeNode {
    /// Display name (last path component).
    pub name: String,
    /// Full path; also the node's identity for seeding.
    pub path: String,
    /// File or directory.
    pub kind: NodeKind,
    /// Child nodes, in display order.
    pub children: Vec<FileTreeNode>,
    /// Optional size metrics.
    pub metadata: Option<FileMetadata>,
}

impl FileTreeNode {
    /// A file leaf with `loc` lines.
    pub fn file(name: impl Into<String>, path: impl Into<String>, loc: u32) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: Vec::new(),
            metadata: Some(FileMetadata {
                loc,
                ..FileMetadata::default()
            }),
        }
    }

    /// A directory with the given children.
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            children,
            metadata: None,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A change-risk record for one path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hotspot {
    /// Path the record applies to.
    pub path: String,
    /// Number of commits touching the path.
    pub churn_rate: f64,
    /// Complexity score.
    pub complexity: f64,
    /// Combined risk score; raises the branch angle.
    pub risk_score: f64,
}

/// Encode `tree` as an axiom and return it with the tree's own seed.
///
/// Every interior node and every child branch draws its perturbations from a
/// generator seeded by `hash(path) + base_seed`, so a node's shape does not
/// depend on its siblings or their order.
pub fn build_axiom(tree: &FileTreeNode, hotspots: &[Hotspot], base_seed: u32) -> (String, u32) {
    let seed = node_seed(&tree.path, base_seed);
    let mut out = String::new();
    encode_node(
        tree,
        hotspots,
        ROOT_RADIUS,
        Mulberry32::new(seed),
        base_seed,
        &mut out,
    );
    #[cfg(feature = "tracing")]
    tracing::debug!(path = %tree.path, seed, axiom_len = out.len(), "built axiom");
    (out, seed)
}

fn encode_node(
    node: &FileTreeNode,
    hotspots: &[Hotspot],
    radius: f64,
    mut rng: Mulberry32,
    base_seed: u32,
    out: &mut String,
) {
    if node.is_leaf() {
        out.push_str(&format!("@({}:{})", node.kind.tag(), node.path));
        return;
    }

    let trunk_len = 2.5 + rng.next_f64() * 1.5;
    out.push_str(&format!("!({radius:.3})G({trunk_len:.2})"));

    #[allow(
        clippy::cast_precision_loss,
        reason = "child counts are far below 2^52."
    )]
    let angle_step = 360.0 / node.children.len() as f64;

    for (i, child) in node.children.iter().enumerate() {
        let mut child_rng = Mulberry32::new(node_seed(&child.path, base_seed));
        let risk = hotspots
            .iter()
            .find(|h| h.path == child.path)
            .map_or(0.0, |h| h.risk_score);

        let child_radius = match child.kind {
            NodeKind::Directory => radius * 0.7,
            NodeKind::File => radius * 0.4,
        };
        let base_len = child.metadata.as_ref().map_or(DEFAULT_BRANCH_LENGTH, |m| {
            (f64::from(m.loc) / LOC_PER_UNIT).clamp(MIN_BRANCH_LENGTH, MAX_BRANCH_LENGTH)
        });
        let length = base_len * (0.8 + child_rng.next_f64() * 0.4);
        let yaw = BASE_BRANCH_ANGLE + risk * RISK_TWIST + (child_rng.next_f64() - 0.5) * 15.0;
        let pitch = (child_rng.next_f64() - 0.5) * 30.0;

        #[allow(
            clippy::cast_precision_loss,
            reason = "child indices are far below 2^52."
        )]
        let roll = angle_step * i as f64;

        out.push('[');
        out.push_str(&format!("/({roll:.1})+({yaw:.1})"));
        if !(-2.0..=2.0).contains(&pitch) {
            out.push_str(&format!("^({pitch:.1})"));
        }
        out.push_str(&format!("!({child_radius:.3})G({length:.2})"));

        if child.kind == NodeKind::Directory && !child.is_leaf() {
            encode_node(child, hotspots, child_radius, child_rng, base_seed, out);
        } else {
            let tip_radius = child_radius * 0.5;
            out.push_str(&format!("@(f:{})!({tip_radius:.3})F", child.path));
        }
        out.push(']');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample_tree() -> FileTreeNode {
        FileTreeNode::directory(
            "root",
            "root",
            vec![
                FileTreeNode::file("a.rs", "root/a.rs", 120),
                FileTreeNode::directory(
                    "lib",
                    "root/lib",
                    vec![
                        FileTreeNode::file("b.rs", "root/lib/b.rs", 400),
                        FileTreeNode::file("c.rs", "root/lib/c.rs", 10),
                    ],
                ),
                FileTreeNode::file("d.rs", "root/d.rs", 80),
            ],
        )
    }

    /// The bracketed sub-expression that starts with the child's marker path.
    fn child_expr<'a>(axiom: &'a str, path: &str) -> &'a str {
        let marker = format!("@(f:{path})");
        let at = axiom.find(&marker).expect("marker present");
        let open = axiom[..at].rfind('[').expect("child is bracketed");
        let close = at + axiom[at..].find(']').expect("child is closed");
        &axiom[open..=close]
    }

    #[test]
    fn leaf_root_is_a_single_marker() {
        let leaf = FileTreeNode::file("main.rs", "src/main.rs", 10);
        let (axiom, _) = build_axiom(&leaf, &[], 42);
        assert_eq!(axiom, "@(f:src/main.rs)");

        let empty_dir = FileTreeNode::directory("empty", "empty", vec![]);
        let (axiom, _) = build_axiom(&empty_dir, &[], 42);
        assert_eq!(axiom, "@(d:empty)");
    }

    #[test]
    fn interior_node_emits_trunk_and_one_bracket_per_child() {
        let (axiom, _) = build_axiom(&sample_tree(), &[], 42);
        assert!(axiom.starts_with("!(0.300)G("), "axiom: {axiom}");
        assert_eq!(axiom.matches('[').count(), 5);
        assert_eq!(axiom.matches(']').count(), 5);
        assert_eq!(axiom.matches("@(f:").count(), 4);
        // Children are spread evenly around the parent.
        assert!(axiom.contains("/(0.0)"));
        assert!(axiom.contains("/(120.0)"));
        assert!(axiom.contains("/(240.0)"));
        // Two children in `lib` split at 180 degrees.
        assert!(axiom.contains("/(180.0)"));
    }

    #[test]
    fn seed_is_path_hash_plus_base() {
        let tree = sample_tree();
        let (_, seed) = build_axiom(&tree, &[], 42);
        assert_eq!(seed, node_seed("root", 42));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let tree = sample_tree();
        assert_eq!(build_axiom(&tree, &[], 7), build_axiom(&tree, &[], 7));
        assert_ne!(build_axiom(&tree, &[], 7).0, build_axiom(&tree, &[], 8).0);
    }

    #[test]
    fn child_perturbation_ignores_sibling_order() {
        let tree = sample_tree();
        let mut reordered = tree.clone();
        reordered.children.swap(0, 2);

        let (a, _) = build_axiom(&tree, &[], 42);
        let (b, _) = build_axiom(&reordered, &[], 42);

        // The roll offset depends on position; everything after it must match.
        let strip_roll = |s: &str| String::from(&s[s.find('+').unwrap()..]);
        assert_eq!(
            strip_roll(child_expr(&a, "root/a.rs")),
            strip_roll(child_expr(&b, "root/a.rs"))
        );
        assert_eq!(
            strip_roll(child_expr(&a, "root/d.rs")),
            strip_roll(child_expr(&b, "root/d.rs"))
        );
    }

    #[test]
    fn hotspot_risk_raises_yaw() {
        let tree = FileTreeNode::directory(
            "root",
            "root",
            vec![FileTreeNode::file("hot.rs", "root/hot.rs", 100)],
        );
        let hot = [Hotspot {
            path: "root/hot.rs".into(),
            risk_score: 4.0,
            ..Hotspot::default()
        }];
        let yaw_of = |axiom: &str| -> f64 {
            let start = axiom.find("+(").unwrap() + 2;
            let end = start + axiom[start..].find(')').unwrap();
            axiom[start..end].parse().unwrap()
        };
        let (calm, _) = build_axiom(&tree, &[], 42);
        let (risky, _) = build_axiom(&tree, &hot, 42);
        assert!((yaw_of(&risky) - yaw_of(&calm) - 20.0).abs() < 0.11);
    }

    #[test]
    fn branch_length_is_clamped_and_perturbed() {
        for (loc, lo, hi) in [(0, 1.2, 1.8), (10_000, 4.8, 7.2), (160, 3.2, 4.8)] {
            let tree = FileTreeNode::directory(
                "root",
                "root",
                vec![FileTreeNode::file("x.rs", "root/x.rs", loc)],
            );
            let (axiom, _) = build_axiom(&tree, &[], 1);
            let expr = child_expr(&axiom, "root/x.rs");
            let g = expr.find("G(").unwrap() + 2;
            let end = g + expr[g..].find(')').unwrap();
            let len: f64 = expr[g..end].parse().unwrap();
            assert!((lo..=hi).contains(&len), "loc {loc}: length {len}");
        }
    }

    #[test]
    fn file_children_get_marker_and_organic_tip() {
        let (axiom, _) = build_axiom(&sample_tree(), &[], 42);
        // Files under root have radius 0.3 * 0.4 = 0.12; tips are half that.
        assert!(axiom.contains("@(f:root/a.rs)!(0.060)F]"), "axiom: {axiom}");
        // Files under lib: 0.3 * 0.7 * 0.4 * 0.5 = 0.042.
        assert!(axiom.contains("@(f:root/lib/b.rs)!(0.042)F]"), "axiom: {axiom}");
    }
}
