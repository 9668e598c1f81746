// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendrite Grammar: a parametric, stochastic L-system for growing trees from file hierarchies.
//!
//! - Rewrite an axiom with fixed or stochastic [`Rules`] using a seeded [`Mulberry32`] generator.
//! - Encode a [`FileTreeNode`] hierarchy as an axiom with [`build_axiom`].
//! - Bundle both with [`LSystem::from_topology`].
//!
//! Output depends only on the rules, the axiom, the iteration count, and the seed.
//!
//! ## Alphabet
//!
//! The grammar itself only treats `(`, `)`, `[` and `]` specially. The axioms built
//! here use the turtle alphabet understood by `dendrite_turtle`:
//!
//! | Symbol       | Meaning                                           |
//! |--------------|---------------------------------------------------|
//! | `F(len)`     | organic forward, rewritten by the default rules   |
//! | `G(len)`     | structural forward, never rewritten               |
//! | `+` / `-`    | yaw left / right                                  |
//! | `^` / `&`    | pitch up / down                                   |
//! | `/` / `\`    | roll                                              |
//! | `[` / `]`    | push / pop turtle state                           |
//! | `!(r)`       | set radius                                        |
//! | `@(k:path)`  | node marker, `k` is `f` or `d`                    |
//!
//! # Example
//!
//! ```rust
//! use dendrite_grammar::{LSystem, Rules};
//!
//! let system = LSystem::new("F", Rules::new().with_rule('F', "F[+F]F"), 2, 25.0, 1);
//! assert_eq!(system.expand(), "F[+F]F[+F[+F]F]F[+F]F");
//! ```
//!
//! ```rust
//! use dendrite_grammar::{FileTreeNode, LSystem};
//!
//! let tree = FileTreeNode::directory(
//!     "src",
//!     "src",
//!     vec![FileTreeNode::file("main.rs", "src/main.rs", 200)],
//! );
//! let system = LSystem::from_topology(&tree, &[], 42);
//! let expanded = system.expand();
//! assert!(expanded.contains("@(f:src/main.rs)"));
//! // The organic tip was rewritten into a cluster of structural segments.
//! assert!(!expanded.contains('F'));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod expand;
mod rng;
mod rules;
mod topology;

use alloc::string::String;

pub use expand::{expand, expand_with};
pub use rng::{Mulberry32, hash_path, node_seed};
pub use rules::{Production, Rules};
pub use topology::{
    BASE_BRANCH_ANGLE, DEFAULT_BRANCH_LENGTH, FileMetadata, FileTreeNode, Hotspot, LOC_PER_UNIT,
    MAX_BRANCH_LENGTH, MIN_BRANCH_LENGTH, NodeKind, RISK_TWIST, ROOT_RADIUS, build_axiom,
};

/// Default turning angle, in degrees.
pub const DEFAULT_ANGLE: f32 = 25.0;

/// Seed mixed into every path hash when the caller has no preference.
pub const DEFAULT_BASE_SEED: u32 = 42;

/// Alternatives for the organic `F` tip: a symmetric, an alternating and a vertical cluster.
pub const ORGANIC_TIP_RULES: [&str; 3] = ["G[+G][-G]", "G[+G]G[-G]", "G[^G][&G]"];

/// A complete L-system description.
#[derive(Clone, Debug, PartialEq)]
pub struct LSystem {
    /// Starting string.
    pub axiom: String,
    /// Production rules.
    pub rules: Rules,
    /// Number of rewrite passes.
    pub iterations: u32,
    /// Default turning angle in degrees, for the interpreter.
    pub angle: f32,
    /// Seed for stochastic rule choice.
    pub seed: u32,
}

impl LSystem {
    /// Create a system from its parts.
    pub fn new(
        axiom: impl Into<String>,
        rules: Rules,
        iterations: u32,
        angle: f32,
        seed: u32,
    ) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
            iterations,
            angle,
            seed,
        }
    }

    /// Build a system whose axiom encodes `tree`.
    ///
    /// Only the organic `F` tips are rewritten, once, into one of
    /// [`ORGANIC_TIP_RULES`]; structural `G` segments keep their parameters.
    pub fn from_topology(tree: &FileTreeNode, hotspots: &[Hotspot], base_seed: u32) -> Self {
        let (axiom, seed) = build_axiom(tree, hotspots, base_seed);
        let rules = Rules::new().with_alternatives('F', ORGANIC_TIP_RULES);
        Self::new(axiom, rules, 1, DEFAULT_ANGLE, seed)
    }

    /// Expand the axiom.
    ///
    /// Each call starts from a fresh generator, so repeated calls agree.
    pub fn expand(&self) -> String {
        expand(&self.rules, &self.axiom, self.iterations, self.seed)
    }
}
