// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String rewriting.
//!
//! A pass scans the current string left to right:
//!
//! - `(…)` blocks are parameter payloads. They are copied verbatim unless the
//!   symbol they follow was just rewritten, in which case they are dropped.
//! - `[` and `]` are structural and never rewritten.
//! - Any other character is looked up in the [`Rules`]; without a rule it is
//!   copied through.
//!
//! A `(` with no matching `)` is not a parameter block. It is copied as a
//! literal character and scanning continues after it.

use alloc::string::String;

use crate::rng::Mulberry32;
use crate::rules::Rules;

/// Expand `axiom` by `iterations` passes of `rules`, drawing stochastic choices
/// from a fresh generator seeded with `seed`.
///
/// The output depends only on the four inputs.
pub fn expand(rules: &Rules, axiom: &str, iterations: u32, seed: u32) -> String {
    let mut rng = Mulberry32::new(seed);
    expand_with(rules, axiom, iterations, &mut rng)
}

/// Expand using a caller-owned generator.
///
/// The generator is advanced once per stochastic substitution, in left-to-right
/// symbol order within each pass.
pub fn expand_with(rules: &Rules, axiom: &str, iterations: u32, rng: &mut Mulberry32) -> String {
    let mut current = String::from(axiom);
    for _ in 0..iterations {
        current = rewrite_pass(rules, &current, rng);
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        iterations,
        axiom_len = axiom.len(),
        output_len = current.len(),
        "expanded l-system"
    );
    current
}

fn rewrite_pass(rules: &Rules, current: &str, rng: &mut Mulberry32) -> String {
    let mut next = String::with_capacity(current.len() * 2);
    let mut rest = current;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '(' => {
                if let Some(block) = param_block(rest) {
                    next.push_str(block);
                    rest = &rest[block.len()..];
                } else {
                    next.push('(');
                    rest = &rest[1..];
                }
                continue;
            }
            '[' | ']' => {
                next.push(ch);
                rest = &rest[1..];
                continue;
            }
            _ => {}
        }

        rest = &rest[ch.len_utf8()..];
        let replacement = rules.get(ch).and_then(|p| p.choose(rng));
        match replacement {
            Some(text) => {
                next.push_str(text);
                if let Some(block) = param_block(rest) {
                    rest = &rest[block.len()..];
                }
            }
            None => next.push(ch),
        }
    }
    next
}

/// The `(…)` block at the start of `s`, including both delimiters.
pub(crate) fn param_block(s: &str) -> Option<&str> {
    if !s.starts_with('(') {
        return None;
    }
    s.find(')').map(|close| &s[..=close])
}
