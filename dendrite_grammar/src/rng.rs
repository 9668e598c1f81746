// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seeded pseudo-random numbers and path hashing.

/// Mulberry32: a tiny 32-bit state PRNG.
///
/// The stream depends only on the seed, so two generators created from the same
/// seed produce identical sequences on every platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a 32-bit seed.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Pick an index in `0..len` as `floor(next_f64() * len)`.
    ///
    /// Always advances the stream, even for `len == 1`. Returns `None` without
    /// advancing when `len == 0`.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "the product lies in [0, len), so truncation is the intended floor."
        )]
        let idx = (self.next_f64() * len as f64) as usize;
        Some(idx.min(len - 1))
    }
}

/// Hash a path string into a non-negative 32-bit value.
///
/// This is the classic `h = h * 31 + c` string hash over UTF-16 code units in
/// wrapping 32-bit signed arithmetic, returned as its absolute value.
pub fn hash_path(path: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in path.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Deterministic seed for the node at `path`.
pub fn node_seed(path: &str, base_seed: u32) -> u32 {
    hash_path(path).wrapping_add(base_seed)
}
