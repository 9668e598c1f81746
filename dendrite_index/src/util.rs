// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Returns the square root of the number, rounded up.
#[inline]
pub(crate) const fn isqrt_ceil(num: usize) -> usize {
    let s = num.isqrt();

    // This multiplication cannot overflow because `s` is the rounded-down square root of `num`,
    // i.e., `s * s` is guaranteed to be less than or equal to `num`.
    if s * s < num { s + 1 } else { s }
}

/// Rounds a non-negative float up to the next integer, saturating at `usize::MAX`.
///
/// Negative and NaN inputs map to zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float-to-int `as` casts saturate; the fractional check restores ceiling semantics."
)]
#[inline]
pub(crate) fn ceil_to_usize(value: f32) -> usize {
    let truncated = value as usize;
    if (truncated as f32) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}
