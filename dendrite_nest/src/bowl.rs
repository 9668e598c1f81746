// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parabolic bowl profile for a lathed nest mesh.

use alloc::vec::Vec;

use kurbo::Point;

/// Profile of a concave bowl, from center to rim.
///
/// Returns `segments + 1` points with `x = t·radius` and
/// `y = depth·(t² − 1) + rim_height·t²` for `t` evenly spaced over `[0, 1]`.
/// Revolve the points about the Y axis to get the bowl surface.
///
/// The center sits at `y = −depth` and the rim at `y = rim_height`. The
/// profile rises monotonically whenever `depth + rim_height ≥ 0`; a rim lower
/// than `−depth` turns it into a dome. With zero segments only the center is
/// returned.
///
/// ```rust
/// use dendrite_nest::create_bowl_profile;
///
/// let profile = create_bowl_profile(2.0, 0.6, 0.1, 4);
/// assert_eq!(profile.len(), 5);
/// assert_eq!(profile[0].y, -0.6);
/// assert_eq!(profile[4].x, 2.0);
/// ```
pub fn create_bowl_profile(radius: f64, depth: f64, rim_height: f64, segments: usize) -> Vec<Point> {
    if segments == 0 {
        return alloc::vec![Point::new(0.0, -depth)];
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "profile resolutions are small."
    )]
    let n = segments as f64;
    (0..=segments)
        .map(|i| {
            #[allow(
                clippy::cast_precision_loss,
                reason = "profile resolutions are small."
            )]
            let t = i as f64 / n;
            let t2 = t * t;
            Point::new(t * radius, depth * (t2 - 1.0) + rim_height * t2)
        })
        .collect()
}
