// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fork junction detection over parent-indexed segment lists.

use alloc::vec::Vec;

use dendrite_turtle::BranchSegment;
use glam::Vec3;

/// The point where a segment splits into its children.
#[derive(Clone, Debug, PartialEq)]
pub struct ForkJunction {
    /// End point of the parent segment.
    pub fork_point: Vec3,
    /// Indices of every segment whose parent is [`parent_index`](Self::parent_index), ascending.
    pub child_indices: Vec<usize>,
    /// Index of the parent segment.
    pub parent_index: usize,
}

/// Find the fork at the end of segment `parent_index`.
///
/// Returns `None` when the index is out of range or the segment has no children.
pub fn find_fork_junction(segments: &[BranchSegment], parent_index: usize) -> Option<ForkJunction> {
    let parent = segments.get(parent_index)?;
    let child_indices: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.parent == Some(parent_index))
        .map(|(i, _)| i)
        .collect();
    if child_indices.is_empty() {
        return None;
    }
    Some(ForkJunction {
        fork_point: parent.end,
        child_indices,
        parent_index,
    })
}

/// Index of the last segment of the trunk chain.
///
/// Starting from segment 0, follows consecutive depth-0 segments that each
/// name the previous one as parent. Returns `None` for an empty list.
pub fn find_trunk_tip(segments: &[BranchSegment]) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }
    let mut tip = 0;
    for (i, segment) in segments.iter().enumerate().skip(1) {
        if segment.depth == 0 && segment.parent == Some(tip) {
            tip = i;
        } else {
            break;
        }
    }
    Some(tip)
}
