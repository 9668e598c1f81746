// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The turtle: a single left-to-right pass over a symbol string.

use alloc::string::String;
use alloc::vec::Vec;

use glam::{Quat, Vec3};

use crate::geometry::{BranchSegment, MarkerKind, NodeMarker, TreeGeometry};

/// Turtle heading in its local frame.
pub const LOCAL_FORWARD: Vec3 = Vec3::Y;
/// Pitch axis in the turtle's local frame.
pub const LOCAL_RIGHT: Vec3 = Vec3::X;
/// Yaw axis in the turtle's local frame.
pub const LOCAL_UP: Vec3 = Vec3::Z;

/// Radius of the turtle before any `!` symbol.
pub const INITIAL_RADIUS: f32 = 0.15;
/// Radius used by a bare `!` with no parameter.
pub const DEFAULT_SET_RADIUS: f32 = 0.1;
/// End radius of a drawn segment relative to its start radius.
pub const TAPER: f32 = 0.95;

/// Pose of the turtle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurtleState {
    /// Current position.
    pub position: Vec3,
    /// Current orientation; rotates the local frame into the world.
    pub orientation: Quat,
    /// Current branch radius.
    pub radius: f32,
    /// Number of open `[` pushes.
    pub depth: u32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            radius: INITIAL_RADIUS,
            depth: 0,
        }
    }
}

impl TurtleState {
    /// World-space heading.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * LOCAL_FORWARD
    }

    /// Rotate about a local axis by `degrees`.
    ///
    /// The rotation is composed on the right, so it acts in the turtle's own
    /// frame regardless of how the turtle is currently oriented.
    #[inline]
    pub fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let q = Quat::from_axis_angle(axis, degrees.to_radians());
        self.orientation = (self.orientation * q).normalize();
    }

    fn advance(&mut self, length: f32) -> Vec3 {
        let start = self.position;
        self.position = start + self.forward() * length;
        start
    }
}

/// Interprets symbol strings into [`TreeGeometry`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurtleInterpreter {
    default_angle: f32,
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::new(25.0)
    }
}

impl TurtleInterpreter {
    /// An interpreter turning by `default_angle` degrees for rotations without a parameter.
    pub const fn new(default_angle: f32) -> Self {
        Self { default_angle }
    }

    /// The default turning angle in degrees.
    pub const fn default_angle(&self) -> f32 {
        self.default_angle
    }

    /// Interpret `symbols` with this interpreter's default angle.
    pub fn interpret(&self, symbols: &str) -> TreeGeometry {
        self.interpret_with_angle(symbols, self.default_angle)
    }

    /// Interpret `symbols`, using `angle` (degrees) for rotations without a parameter.
    ///
    /// Unknown symbols are skipped. A `]` with nothing pushed is ignored, and
    /// pushes left open at the end simply leave depth raised.
    pub fn interpret_with_angle(&self, symbols: &str, angle: f32) -> TreeGeometry {
        let mut walk = Walk::default();
        let mut rest = symbols;

        while let Some(ch) = rest.chars().next() {
            rest = &rest[ch.len_utf8()..];
            let (param, after) = split_param(rest);
            let consumes_param = walk.apply(ch, param, angle);
            if consumes_param {
                rest = after;
            }
        }

        let geometry = TreeGeometry::new(walk.branches, walk.nodes);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            symbols = symbols.len(),
            segments = geometry.branches.len(),
            markers = geometry.nodes.len(),
            "interpreted turtle string"
        );
        geometry
    }
}

#[derive(Default)]
struct Walk {
    state: TurtleState,
    current_segment: Option<usize>,
    stack: Vec<(TurtleState, Option<usize>)>,
    branches: Vec<BranchSegment>,
    nodes: Vec<NodeMarker>,
}

impl Walk {
    /// Apply one symbol. Returns whether the symbol takes a parameter block.
    fn apply(&mut self, ch: char, param: Option<&str>, angle: f32) -> bool {
        match ch {
            'F' | 'G' => self.draw(number_or(param, 1.0)),
            'f' => {
                self.state.advance(number_or(param, 1.0));
            }
            '+' => self.state.rotate_local(LOCAL_UP, number_or(param, angle)),
            '-' => self.state.rotate_local(LOCAL_UP, -number_or(param, angle)),
            '^' => self.state.rotate_local(LOCAL_RIGHT, number_or(param, angle)),
            '&' => self.state.rotate_local(LOCAL_RIGHT, -number_or(param, angle)),
            '/' => self.state.rotate_local(LOCAL_FORWARD, number_or(param, angle)),
            '\\' => self.state.rotate_local(LOCAL_FORWARD, -number_or(param, angle)),
            '!' => self.state.radius = number_or(param, DEFAULT_SET_RADIUS),
            '@' => self.mark(param.unwrap_or("")),
            '[' => {
                self.stack.push((self.state, self.current_segment));
                self.state.depth += 1;
                return false;
            }
            ']' => {
                if let Some((state, segment)) = self.stack.pop() {
                    self.state = state;
                    self.current_segment = segment;
                }
                return false;
            }
            _ => return false,
        }
        true
    }

    fn draw(&mut self, length: f32) {
        let start = self.state.advance(length);
        let end_radius = self.state.radius * TAPER;
        let index = self.branches.len();
        self.branches.push(BranchSegment {
            start,
            end: self.state.position,
            start_radius: self.state.radius,
            end_radius,
            depth: self.state.depth,
            parent: self.current_segment,
        });
        self.current_segment = Some(index);
        self.state.radius = end_radius;
    }

    fn mark(&mut self, raw: &str) {
        let (kind, path) = parse_marker(raw);
        self.nodes.push(NodeMarker {
            position: self.state.position,
            path: String::from(path),
            kind,
            depth: self.state.depth,
            radius: self.state.radius,
            direction: self.state.forward(),
        });
    }
}

/// Split a leading `(…)` block off `rest`, returning its contents and what follows it.
fn split_param(rest: &str) -> (Option<&str>, &str) {
    if !rest.starts_with('(') {
        return (None, rest);
    }
    match rest.find(')') {
        Some(close) => (Some(&rest[1..close]), &rest[close + 1..]),
        None => (None, rest),
    }
}

fn number_or(param: Option<&str>, default: f32) -> f32 {
    param
        .and_then(|p| leading_number(p).parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// The longest prefix of `raw` (after leading whitespace) that reads as a
/// decimal number, so `"3.5abc"` gives `"3.5"` and `"2.5.1"` gives `"2.5"`.
fn leading_number(raw: &str) -> &str {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    &s[..end]
}

/// Parse `k:path` marker payloads. Without a `k:` prefix the payload is a file path.
fn parse_marker(raw: &str) -> (MarkerKind, &str) {
    let bytes = raw.as_bytes();
    if bytes.len() > 2 && bytes[1] == b':' {
        let kind = if bytes[0] == b'd' {
            MarkerKind::Directory
        } else {
            MarkerKind::File
        };
        (kind, &raw[2..])
    } else {
        (MarkerKind::File, raw)
    }
}
