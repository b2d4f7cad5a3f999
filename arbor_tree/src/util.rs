// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, Point, Rect};

/// Closed containment: points on any edge of `rect` are inside.
///
/// `Rect::contains` is half-open on the far edges, which would make the right
/// and bottom borders of a node box unclickable.
pub(crate) fn rect_contains_closed(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}

/// Distance from `pt` to the infinite line through `line`.
///
/// Computed as twice the area of the triangle (`pt`, `p0`, `p1`), taken from
/// Heron's formula over the three side lengths, divided by the base length.
/// The result is not clamped to the segment: a point far past either endpoint
/// but close to the extended line reports a small distance.
///
/// A zero-length line yields NaN, which compares false against any tolerance.
pub(crate) fn distance_to_line(pt: Point, line: Line) -> f64 {
    let a = pt.distance(line.p0);
    let b = pt.distance(line.p1);
    let c = line.p0.distance(line.p1);
    let s = (a + b + c) / 2.0;
    let area = (s * (s - a) * (s - b) * (s - c)).sqrt();
    2.0 * area / c
}
