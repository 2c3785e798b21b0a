// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Low-level Bezier geometry: midpoint subdivision, flattening and
//! arc to quad decomposition.

use arrayvec::ArrayVec;

use crate::scalar::Scalar;
use crate::{Arc, Point, Transform};

/// The maximum recursive midpoint subdivision depth used when flattening
/// a curve into line segments. Bounds a single curve to `2^6` segments.
pub const MAX_FLATTEN_DEPTH: u8 = 6;

// A quarter of a pixel. Small enough for curves to look smooth at 1x scale.
const FLATTEN_TOLERANCE: f32 = 0.25;

/// A contour direction for adding closed shapes.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathDirection {
    /// Clockwise direction (in y-down coordinates).
    CW,
    /// Counter-clockwise direction.
    CCW,
}

/// Chops a quadratic curve at t=0.5 into two quadratics.
pub fn chop_quad_at_half(src: &[Point; 3]) -> [Point; 5] {
    let p01 = src[0].ave(src[1]);
    let p12 = src[1].ave(src[2]);
    let mid = p01.ave(p12);
    [src[0], p01, mid, p12, src[2]]
}

/// Chops a cubic curve at t=0.5 into two cubics.
pub fn chop_cubic_at_half(src: &[Point; 4]) -> [Point; 7] {
    let p01 = src[0].ave(src[1]);
    let p12 = src[1].ave(src[2]);
    let p23 = src[2].ave(src[3]);
    let p012 = p01.ave(p12);
    let p123 = p12.ave(p23);
    let mid = p012.ave(p123);
    [src[0], p01, p012, mid, p123, p23, src[3]]
}

impl Point {
    fn ave(self, other: Point) -> Point {
        Point::from_xy(self.x.ave(other.x), self.y.ave(other.y))
    }
}

fn quad_is_flat(points: &[Point; 3]) -> bool {
    // Distance from the control point to the chord midpoint, halved,
    // bounds the curve's deviation from the chord.
    let mid = points[0].ave(points[2]);
    let d = points[1] - mid;
    d.x.abs().max(d.y.abs()) * 0.5 <= FLATTEN_TOLERANCE
}

fn cubic_is_flat(points: &[Point; 4]) -> bool {
    let d1 = Point::from_xy(
        points[0].x - 2.0 * points[1].x + points[2].x,
        points[0].y - 2.0 * points[1].y + points[2].y,
    );
    let d2 = Point::from_xy(
        points[1].x - 2.0 * points[2].x + points[3].x,
        points[1].y - 2.0 * points[2].y + points[3].y,
    );
    let dx = d1.x.abs().max(d2.x.abs());
    let dy = d1.y.abs().max(d2.y.abs());
    dx.max(dy) * 0.25 <= FLATTEN_TOLERANCE
}

/// Flattens a quadratic curve into line segment end points.
///
/// The start point is not reported.
pub fn flatten_quad(points: &[Point; 3], sink: &mut dyn FnMut(Point)) {
    flatten_quad_impl(points, MAX_FLATTEN_DEPTH, sink);
}

fn flatten_quad_impl(points: &[Point; 3], depth: u8, sink: &mut dyn FnMut(Point)) {
    if depth == 0 || quad_is_flat(points) {
        sink(points[2]);
        return;
    }

    let chopped = chop_quad_at_half(points);
    flatten_quad_impl(arrayref::array_ref![chopped, 0, 3], depth - 1, sink);
    flatten_quad_impl(arrayref::array_ref![chopped, 2, 3], depth - 1, sink);
}

/// Flattens a cubic curve into line segment end points.
///
/// The start point is not reported.
pub fn flatten_cubic(points: &[Point; 4], sink: &mut dyn FnMut(Point)) {
    flatten_cubic_impl(points, MAX_FLATTEN_DEPTH, sink);
}

fn flatten_cubic_impl(points: &[Point; 4], depth: u8, sink: &mut dyn FnMut(Point)) {
    if depth == 0 || cubic_is_flat(points) {
        sink(points[3]);
        return;
    }

    let chopped = chop_cubic_at_half(points);
    flatten_cubic_impl(arrayref::array_ref![chopped, 0, 4], depth - 1, sink);
    flatten_cubic_impl(arrayref::array_ref![chopped, 3, 4], depth - 1, sink);
}

/// A quadratic segment of a decomposed arc: control point and end point.
pub type ArcQuad = (Point, Point);

/// The largest number of quads an arc decomposition can produce:
/// a full 360 degree sweep in 45 degree steps.
pub const MAX_ARC_QUADS: usize = 8;

/// Decomposes an elliptical arc into quadratic segments of at most
/// 45 degrees each.
///
/// Returns the arc's start point and the quad list. Sweeps are clamped
/// to a full turn.
pub fn arc_to_quads(arc: &Arc) -> (Point, ArrayVec<ArcQuad, MAX_ARC_QUADS>) {
    let sweep = arc.sweep_angle.bound(-360.0, 360.0).to_radians();
    let start = arc.start_angle.to_radians();

    let on_ellipse = |angle: f32, scale: f32| {
        Point::from_xy(
            arc.center.x + arc.rx * scale * angle.cos(),
            arc.center.y + arc.ry * scale * angle.sin(),
        )
    };

    let start_pt = on_ellipse(start, 1.0);
    let mut quads = ArrayVec::new();
    if sweep == 0.0 {
        return (start_pt, quads);
    }

    let segments = (sweep.abs() / core::f32::consts::FRAC_PI_4).ceil().max(1.0) as usize;
    let segments = segments.min(MAX_ARC_QUADS);
    let step = sweep / segments as f32;
    // The control point of a circular quad segment lies on the angle
    // bisector at distance r / cos(step / 2) from the center.
    let ctrl_scale = (step.half()).cos().invert();

    let mut angle = start;
    for _ in 0..segments {
        let next = angle + step;
        let ctrl = on_ellipse(angle + step.half(), ctrl_scale);
        quads.push((ctrl, on_ellipse(next, 1.0)));
        angle = next;
    }

    (start_pt, quads)
}

/// Decomposes the unit arc between two unit vectors into quadratic
/// segments mapped through `ts`.
///
/// Used by the round joiner: the vectors are stroke normals and `ts`
/// scales by the stroke radius and translates to the join pivot.
/// The sweep always takes the short way around (less than 180 degrees).
pub fn unit_arc_to_quads(
    start: Point,
    stop: Point,
    dir: PathDirection,
    ts: &Transform,
    quads: &mut ArrayVec<ArcQuad, MAX_ARC_QUADS>,
) {
    let a0 = start.y.atan2(start.x);
    let a1 = stop.y.atan2(stop.x);

    const TWO_PI: f32 = 2.0 * core::f32::consts::PI;
    let mut sweep = match dir {
        PathDirection::CW => a1 - a0,
        PathDirection::CCW => a0 - a1,
    };
    while sweep < 0.0 {
        sweep += TWO_PI;
    }
    while sweep >= TWO_PI {
        sweep -= TWO_PI;
    }
    if sweep == 0.0 {
        return;
    }

    let segments = (sweep / core::f32::consts::FRAC_PI_4).ceil().max(1.0) as usize;
    let segments = segments.min(MAX_ARC_QUADS);
    let mut step = sweep / segments as f32;
    if dir == PathDirection::CCW {
        step = -step;
    }
    let ctrl_scale = (step.half()).cos().invert();

    let mut angle = a0;
    for _ in 0..segments {
        let next = angle + step;
        let mid = angle + step.half();
        let ctrl = Point::from_xy(mid.cos() * ctrl_scale, mid.sin() * ctrl_scale);
        let end = Point::from_xy(next.cos(), next.sin());
        quads.push((ts.map_point(ctrl), ts.map_point(end)));
        angle = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chop_quad() {
        let src = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(2.0, 4.0),
            Point::from_xy(4.0, 0.0),
        ];
        let dst = chop_quad_at_half(&src);
        assert_eq!(dst[0], src[0]);
        assert_eq!(dst[4], src[2]);
        // The curve midpoint of this symmetric quad is (2, 2).
        assert_eq!(dst[2], Point::from_xy(2.0, 2.0));
    }

    #[test]
    fn chop_cubic() {
        let src = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(0.0, 4.0),
            Point::from_xy(4.0, 4.0),
            Point::from_xy(4.0, 0.0),
        ];
        let dst = chop_cubic_at_half(&src);
        assert_eq!(dst[0], src[0]);
        assert_eq!(dst[6], src[3]);
        assert_eq!(dst[3], Point::from_xy(2.0, 3.0));
    }

    #[test]
    fn flatten_line_like_quad() {
        let src = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(5.0, 0.0),
            Point::from_xy(10.0, 0.0),
        ];
        let mut points = Vec::new();
        flatten_quad(&src, &mut |p| points.push(p));
        assert_eq!(points, vec![Point::from_xy(10.0, 0.0)]);
    }

    #[test]
    fn flatten_ends_on_curve_end() {
        let src = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(50.0, 100.0),
            Point::from_xy(100.0, 0.0),
        ];
        let mut points = Vec::new();
        flatten_quad(&src, &mut |p| points.push(p));
        assert!(points.len() > 1);
        assert_eq!(*points.last().unwrap(), Point::from_xy(100.0, 0.0));
        // Points advance monotonically in x for this curve.
        for w in points.windows(2) {
            assert!(w[0].x < w[1].x);
        }
    }

    #[test]
    fn quarter_arc() {
        let arc = Arc {
            center: Point::from_xy(0.0, 0.0),
            rx: 10.0,
            ry: 10.0,
            start_angle: 0.0,
            sweep_angle: 90.0,
        };
        let (start, quads) = arc_to_quads(&arc);
        assert_eq!(start, Point::from_xy(10.0, 0.0));
        assert_eq!(quads.len(), 2);
        let end = quads.last().unwrap().1;
        assert!((end.x - 0.0).abs() < 1e-4);
        assert!((end.y - 10.0).abs() < 1e-4);
    }
}
