// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path_geometry::{self, PathDirection};
use crate::scalar::{SCALAR_ROOT_2_OVER_2, SCALAR_TAN_PI_OVER_8};
use crate::{Arc, Circle, Ellipse, Line, Point, Polygon, Rect, RoundRect, Shape, Transform, Triangle};

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Cubic,
    Close,
}

// Cache dirty bits plus structural flags. All caches are invalidated
// together whenever the verb/point sequence changes.
const DIRTY_HINT: u8 = 1 << 0;
const DIRTY_BOUNDS: u8 = 1 << 1;
const DIRTY_POLYGON: u8 = 1 << 2;
const DIRTY_CONVEX: u8 = 1 << 3;
const DIRTY_ALL: u8 = DIRTY_HINT | DIRTY_BOUNDS | DIRTY_POLYGON | DIRTY_CONVEX;
const HAS_CURVE: u8 = 1 << 4;
const IS_CONVEX: u8 = 1 << 5;
const IS_CLOSED: u8 = 1 << 6;
const IS_SINGLE: u8 = 1 << 7;

/// A mutable Bezier path.
///
/// Stores verbs and points in lock-step: Move and Line consume one
/// point, Quad two, Cubic three, Close none (the contour start is
/// tracked separately). Shape hint, bounds, convexity and the
/// flattened polygon are cached and recomputed lazily on query.
#[derive(Clone, Default)]
pub struct Path {
    verbs: Vec<PathVerb>,
    points: Vec<Point>,
    head: Point,
    flags: u8,
    hint: Option<Shape>,
    bounds: Option<Rect>,
    polygon_points: Vec<Point>,
    polygon_counts: Vec<u16>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path::default()
    }

    /// Returns the number of verbs in the path.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if the path has no verbs.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Returns the internal list of verbs.
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// Returns the internal list of points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the last point if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Overwrites the last point.
    ///
    /// Starts a new contour when the path is empty.
    pub fn set_last_point(&mut self, p: Point) {
        match self.points.last_mut() {
            Some(last) => {
                *last = p;
                self.mark_dirty();
            }
            None => self.move_to(p),
        }
    }

    /// Clears the path, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.head = Point::zero();
        self.flags = DIRTY_ALL;
        self.hint = None;
        self.bounds = None;
        self.polygon_points.clear();
        self.polygon_counts.clear();
    }

    fn mark_dirty(&mut self) {
        self.flags |= DIRTY_ALL;
        self.flags &= !(IS_CONVEX | IS_CLOSED);
        self.hint = None;
    }

    // mark_dirty, but the contour structure flags stay untouched.
    fn mark_dirty_keep_closed(&mut self) {
        self.flags |= DIRTY_ALL;
        self.flags &= !IS_CONVEX;
        self.hint = None;
    }

    /// Adds the beginning of a new contour.
    ///
    /// Consecutive Move verbs collapse: a new move before any drawing
    /// verb replaces the previous move's target.
    pub fn move_to(&mut self, p: Point) {
        if self.verbs.last() == Some(&PathVerb::Move) {
            let last = self.points.len() - 1;
            self.points[last] = p;
        } else {
            let first = self.verbs.is_empty();
            self.verbs.push(PathVerb::Move);
            self.points.push(p);
            if first {
                self.flags |= IS_SINGLE;
            } else {
                self.flags &= !IS_SINGLE;
            }
        }

        self.head = p;
        self.mark_dirty();
    }

    fn inject_move_if_needed(&mut self) {
        match self.verbs.last() {
            None => self.move_to(Point::zero()),
            Some(PathVerb::Close) => {
                // A drawing verb right after a close implicitly starts
                // a new contour at the closed contour's end point.
                let head = self.head;
                self.move_to(head);
            }
            _ => {}
        }
    }

    /// Adds a line from the last point.
    pub fn line_to(&mut self, p: Point) {
        self.inject_move_if_needed();
        self.verbs.push(PathVerb::Line);
        self.points.push(p);
        self.mark_dirty();
    }

    /// Adds a quadratic curve from the last point.
    pub fn quad_to(&mut self, ctrl: Point, p: Point) {
        self.inject_move_if_needed();
        self.verbs.push(PathVerb::Quad);
        self.points.push(ctrl);
        self.points.push(p);
        self.mark_dirty();
        self.flags |= HAS_CURVE;
    }

    /// Adds a cubic curve from the last point.
    pub fn cubic_to(&mut self, ctrl0: Point, ctrl1: Point, p: Point) {
        self.inject_move_if_needed();
        self.verbs.push(PathVerb::Cubic);
        self.points.push(ctrl0);
        self.points.push(ctrl1);
        self.points.push(p);
        self.mark_dirty();
        self.flags |= HAS_CURVE;
    }

    /// Appends an elliptical arc, decomposed into quadratic curves of
    /// at most 45 degrees each.
    ///
    /// The curves continue from the current point; on an empty path the
    /// contour starts at the arc's start point.
    pub fn arc_to(&mut self, arc: &Arc) {
        let (start, quads) = path_geometry::arc_to_quads(arc);
        if self.is_empty() {
            self.move_to(start);
        }

        for (ctrl, p) in quads {
            self.quad_to(ctrl, p);
        }
    }

    /// Closes the current contour.
    ///
    /// Appends a line segment back to the contour's first point when the
    /// current point differs. Does nothing on an empty or already closed
    /// path.
    pub fn close(&mut self) {
        if self.verbs.is_empty() || self.verbs.last() == Some(&PathVerb::Close) {
            return;
        }

        let head = self.head;
        if self.points.last() != Some(&head) {
            self.verbs.push(PathVerb::Line);
            self.points.push(head);
        }

        self.verbs.push(PathVerb::Close);
        self.mark_dirty_keep_closed();
        self.flags |= IS_CLOSED;
    }

    /// Marks the path convexity, skipping the automatic analysis.
    ///
    /// The stroker knows the convexity of its output and uses this to
    /// avoid the analysis pass.
    pub fn set_convex(&mut self, convex: bool) {
        if convex {
            self.flags |= IS_CONVEX;
        } else {
            self.flags &= !IS_CONVEX;
        }
        self.flags &= !DIRTY_CONVEX;
    }

    /// Appends all contours of `other`.
    pub fn add_path(&mut self, other: &Path) {
        if other.is_empty() {
            return;
        }

        let was_empty = self.is_empty();
        self.verbs.extend_from_slice(&other.verbs);
        self.points.extend_from_slice(&other.points);
        self.head = other.head;
        self.mark_dirty();
        if other.flags & HAS_CURVE != 0 {
            self.flags |= HAS_CURVE;
        }
        if was_empty {
            self.flags |= other.flags & (IS_SINGLE | IS_CLOSED);
        } else {
            self.flags &= !IS_SINGLE;
        }
    }

    /// Appends, in reverse order, the last contour of `other`, ignoring
    /// that contour's last point.
    ///
    /// The stroker uses this to turn its inner contour into the return
    /// side of the outline.
    pub fn add_reverse_path(&mut self, other: &Path) {
        if other.is_empty() {
            return;
        }

        debug_assert_eq!(other.verbs[0], PathVerb::Move);

        let mut offset = other.points.len() - 1;
        for verb in other.verbs.iter().rev() {
            match verb {
                PathVerb::Move => {
                    // Only the last contour is reversed.
                    break;
                }
                PathVerb::Line => {
                    let p = other.points[offset - 1];
                    offset -= 1;
                    self.line_to(p);
                }
                PathVerb::Quad => {
                    let ctrl = other.points[offset - 1];
                    let p = other.points[offset - 2];
                    offset -= 2;
                    self.quad_to(ctrl, p);
                }
                PathVerb::Cubic => {
                    let ctrl1 = other.points[offset - 1];
                    let ctrl0 = other.points[offset - 2];
                    let p = other.points[offset - 3];
                    offset -= 3;
                    self.cubic_to(ctrl1, ctrl0, p);
                }
                PathVerb::Close => {}
            }
        }
    }

    /// Transforms all points; invalidates every cache.
    pub fn apply(&mut self, ts: &Transform) {
        if ts.is_identity() {
            return;
        }

        ts.map_points(&mut self.points);
        self.head = ts.map_point(self.head);
        self.flags |= DIRTY_ALL;
        self.hint = None;
    }

    fn seeds_hint(&self) -> bool {
        self.is_empty()
    }

    fn seed_hint(&mut self, hint: Shape) {
        self.hint = Some(hint);
        self.flags &= !DIRTY_HINT;
    }

    /// Adds a single point contour.
    pub fn add_point(&mut self, p: Point) {
        let seed = self.seeds_hint();
        self.move_to(p);
        if seed {
            self.seed_hint(Shape::Point(p));
        }
    }

    /// Adds a line contour.
    pub fn add_line(&mut self, line: &Line) {
        let seed = self.seeds_hint();
        self.move_to(line.p0);
        self.line_to(line.p1);
        if seed {
            self.seed_hint(Shape::Line(*line));
        }
    }

    /// Adds a closed triangle contour.
    pub fn add_triangle(&mut self, tri: &Triangle, dir: PathDirection) {
        let seed = self.seeds_hint();
        self.move_to(tri.p0);
        match dir {
            PathDirection::CW => {
                self.line_to(tri.p1);
                self.line_to(tri.p2);
            }
            PathDirection::CCW => {
                self.line_to(tri.p2);
                self.line_to(tri.p1);
            }
        }
        self.close();
        if seed {
            self.seed_hint(Shape::Triangle(*tri));
        }
    }

    /// Adds a closed rectangle contour.
    ///
    /// CW order is TopLeft -> TopRight -> BottomRight -> BottomLeft.
    pub fn add_rect(&mut self, rect: &Rect, dir: PathDirection) {
        let seed = self.seeds_hint();
        self.move_to(Point::from_xy(rect.left(), rect.top()));
        match dir {
            PathDirection::CW => {
                self.line_to(Point::from_xy(rect.right(), rect.top()));
                self.line_to(Point::from_xy(rect.right(), rect.bottom()));
                self.line_to(Point::from_xy(rect.left(), rect.bottom()));
            }
            PathDirection::CCW => {
                self.line_to(Point::from_xy(rect.left(), rect.bottom()));
                self.line_to(Point::from_xy(rect.right(), rect.bottom()));
                self.line_to(Point::from_xy(rect.right(), rect.top()));
            }
        }
        self.close();
        if seed {
            self.seed_hint(Shape::Rect(*rect));
        }
    }

    /// Adds a closed circle contour.
    pub fn add_circle(&mut self, circle: &Circle, dir: PathDirection) {
        let seed = self.seeds_hint();
        let ellipse = Ellipse::new(circle.center.x, circle.center.y, circle.radius, circle.radius);
        self.push_ellipse(&ellipse, dir);
        if seed {
            self.seed_hint(Shape::Circle(*circle));
        }
    }

    /// Adds a closed ellipse contour.
    pub fn add_ellipse(&mut self, ellipse: &Ellipse, dir: PathDirection) {
        let seed = self.seeds_hint();
        self.push_ellipse(ellipse, dir);
        if seed {
            self.seed_hint(Shape::Ellipse(*ellipse));
        }
    }

    /* The ellipse is built from eight quadratic segments of 45 degrees
     * each. Segment end points sit on the ellipse at 45 degree steps,
     * control points at the intersection of the neighboring tangents:
     *
     *      . . c . . .
     *    .      \      .
     *   .        p      .
     *   .          \    .
     *   .            \  .
     *   . . . . . . . . m   <- move-to (right-middle)
     *
     * with s = r * tan(pi/8) and m = r * sqrt(2)/2.
     */
    fn push_ellipse(&mut self, ellipse: &Ellipse, dir: PathDirection) {
        let cx = ellipse.center.x;
        let cy = ellipse.center.y;
        let rx = ellipse.rx;
        let ry = ellipse.ry;

        let sx = rx * SCALAR_TAN_PI_OVER_8;
        let sy = ry * SCALAR_TAN_PI_OVER_8;
        let mx = rx * SCALAR_ROOT_2_OVER_2;
        let my = ry * SCALAR_ROOT_2_OVER_2;

        let x1 = cx - rx;
        let y1 = cy - ry;
        let x2 = cx + rx;
        let y2 = cy + ry;

        self.move_to(Point::from_xy(x2, cy));
        match dir {
            PathDirection::CW => {
                // Rightwards through bottom, left, top and back.
                self.quad_to(Point::from_xy(x2, cy + sy), Point::from_xy(cx + mx, cy + my));
                self.quad_to(Point::from_xy(cx + sx, y2), Point::from_xy(cx, y2));
                self.quad_to(Point::from_xy(cx - sx, y2), Point::from_xy(cx - mx, cy + my));
                self.quad_to(Point::from_xy(x1, cy + sy), Point::from_xy(x1, cy));
                self.quad_to(Point::from_xy(x1, cy - sy), Point::from_xy(cx - mx, cy - my));
                self.quad_to(Point::from_xy(cx - sx, y1), Point::from_xy(cx, y1));
                self.quad_to(Point::from_xy(cx + sx, y1), Point::from_xy(cx + mx, cy - my));
                self.quad_to(Point::from_xy(x2, cy - sy), Point::from_xy(x2, cy));
            }
            PathDirection::CCW => {
                self.quad_to(Point::from_xy(x2, cy - sy), Point::from_xy(cx + mx, cy - my));
                self.quad_to(Point::from_xy(cx + sx, y1), Point::from_xy(cx, y1));
                self.quad_to(Point::from_xy(cx - sx, y1), Point::from_xy(cx - mx, cy - my));
                self.quad_to(Point::from_xy(x1, cy - sy), Point::from_xy(x1, cy));
                self.quad_to(Point::from_xy(x1, cy + sy), Point::from_xy(cx - mx, cy + my));
                self.quad_to(Point::from_xy(cx - sx, y2), Point::from_xy(cx, y2));
                self.quad_to(Point::from_xy(cx + sx, y2), Point::from_xy(cx + mx, cy + my));
                self.quad_to(Point::from_xy(x2, cy + sy), Point::from_xy(x2, cy));
            }
        }
        self.close();
    }

    /// Adds a closed round rectangle contour.
    ///
    /// Each corner is built from two 45 degree quadratic segments,
    /// like the ellipse.
    pub fn add_round_rect(&mut self, rect: &RoundRect, dir: PathDirection) {
        let seed = self.seeds_hint();

        let xl = rect.rect.left();
        let yt = rect.rect.top();
        let xr = rect.rect.right();
        let yb = rect.rect.bottom();

        // Corner radii: left-top, right-top, right-bottom, left-bottom.
        let (rx1, ry1) = (rect.radii[0].x, rect.radii[0].y);
        let (rx2, ry2) = (rect.radii[1].x, rect.radii[1].y);
        let (rx3, ry3) = (rect.radii[2].x, rect.radii[2].y);
        let (rx4, ry4) = (rect.radii[3].x, rect.radii[3].y);

        // Corner circle centers.
        let (cx1, cy1) = (xl + rx1, yt + ry1);
        let (cx2, cy2) = (xr - rx2, yt + ry2);
        let (cx3, cy3) = (xr - rx3, yb - ry3);
        let (cx4, cy4) = (xl + rx4, yb - ry4);

        let (sx1, sy1) = (rx1 * SCALAR_TAN_PI_OVER_8, ry1 * SCALAR_TAN_PI_OVER_8);
        let (sx2, sy2) = (rx2 * SCALAR_TAN_PI_OVER_8, ry2 * SCALAR_TAN_PI_OVER_8);
        let (sx3, sy3) = (rx3 * SCALAR_TAN_PI_OVER_8, ry3 * SCALAR_TAN_PI_OVER_8);
        let (sx4, sy4) = (rx4 * SCALAR_TAN_PI_OVER_8, ry4 * SCALAR_TAN_PI_OVER_8);

        let (mx1, my1) = (rx1 * SCALAR_ROOT_2_OVER_2, ry1 * SCALAR_ROOT_2_OVER_2);
        let (mx2, my2) = (rx2 * SCALAR_ROOT_2_OVER_2, ry2 * SCALAR_ROOT_2_OVER_2);
        let (mx3, my3) = (rx3 * SCALAR_ROOT_2_OVER_2, ry3 * SCALAR_ROOT_2_OVER_2);
        let (mx4, my4) = (rx4 * SCALAR_ROOT_2_OVER_2, ry4 * SCALAR_ROOT_2_OVER_2);

        self.move_to(Point::from_xy(xl, cy1));
        match dir {
            PathDirection::CW => {
                // left-top corner
                self.quad_to(Point::from_xy(xl, cy1 - sy1), Point::from_xy(cx1 - mx1, cy1 - my1));
                self.quad_to(Point::from_xy(cx1 - sx1, yt), Point::from_xy(cx1, yt));
                self.line_to(Point::from_xy(cx2, yt));

                // right-top corner
                self.quad_to(Point::from_xy(cx2 + sx2, yt), Point::from_xy(cx2 + mx2, cy2 - my2));
                self.quad_to(Point::from_xy(xr, cy2 - sy2), Point::from_xy(xr, cy2));
                self.line_to(Point::from_xy(xr, cy3));

                // right-bottom corner
                self.quad_to(Point::from_xy(xr, cy3 + sy3), Point::from_xy(cx3 + mx3, cy3 + my3));
                self.quad_to(Point::from_xy(cx3 + sx3, yb), Point::from_xy(cx3, yb));
                self.line_to(Point::from_xy(cx4, yb));

                // left-bottom corner
                self.quad_to(Point::from_xy(cx4 - sx4, yb), Point::from_xy(cx4 - mx4, cy4 + my4));
                self.quad_to(Point::from_xy(xl, cy4 + sy4), Point::from_xy(xl, cy4));
                self.line_to(Point::from_xy(xl, cy1));
            }
            PathDirection::CCW => {
                // left-bottom corner
                self.line_to(Point::from_xy(xl, cy4));
                self.quad_to(Point::from_xy(xl, cy4 + sy4), Point::from_xy(cx4 - mx4, cy4 + my4));
                self.quad_to(Point::from_xy(cx4 - sx4, yb), Point::from_xy(cx4, yb));

                // right-bottom corner
                self.line_to(Point::from_xy(cx3, yb));
                self.quad_to(Point::from_xy(cx3 + sx3, yb), Point::from_xy(cx3 + mx3, cy3 + my3));
                self.quad_to(Point::from_xy(xr, cy3 + sy3), Point::from_xy(xr, cy3));

                // right-top corner
                self.line_to(Point::from_xy(xr, cy2));
                self.quad_to(Point::from_xy(xr, cy2 - sy2), Point::from_xy(cx2 + mx2, cy2 - my2));
                self.quad_to(Point::from_xy(cx2 + sx2, yt), Point::from_xy(cx2, yt));

                // left-top corner
                self.line_to(Point::from_xy(cx1, yt));
                self.quad_to(Point::from_xy(cx1 - sx1, yt), Point::from_xy(cx1 - mx1, cy1 - my1));
                self.quad_to(Point::from_xy(xl, cy1 - sy1), Point::from_xy(xl, cy1));
            }
        }
        self.close();

        if seed {
            self.seed_hint(Shape::RoundRect(*rect));
        }
    }

    /// Adds an open elliptical arc contour.
    ///
    /// Sweeps of 360 degrees or more degrade to a closed ellipse in the
    /// sweep's direction.
    pub fn add_arc(&mut self, arc: &Arc) {
        if arc.sweep_angle >= 360.0 || arc.sweep_angle <= -360.0 {
            let dir = if arc.sweep_angle > 0.0 {
                PathDirection::CW
            } else {
                PathDirection::CCW
            };
            let ellipse = Ellipse::new(arc.center.x, arc.center.y, arc.rx, arc.ry);
            self.add_ellipse(&ellipse, dir);
            return;
        }

        let seed = self.seeds_hint();
        let (start, quads) = path_geometry::arc_to_quads(arc);
        self.move_to(start);
        for (ctrl, p) in quads {
            self.quad_to(ctrl, p);
        }
        if seed {
            self.seed_hint(Shape::Arc(*arc));
        }
    }

    /// Returns the path's shape hint.
    ///
    /// The value is cached.
    pub fn hint(&mut self) -> Option<Shape> {
        if self.flags & DIRTY_HINT != 0 {
            self.hint = self.make_hint();
            self.flags &= !DIRTY_HINT;
        }
        self.hint
    }

    fn make_hint(&self) -> Option<Shape> {
        if self.flags & HAS_CURVE != 0 {
            return None;
        }

        let verbs = &self.verbs;
        let points = &self.points;

        // Rect: five points closing on the start, edges strictly
        // alternating horizontal/vertical. Contours that are axis
        // aligned only up to rounding are intentionally not recognized.
        if points.len() == 5
            && points[0] == points[4]
            && verbs.len() >= 5
            && verbs[0] == PathVerb::Move
            && verbs[1..5].iter().all(|v| *v == PathVerb::Line)
        {
            let horizontal_first = points[0].x != points[1].x
                && points[0].y == points[1].y
                && points[1].x == points[2].x
                && points[1].y != points[2].y
                && points[2].x != points[3].x
                && points[2].y == points[3].y
                && points[3].x == points[4].x
                && points[3].y != points[4].y;
            let vertical_first = points[0].x == points[1].x
                && points[0].y != points[1].y
                && points[1].x != points[2].x
                && points[1].y == points[2].y
                && points[2].x == points[3].x
                && points[2].y != points[3].y
                && points[3].x != points[4].x
                && points[3].y == points[4].y;
            if horizontal_first || vertical_first {
                return Rect::from_points(&points[0..4]).map(Shape::Rect);
            }
        }

        // Triangle: four points closing on the start, all three corners
        // pairwise distinct in both coordinates.
        if points.len() == 4
            && points[0] == points[3]
            && verbs.len() >= 4
            && verbs[0] == PathVerb::Move
            && verbs[1..4].iter().all(|v| *v == PathVerb::Line)
            && points[0].x != points[1].x
            && points[0].y != points[1].y
            && points[0].x != points[2].x
            && points[0].y != points[2].y
            && points[1].x != points[2].x
            && points[1].y != points[2].y
        {
            return Some(Shape::Triangle(Triangle {
                p0: points[0],
                p1: points[1],
                p2: points[2],
            }));
        }

        // Line: both coordinates must differ.
        if points.len() == 2
            && verbs.len() == 2
            && verbs[0] == PathVerb::Move
            && verbs[1] == PathVerb::Line
            && points[0].x != points[1].x
            && points[0].y != points[1].y
        {
            return Some(Shape::Line(Line::new(points[0], points[1])));
        }

        if points.len() == 1 && verbs[0] == PathVerb::Move {
            return Some(Shape::Point(points[0]));
        }

        None
    }

    /// Returns the path's bounding box.
    ///
    /// The value is cached. Recomputed from the hint when one is
    /// available, otherwise from the point list.
    pub fn bounds(&mut self) -> Option<Rect> {
        if self.flags & DIRTY_BOUNDS != 0 {
            self.bounds = match self.hint() {
                Some(Shape::Rect(r)) => Some(r),
                Some(Shape::RoundRect(rr)) => Some(rr.rect),
                Some(Shape::Circle(c)) => {
                    Ellipse::new(c.center.x, c.center.y, c.radius, c.radius).bounds()
                }
                Some(Shape::Ellipse(e)) => e.bounds(),
                _ => Rect::from_points(&self.points),
            };
            self.flags &= !DIRTY_BOUNDS;
        }
        self.bounds
    }

    /// Checks that every contour of the path is convex.
    ///
    /// The value is cached. Decided by a hint shortcut where possible,
    /// otherwise only a single closed contour is analyzed by checking
    /// that the cross product sign of successive edge vectors never
    /// changes.
    pub fn convex(&mut self) -> bool {
        if self.flags & DIRTY_CONVEX != 0 {
            self.flags &= !IS_CONVEX;

            let by_hint = matches!(
                self.hint(),
                Some(Shape::Rect(_))
                    | Some(Shape::RoundRect(_))
                    | Some(Shape::Circle(_))
                    | Some(Shape::Ellipse(_))
                    | Some(Shape::Triangle(_))
            );
            if by_hint {
                self.flags |= IS_CONVEX;
            } else if self.flags & IS_SINGLE != 0
                && self.flags & IS_CLOSED != 0
                && self.verbs.len() > 3
                && self.analyze_convex()
            {
                self.flags |= IS_CONVEX;
            }

            self.flags &= !DIRTY_CONVEX;
        }

        self.flags & IS_CONVEX != 0
    }

    fn analyze_convex(&self) -> bool {
        // On-curve and control points alike participate: a curve whose
        // control cage is convex is convex itself.
        let mut pts = &self.points[..];
        if pts.len() > 1 && pts.first() == pts.last() {
            pts = &pts[..pts.len() - 1];
        }
        if pts.len() < 3 {
            return true;
        }

        let mut prev_sign = 0i32;
        let n = pts.len();
        for i in 0..n {
            let p0 = pts[(i + n - 1) % n];
            let p1 = pts[i];
            let p2 = pts[(i + 1) % n];
            let cross = f64::from(p0.x - p1.x) * f64::from(p2.y - p1.y)
                - f64::from(p0.y - p1.y) * f64::from(p2.x - p1.x);
            let sign = if cross < 0.0 {
                -1
            } else if cross > 0.0 {
                1
            } else {
                continue;
            };

            if prev_sign != 0 && sign != prev_sign {
                return false;
            }
            prev_sign = sign;
        }

        true
    }

    /// Returns the flattened polygon view.
    ///
    /// The value is cached. When the path has no curve verbs the stored
    /// point array is reused directly; otherwise curves are subdivided
    /// into line segments.
    pub fn polygon(&mut self) -> Option<Polygon<'_>> {
        if self.is_empty() {
            return None;
        }

        let convex = self.convex();
        if self.flags & DIRTY_POLYGON != 0 {
            self.make_polygon();
            self.flags &= !DIRTY_POLYGON;
        }

        let points: &[Point] = if self.flags & HAS_CURVE != 0 {
            &self.polygon_points
        } else {
            &self.points
        };
        Polygon::new(points, &self.polygon_counts, convex)
    }

    fn make_polygon(&mut self) {
        let has_curve = self.flags & HAS_CURVE != 0;
        self.polygon_counts.clear();
        self.polygon_points.clear();

        let mut count: u16 = 0;
        let mut last = Point::zero();
        let mut i = 0;
        for verb in &self.verbs {
            match verb {
                PathVerb::Move => {
                    if count > 0 {
                        self.polygon_counts.push(count);
                    }
                    last = self.points[i];
                    i += 1;
                    if has_curve {
                        self.polygon_points.push(last);
                    }
                    count = 1;
                }
                PathVerb::Line => {
                    last = self.points[i];
                    i += 1;
                    if has_curve {
                        self.polygon_points.push(last);
                    }
                    count = count.saturating_add(1);
                }
                PathVerb::Quad => {
                    debug_assert!(has_curve);
                    let src = [last, self.points[i], self.points[i + 1]];
                    i += 2;
                    let points = &mut self.polygon_points;
                    path_geometry::flatten_quad(&src, &mut |p| {
                        points.push(p);
                        count = count.saturating_add(1);
                    });
                    last = src[2];
                }
                PathVerb::Cubic => {
                    debug_assert!(has_curve);
                    let src = [last, self.points[i], self.points[i + 1], self.points[i + 2]];
                    i += 3;
                    let points = &mut self.polygon_points;
                    path_geometry::flatten_cubic(&src, &mut |p| {
                        points.push(p);
                        count = count.saturating_add(1);
                    });
                    last = src[3];
                }
                PathVerb::Close => {
                    // The closing line segment was appended explicitly.
                }
            }
        }

        if count > 0 {
            self.polygon_counts.push(count);
        }
        self.polygon_counts.push(0);
    }

    /// Returns an iterator over the path's segments.
    pub fn segments(&self) -> PathSegmentsIter<'_> {
        PathSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            last_move_to: Point::zero(),
            last_point: Point::zero(),
        }
    }
}

impl core::fmt::Debug for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        let mut s = String::new();
        for segment in self.segments() {
            match segment {
                PathSegment::MoveTo(p) => s.write_fmt(format_args!("M {} {} ", p.x, p.y))?,
                PathSegment::LineTo(p) => s.write_fmt(format_args!("L {} {} ", p.x, p.y))?,
                PathSegment::QuadTo(p0, p1) => {
                    s.write_fmt(format_args!("Q {} {} {} {} ", p0.x, p0.y, p1.x, p1.y))?
                }
                PathSegment::CubicTo(p0, p1, p2) => s.write_fmt(format_args!(
                    "C {} {} {} {} {} {} ",
                    p0.x, p0.y, p1.x, p1.y, p2.x, p2.y
                ))?,
                PathSegment::Close => s.write_fmt(format_args!("Z "))?,
            }
        }

        s.pop(); // trailing space

        f.debug_struct("Path").field("segments", &s).finish()
    }
}

/// A path segment.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// A path segments iterator.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    last_move_to: Point,
    last_point: Point,
}

impl<'a> PathSegmentsIter<'a> {
    /// Returns the start point of the current contour.
    pub fn last_move_to(&self) -> Point {
        self.last_move_to
    }

    /// Returns the end point of the last returned segment.
    pub fn last_point(&self) -> Point {
        self.last_point
    }
}

impl<'a> Iterator for PathSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.verb_index >= self.path.verbs.len() {
            return None;
        }

        let verb = self.path.verbs[self.verb_index];
        self.verb_index += 1;

        match verb {
            PathVerb::Move => {
                self.points_index += 1;
                self.last_move_to = self.path.points[self.points_index - 1];
                self.last_point = self.last_move_to;
                Some(PathSegment::MoveTo(self.last_move_to))
            }
            PathVerb::Line => {
                self.points_index += 1;
                self.last_point = self.path.points[self.points_index - 1];
                Some(PathSegment::LineTo(self.last_point))
            }
            PathVerb::Quad => {
                self.points_index += 2;
                self.last_point = self.path.points[self.points_index - 1];
                Some(PathSegment::QuadTo(
                    self.path.points[self.points_index - 2],
                    self.last_point,
                ))
            }
            PathVerb::Cubic => {
                self.points_index += 3;
                self.last_point = self.path.points[self.points_index - 1];
                Some(PathSegment::CubicTo(
                    self.path.points[self.points_index - 3],
                    self.path.points[self.points_index - 2],
                    self.last_point,
                ))
            }
            PathVerb::Close => {
                self.last_point = self.last_move_to;
                Some(PathSegment::Close)
            }
        }
    }
}
