// Copyright 2008 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::floating_point::NonZeroPositiveF32;
use crate::path_geometry::{self, PathDirection};
use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO, SCALAR_ROOT_2_OVER_2, SCALAR_CUBIC_ARC_FACTOR};
use crate::{is_clockwise, Circle, Ellipse, Path, PathSegment, Point, Polygon, Rect, RoundRect, Shape, Transform};

const SQRT_2: f32 = 1.414213562;

// The subdivision budget for offsetting a single curve segment. A curve
// that is still too sharp after this many halvings gets patched with a
// full circle at the offending control point instead.
const QUAD_DIVIDE_LIMIT: u8 = 5;
const CUBIC_DIVIDE_LIMIT: u8 = 5;

/// Stroke properties.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness.
    ///
    /// Must be > 0. Zero width strokes are rejected by the stroker.
    ///
    /// Default: 1.0
    pub width: f32,

    /// The limit at which a sharp corner is drawn beveled.
    ///
    /// Default: 4.0
    pub miter_limit: f32,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 4.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds a semi-circle.
    Round,
    /// Adds a half square.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to the miter limit.
    Miter,
    /// Adds a circular arc.
    Round,
    /// Connects outside edges with a single line.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

struct SwappablePaths<'a> {
    inner: &'a mut Path,
    outer: &'a mut Path,
}

impl<'a> SwappablePaths<'a> {
    // Counter-clockwise turns swap the roles of the inner and outer
    // contours, so joiners swap the references, not the paths.
    fn swap(&mut self) {
        core::mem::swap(&mut self.inner, &mut self.outer);
    }
}

type CapProc = fn(path: &mut Path, pivot: Point, end: Point, normal: Point, is_line: bool);

type JoinProc = fn(
    pivot: Point,
    radius: f32,
    before_unit_normal: Point,
    after_unit_normal: Point,
    inv_miter_limit: f32,
    prev_is_line: bool,
    curr_is_line: bool,
    paths: SwappablePaths,
);

/// A path stroker.
///
/// Converts a path and stroke properties into a new closed path whose
/// interior, filled with the winding rule, reproduces the stroked
/// appearance. Temporary allocations are kept between calls, so reusing
/// one stroker across draws avoids re-allocating.
#[allow(missing_debug_implementations)]
#[derive(Clone, Default)]
pub struct PathStroker {
    radius: f32,
    miter_limit: f32,
    inv_miter_limit: f32,
    line_cap: LineCap,
    line_join: LineJoin,

    // outer grows into the result, inner is a per-contour temp that is
    // appended in reverse, other collects whole degenerate contours.
    outer: Path,
    inner: Path,
    other: Path,

    first_pt: Point,
    prev_pt: Point,
    first_outer_pt: Point,
    first_normal: Point,
    prev_normal: Point,
    first_unit_normal: Point,
    prev_unit_normal: Point,

    segment_count: i32,
    prev_is_line: bool,
    first_is_line: bool,
}

impl PathStroker {
    /// Creates a new stroker.
    pub fn new() -> Self {
        PathStroker {
            segment_count: -1,
            ..PathStroker::default()
        }
    }

    fn prepare(&mut self, stroke: &Stroke) -> Option<()> {
        let width = NonZeroPositiveF32::new(stroke.width)?;

        self.radius = width.get().half();
        self.miter_limit = stroke.miter_limit;
        self.line_cap = stroke.line_cap;
        self.line_join = stroke.line_join;

        self.inv_miter_limit = 0.0;
        if self.line_join == LineJoin::Miter {
            if stroke.miter_limit <= 1.0 {
                self.line_join = LineJoin::Bevel;
            } else {
                self.inv_miter_limit = stroke.miter_limit.invert();
            }
        }

        self.outer.clear();
        self.inner.clear();
        self.other.clear();

        self.first_pt = Point::zero();
        self.prev_pt = Point::zero();
        self.first_outer_pt = Point::zero();
        self.first_normal = Point::zero();
        self.prev_normal = Point::zero();
        self.first_unit_normal = Point::zero();
        self.prev_unit_normal = Point::zero();
        self.segment_count = -1;
        self.prev_is_line = false;
        self.first_is_line = false;

        Some(())
    }

    /// Strokes a path.
    ///
    /// Paths recognized as a rect, circle, ellipse, line or point hint
    /// bypass the segment pipeline and emit optimized outlines directly.
    ///
    /// Returns `None` for zero/negative widths and for paths that stroke
    /// to nothing (e.g. a degenerate curve collapsing into a point).
    pub fn stroke_path(&mut self, path: &mut Path, stroke: &Stroke) -> Option<Path> {
        self.prepare(stroke)?;

        let mut convex = false;
        match path.hint() {
            Some(Shape::Rect(rect)) => self.add_rect(&rect),
            Some(Shape::Circle(circle)) => self.add_circle(&circle),
            Some(Shape::Ellipse(ellipse)) => self.add_ellipse(&ellipse),
            Some(Shape::Line(line)) => {
                self.add_lines(&[line.p0, line.p1]);
                convex = true;
            }
            Some(Shape::Point(p)) => {
                self.add_points(&[p]);
                convex = true;
            }
            _ => self.add_path(path),
        }

        self.finish(convex)
    }

    /// Strokes a list of independent line segments, two points each.
    pub fn stroke_lines(&mut self, points: &[Point], stroke: &Stroke) -> Option<Path> {
        self.prepare(stroke)?;
        self.add_lines(points);
        self.finish(points.len() == 2)
    }

    /// Strokes a list of points.
    ///
    /// Round caps emit circles, other caps emit squares of the stroke
    /// width.
    pub fn stroke_points(&mut self, points: &[Point], stroke: &Stroke) -> Option<Path> {
        self.prepare(stroke)?;
        self.add_points(points);
        self.finish(points.len() == 1)
    }

    /// Strokes a run-length polygon.
    pub fn stroke_polygon(&mut self, polygon: &Polygon, stroke: &Stroke) -> Option<Path> {
        self.prepare(stroke)?;
        self.add_polygon(polygon);
        self.finish(false)
    }

    fn add_path(&mut self, path: &Path) {
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => self.move_to(p),
                PathSegment::LineTo(p) => self.line_to(p),
                PathSegment::QuadTo(ctrl, p) => self.quad_to(ctrl, p),
                PathSegment::CubicTo(ctrl0, ctrl1, p) => self.cubic_to(ctrl0, ctrl1, p),
                PathSegment::Close => self.close(),
            }
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        for contour in polygon.contours() {
            let mut first = None;
            let mut last = None;
            for (i, p) in contour.iter().enumerate() {
                if i == 0 {
                    self.move_to(*p);
                    first = Some(*p);
                } else {
                    self.line_to(*p);
                }
                last = Some(*p);
            }

            if first.is_some() && first == last && contour.len() > 1 {
                self.close();
            }
        }
    }

    fn add_lines(&mut self, points: &[Point]) {
        for pair in points.chunks_exact(2) {
            self.move_to(pair[0]);
            self.line_to(pair[1]);
        }
    }

    fn add_points(&mut self, points: &[Point]) {
        let radius = self.radius;
        debug_assert!(radius > 0.0);

        match self.line_cap {
            LineCap::Round => {
                for p in points {
                    self.other
                        .add_circle(&Circle::new(p.x, p.y, radius), PathDirection::CW);
                }
            }
            LineCap::Butt | LineCap::Square => {
                let width = radius * 2.0;
                for p in points {
                    if let Some(rect) = Rect::from_xywh(p.x - radius, p.y - radius, width, width) {
                        self.other.add_rect(&rect, PathDirection::CW);
                    }
                }
            }
        }
    }

    /* A stroked rect is two concentric rings. The corner treatment of
     * the outer ring depends on the join:
     *
     * ------------------------------ miter join
     *                    .        . |
     *                      .    L   |
     *            bevel join  .      |
     *                        | .    |
     *                        |   .  |
     * -----------------|     |      |
     *                  |        R   |
     *                  | W = R * 2  |
     */
    fn add_rect(&mut self, rect: &Rect) {
        let radius = self.radius;
        debug_assert!(radius > 0.0);

        let width = radius * 2.0;
        if rect.width() > width && rect.height() > width {
            if let Some(inner) = rect.inset(radius, radius) {
                self.other.add_rect(&inner, PathDirection::CW);
            }
        }

        let outer = match rect.outset(radius, radius) {
            Some(outer) => outer,
            None => return,
        };

        let mut join = self.line_join;
        if join == LineJoin::Miter && self.miter_limit < SQRT_2 {
            join = LineJoin::Bevel;
        }

        match join {
            LineJoin::Miter => {
                self.other.add_rect(&outer, PathDirection::CCW);
            }
            LineJoin::Bevel => {
                // An octagon with the corners cut at the radius.
                let x = outer.left();
                let y = outer.top();
                let w = outer.width();
                let h = outer.height();
                let path = &mut self.other;
                path.move_to(Point::from_xy(x, y + radius));
                path.line_to(Point::from_xy(x, y + h - radius));
                path.line_to(Point::from_xy(x + radius, y + h));
                path.line_to(Point::from_xy(x + w - radius, y + h));
                path.line_to(Point::from_xy(x + w, y + h - radius));
                path.line_to(Point::from_xy(x + w, y + radius));
                path.line_to(Point::from_xy(x + w - radius, y));
                path.line_to(Point::from_xy(x + radius, y));
                path.close();
            }
            LineJoin::Round => {
                self.other.add_round_rect(
                    &RoundRect::from_rect_xy(outer, radius, radius),
                    PathDirection::CCW,
                );
            }
        }
    }

    fn add_circle(&mut self, circle: &Circle) {
        self.add_ellipse(&Ellipse::new(
            circle.center.x,
            circle.center.y,
            circle.radius,
            circle.radius,
        ));
    }

    fn add_ellipse(&mut self, ellipse: &Ellipse) {
        let radius = self.radius;
        debug_assert!(radius > 0.0);

        if ellipse.rx > radius && ellipse.ry > radius {
            let inner = Ellipse::new(
                ellipse.center.x,
                ellipse.center.y,
                ellipse.rx - radius,
                ellipse.ry - radius,
            );
            self.other.add_ellipse(&inner, PathDirection::CW);
        }

        let outer = Ellipse::new(
            ellipse.center.x,
            ellipse.center.y,
            ellipse.rx + radius,
            ellipse.ry + radius,
        );
        self.other.add_ellipse(&outer, PathDirection::CCW);
    }

    fn move_to(&mut self, p: Point) {
        if self.segment_count > 0 {
            self.finish_contour(false);
        }

        self.segment_count = 0;
        self.first_pt = p;
        self.prev_pt = p;
    }

    fn line_to(&mut self, p: Point) {
        if points_near_eq(self.prev_pt, p) {
            return;
        }

        let mut normal = Point::zero();
        let mut unit_normal = Point::zero();
        if !self.enter_to(p, true, &mut normal, &mut unit_normal) {
            return;
        }

        self.make_line(p, normal);
        self.leave_to(p, normal, unit_normal);
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        // A collapsed control leg degrades the quad to its chord.
        let is_point_01 = points_near_eq(self.prev_pt, ctrl);
        let is_point_12 = points_near_eq(ctrl, p);
        if is_point_01 || is_point_12 {
            self.line_to(p);
            return;
        }

        let mut normal_01 = Point::zero();
        let mut unit_01 = Point::zero();
        if !self.enter_to(ctrl, false, &mut normal_01, &mut unit_01) {
            return;
        }

        let points = [self.prev_pt, ctrl, p];
        let mut normal_12 = Point::zero();
        let mut unit_12 = Point::zero();
        self.make_quad(
            &points,
            normal_01,
            unit_01,
            &mut normal_12,
            &mut unit_12,
            QUAD_DIVIDE_LIMIT,
        );

        self.leave_to(p, normal_12, unit_12);
    }

    fn cubic_to(&mut self, ctrl0: Point, ctrl1: Point, p: Point) {
        let is_point_01 = points_near_eq(self.prev_pt, ctrl0);
        let is_point_12 = points_near_eq(ctrl0, ctrl1);
        let is_point_23 = points_near_eq(ctrl1, p);
        if is_point_01 || is_point_12 || is_point_23 {
            self.quad_to(if is_point_01 { ctrl1 } else { ctrl0 }, p);
            return;
        }

        let mut normal_01 = Point::zero();
        let mut unit_01 = Point::zero();
        if !self.enter_to(ctrl0, false, &mut normal_01, &mut unit_01) {
            return;
        }

        let points = [self.prev_pt, ctrl0, ctrl1, p];
        let mut normal_23 = Point::zero();
        let mut unit_23 = Point::zero();
        self.make_cubic(
            &points,
            normal_01,
            unit_01,
            &mut normal_23,
            &mut unit_23,
            false,
            CUBIC_DIVIDE_LIMIT,
        );

        self.leave_to(p, normal_23, unit_23);
    }

    fn close(&mut self) {
        self.finish_contour(true);
    }

    // Computes the segment normals, then either starts the contour or
    // joins onto the previous segment.
    fn enter_to(
        &mut self,
        point: Point,
        curr_is_line: bool,
        normal: &mut Point,
        unit_normal: &mut Point,
    ) -> bool {
        debug_assert!(self.segment_count >= 0);

        if !normals_make(self.prev_pt, point, self.radius, normal, unit_normal) {
            return false;
        }

        if self.segment_count > 0 {
            let joiner = self.joiner();
            joiner(
                self.prev_pt,
                self.radius,
                self.prev_unit_normal,
                *unit_normal,
                self.inv_miter_limit,
                self.prev_is_line,
                curr_is_line,
                SwappablePaths {
                    inner: &mut self.inner,
                    outer: &mut self.outer,
                },
            );
        } else {
            self.first_outer_pt = self.prev_pt + *normal;
            self.first_normal = *normal;
            self.first_unit_normal = *unit_normal;
            self.first_is_line = curr_is_line;

            self.outer.move_to(self.first_outer_pt);
            self.inner.move_to(self.prev_pt - *normal);
        }

        self.prev_is_line = curr_is_line;
        true
    }

    fn leave_to(&mut self, p: Point, normal: Point, unit_normal: Point) {
        self.prev_pt = p;
        self.prev_normal = normal;
        self.prev_unit_normal = unit_normal;
        self.segment_count += 1;
    }

    fn make_line(&mut self, p: Point, normal: Point) {
        self.outer.line_to(p + normal);
        self.inner.line_to(p - normal);
    }

    fn make_quad(
        &mut self,
        points: &[Point; 3],
        normal_01: Point,
        unit_01: Point,
        normal_12: &mut Point,
        unit_12: &mut Point,
        depth: u8,
    ) {
        if !normals_make(points[1], points[2], self.radius, normal_12, unit_12) {
            // The second leg collapsed, the quad is its chord.
            self.make_line(points[2], normal_01);
            *normal_12 = normal_01;
            *unit_12 = unit_01;
            return;
        }

        let cos_angle = unit_01.dot(*unit_12);

        if depth > 0 && normals_too_curvy(cos_angle) {
            let chopped = path_geometry::chop_quad_at_half(points);
            let mut normal_mid = Point::zero();
            let mut unit_mid = Point::zero();
            self.make_quad(
                arrayref::array_ref![chopped, 0, 3],
                normal_01,
                unit_01,
                &mut normal_mid,
                &mut unit_mid,
                depth - 1,
            );
            self.make_quad(
                arrayref::array_ref![chopped, 2, 3],
                normal_mid,
                unit_mid,
                normal_12,
                unit_12,
                depth - 1,
            );
        } else if depth == 0 && normals_too_curvy(cos_angle) {
            // Subdivision exhausted and still too sharp: approximate
            // with chords and patch a circle over the cusp.
            self.make_line(points[1], normal_01);
            self.make_line(points[2], *normal_12);
            self.other.add_circle(
                &Circle::new(points[1].x, points[1].y, self.radius),
                PathDirection::CW,
            );
        } else {
            /* The control point offset for a flat-enough quad:
             *
             * normal_1 ~= center(normal_01, normal_12), with length
             * R / cos(angle/2) = R / sqrt((1 + cos(angle)) / 2)
             *
             * which is exact when the quad approximates a circular arc.
             */
            let mut normal_1 = unit_01 + *unit_12;
            if !normal_1.set_length(self.radius / (1.0f32.ave(cos_angle)).sqrt()) {
                return;
            }

            self.outer
                .quad_to(points[1] + normal_1, points[2] + *normal_12);
            self.inner
                .quad_to(points[1] - normal_1, points[2] - *normal_12);
        }
    }

    fn make_cubic(
        &mut self,
        points: &[Point; 4],
        normal_01: Point,
        unit_01: Point,
        normal_23: &mut Point,
        unit_23: &mut Point,
        normal_23_is_valid: bool,
        depth: u8,
    ) {
        let mut normal_12 = Point::zero();
        let mut unit_12 = Point::zero();
        if !normals_make(points[1], points[2], self.radius, &mut normal_12, &mut unit_12) {
            let quad = [points[0], points[1], points[3]];
            self.make_quad(&quad, normal_01, unit_01, normal_23, unit_23, depth);
            return;
        }

        if !normal_23_is_valid
            && !normals_make(points[2], points[3], self.radius, normal_23, unit_23)
        {
            let quad = [points[0], points[1], points[2]];
            self.make_quad(&quad, normal_01, unit_01, normal_23, unit_23, depth);
            return;
        }

        let vector_01 = points[1] - points[0];
        if !vector_01.can_normalize() {
            let quad = [points[1], points[2], points[3]];
            self.make_quad(&quad, normal_12, unit_12, normal_23, unit_23, depth);
            return;
        }

        let cos_angle_012 = unit_01.dot(unit_12);
        let cos_angle_123 = unit_12.dot(*unit_23);
        let too_curvy = normals_too_curvy(cos_angle_012) || normals_too_curvy(cos_angle_123);

        if depth > 0 && too_curvy {
            let chopped = path_geometry::chop_cubic_at_half(points);
            let mut normal_mid = Point::zero();
            let mut unit_mid = Point::zero();
            // The second half reuses the already valid end normal.
            self.make_cubic(
                arrayref::array_ref![chopped, 0, 4],
                normal_01,
                unit_01,
                &mut normal_mid,
                &mut unit_mid,
                false,
                depth - 1,
            );
            self.make_cubic(
                arrayref::array_ref![chopped, 3, 4],
                normal_mid,
                unit_mid,
                normal_23,
                unit_23,
                true,
                depth - 1,
            );
        } else if depth == 0 && too_curvy {
            self.make_line(points[1], normal_01);
            self.make_line(points[2], normal_12);
            self.make_line(points[3], *normal_23);
            if normals_too_curvy(cos_angle_012) {
                self.other.add_circle(
                    &Circle::new(points[1].x, points[1].y, self.radius),
                    PathDirection::CW,
                );
            }
            if normals_too_curvy(cos_angle_123) {
                self.other.add_circle(
                    &Circle::new(points[2].x, points[2].y, self.radius),
                    PathDirection::CW,
                );
            }
        } else {
            let mut normal_1 = unit_01 + unit_12;
            if !normal_1.set_length(self.radius / (1.0f32.ave(cos_angle_012)).sqrt()) {
                return;
            }

            let mut normal_2 = unit_12 + *unit_23;
            if !normal_2.set_length(self.radius / (1.0f32.ave(cos_angle_123)).sqrt()) {
                return;
            }

            self.outer.cubic_to(
                points[1] + normal_1,
                points[2] + normal_2,
                points[3] + *normal_23,
            );
            self.inner.cubic_to(
                points[1] - normal_1,
                points[2] - normal_2,
                points[3] - *normal_23,
            );
        }
    }

    fn joiner(&self) -> JoinProc {
        match self.line_join {
            LineJoin::Miter => miter_joiner,
            LineJoin::Round => round_joiner,
            LineJoin::Bevel => bevel_joiner,
        }
    }

    fn capper(&self) -> CapProc {
        match self.line_cap {
            LineCap::Butt => butt_capper,
            LineCap::Round => round_capper,
            LineCap::Square => square_capper,
        }
    }

    fn finish_contour(&mut self, closed: bool) {
        if self.segment_count > 0 {
            if closed {
                let joiner = self.joiner();
                joiner(
                    self.prev_pt,
                    self.radius,
                    self.prev_unit_normal,
                    self.first_unit_normal,
                    self.inv_miter_limit,
                    self.prev_is_line,
                    self.first_is_line,
                    SwappablePaths {
                        inner: &mut self.inner,
                        outer: &mut self.outer,
                    },
                );
                self.outer.close();

                // Now add the inner contour in reverse order, forming
                // the hole of the ring.
                let inner_last = self.inner.last_point().unwrap_or_default();
                self.outer.move_to(inner_last);
                self.outer.add_reverse_path(&self.inner);
                self.outer.close();
            } else {
                let capper = self.capper();

                // cap the end
                let inner_last = self.inner.last_point().unwrap_or_default();
                capper(
                    &mut self.outer,
                    self.prev_pt,
                    inner_last,
                    self.prev_normal,
                    self.prev_is_line,
                );
                self.outer.add_reverse_path(&self.inner);

                // cap the start
                let first_outer_pt = self.first_outer_pt;
                capper(
                    &mut self.outer,
                    self.first_pt,
                    first_outer_pt,
                    -self.first_normal,
                    self.first_is_line,
                );
                self.outer.close();
            }
        }

        self.segment_count = -1;
        self.inner.clear();
    }

    fn finish(&mut self, convex: bool) -> Option<Path> {
        if self.segment_count > 0 {
            self.finish_contour(false);
        }

        if !self.other.is_empty() {
            self.outer.add_path(&self.other);
            self.other.clear();
        }

        let mut result = core::mem::take(&mut self.outer);
        if result.is_empty() {
            return None;
        }

        result.set_convex(convex);
        Some(result)
    }
}

fn points_near_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).is_nearly_zero() && (a.y - b.y).is_nearly_zero()
}

// The unit normal of a -> b is the normalized direction rotated 90
// degrees counter-clockwise; the normal is the unit normal scaled by the
// stroke radius.
fn normals_make(
    before: Point,
    after: Point,
    radius: f32,
    normal: &mut Point,
    unit_normal: &mut Point,
) -> bool {
    if !unit_normal.set_normalize(after.x - before.x, after.y - before.y) {
        return false;
    }

    unit_normal.rotate_ccw();
    *normal = unit_normal.scaled(radius);
    true
}

/* cos(angle) <= sqrt(2)/2 + 0.1 means the tangents turn by 45 - 9 = 36
 * degrees or more over the segment, too much for a single offset curve. */
fn normals_too_curvy(cos_angle: f32) -> bool {
    cos_angle <= SCALAR_ROOT_2_OVER_2 + 0.1
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum AngleType {
    Near0,
    Near180,
    Obtuse,
    Sharp,
}

fn joiner_angle(before_unit: Point, after_unit: Point) -> (f32, AngleType) {
    let cos_angle = before_unit.dot(after_unit);
    let angle_type = if cos_angle < 0.0 {
        if (1.0 + cos_angle) <= SCALAR_NEARLY_ZERO {
            AngleType::Near180
        } else {
            AngleType::Obtuse
        }
    } else {
        if (1.0 - cos_angle) <= SCALAR_NEARLY_ZERO {
            AngleType::Near0
        } else {
            AngleType::Sharp
        }
    };
    (cos_angle, angle_type)
}

/* The inner side of a join goes through the pivot:
 *
 *          i2 . .
 *           .   .
 * . . . . . . . . . . . . .
 * .         .   .   \|/   .
 *i1 . . . . . c . . . . . . - normal_before
 *           .   .      .
 *           .<- .    .
 *           .   .  .  outer
 *           . . .
 *
 * When the radius is larger than the neighboring segments, connecting
 * i1 directly to i2 would show through as a diagonal.
 */
fn joiner_inner(inner: &mut Path, pivot: Point, after: Point) {
    inner.line_to(pivot);
    inner.line_to(pivot - after);
}

fn bevel_joiner(
    pivot: Point,
    radius: f32,
    before_unit: Point,
    after_unit: Point,
    _inv_miter_limit: f32,
    _prev_is_line: bool,
    _curr_is_line: bool,
    mut paths: SwappablePaths,
) {
    let mut after = after_unit.scaled(radius);
    if !is_clockwise(before_unit, after_unit) {
        paths.swap();
        after = -after;
    }

    paths.outer.line_to(pivot + after);
    joiner_inner(paths.inner, pivot, after);
}

fn round_joiner(
    pivot: Point,
    radius: f32,
    before_unit: Point,
    after_unit: Point,
    _inv_miter_limit: f32,
    _prev_is_line: bool,
    _curr_is_line: bool,
    mut paths: SwappablePaths,
) {
    let (_, angle_type) = joiner_angle(before_unit, after_unit);
    if angle_type == AngleType::Near0 {
        return;
    }

    let mut before = before_unit;
    let mut after = after_unit;
    let mut dir = PathDirection::CW;
    if !is_clockwise(before, after) {
        paths.swap();
        before = -before;
        after = -after;
        dir = PathDirection::CCW;
    }

    let ts = Transform::from_row(radius, 0.0, 0.0, radius, pivot.x, pivot.y);
    let mut quads = ArrayVec::new();
    path_geometry::unit_arc_to_quads(before, after, dir, &ts, &mut quads);
    for (ctrl, p) in quads {
        paths.outer.quad_to(ctrl, p);
    }

    joiner_inner(paths.inner, pivot, after.scaled(radius));
}

/*                   normal_before
 *                         |
 * . . . . . . . . . . . . . . . . . . miter
 *                         .    L  . .
 *                         .     .   .
 *                         .   .     .
 *                         . a       .
 *               . . . . . c . . . . . --> normal_after
 *                         .    R    .
 *
 * M = L / R, L = R / cos(a/2); the miter is abandoned for a bevel when
 * 1/M > cos(a/2).
 */
fn miter_joiner(
    pivot: Point,
    radius: f32,
    before_unit: Point,
    after_unit: Point,
    inv_miter_limit: f32,
    prev_is_line: bool,
    curr_is_line: bool,
    mut paths: SwappablePaths,
) {
    let (cos_angle, angle_type) = joiner_angle(before_unit, after_unit);
    if angle_type == AngleType::Near0 {
        return;
    }

    let mut before = before_unit;
    let mut after = after_unit;
    let mut miter = Point::zero();
    let mut miter_join = true;
    let mut curr_is_line = curr_is_line;

    loop {
        if angle_type == AngleType::Near180 {
            // A reversal has no outer corner, fall back to a bevel.
            curr_is_line = false;
            miter_join = false;
            break;
        }

        let clockwise = is_clockwise(before, after);
        if !clockwise {
            paths.swap();
            before = -before;
            after = -after;
        }

        // Special case the right angle before reaching for square
        // roots, it is the common case when stroking rects.
        if cos_angle.is_nearly_zero() && inv_miter_limit <= SCALAR_ROOT_2_OVER_2 {
            miter = (before + after).scaled(radius);
            break;
        }

        // cos(a/2) = sqrt((1 + cos(a)) / 2)
        let cos_half_angle = (1.0f32.ave(cos_angle)).sqrt();
        if inv_miter_limit > cos_half_angle {
            curr_is_line = false;
            miter_join = false;
            break;
        }

        if angle_type == AngleType::Obtuse {
            // rot_cw(before) + rot_ccw(after) is longer than
            // before + after, which keeps set_length accurate.
            miter = Point::from_xy(after.y - before.y, before.x - after.x);
            if !clockwise {
                miter = -miter;
            }
        } else {
            miter = before + after;
        }

        miter.set_length(radius / cos_half_angle);
        break;
    }

    let after_scaled = after.scaled(radius);

    if miter_join {
        if prev_is_line {
            // Joining two lines: replace the previous outer point
            // instead of appending.
            paths.outer.set_last_point(pivot + miter);
        } else {
            paths.outer.line_to(pivot + miter);
        }
    }

    if !curr_is_line {
        paths.outer.line_to(pivot + after_scaled);
    }

    joiner_inner(paths.inner, pivot, after_scaled);
}

fn butt_capper(path: &mut Path, _pivot: Point, end: Point, _normal: Point, _is_line: bool) {
    path.line_to(end);
}

/* Two cubics sweeping 180 degrees, with L = 4/3 * tan(pi/8) * radius:
 *
 *         p1 . c1
 *         .
 * center  .       c2
 *         .       .
 *         p3 .. p2
 */
fn round_capper(path: &mut Path, pivot: Point, end: Point, normal: Point, _is_line: bool) {
    let x0 = pivot.x;
    let y0 = pivot.y;
    let nx = normal.x;
    let ny = normal.y;
    let lx = nx * SCALAR_CUBIC_ARC_FACTOR;
    let ly = ny * SCALAR_CUBIC_ARC_FACTOR;

    path.cubic_to(
        Point::from_xy(x0 + nx - ly, y0 + ny + lx),
        Point::from_xy(x0 - ny + lx, y0 + nx + ly),
        Point::from_xy(x0 - ny, y0 + nx),
    );
    path.cubic_to(
        Point::from_xy(x0 - ny - lx, y0 + nx - ly),
        Point::from_xy(x0 - nx - ly, y0 - ny + lx),
        end,
    );
}

fn square_capper(path: &mut Path, pivot: Point, end: Point, normal: Point, is_line: bool) {
    let patched = normal.rotated_cw();

    if is_line {
        // Capping a line contour: the corner point can replace the
        // previous outer point.
        path.set_last_point(pivot + normal + patched);
        path.line_to(pivot - normal + patched);
    } else {
        path.line_to(pivot + normal + patched);
        path.line_to(pivot - normal + patched);
        path.line_to(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathVerb;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    fn contour_count(path: &Path) -> usize {
        path.verbs()
            .iter()
            .filter(|v| **v == PathVerb::Move)
            .count()
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0));
        path.line_to(pt(10.0, 10.0));

        let mut stroke = Stroke::default();
        stroke.width = 0.0;
        assert!(PathStroker::new().stroke_path(&mut path, &stroke).is_none());

        stroke.width = -1.0;
        assert!(PathStroker::new().stroke_path(&mut path, &stroke).is_none());
    }

    #[test]
    fn degenerate_cubic_strokes_to_nothing() {
        let mut path = Path::new();
        path.move_to(pt(3.0, 3.0));
        path.cubic_to(pt(3.0, 3.0), pt(3.0, 3.0), pt(3.0, 3.0));

        let stroke = Stroke::default();
        assert!(PathStroker::new().stroke_path(&mut path, &stroke).is_none());
    }

    #[test]
    fn open_line_outline() {
        // A diagonal line gets the line hint fast path; the outline is
        // a single closed convex contour.
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0));
        path.line_to(pt(10.0, 10.0));

        let stroke = Stroke::default();
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();
        assert_eq!(stroked.verbs().last(), Some(&PathVerb::Close));
        assert_eq!(contour_count(&stroked), 1);
        assert!(stroked.convex());
    }

    #[test]
    fn closed_triangle_outline_is_a_ring() {
        let mut path = Path::new();
        path.move_to(pt(10.0, 10.0));
        path.line_to(pt(20.0, 50.0));
        path.line_to(pt(30.0, 10.0));
        path.close();

        let stroke = Stroke::default();
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        // Outer ring plus the reversed inner ring.
        assert_eq!(contour_count(&stroked), 2);
        assert_eq!(stroked.verbs().last(), Some(&PathVerb::Close));
        assert!(!stroked.convex());
    }

    #[test]
    fn rect_hint_strokes_to_two_rings() {
        let mut path = Path::new();
        let rect = Rect::from_xywh(10.0, 10.0, 80.0, 40.0).unwrap();
        path.add_rect(&rect, PathDirection::CW);

        let mut stroke = Stroke::default();
        stroke.width = 4.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        assert_eq!(contour_count(&stroked), 2);
        // Outer ring is inflated by the radius.
        assert_eq!(
            stroked.bounds(),
            Rect::from_xywh(8.0, 8.0, 84.0, 44.0)
        );
    }

    #[test]
    fn circle_hint_strokes_to_concentric_rings() {
        let mut path = Path::new();
        path.add_circle(&Circle::new(100.0, 100.0, 50.0), PathDirection::CW);

        let mut stroke = Stroke::default();
        stroke.width = 4.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        // Inner ring with radius 48, outer with radius 52.
        assert_eq!(contour_count(&stroked), 2);
        assert_eq!(
            stroked.bounds(),
            Rect::from_xywh(48.0, 48.0, 104.0, 104.0)
        );

        // Both rings are built from eight quads each.
        let quads = stroked
            .verbs()
            .iter()
            .filter(|v| **v == PathVerb::Quad)
            .count();
        assert_eq!(quads, 16);
    }

    #[test]
    fn thin_circle_has_no_inner_ring() {
        let mut path = Path::new();
        path.add_circle(&Circle::new(0.0, 0.0, 1.0), PathDirection::CW);

        let mut stroke = Stroke::default();
        stroke.width = 4.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        // The stroke swallows the hole.
        assert_eq!(contour_count(&stroked), 1);
        assert_eq!(stroked.bounds(), Rect::from_xywh(-3.0, -3.0, 6.0, 6.0));
    }

    #[test]
    fn sharp_miter_falls_back_to_bevel() {
        // Two segments meeting at about one degree. A true miter would
        // extend to radius / sin(angle/2), over a hundred units; the
        // bevel fallback stays within the stroke radius.
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0));
        path.line_to(pt(100.0, 0.0));
        path.line_to(pt(0.0, 1.75));

        let mut stroke = Stroke::default();
        stroke.width = 2.0;
        stroke.miter_limit = 4.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        let bounds = stroked.bounds().unwrap();
        assert!(bounds.right() < 103.0);
    }

    #[test]
    fn right_angle_miter_is_pointy() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0));
        path.line_to(pt(10.0, 0.0));
        path.line_to(pt(10.0, 10.0));

        let mut stroke = Stroke::default();
        stroke.width = 2.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();

        // The miter corner extends one radius beyond the corner in
        // both axes.
        let bounds = stroked.bounds().unwrap();
        assert!((bounds.right() - 11.0).abs() < 1e-4);
        assert!((bounds.top() - -1.0).abs() < 1e-4);
    }

    #[test]
    fn point_stroke_butt_is_a_square() {
        let mut path = Path::new();
        path.add_point(pt(5.0, 5.0));

        let mut stroke = Stroke::default();
        stroke.width = 4.0;
        let mut stroked = PathStroker::new().stroke_path(&mut path, &stroke).unwrap();
        assert_eq!(stroked.bounds(), Rect::from_xywh(3.0, 3.0, 4.0, 4.0));
    }

    #[test]
    fn stroker_is_reusable() {
        let mut stroker = PathStroker::new();
        let stroke = Stroke::default();

        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0));
        path.line_to(pt(10.0, 10.0));
        assert!(stroker.stroke_path(&mut path, &stroke).is_some());

        let mut path2 = Path::new();
        path2.move_to(pt(0.0, 0.0));
        path2.line_to(pt(-10.0, 5.0));
        let mut second = stroker.stroke_path(&mut path2, &stroke).unwrap();

        // No residue from the first stroke.
        let bounds = second.bounds().unwrap();
        assert!(bounds.right() < 1.0);
    }
}
