// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use vexel_path::{round_to_i32, Path, PathStroker, Point, Polygon, Rect, Shape, Transform};

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::hairline;
use crate::paint::{FillRule, Paint};
use crate::pixmap::PixelFormat;
use crate::raster::PolygonRaster;
use crate::writer::BitmapWriter;

/// A rendering device.
///
/// The bitmap renderer is the only implementation in the core; GPU
/// devices plug in through the same trait.
pub trait Device {
    /// Reallocates the target surface.
    fn resize(&mut self, width: u32, height: u32) -> Option<()>;

    /// Fills the whole surface with a color.
    fn draw_clear(&mut self, color: Color);

    /// Draws a path with the paint's mode.
    fn draw_path(&mut self, path: &mut Path, paint: &Paint, ts: &Transform);

    /// Draws a run-length polygon.
    fn draw_polygon(
        &mut self,
        polygon: &Polygon,
        hint: Option<Shape>,
        bounds: Option<Rect>,
        paint: &Paint,
        ts: &Transform,
    );

    /// Strokes independent line segments, two points each.
    fn draw_lines(&mut self, points: &[Point], paint: &Paint, ts: &Transform);

    /// Strokes points.
    fn draw_points(&mut self, points: &[Point], paint: &Paint, ts: &Transform);
}

/// The software renderer: rasterizes onto a [`Bitmap`].
///
/// The stroker, the rasterizer and the transformed-point scratch buffer
/// are all reused across draws.
#[allow(missing_debug_implementations)]
pub struct BitmapDevice {
    bitmap: Bitmap,
    stroker: PathStroker,
    raster: PolygonRaster,
    points: Vec<Point>,
}

impl BitmapDevice {
    /// Creates a device with a fresh bitmap.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        // An unknown format would fail here, refusing to initialize.
        crate::pixmap::Pixmap::lookup(format, 255)?;
        Some(BitmapDevice::from_bitmap(Bitmap::new(width, height, format)?))
    }

    /// Creates a device over an existing bitmap.
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        BitmapDevice {
            bitmap,
            stroker: PathStroker::new(),
            raster: PolygonRaster::new(),
            points: Vec::new(),
        }
    }

    /// Returns the target bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Returns the target bitmap.
    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    /// Consumes the device, returning the bitmap.
    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    // width == 1 and no scaling: the outline is drawn directly instead
    // of going through the stroker.
    fn stroke_only(paint: &Paint, ts: &Transform) -> bool {
        paint.stroke.width == 1.0 && ts.has_unit_scale()
    }

    fn fill_polygon_impl(
        &mut self,
        polygon: &Polygon,
        hint: Option<Shape>,
        bounds: Option<Rect>,
        paint: &Paint,
        ts: &Transform,
        rule: FillRule,
    ) {
        // An axis-aligned rect fills without the rasterizer.
        if let Some(Shape::Rect(rect)) = hint {
            if ts.has_no_skew() {
                if let Some(device_rect) = rect.transform(ts) {
                    if let Some(mut writer) = BitmapWriter::new(&mut self.bitmap, paint) {
                        let lx = round_to_i32(device_rect.left());
                        let ty = round_to_i32(device_rect.top());
                        let rx = round_to_i32(device_rect.right());
                        let by = round_to_i32(device_rect.bottom());
                        writer.draw_rect(lx, ty, rx - lx, by - ty);
                    }
                }
                return;
            }
        }

        self.points.clear();
        self.points
            .extend(polygon.points.iter().map(|p| ts.map_point(*p)));

        // Hint bounds are transformed approximately through the matrix;
        // without a hint the accurate bounds come from the points.
        let device_bounds = match bounds.and_then(|b| b.transform(ts)) {
            Some(b) => b,
            None => match Rect::from_points(&self.points) {
                Some(b) => b,
                None => return,
            },
        };

        let device_polygon = match Polygon::new(&self.points, polygon.counts, polygon.convex) {
            Some(p) => p,
            None => return,
        };

        let mut writer = match BitmapWriter::new(&mut self.bitmap, paint) {
            Some(w) => w,
            None => return,
        };

        self.raster
            .rasterize(&device_polygon, &device_bounds, rule, &mut |lx, rx, yb, ye| {
                writer.draw_rect(lx, yb, rx - lx, ye - yb);
            });
    }

    // Stroker output is a fill path; its contours never self-intersect,
    // so the winding rule fills it regardless of the paint's rule.
    fn fill_stroked(&mut self, path: &mut Path, paint: &Paint, ts: &Transform) {
        if path.is_empty() {
            return;
        }

        let bounds = path.bounds();
        if let Some(polygon) = path.polygon() {
            self.fill_polygon_impl(&polygon, None, bounds, paint, ts, FillRule::Winding);
        }
    }

    fn stroke_polygon_hairline(&mut self, polygon: &Polygon, paint: &Paint, ts: &Transform) {
        self.points.clear();
        self.points
            .extend(polygon.points.iter().map(|p| ts.map_point(*p)));

        let device_polygon = match Polygon::new(&self.points, polygon.counts, polygon.convex) {
            Some(p) => p,
            None => return,
        };

        if let Some(mut writer) = BitmapWriter::new(&mut self.bitmap, paint) {
            hairline::stroke_polygon(&mut writer, &device_polygon);
        }
    }
}

impl Device for BitmapDevice {
    fn resize(&mut self, width: u32, height: u32) -> Option<()> {
        self.bitmap = Bitmap::new(width, height, self.bitmap.format())?;
        Some(())
    }

    fn draw_clear(&mut self, color: Color) {
        self.bitmap.fill(color);
    }

    fn draw_path(&mut self, path: &mut Path, paint: &Paint, ts: &Transform) {
        if paint.mode.has_fill() {
            let hint = path.hint();
            let bounds = path.bounds();
            if let Some(polygon) = path.polygon() {
                self.fill_polygon_impl(&polygon, hint, bounds, paint, ts, paint.fill_rule);
            }
        }

        if paint.mode.has_stroke() && paint.stroke.width > 0.0 {
            if Self::stroke_only(paint, ts) {
                if let Some(polygon) = path.polygon() {
                    self.stroke_polygon_hairline(&polygon, paint, ts);
                }
            } else if let Some(mut stroked) = self.stroker.stroke_path(path, &paint.stroke) {
                self.fill_stroked(&mut stroked, paint, ts);
            }
        }
    }

    fn draw_polygon(
        &mut self,
        polygon: &Polygon,
        hint: Option<Shape>,
        bounds: Option<Rect>,
        paint: &Paint,
        ts: &Transform,
    ) {
        // A line or a point has no interior, route to the strokers.
        match hint {
            Some(Shape::Line(line)) => {
                self.draw_lines(&[line.p0, line.p1], paint, ts);
                return;
            }
            Some(Shape::Point(p)) => {
                self.draw_points(&[p], paint, ts);
                return;
            }
            _ => {}
        }

        if paint.mode.has_fill() {
            self.fill_polygon_impl(polygon, hint, bounds, paint, ts, paint.fill_rule);
        }

        if paint.mode.has_stroke() && paint.stroke.width > 0.0 {
            if Self::stroke_only(paint, ts) {
                self.stroke_polygon_hairline(polygon, paint, ts);
            } else if let Some(mut stroked) = self.stroker.stroke_polygon(polygon, &paint.stroke)
            {
                self.fill_stroked(&mut stroked, paint, ts);
            }
        }
    }

    fn draw_lines(&mut self, points: &[Point], paint: &Paint, ts: &Transform) {
        if points.len() < 2 {
            return;
        }

        if !paint.mode.has_stroke() || !(paint.stroke.width > 0.0) {
            return;
        }

        if Self::stroke_only(paint, ts) {
            self.points.clear();
            self.points.extend(points.iter().map(|p| ts.map_point(*p)));
            if let Some(mut writer) = BitmapWriter::new(&mut self.bitmap, paint) {
                hairline::stroke_lines(&mut writer, &self.points);
            }
        } else if let Some(mut stroked) = self.stroker.stroke_lines(points, &paint.stroke) {
            self.fill_stroked(&mut stroked, paint, ts);
        }
    }

    fn draw_points(&mut self, points: &[Point], paint: &Paint, ts: &Transform) {
        if points.is_empty() {
            return;
        }

        if !paint.mode.has_stroke() || !(paint.stroke.width > 0.0) {
            return;
        }

        if Self::stroke_only(paint, ts) {
            self.points.clear();
            self.points.extend(points.iter().map(|p| ts.map_point(*p)));
            if let Some(mut writer) = BitmapWriter::new(&mut self.bitmap, paint) {
                hairline::stroke_points(&mut writer, &self.points);
            }
        } else if let Some(mut stroked) = self.stroker.stroke_points(points, &paint.stroke) {
            self.fill_stroked(&mut stroked, paint, ts);
        }
    }
}
