// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use vexel_path::{
    Arc, Circle, Ellipse, Line, Path, PathDirection, Point, Rect, RoundRect, Transform, Triangle,
};

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::device::{BitmapDevice, Device};
use crate::paint::Paint;
use crate::pixmap::PixelFormat;

/// A drawing context.
///
/// Holds the current paint and matrix with save/load stacks and routes
/// draw calls into the device. Shape draws reuse one cached path slot.
#[allow(missing_debug_implementations)]
pub struct Canvas {
    device: BitmapDevice,
    paint: Paint,
    matrix: Transform,
    paint_stack: Vec<Paint>,
    matrix_stack: Vec<Transform>,
    shape_path: Path,
}

impl Canvas {
    /// Creates a canvas over a new XRGB8888 little-endian bitmap.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Canvas::with_format(width, height, PixelFormat::Xrgb8888Le)
    }

    /// Creates a canvas over a new bitmap with the given format.
    pub fn with_format(width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        Some(Canvas::from_device(BitmapDevice::new(width, height, format)?))
    }

    /// Creates a canvas over an existing bitmap.
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Canvas::from_device(BitmapDevice::from_bitmap(bitmap))
    }

    fn from_device(device: BitmapDevice) -> Self {
        Canvas {
            device,
            paint: Paint::default(),
            matrix: Transform::identity(),
            paint_stack: Vec::new(),
            matrix_stack: Vec::new(),
            shape_path: Path::new(),
        }
    }

    /// Returns the target bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        self.device.bitmap()
    }

    /// Returns the target bitmap.
    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        self.device.bitmap_mut()
    }

    /// Consumes the canvas, returning the bitmap.
    pub fn into_bitmap(self) -> Bitmap {
        self.device.into_bitmap()
    }

    /// Returns the current paint.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Returns the current paint.
    pub fn paint_mut(&mut self) -> &mut Paint {
        &mut self.paint
    }

    /// Returns the current matrix.
    pub fn matrix(&self) -> &Transform {
        &self.matrix
    }

    /// Replaces the current matrix.
    pub fn set_matrix(&mut self, ts: Transform) {
        self.matrix = ts;
    }

    /// Resets the current matrix to identity.
    pub fn reset_matrix(&mut self) {
        self.matrix = Transform::identity();
    }

    /// Appends a translation to the current matrix.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.matrix = self.matrix.pre_translate(tx, ty);
    }

    /// Appends a scale to the current matrix.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.matrix = self.matrix.pre_scale(sx, sy);
    }

    /// Pushes the current paint onto the paint stack.
    pub fn save_paint(&mut self) {
        self.paint_stack.push(self.paint);
    }

    /// Pops the most recently saved paint.
    ///
    /// Does nothing when the stack is empty.
    pub fn load_paint(&mut self) {
        if let Some(paint) = self.paint_stack.pop() {
            self.paint = paint;
        }
    }

    /// Pushes the current matrix onto the matrix stack.
    pub fn save_matrix(&mut self) {
        self.matrix_stack.push(self.matrix);
    }

    /// Pops the most recently saved matrix.
    ///
    /// Does nothing when the stack is empty.
    pub fn load_matrix(&mut self) {
        if let Some(matrix) = self.matrix_stack.pop() {
            self.matrix = matrix;
        }
    }

    /// Fills the whole surface with a color, ignoring the paint.
    pub fn draw_clear(&mut self, color: Color) {
        self.device.draw_clear(color);
    }

    /// Draws a path with the current paint and matrix.
    pub fn draw_path(&mut self, path: &mut Path) {
        self.device.draw_path(path, &self.paint, &self.matrix);
    }

    /// Draws a rectangle.
    pub fn draw_rect(&mut self, rect: &Rect) {
        self.shape_path.clear();
        self.shape_path.add_rect(rect, PathDirection::CW);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Draws a circle.
    pub fn draw_circle(&mut self, circle: &Circle) {
        self.shape_path.clear();
        self.shape_path.add_circle(circle, PathDirection::CW);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Draws an ellipse.
    pub fn draw_ellipse(&mut self, ellipse: &Ellipse) {
        self.shape_path.clear();
        self.shape_path.add_ellipse(ellipse, PathDirection::CW);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Draws a round rectangle.
    pub fn draw_round_rect(&mut self, rect: &RoundRect) {
        self.shape_path.clear();
        self.shape_path.add_round_rect(rect, PathDirection::CW);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Draws a triangle.
    pub fn draw_triangle(&mut self, triangle: &Triangle) {
        self.shape_path.clear();
        self.shape_path.add_triangle(triangle, PathDirection::CW);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Draws an arc.
    pub fn draw_arc(&mut self, arc: &Arc) {
        self.shape_path.clear();
        self.shape_path.add_arc(arc);
        self.device
            .draw_path(&mut self.shape_path, &self.paint, &self.matrix);
    }

    /// Strokes a single line segment.
    pub fn draw_line(&mut self, line: &Line) {
        self.device
            .draw_lines(&[line.p0, line.p1], &self.paint, &self.matrix);
    }

    /// Strokes independent line segments, two points each.
    pub fn draw_lines(&mut self, points: &[Point]) {
        self.device.draw_lines(points, &self.paint, &self.matrix);
    }

    /// Strokes points.
    pub fn draw_points(&mut self, points: &[Point]) {
        self.device.draw_points(points, &self.paint, &self.matrix);
    }
}
