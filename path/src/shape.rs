// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, Rect};

/// A line segment.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    /// Creates a new line.
    pub fn new(p0: Point, p1: Point) -> Self {
        Line { p0, p1 }
    }
}

/// A triangle.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Triangle {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

/// A circle.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle.
    pub fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Circle {
            center: Point::from_xy(cx, cy),
            radius,
        }
    }
}

/// An ellipse.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f32,
    pub ry: f32,
}

impl Ellipse {
    /// Creates a new ellipse.
    pub fn new(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        Ellipse {
            center: Point::from_xy(cx, cy),
            rx,
            ry,
        }
    }

    /// Creates an ellipse inscribed into the provided rect.
    pub fn from_rect(rect: &Rect) -> Self {
        Ellipse::new(
            rect.x() + rect.width() * 0.5,
            rect.y() + rect.height() * 0.5,
            rect.width() * 0.5,
            rect.height() * 0.5,
        )
    }

    /// Returns the bounding box.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_xywh(
            self.center.x - self.rx,
            self.center.y - self.ry,
            self.rx + self.rx,
            self.ry + self.ry,
        )
    }
}

/// An elliptical arc.
///
/// Angles are in degrees. A positive sweep goes clockwise
/// (in y-down coordinates).
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Arc {
    pub center: Point,
    pub rx: f32,
    pub ry: f32,
    pub start_angle: f32,
    pub sweep_angle: f32,
}

/// A rectangle with rounded corners.
///
/// Per-corner radii are stored as vectors in the order:
/// left-top, right-top, right-bottom, left-bottom.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RoundRect {
    pub rect: Rect,
    pub radii: [Point; 4],
}

impl RoundRect {
    /// Creates a round rect with the same x/y radius on all corners.
    pub fn from_rect_xy(rect: Rect, rx: f32, ry: f32) -> Self {
        RoundRect {
            rect,
            radii: [Point::from_xy(rx, ry); 4],
        }
    }
}

/// A high-level shape equivalent to a path's geometry.
///
/// Used for fast-path rendering and stroking.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Shape {
    Point(Point),
    Line(Line),
    Rect(Rect),
    RoundRect(RoundRect),
    Triangle(Triangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(Arc),
}
