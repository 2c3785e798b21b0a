// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! One pixel wide strokes for the width==1 fast path.

use vexel_path::{round_to_i32, Point, Polygon};

use crate::fixed_point::{fdot16, FDot16};
use crate::writer::BitmapWriter;

/// Draws each point as a single pixel.
pub fn stroke_points(writer: &mut BitmapWriter, points: &[Point]) {
    for p in points {
        writer.draw_pixel(round_to_i32(p.x), round_to_i32(p.y));
    }
}

/// Draws independent line segments, two points each.
pub fn stroke_lines(writer: &mut BitmapWriter, points: &[Point]) {
    for pair in points.chunks_exact(2) {
        stroke_line(writer, pair[0], pair[1]);
    }
}

/// Draws each polygon contour as a connected run of lines.
pub fn stroke_polygon(writer: &mut BitmapWriter, polygon: &Polygon) {
    for contour in polygon.contours() {
        for pair in contour.windows(2) {
            stroke_line(writer, pair[0], pair[1]);
        }
    }
}

// A fixed-point DDA over the major axis. Horizontal and vertical lines
// collapse into single runs.
fn stroke_line(writer: &mut BitmapWriter, p0: Point, p1: Point) {
    let x0 = round_to_i32(p0.x);
    let y0 = round_to_i32(p0.y);
    let x1 = round_to_i32(p1.x);
    let y1 = round_to_i32(p1.y);

    let dx = x1 - x0;
    let dy = y1 - y0;

    if dy == 0 {
        let x = x0.min(x1);
        writer.draw_hline(x, y0, dx.abs() + 1);
        return;
    }

    if dx == 0 {
        let y = y0.min(y1);
        writer.draw_vline(x0, y, dy.abs() + 1);
        return;
    }

    if dx.abs() >= dy.abs() {
        // x-major
        let (x0, y0, x1) = if x0 <= x1 { (x0, y0, x1) } else { (x1, y1, x0) };
        let slope = compute_slope(dy, dx);
        let mut y: FDot16 = (y0 << 16) + fdot16::HALF;
        for x in x0..=x1 {
            writer.draw_pixel(x, y >> 16);
            y += slope;
        }
    } else {
        // y-major
        let (y0, x0, y1) = if y0 <= y1 { (y0, x0, y1) } else { (y1, x1, y0) };
        let slope = compute_slope(dx, dy);
        let mut x: FDot16 = (x0 << 16) + fdot16::HALF;
        for y in y0..=y1 {
            writer.draw_pixel(x >> 16, y);
            x += slope;
        }
    }
}

fn compute_slope(minor: i32, major: i32) -> FDot16 {
    debug_assert_ne!(major, 0);
    (((minor as i64) << 16) / major as i64) as FDot16
}
