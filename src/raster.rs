// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A scanline polygon rasterizer.
//!
//! Converts a run-length polygon into horizontal spans:
//!
//! ```text
//!  (y)
//!   0 ----------------> .
//!   1                 .   .
//!   2               . ----- . e2
//!   3          e1 . --------- .
//!   4 ------------------------> .
//! ```
//!
//! Edges live in a reusable pool addressed by `u16` indices; an edge
//! table buckets them by their top scanline and the active edge list is
//! kept sorted by the current x. Storage is retained between calls.

use vexel_path::{round_to_i32, Point, Polygon, Rect};

use crate::fixed_point::{fdot6, fdot16, FDot16};
use crate::paint::FillRule;

// An edge whose |slope| stays below this is treated as vertical by the
// convex fast path, which then emits one span for the whole rectangle.
const SLOPE_NEAR_ZERO: FDot16 = 1 << 4;

/// The span sink: `(left_x, right_x, y_begin, y_end)` in device pixels.
///
/// `y_end > y_begin + 1` only for rectangle-merged convex runs.
pub type SpanFn<'a> = dyn FnMut(i32, i32, i32, i32) + 'a;

#[derive(Copy, Clone, Default, Debug)]
struct RasterEdge {
    // current x and slope (dx/dy) in 16.16
    x: FDot16,
    slope: FDot16,
    // next edge in the bucket or active list; 0 is the list tail
    next: u16,
    y_bottom: i16,
    // +1 for top-to-bottom edges, -1 for bottom-to-top
    winding: i8,
}

/// A reusable polygon rasterization state.
#[derive(Clone, Debug, Default)]
pub struct PolygonRaster {
    // index 0 is the shared tail sentinel
    edge_pool: Vec<RasterEdge>,
    edge_table: Vec<u16>,
    table_base: i32,
    active_edges: u16,
    top: i32,
    bottom: i32,
}

impl PolygonRaster {
    /// Creates a new rasterizer.
    pub fn new() -> Self {
        PolygonRaster::default()
    }

    /// Rasterizes a polygon into spans.
    ///
    /// `bounds` must contain every polygon point. Convex polygons take a
    /// per-contour fast path with a two-edge active list; concave ones
    /// run the full sorted scan with the fill rule.
    pub fn rasterize(
        &mut self,
        polygon: &Polygon,
        bounds: &Rect,
        rule: FillRule,
        span: &mut SpanFn,
    ) {
        if polygon.is_empty() || bounds.is_empty() {
            return;
        }

        if polygon.convex {
            for contour in polygon.contours() {
                self.raster_convex(contour, bounds, span);
            }
        } else {
            self.raster_concave(polygon, bounds, rule, span);
        }
    }

    fn raster_convex(&mut self, contour: &[Point], bounds: &Rect, span: &mut SpanFn) {
        if !self.reset(bounds) {
            return;
        }

        if !self.insert_edges(contour) {
            return;
        }

        if self.top >= self.bottom {
            return;
        }

        let mut y = self.top;
        while y < self.bottom {
            let bucket = self.take_bucket(y);
            self.active_sorted_append(bucket);
            self.scan_line_convex(y, span);

            if y >= self.bottom - 1 {
                break;
            }

            self.scan_next(y);
            y += 1;
        }
    }

    fn raster_concave(
        &mut self,
        polygon: &Polygon,
        bounds: &Rect,
        rule: FillRule,
        span: &mut SpanFn,
    ) {
        if !self.reset(bounds) {
            return;
        }

        for contour in polygon.contours() {
            if !self.insert_edges(contour) {
                return;
            }
        }

        if self.top >= self.bottom {
            return;
        }

        let mut order = true;
        let mut y = self.top;
        while y < self.bottom {
            let bucket = self.take_bucket(y);
            if order {
                self.active_sorted_append(bucket);
            } else {
                self.active_append(bucket);
                self.active_sort();
            }

            self.scan_line_concave(y, rule, span);

            if y >= self.bottom - 1 {
                break;
            }

            order = self.scan_next(y);
            y += 1;
        }
    }

    fn reset(&mut self, bounds: &Rect) -> bool {
        let base = round_to_i32(bounds.y());
        let size = round_to_i32(bounds.height()) + 1;
        if size <= 0 || size as usize > u16::MAX as usize {
            return false;
        }

        self.edge_pool.clear();
        self.edge_pool.push(RasterEdge::default());
        self.edge_table.clear();
        self.edge_table.resize(size as usize, 0);
        self.table_base = base;
        self.active_edges = 0;
        self.top = i32::MAX;
        self.bottom = i32::MIN;
        true
    }

    fn alloc_edge(&mut self) -> Option<u16> {
        let index = self.edge_pool.len();
        if index >= u16::MAX as usize {
            // Too many edges for the u16 index space; abandon the
            // primitive.
            return None;
        }

        self.edge_pool.push(RasterEdge::default());
        Some(index as u16)
    }

    fn take_bucket(&mut self, y: i32) -> u16 {
        let index = y - self.table_base;
        if index < 0 || index as usize >= self.edge_table.len() {
            return 0;
        }

        let head = self.edge_table[index as usize];
        self.edge_table[index as usize] = 0;
        head
    }

    // Builds edges for one contour's consecutive point pairs. Horizontal
    // edges are dropped; the rest are oriented top-down and inserted at
    // the head of their top scanline's bucket.
    fn insert_edges(&mut self, points: &[Point]) -> bool {
        for pair in points.windows(2) {
            let mut iyb = round_to_i32(pair[0].y);
            let mut iye = round_to_i32(pair[1].y);
            if iyb == iye {
                continue;
            }

            let mut xb = fdot6::from_f32(pair[0].x);
            let mut yb = fdot6::from_f32(pair[0].y);
            let mut xe = fdot6::from_f32(pair[1].x);
            let mut ye = fdot6::from_f32(pair[1].y);

            let mut winding = 1i8;
            if yb > ye {
                core::mem::swap(&mut xb, &mut xe);
                core::mem::swap(&mut yb, &mut ye);
                core::mem::swap(&mut iyb, &mut iye);
                winding = -1;
            }
            debug_assert!(iyb < iye);

            if iye - 1 > i16::MAX as i32 || iyb < i16::MIN as i32 {
                return false;
            }

            self.top = self.top.min(iyb);
            self.bottom = self.bottom.max(iye);

            let slope = fdot6::div(xe - xb, ye - yb);

            /* The x at the first scanline center:
             *
             * xb + (iyb - yb + 0.5) * dx/dy
             * => xb + ((0.5 - yb) % 1) * dx/dy
             */
            let dy6 = (fdot6::HALF - yb) & 63;
            let x = fdot6::to_fdot16(xb) + (((slope as i64 * dy6 as i64) >> 6) as FDot16);

            let table_index = iyb - self.table_base;
            if table_index < 0 || table_index as usize >= self.edge_table.len() {
                debug_assert!(false, "polygon exceeds its declared bounds");
                continue;
            }

            let edge_index = match self.alloc_edge() {
                Some(index) => index,
                None => return false,
            };

            let edge = &mut self.edge_pool[edge_index as usize];
            edge.winding = winding;
            edge.slope = slope;
            edge.x = x;
            edge.y_bottom = (iye - 1) as i16;
            edge.next = self.edge_table[table_index as usize];
            self.edge_table[table_index as usize] = edge_index;
        }

        true
    }

    // The convex active list holds exactly two edges. When both are
    // near-vertical the whole rectangle down to the shorter edge's
    // bottom is emitted as one span and the taller edge is re-bucketed.
    fn scan_line_convex(&mut self, y: i32, span: &mut SpanFn) {
        let index = self.active_edges;
        if index == 0 {
            return;
        }

        let edge = self.edge_pool[index as usize];
        let index_next = edge.next;
        if index_next == 0 {
            return;
        }

        let edge_next = self.edge_pool[index_next as usize];

        let mut ye = y + 1;
        if edge.slope.abs() <= SLOPE_NEAR_ZERO && edge_next.slope.abs() <= SLOPE_NEAR_ZERO {
            let (min_bottom, max_bottom, index_max) = if edge.y_bottom > edge_next.y_bottom {
                (edge_next.y_bottom, edge.y_bottom, index)
            } else {
                (edge.y_bottom, edge_next.y_bottom, index_next)
            };

            ye = min_bottom as i32 + 1;
            self.active_edges = 0;

            if ye < max_bottom as i32 {
                let table_index = ye - self.table_base;
                if table_index >= 0 && (table_index as usize) < self.edge_table.len() {
                    self.edge_pool[index_max as usize].next = self.edge_table[table_index as usize];
                    self.edge_table[table_index as usize] = index_max;
                }
            }
        }

        let lx = fdot16::round_to_i32(edge.x);
        let rx = fdot16::round_to_i32(edge_next.x);
        if rx > lx {
            span(lx, rx, y, ye);
        }
    }

    // Walks the active edges left to right accumulating the winding and
    // emitting inside spans. Conjoined spans are merged before emission.
    fn scan_line_concave(&mut self, y: i32, rule: FillRule, span: &mut SpanFn) {
        let mut winding = 0i32;
        let mut cache: Option<(i32, i32)> = None;
        let mut index = self.active_edges;

        while index != 0 {
            let edge = self.edge_pool[index as usize];
            winding += i32::from(edge.winding);

            let index_next = edge.next;
            if index_next == 0 {
                break;
            }

            let edge_next = self.edge_pool[index_next as usize];
            debug_assert!(edge.x <= edge_next.x);

            let inside = match rule {
                FillRule::EvenOdd => winding & 1 != 0,
                FillRule::Winding => winding != 0,
            };

            if inside {
                let lx = fdot16::round_to_i32(edge.x);
                let rx = fdot16::round_to_i32(edge_next.x);
                cache = match cache {
                    None => Some((lx, rx)),
                    Some((cl, cr)) if cr == lx => Some((cl, rx)),
                    Some((cl, cr)) => {
                        if cr > cl {
                            span(cl, cr, y, y + 1);
                        }
                        Some((lx, rx))
                    }
                };
            }

            index = index_next;
        }

        if let Some((cl, cr)) = cache {
            if cr > cl {
                span(cl, cr, y, y + 1);
            }
        }
    }

    // Advances every active edge to the next scanline: finished edges
    // are unlinked, the rest step their x by the slope. Returns whether
    // the list is still sorted by x.
    fn scan_next(&mut self, y: i32) -> bool {
        let mut first = true;
        let mut order = true;
        let mut x_prev: FDot16 = 0;
        let mut index_prev: u16 = 0;
        let mut active = self.active_edges;
        let mut index = active;

        while index != 0 {
            let edge = self.edge_pool[index as usize];
            if i32::from(edge.y_bottom) < y + 1 {
                index = edge.next;
                if index_prev == 0 {
                    active = index;
                } else {
                    self.edge_pool[index_prev as usize].next = index;
                }
                continue;
            }

            let new_x = edge.x + edge.slope;
            self.edge_pool[index as usize].x = new_x;

            if first {
                first = false;
            } else if order && new_x < x_prev {
                order = false;
            }

            x_prev = new_x;
            index_prev = index;
            index = edge.next;
        }

        self.active_edges = active;
        order
    }

    fn active_append(&mut self, mut index: u16) {
        while index != 0 {
            let next = self.edge_pool[index as usize].next;
            self.edge_pool[index as usize].next = self.active_edges;
            self.active_edges = index;
            index = next;
        }
    }

    fn active_sorted_append(&mut self, mut index: u16) {
        while index != 0 {
            let next = self.edge_pool[index as usize].next;
            self.active_sorted_insert(index);
            index = next;
        }
    }

    // Keeps the active list ascending by (x, slope). Edges sharing a top
    // vertex sort by slope so the left-turning edge comes first.
    fn active_sorted_insert(&mut self, edge_index: u16) {
        let (x, slope) = {
            let edge = &self.edge_pool[edge_index as usize];
            (edge.x, edge.slope)
        };

        self.edge_pool[edge_index as usize].next = 0;
        if self.active_edges == 0 {
            self.active_edges = edge_index;
            return;
        }

        let mut prev: u16 = 0;
        let mut curr = self.active_edges;
        while curr != 0 {
            debug_assert_ne!(curr, edge_index);
            let active = self.edge_pool[curr as usize];
            if x < active.x || (x == active.x && slope < active.slope) {
                break;
            }

            prev = curr;
            curr = active.next;
        }

        if prev == 0 {
            self.edge_pool[edge_index as usize].next = self.active_edges;
            self.active_edges = edge_index;
        } else {
            self.edge_pool[edge_index as usize].next = curr;
            self.edge_pool[prev as usize].next = edge_index;
        }
    }

    // In-place sort of the active list: payloads are swapped between
    // nodes, links stay put.
    fn active_sort(&mut self) {
        let mut index = self.active_edges;
        while index != 0 {
            let mut index_next = self.edge_pool[index as usize].next;
            while index_next != 0 {
                let a = self.edge_pool[index as usize];
                let b = self.edge_pool[index_next as usize];
                if a.x > b.x || (a.x == b.x && a.slope > b.slope) {
                    let mut new_a = b;
                    let mut new_b = a;
                    new_a.next = a.next;
                    new_b.next = b.next;
                    self.edge_pool[index as usize] = new_a;
                    self.edge_pool[index_next as usize] = new_b;
                }
                index_next = self.edge_pool[index_next as usize].next;
            }
            index = self.edge_pool[index as usize].next;
        }
    }
}
