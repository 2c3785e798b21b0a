// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Point;

/// An affine transformation matrix.
///
/// Stores a 2x3 matrix:
///
/// ```text
/// | sx kx tx |
/// | ky sy ty |
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub sx: f32,
    pub kx: f32,
    pub ky: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Creates a new `Transform` from values in row-major order.
    pub fn from_row(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Transform {
            sx,
            ky,
            kx,
            sy,
            tx,
            ty,
        }
    }

    /// Creates a translating transform.
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a scaling transform.
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Checks that the transform is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Checks that the transform has no skew component.
    pub fn has_no_skew(&self) -> bool {
        self.kx == 0.0 && self.ky == 0.0
    }

    /// Checks that both scale factors have absolute value one
    /// and there is no skew.
    ///
    /// The width==1 stroke fast path requires this.
    pub fn has_unit_scale(&self) -> bool {
        self.has_no_skew() && self.sx.abs() == 1.0 && self.sy.abs() == 1.0
    }

    /// Maps a single point.
    pub fn map_point(&self, p: Point) -> Point {
        Point::from_xy(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Maps a slice of points in-place.
    pub fn map_points(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }

        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Returns `self * other`.
    #[must_use]
    pub fn pre_concat(&self, other: &Transform) -> Self {
        concat(self, other)
    }

    /// Returns `other * self`.
    #[must_use]
    pub fn post_concat(&self, other: &Transform) -> Self {
        concat(other, self)
    }

    /// Appends a translation.
    #[must_use]
    pub fn pre_translate(&self, tx: f32, ty: f32) -> Self {
        self.pre_concat(&Transform::from_translate(tx, ty))
    }

    /// Appends a scale.
    #[must_use]
    pub fn pre_scale(&self, sx: f32, sy: f32) -> Self {
        self.pre_concat(&Transform::from_scale(sx, sy))
    }
}

fn concat(a: &Transform, b: &Transform) -> Transform {
    Transform::from_row(
        a.sx * b.sx + a.kx * b.ky,
        a.ky * b.sx + a.sy * b.ky,
        a.sx * b.kx + a.kx * b.sy,
        a.ky * b.kx + a.sy * b.sy,
        a.sx * b.tx + a.kx * b.ty + a.tx,
        a.ky * b.tx + a.sy * b.ty + a.ty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate() {
        let ts = Transform::from_translate(10.0, 20.0);
        assert_eq!(ts.map_point(Point::from_xy(1.0, 2.0)), Point::from_xy(11.0, 22.0));
        assert!(ts.has_unit_scale());
    }

    #[test]
    fn scale_then_translate() {
        let ts = Transform::from_translate(10.0, 20.0).pre_scale(2.0, 3.0);
        assert_eq!(ts.map_point(Point::from_xy(1.0, 1.0)), Point::from_xy(12.0, 23.0));
        assert!(!ts.has_unit_scale());
    }

    #[test]
    fn identity() {
        assert!(Transform::identity().is_identity());
        assert!(!Transform::from_translate(1.0, 0.0).is_identity());
    }
}
