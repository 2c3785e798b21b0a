// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use vexel_path::Stroke;

use crate::color::{Color, ALPHA_U8_OPAQUE};

/// A paint mode.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PaintMode {
    /// Fill the shape's interior.
    Fill,
    /// Stroke the shape's outline.
    Stroke,
    /// Fill, then stroke.
    FillStroke,
}

impl PaintMode {
    pub(crate) fn has_fill(self) -> bool {
        matches!(self, PaintMode::Fill | PaintMode::FillStroke)
    }

    pub(crate) fn has_stroke(self) -> bool {
        matches!(self, PaintMode::Stroke | PaintMode::FillStroke)
    }
}

/// A path filling rule.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillRule {
    /// "Inside" is an odd number of edge crossings.
    EvenOdd,
    /// "Inside" is a non-zero sum of signed edge crossings.
    Winding,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::EvenOdd
    }
}

/// An opaque texture handle.
///
/// The rendering core carries it through without interpreting it;
/// resolving the handle belongs to the embedding application.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Texture(pub u32);

/// Drawing parameters.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Paint {
    /// Fill, stroke or both.
    ///
    /// Default: Fill
    pub mode: PaintMode,

    /// Enables anti-aliased painting. Advisory; honored by the writer
    /// where the pixmap supports it.
    ///
    /// Default: false
    pub anti_alias: bool,

    /// Enables bitmap filtering for texture draws. Advisory.
    ///
    /// Default: false
    pub filter_bitmap: bool,

    /// The paint color.
    ///
    /// Default: black
    pub color: Color,

    /// A global alpha applied on top of the color.
    ///
    /// Default: 255
    pub alpha: u8,

    /// Stroke properties.
    pub stroke: Stroke,

    /// The fill rule.
    ///
    /// Default: EvenOdd
    pub fill_rule: FillRule,

    /// An optional texture.
    ///
    /// Default: None
    pub texture: Option<Texture>,
}

impl Default for Paint {
    fn default() -> Self {
        Paint {
            mode: PaintMode::Fill,
            anti_alias: false,
            filter_bitmap: false,
            color: Color::BLACK,
            alpha: ALPHA_U8_OPAQUE,
            stroke: Stroke::default(),
            fill_rule: FillRule::default(),
            texture: None,
        }
    }
}

impl Paint {
    /// Sets the paint color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the paint color from components.
    pub fn set_color_rgba8(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = Color::from_rgba8(r, g, b, a);
    }

    /// Sets the stroke width.
    ///
    /// Negative widths are refused and leave the paint unchanged.
    pub fn set_stroke_width(&mut self, width: f32) -> bool {
        if !(width >= 0.0) {
            return false;
        }

        self.stroke.width = width;
        true
    }

    /// Sets the miter limit.
    ///
    /// Values below 1 are refused and leave the paint unchanged.
    pub fn set_miter_limit(&mut self, miter_limit: f32) -> bool {
        if !(miter_limit >= 1.0) {
            return false;
        }

        self.stroke.miter_limit = miter_limit;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let paint = Paint::default();
        assert_eq!(paint.mode, PaintMode::Fill);
        assert_eq!(paint.stroke.width, 1.0);
        assert_eq!(paint.stroke.miter_limit, 4.0);
        assert_eq!(paint.alpha, 255);
        assert_eq!(paint.fill_rule, FillRule::EvenOdd);
        assert_eq!(paint.texture, None);
    }

    #[test]
    fn invalid_values_are_refused() {
        let mut paint = Paint::default();
        assert!(!paint.set_stroke_width(-2.0));
        assert_eq!(paint.stroke.width, 1.0);
        assert!(!paint.set_stroke_width(f32::NAN));
        assert!(!paint.set_miter_limit(0.5));
        assert_eq!(paint.stroke.miter_limit, 4.0);
        assert!(paint.set_stroke_width(3.0));
        assert_eq!(paint.stroke.width, 3.0);
    }
}
