// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::bitmap::Bitmap;
use crate::paint::Paint;
use crate::pixmap::{Pixel, Pixmap};

/// A paint-to-bitmap binding.
///
/// Resolves the pixmap table once, caches the packed pixel and alpha,
/// and exposes the primitive drawing operations every renderer reduces
/// to. All coordinates are clipped to the surface.
pub struct BitmapWriter<'a> {
    bitmap: &'a mut Bitmap,
    pixmap: &'static Pixmap,
    pixel: Pixel,
    alpha: u8,
    btp: usize,
    row_bytes: usize,
}

impl<'a> BitmapWriter<'a> {
    /// Binds a paint to a bitmap.
    ///
    /// Returns `None` when no pixmap table exists for the bitmap's
    /// format.
    pub fn new(bitmap: &'a mut Bitmap, paint: &Paint) -> Option<Self> {
        let pixmap = Pixmap::lookup(bitmap.format(), paint.alpha)?;
        let pixel = pixmap.color_to_pixel(paint.color);
        let btp = bitmap.format().bytes_per_pixel();
        let row_bytes = bitmap.row_bytes();
        Some(BitmapWriter {
            bitmap,
            pixmap,
            pixel,
            alpha: paint.alpha,
            btp,
            row_bytes,
        })
    }

    /// Draws a single pixel.
    pub fn draw_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as u32 >= self.bitmap.width() || y as u32 >= self.bitmap.height() {
            return;
        }

        let at = y as usize * self.row_bytes + x as usize * self.btp;
        let data = &mut self.bitmap.data_mut()[at..at + self.btp];
        self.pixmap.write_pixel(data, self.pixel, self.alpha);
    }

    /// Draws a horizontal run of pixels.
    pub fn draw_hline(&mut self, x: i32, y: i32, w: i32) {
        if y < 0 || y as u32 >= self.bitmap.height() || w <= 0 {
            return;
        }

        let x0 = x.max(0);
        let x1 = (x + w).min(self.bitmap.width() as i32);
        if x1 <= x0 {
            return;
        }

        let at = y as usize * self.row_bytes + x0 as usize * self.btp;
        let count = (x1 - x0) as usize;
        let data = &mut self.bitmap.data_mut()[at..at + count * self.btp];
        self.pixmap.fill_pixels(data, self.pixel, count, self.alpha);
    }

    /// Draws a vertical run of pixels.
    pub fn draw_vline(&mut self, x: i32, y: i32, h: i32) {
        if x < 0 || x as u32 >= self.bitmap.width() || h <= 0 {
            return;
        }

        let y0 = y.max(0);
        let y1 = (y + h).min(self.bitmap.height() as i32);
        for yy in y0..y1 {
            let at = yy as usize * self.row_bytes + x as usize * self.btp;
            let data = &mut self.bitmap.data_mut()[at..at + self.btp];
            self.pixmap.write_pixel(data, self.pixel, self.alpha);
        }
    }

    /// Fills a rectangle of pixels.
    ///
    /// A full-width rect over tightly packed rows degenerates into one
    /// pixel run.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.bitmap.width() as i32);
        let y1 = (y + h).min(self.bitmap.height() as i32);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let count = (x1 - x0) as usize;
        if x0 == 0 && count * self.btp == self.row_bytes {
            let at = y0 as usize * self.row_bytes;
            let total = (y1 - y0) as usize * count;
            let data = &mut self.bitmap.data_mut()[at..at + total * self.btp];
            self.pixmap.fill_pixels(data, self.pixel, total, self.alpha);
            return;
        }

        for yy in y0..y1 {
            let at = yy as usize * self.row_bytes + x0 as usize * self.btp;
            let data = &mut self.bitmap.data_mut()[at..at + count * self.btp];
            self.pixmap.fill_pixels(data, self.pixel, count, self.alpha);
        }
    }
}

impl core::fmt::Debug for BitmapWriter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitmapWriter")
            .field("pixmap", &self.pixmap)
            .field("pixel", &self.pixel)
            .field("alpha", &self.alpha)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pixmap::PixelFormat;

    fn writer_fixture(w: u32, h: u32) -> (Bitmap, Paint) {
        let bitmap = Bitmap::new(w, h, PixelFormat::Xrgb8888Le).unwrap();
        let mut paint = Paint::default();
        paint.color = Color::from_rgb8(255, 0, 0);
        (bitmap, paint)
    }

    #[test]
    fn hline_clips() {
        let (mut bitmap, paint) = writer_fixture(4, 4);
        {
            let mut writer = BitmapWriter::new(&mut bitmap, &paint).unwrap();
            writer.draw_hline(-2, 1, 10);
            writer.draw_hline(0, -1, 4);
            writer.draw_hline(0, 4, 4);
        }

        let pixels = bitmap.pixels32().unwrap();
        let lit = pixels.iter().filter(|&&p| p != 0).count();
        assert_eq!(lit, 4);
        assert!(pixels[4..8].iter().all(|&p| p == 0xffff0000));
    }

    #[test]
    fn full_width_rect_is_one_run() {
        let (mut bitmap, paint) = writer_fixture(4, 4);
        {
            let mut writer = BitmapWriter::new(&mut bitmap, &paint).unwrap();
            writer.draw_rect(0, 1, 4, 2);
        }

        let pixels = bitmap.pixels32().unwrap();
        let lit = pixels.iter().filter(|&&p| p != 0).count();
        assert_eq!(lit, 8);
    }

    #[test]
    fn pixel_out_of_bounds_is_ignored() {
        let (mut bitmap, paint) = writer_fixture(2, 2);
        {
            let mut writer = BitmapWriter::new(&mut bitmap, &paint).unwrap();
            writer.draw_pixel(-1, 0);
            writer.draw_pixel(0, 5);
            writer.draw_pixel(1, 1);
        }

        let pixels = bitmap.pixels32().unwrap();
        assert_eq!(pixels.iter().filter(|&&p| p != 0).count(), 1);
        assert_eq!(pixels[3], 0xffff0000);
    }
}
