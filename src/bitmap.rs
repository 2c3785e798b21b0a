// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::Color;
use crate::pixmap::{Pixmap, PixelFormat};

// 8K is one too big: 8K << supersample would overflow the 16.16 fixed
// point used by the rasterizer.
const MAX_DIM: u32 = 8192 - 1;

/// A pixel surface.
///
/// Owns its bytes; characterized by `(width, height, row_bytes, format)`
/// with `row_bytes >= width * bytes_per_pixel`.
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
    row_bytes: usize,
    format: PixelFormat,
}

impl Bitmap {
    /// Allocates a new bitmap filled with zero bytes.
    ///
    /// Zero or too large sizes are an error.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return None;
        }

        let row_bytes = width as usize * format.bytes_per_pixel();
        let data_len = row_bytes.checked_mul(height as usize)?;
        Some(Bitmap {
            data: vec![0; data_len],
            width,
            height,
            row_bytes,
            format,
        })
    }

    /// Wraps an externally produced buffer.
    ///
    /// `row_bytes` must cover a full row of pixels and `data` must cover
    /// `row_bytes * height`.
    pub fn from_data(
        data: Vec<u8>,
        width: u32,
        height: u32,
        row_bytes: usize,
        format: PixelFormat,
    ) -> Option<Self> {
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return None;
        }

        if row_bytes < width as usize * format.bytes_per_pixel() {
            return None;
        }

        if data.len() < row_bytes.checked_mul(height as usize)? {
            return None;
        }

        Some(Bitmap {
            data,
            width,
            height,
            row_bytes,
            format,
        })
    }

    /// Returns the bitmap's width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the bitmap's height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the byte length of one row, including padding.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Returns the bitmap's pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the bytes of one row.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.row_bytes;
        &mut self.data[start..start + self.row_bytes]
    }

    /// Returns the pixels as native u32 values.
    ///
    /// Only for 32-bit formats with no row padding.
    pub fn pixels32(&self) -> Option<&[u32]> {
        if self.format.bytes_per_pixel() != 4 {
            return None;
        }

        if self.row_bytes != self.width as usize * 4 {
            return None;
        }

        Some(bytemuck::cast_slice(&self.data))
    }

    /// Fills the entire bitmap with a color, ignoring alpha blending.
    pub fn fill(&mut self, color: Color) {
        // The opaque table exists for every format.
        let pixmap = match Pixmap::lookup(self.format, 255) {
            Some(pm) => pm,
            None => return,
        };

        let pixel = pixmap.color_to_pixel(color);
        let width = self.width as usize;
        for y in 0..self.height {
            pixmap.fill_pixels(self.row_mut(y), pixel, width, 255);
        }
    }

    /// Encodes the bitmap as PNG.
    ///
    /// Only 32-bit formats are supported.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> Option<Vec<u8>> {
        let pixmap = Pixmap::lookup(self.format, 255)?;
        if self.format.bytes_per_pixel() != 4 {
            return None;
        }

        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        let btp = self.format.bytes_per_pixel();
        for y in 0..self.height {
            let row_start = y as usize * self.row_bytes;
            for x in 0..self.width as usize {
                let at = row_start + x * btp;
                let color = pixmap.pixel_to_color(pixmap.read_pixel(&self.data[at..at + btp]));
                rgba.push(color.red());
                rgba.push(color.green());
                rgba.push(color.blue());
                rgba.push(color.alpha());
            }
        }

        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().ok()?;
            writer.write_image_data(&rgba).ok()?;
        }

        Some(data)
    }

    /// Saves the bitmap as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Option<()> {
        let data = self.encode_png()?;
        std::fs::write(path, data).ok()
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("row_bytes", &self.row_bytes)
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sizes() {
        assert!(Bitmap::new(0, 10, PixelFormat::Xrgb8888Le).is_none());
        assert!(Bitmap::new(10, 0, PixelFormat::Xrgb8888Le).is_none());
        assert!(Bitmap::new(10_000, 10, PixelFormat::Xrgb8888Le).is_none());
    }

    #[test]
    fn from_data_validates() {
        // row_bytes smaller than a row of pixels
        assert!(
            Bitmap::from_data(vec![0; 100], 10, 2, 10, PixelFormat::Xrgb8888Le).is_none()
        );
        // buffer too short
        assert!(
            Bitmap::from_data(vec![0; 10], 10, 2, 40, PixelFormat::Xrgb8888Le).is_none()
        );
        // padded rows are fine
        assert!(
            Bitmap::from_data(vec![0; 96], 10, 2, 48, PixelFormat::Xrgb8888Le).is_some()
        );
    }

    #[test]
    fn fill_writes_every_pixel() {
        let mut bitmap = Bitmap::new(4, 3, PixelFormat::Xrgb8888Le).unwrap();
        bitmap.fill(Color::from_rgb8(1, 2, 3));
        let pixels = bitmap.pixels32().unwrap();
        assert_eq!(pixels.len(), 12);
        assert!(pixels.iter().all(|&p| p == 0xff010203));
    }

    #[test]
    fn pixels32_requires_tight_32bit_rows() {
        let bitmap = Bitmap::new(4, 3, PixelFormat::Rgb888Le).unwrap();
        assert!(bitmap.pixels32().is_none());

        let padded =
            Bitmap::from_data(vec![0; 60], 4, 3, 20, PixelFormat::Xrgb8888Le).unwrap();
        assert!(padded.pixels32().is_none());
    }
}
