// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Pixel format capability tables.
//!
//! A [`Pixmap`] is a table of functions for exactly one pixel format and
//! blending mode. The table is resolved once when a surface is bound;
//! the rasterizer and writer never branch on the format per pixel.

use crate::color::{Color, ALPHA_U8_OPAQUE};

/// A packed native pixel. Interpretation belongs to the pixmap.
pub type Pixel = u32;

/// A pixel format id: family plus byte order.
///
/// Additions append new ids; existing ones are stable.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PixelFormat {
    Xrgb8888Le,
    Xrgb8888Be,
    Argb8888Le,
    Argb8888Be,
    Rgb888Le,
    Rgb888Be,
    Rgb565Le,
    Rgb565Be,
}

impl PixelFormat {
    /// Returns the number of bytes one pixel occupies.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Xrgb8888Le
            | PixelFormat::Xrgb8888Be
            | PixelFormat::Argb8888Le
            | PixelFormat::Argb8888Be => 4,
            PixelFormat::Rgb888Le | PixelFormat::Rgb888Be => 3,
            PixelFormat::Rgb565Le | PixelFormat::Rgb565Be => 2,
        }
    }

    /// Returns the number of bits one pixel occupies.
    pub fn bits_per_pixel(self) -> usize {
        self.bytes_per_pixel() * 8
    }
}

/// A pixel format function table.
///
/// All data slices point at the first byte of the target pixel inside a
/// surface row.
#[derive(Copy, Clone)]
pub struct Pixmap {
    name: &'static str,
    format: PixelFormat,
    pixel: fn(Color) -> Pixel,
    color: fn(Pixel) -> Color,
    pixel_read: fn(&[u8]) -> Pixel,
    pixel_write: fn(&mut [u8], Pixel, u8),
    pixel_copy: fn(&mut [u8], &[u8], u8),
    pixels_fill: fn(&mut [u8], Pixel, usize, u8),
}

impl core::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pixmap")
            .field("name", &self.name)
            .field("format", &self.format)
            .finish()
    }
}

impl Pixmap {
    /// Returns the table for a format.
    ///
    /// `alpha` selects between the opaque and the blending variant:
    /// fully opaque paints get the faster opaque table.
    pub fn lookup(format: PixelFormat, alpha: u8) -> Option<&'static Pixmap> {
        let opaque = alpha == ALPHA_U8_OPAQUE;
        Some(match format {
            PixelFormat::Xrgb8888Le => {
                if opaque {
                    &XRGB8888_LE_OPAQUE
                } else {
                    &XRGB8888_LE_ALPHA
                }
            }
            PixelFormat::Xrgb8888Be => {
                if opaque {
                    &XRGB8888_BE_OPAQUE
                } else {
                    &XRGB8888_BE_ALPHA
                }
            }
            PixelFormat::Argb8888Le => {
                if opaque {
                    &ARGB8888_LE_OPAQUE
                } else {
                    &ARGB8888_LE_ALPHA
                }
            }
            PixelFormat::Argb8888Be => {
                if opaque {
                    &ARGB8888_BE_OPAQUE
                } else {
                    &ARGB8888_BE_ALPHA
                }
            }
            PixelFormat::Rgb888Le => {
                if opaque {
                    &RGB888_LE_OPAQUE
                } else {
                    &RGB888_LE_ALPHA
                }
            }
            PixelFormat::Rgb888Be => {
                if opaque {
                    &RGB888_BE_OPAQUE
                } else {
                    &RGB888_BE_ALPHA
                }
            }
            PixelFormat::Rgb565Le => {
                if opaque {
                    &RGB565_LE_OPAQUE
                } else {
                    &RGB565_LE_ALPHA
                }
            }
            PixelFormat::Rgb565Be => {
                if opaque {
                    &RGB565_BE_OPAQUE
                } else {
                    &RGB565_BE_ALPHA
                }
            }
        })
    }

    /// Returns the table's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the table's format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the bits per pixel.
    pub fn bits_per_pixel(&self) -> usize {
        self.format.bits_per_pixel()
    }

    /// Returns the bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Packs a color into a native pixel.
    pub fn color_to_pixel(&self, color: Color) -> Pixel {
        (self.pixel)(color)
    }

    /// Unpacks a native pixel into a color.
    pub fn pixel_to_color(&self, pixel: Pixel) -> Color {
        (self.color)(pixel)
    }

    /// Reads one pixel.
    pub fn read_pixel(&self, data: &[u8]) -> Pixel {
        (self.pixel_read)(data)
    }

    /// Writes one pixel, blending when this is an alpha table.
    pub fn write_pixel(&self, data: &mut [u8], pixel: Pixel, alpha: u8) {
        (self.pixel_write)(data, pixel, alpha)
    }

    /// Copies one pixel, blending when this is an alpha table.
    pub fn copy_pixel(&self, dst: &mut [u8], src: &[u8], alpha: u8) {
        (self.pixel_copy)(dst, src, alpha)
    }

    /// Fills a run of `count` pixels.
    pub fn fill_pixels(&self, data: &mut [u8], pixel: Pixel, count: usize, alpha: u8) {
        (self.pixels_fill)(data, pixel, count, alpha)
    }
}

fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> Pixel {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/* The split-lane blend: both 8-bit lanes of a 0x00XX00XX pair are
 * interpolated at once with d + (s - d) * a >> 8. Wrapping arithmetic
 * keeps the borrow self-consistent after masking. */
fn rgb32_blend(d: u32, s: u32, a: u8) -> u32 {
    let a = a as u32;
    let hs = (s >> 8) & 0x00ff_00ff;
    let hd = (d >> 8) & 0x00ff_00ff;
    let ls = s & 0x00ff_00ff;
    let ld = d & 0x00ff_00ff;
    let hd = (a.wrapping_mul(hs.wrapping_sub(hd)) >> 8).wrapping_add(hd) & 0x00ff_00ff;
    let ld = (a.wrapping_mul(ls.wrapping_sub(ld)) >> 8).wrapping_add(ld) & 0x00ff_00ff;
    (hd << 8) | ld
}

fn channel_blend(d: u8, s: u8, a: u8) -> u8 {
    (d as i32 + (((s as i32 - d as i32) * a as i32) >> 8)) as u8
}

// u32 memory accessors

fn read_u32_le(data: &[u8]) -> Pixel {
    u32::from_le_bytes(*arrayref::array_ref![data, 0, 4])
}

fn read_u32_be(data: &[u8]) -> Pixel {
    u32::from_be_bytes(*arrayref::array_ref![data, 0, 4])
}

fn write_u32_le(data: &mut [u8], p: Pixel) {
    *arrayref::array_mut_ref![data, 0, 4] = p.to_le_bytes();
}

fn write_u32_be(data: &mut [u8], p: Pixel) {
    *arrayref::array_mut_ref![data, 0, 4] = p.to_be_bytes();
}

// u24 memory accessors

fn read_u24_le(data: &[u8]) -> Pixel {
    data[0] as u32 | (data[1] as u32) << 8 | (data[2] as u32) << 16
}

fn read_u24_be(data: &[u8]) -> Pixel {
    (data[0] as u32) << 16 | (data[1] as u32) << 8 | data[2] as u32
}

fn write_u24_le(data: &mut [u8], p: Pixel) {
    data[0] = p as u8;
    data[1] = (p >> 8) as u8;
    data[2] = (p >> 16) as u8;
}

fn write_u24_be(data: &mut [u8], p: Pixel) {
    data[0] = (p >> 16) as u8;
    data[1] = (p >> 8) as u8;
    data[2] = p as u8;
}

// u16 memory accessors

fn read_u16_le(data: &[u8]) -> Pixel {
    u16::from_le_bytes(*arrayref::array_ref![data, 0, 2]) as u32
}

fn read_u16_be(data: &[u8]) -> Pixel {
    u16::from_be_bytes(*arrayref::array_ref![data, 0, 2]) as u32
}

fn write_u16_le(data: &mut [u8], p: Pixel) {
    *arrayref::array_mut_ref![data, 0, 2] = (p as u16).to_le_bytes();
}

fn write_u16_be(data: &mut [u8], p: Pixel) {
    *arrayref::array_mut_ref![data, 0, 2] = (p as u16).to_be_bytes();
}

// xrgb8888: 32-bit, alpha byte forced opaque

fn xrgb8888_pixel(c: Color) -> Pixel {
    pack_argb(ALPHA_U8_OPAQUE, c.red(), c.green(), c.blue())
}

fn xrgb8888_color(p: Pixel) -> Color {
    Color::from_rgb8((p >> 16) as u8, (p >> 8) as u8, p as u8)
}

// argb8888: 32-bit with a real alpha byte

fn argb8888_pixel(c: Color) -> Pixel {
    pack_argb(c.alpha(), c.red(), c.green(), c.blue())
}

fn argb8888_color(p: Pixel) -> Color {
    Color::from_rgba8((p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8)
}

// rgb888: 24-bit

fn rgb888_pixel(c: Color) -> Pixel {
    (c.red() as u32) << 16 | (c.green() as u32) << 8 | c.blue() as u32
}

fn rgb888_color(p: Pixel) -> Color {
    Color::from_rgb8((p >> 16) as u8, (p >> 8) as u8, p as u8)
}

fn rgb888_blend(d: Pixel, s: Pixel, a: u8) -> Pixel {
    let r = channel_blend((d >> 16) as u8, (s >> 16) as u8, a);
    let g = channel_blend((d >> 8) as u8, (s >> 8) as u8, a);
    let b = channel_blend(d as u8, s as u8, a);
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

// rgb565: 16-bit, 5/6/5 channels

fn rgb565_pixel(c: Color) -> Pixel {
    ((c.red() as u32 >> 3) << 11) | ((c.green() as u32 >> 2) << 5) | (c.blue() as u32 >> 3)
}

fn rgb565_color(p: Pixel) -> Color {
    let r = ((p >> 11) & 0x1f) as u8;
    let g = ((p >> 5) & 0x3f) as u8;
    let b = (p & 0x1f) as u8;
    Color::from_rgb8(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
}

fn rgb565_blend(d: Pixel, s: Pixel, a: u8) -> Pixel {
    let dc = rgb565_color(d);
    let sc = rgb565_color(s);
    let r = channel_blend(dc.red(), sc.red(), a);
    let g = channel_blend(dc.green(), sc.green(), a);
    let b = channel_blend(dc.blue(), sc.blue(), a);
    rgb565_pixel(Color::from_rgb8(r, g, b))
}

// Per-variant write/copy/fill functions. The byte order is baked into
// the table, never tested at run time.

macro_rules! pixmap_variants {
    (
        $family:ident, $name:expr, $bytes:expr,
        $read:ident, $write:ident, $blend:ident,
        $pixel:ident, $color:ident,
        $le_opaque:ident, $le_alpha:ident, $be_opaque:ident, $be_alpha:ident,
        $fmt_le:expr, $fmt_be:expr
    ) => {
        mod $family {
            use super::*;

            pub fn write_le_opaque(data: &mut [u8], p: Pixel, _alpha: u8) {
                super::$write::<true>(data, p);
            }

            pub fn write_be_opaque(data: &mut [u8], p: Pixel, _alpha: u8) {
                super::$write::<false>(data, p);
            }

            pub fn write_le_alpha(data: &mut [u8], p: Pixel, alpha: u8) {
                let d = super::$read::<true>(data);
                super::$write::<true>(data, super::$blend(d, p, alpha));
            }

            pub fn write_be_alpha(data: &mut [u8], p: Pixel, alpha: u8) {
                let d = super::$read::<false>(data);
                super::$write::<false>(data, super::$blend(d, p, alpha));
            }

            pub fn copy_opaque(dst: &mut [u8], src: &[u8], _alpha: u8) {
                dst[..$bytes].copy_from_slice(&src[..$bytes]);
            }

            pub fn copy_le_alpha(dst: &mut [u8], src: &[u8], alpha: u8) {
                let d = super::$read::<true>(dst);
                let s = super::$read::<true>(src);
                super::$write::<true>(dst, super::$blend(d, s, alpha));
            }

            pub fn copy_be_alpha(dst: &mut [u8], src: &[u8], alpha: u8) {
                let d = super::$read::<false>(dst);
                let s = super::$read::<false>(src);
                super::$write::<false>(dst, super::$blend(d, s, alpha));
            }

            pub fn fill_le_opaque(data: &mut [u8], p: Pixel, count: usize, _alpha: u8) {
                for chunk in data[..count * $bytes].chunks_exact_mut($bytes) {
                    super::$write::<true>(chunk, p);
                }
            }

            pub fn fill_be_opaque(data: &mut [u8], p: Pixel, count: usize, _alpha: u8) {
                for chunk in data[..count * $bytes].chunks_exact_mut($bytes) {
                    super::$write::<false>(chunk, p);
                }
            }

            pub fn fill_le_alpha(data: &mut [u8], p: Pixel, count: usize, alpha: u8) {
                for chunk in data[..count * $bytes].chunks_exact_mut($bytes) {
                    let d = super::$read::<true>(chunk);
                    super::$write::<true>(chunk, super::$blend(d, p, alpha));
                }
            }

            pub fn fill_be_alpha(data: &mut [u8], p: Pixel, count: usize, alpha: u8) {
                for chunk in data[..count * $bytes].chunks_exact_mut($bytes) {
                    let d = super::$read::<false>(chunk);
                    super::$write::<false>(chunk, super::$blend(d, p, alpha));
                }
            }

            pub fn read_le(data: &[u8]) -> Pixel {
                super::$read::<true>(data)
            }

            pub fn read_be(data: &[u8]) -> Pixel {
                super::$read::<false>(data)
            }
        }

        static $le_opaque: Pixmap = Pixmap {
            name: $name,
            format: $fmt_le,
            pixel: $pixel,
            color: $color,
            pixel_read: $family::read_le,
            pixel_write: $family::write_le_opaque,
            pixel_copy: $family::copy_opaque,
            pixels_fill: $family::fill_le_opaque,
        };

        static $le_alpha: Pixmap = Pixmap {
            name: $name,
            format: $fmt_le,
            pixel: $pixel,
            color: $color,
            pixel_read: $family::read_le,
            pixel_write: $family::write_le_alpha,
            pixel_copy: $family::copy_le_alpha,
            pixels_fill: $family::fill_le_alpha,
        };

        static $be_opaque: Pixmap = Pixmap {
            name: $name,
            format: $fmt_be,
            pixel: $pixel,
            color: $color,
            pixel_read: $family::read_be,
            pixel_write: $family::write_be_opaque,
            pixel_copy: $family::copy_opaque,
            pixels_fill: $family::fill_be_opaque,
        };

        static $be_alpha: Pixmap = Pixmap {
            name: $name,
            format: $fmt_be,
            pixel: $pixel,
            color: $color,
            pixel_read: $family::read_be,
            pixel_write: $family::write_be_alpha,
            pixel_copy: $family::copy_be_alpha,
            pixels_fill: $family::fill_be_alpha,
        };
    };
}

// Endian-parametrized accessors feeding the macro above.

fn rw32_read<const LE: bool>(data: &[u8]) -> Pixel {
    if LE {
        read_u32_le(data)
    } else {
        read_u32_be(data)
    }
}

fn rw32_write<const LE: bool>(data: &mut [u8], p: Pixel) {
    if LE {
        write_u32_le(data, p)
    } else {
        write_u32_be(data, p)
    }
}

fn rw24_read<const LE: bool>(data: &[u8]) -> Pixel {
    if LE {
        read_u24_le(data)
    } else {
        read_u24_be(data)
    }
}

fn rw24_write<const LE: bool>(data: &mut [u8], p: Pixel) {
    if LE {
        write_u24_le(data, p)
    } else {
        write_u24_be(data, p)
    }
}

fn rw16_read<const LE: bool>(data: &[u8]) -> Pixel {
    if LE {
        read_u16_le(data)
    } else {
        read_u16_be(data)
    }
}

fn rw16_write<const LE: bool>(data: &mut [u8], p: Pixel) {
    if LE {
        write_u16_le(data, p)
    } else {
        write_u16_be(data, p)
    }
}

pixmap_variants!(
    xrgb8888, "xrgb8888", 4,
    rw32_read, rw32_write, rgb32_blend,
    xrgb8888_pixel, xrgb8888_color,
    XRGB8888_LE_OPAQUE, XRGB8888_LE_ALPHA, XRGB8888_BE_OPAQUE, XRGB8888_BE_ALPHA,
    PixelFormat::Xrgb8888Le, PixelFormat::Xrgb8888Be
);

pixmap_variants!(
    argb8888, "argb8888", 4,
    rw32_read, rw32_write, rgb32_blend,
    argb8888_pixel, argb8888_color,
    ARGB8888_LE_OPAQUE, ARGB8888_LE_ALPHA, ARGB8888_BE_OPAQUE, ARGB8888_BE_ALPHA,
    PixelFormat::Argb8888Le, PixelFormat::Argb8888Be
);

pixmap_variants!(
    rgb888, "rgb888", 3,
    rw24_read, rw24_write, rgb888_blend,
    rgb888_pixel, rgb888_color,
    RGB888_LE_OPAQUE, RGB888_LE_ALPHA, RGB888_BE_OPAQUE, RGB888_BE_ALPHA,
    PixelFormat::Rgb888Le, PixelFormat::Rgb888Be
);

pixmap_variants!(
    rgb565, "rgb565", 2,
    rw16_read, rw16_write, rgb565_blend,
    rgb565_pixel, rgb565_color,
    RGB565_LE_OPAQUE, RGB565_LE_ALPHA, RGB565_BE_OPAQUE, RGB565_BE_ALPHA,
    PixelFormat::Rgb565Le, PixelFormat::Rgb565Be
);

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: &[PixelFormat] = &[
        PixelFormat::Xrgb8888Le,
        PixelFormat::Xrgb8888Be,
        PixelFormat::Argb8888Le,
        PixelFormat::Argb8888Be,
        PixelFormat::Rgb888Le,
        PixelFormat::Rgb888Be,
        PixelFormat::Rgb565Le,
        PixelFormat::Rgb565Be,
    ];

    #[test]
    fn pixel_round_trip() {
        // color_to_pixel(pixel_to_color(p)) == p for opaque pixels.
        for &format in FORMATS {
            let pm = Pixmap::lookup(format, 255).unwrap();
            let samples: &[Pixel] = match format {
                PixelFormat::Rgb565Le | PixelFormat::Rgb565Be => {
                    &[0x0000, 0xffff, 0xf800, 0x07e0, 0x001f, 0x1234]
                }
                PixelFormat::Rgb888Le | PixelFormat::Rgb888Be => {
                    &[0x000000, 0xffffff, 0x123456, 0xff0000]
                }
                _ => &[0xff000000, 0xffffffff, 0xff123456, 0xffff0000],
            };
            for &p in samples {
                let c = pm.pixel_to_color(p);
                assert_eq!(pm.color_to_pixel(c), p, "{}", pm.name());
            }
        }
    }

    #[test]
    fn opaque_color_round_trip() {
        let c = Color::from_rgb8(0x12, 0x34, 0x56);
        for &format in FORMATS {
            match format {
                PixelFormat::Rgb565Le | PixelFormat::Rgb565Be => continue,
                _ => {}
            }
            let pm = Pixmap::lookup(format, 255).unwrap();
            assert_eq!(pm.pixel_to_color(pm.color_to_pixel(c)), c, "{}", pm.name());
        }
    }

    #[test]
    fn byte_order() {
        let c = Color::from_rgb8(0x11, 0x22, 0x33);

        let le = Pixmap::lookup(PixelFormat::Xrgb8888Le, 255).unwrap();
        let mut buf = [0u8; 4];
        le.write_pixel(&mut buf, le.color_to_pixel(c), 255);
        assert_eq!(buf, [0x33, 0x22, 0x11, 0xff]);

        let be = Pixmap::lookup(PixelFormat::Xrgb8888Be, 255).unwrap();
        let mut buf = [0u8; 4];
        be.write_pixel(&mut buf, be.color_to_pixel(c), 255);
        assert_eq!(buf, [0xff, 0x11, 0x22, 0x33]);

        let rgb = Pixmap::lookup(PixelFormat::Rgb888Be, 255).unwrap();
        let mut buf = [0u8; 3];
        rgb.write_pixel(&mut buf, rgb.color_to_pixel(c), 255);
        assert_eq!(buf, [0x11, 0x22, 0x33]);
    }

    #[test]
    fn blend_halfway() {
        let pm = Pixmap::lookup(PixelFormat::Xrgb8888Le, 128).unwrap();
        let mut buf = [0u8; 4];
        pm.write_pixel(&mut buf, 0x00ffffff, 128);
        // d + (s - d) * 128 >> 8 = 127 per channel
        let got = pm.read_pixel(&buf);
        assert_eq!(got & 0x00ffffff, 0x007f7f7f);
    }

    #[test]
    fn fill_run() {
        let pm = Pixmap::lookup(PixelFormat::Rgb565Le, 255).unwrap();
        let mut buf = [0u8; 8];
        pm.fill_pixels(&mut buf, 0xf800, 3, 255);
        assert_eq!(buf, [0x00, 0xf8, 0x00, 0xf8, 0x00, 0xf8, 0x00, 0x00]);
    }

    #[test]
    fn opaque_and_alpha_variants_differ() {
        let opaque = Pixmap::lookup(PixelFormat::Xrgb8888Le, 255).unwrap();
        let alpha = Pixmap::lookup(PixelFormat::Xrgb8888Le, 100).unwrap();

        let mut a = [0u8; 4];
        let mut b = [0u8; 4];
        opaque.write_pixel(&mut a, 0x00ffffff, 255);
        alpha.write_pixel(&mut b, 0x00ffffff, 100);
        assert_ne!(a, b);
    }
}
