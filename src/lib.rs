/*!
`vexel` is a lightweight 2D vector graphics rasterizer.

Paths built from lines and Bezier curves are flattened into polygons,
optionally run through a stroker, and scan-converted into pixel spans
on a bitmap surface. Pixel formats are described by small function
tables, so the hot loops never branch on the format.
*/

#![doc(html_root_url = "https://docs.rs/vexel/0.1.0")]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::approx_constant)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod bitmap;
mod canvas;
mod color;
mod device;
mod fixed_point;
mod hairline;
mod paint;
mod pixmap;
mod raster;
mod writer;

pub use vexel_path::*;

pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use color::{AlphaU8, Color, ALPHA_U8_OPAQUE, ALPHA_U8_TRANSPARENT};
pub use device::{BitmapDevice, Device};
pub use paint::{FillRule, Paint, PaintMode, Texture};
pub use pixmap::{Pixel, PixelFormat, Pixmap};
pub use raster::PolygonRaster;
pub use writer::BitmapWriter;
