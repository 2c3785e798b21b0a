use vexel::*;

fn pt(x: f32, y: f32) -> Point {
    Point::from_xy(x, y)
}

#[test]
fn rgb565_rect_fill() {
    let mut canvas = Canvas::with_format(8, 8, PixelFormat::Rgb565Le).unwrap();
    canvas.paint_mut().set_color(Color::from_rgb8(255, 0, 0));
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 2.0, 1.0).unwrap());

    // Pure red packs to 0xf800; little endian puts the low byte first.
    let data = canvas.bitmap().data();
    assert_eq!(&data[0..4], &[0x00, 0xf8, 0x00, 0xf8]);
    assert_eq!(&data[4..6], &[0x00, 0x00]);
}

#[test]
fn rgb888_be_rect_fill() {
    let mut canvas = Canvas::with_format(4, 4, PixelFormat::Rgb888Be).unwrap();
    canvas.paint_mut().set_color(Color::from_rgb8(0x11, 0x22, 0x33));
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 1.0, 1.0).unwrap());

    let data = canvas.bitmap().data();
    assert_eq!(&data[0..3], &[0x11, 0x22, 0x33]);
    assert_eq!(&data[3..6], &[0x00, 0x00, 0x00]);
}

#[test]
fn paint_alpha_blends() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.paint_mut().set_color(Color::WHITE);
    canvas.paint_mut().alpha = 128;
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());

    // White at alpha 128 over black: 255 * 128 >> 8 = 127 per channel.
    let pixels = canvas.bitmap().pixels32().unwrap();
    for &p in pixels {
        assert_eq!(p & 0x00ffffff, 0x007f7f7f);
    }
}

#[test]
fn opaque_alpha_overwrites() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.draw_clear(Color::from_rgb8(200, 200, 200));
    canvas.paint_mut().set_color(Color::from_rgb8(10, 20, 30));
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());

    let pixels = canvas.bitmap().pixels32().unwrap();
    assert!(pixels.iter().all(|&p| p == 0xff0a141e));
}

#[test]
fn same_drawing_every_format() {
    // The rasterizer is format-blind; only the written bytes differ.
    let formats = [
        PixelFormat::Xrgb8888Le,
        PixelFormat::Xrgb8888Be,
        PixelFormat::Argb8888Le,
        PixelFormat::Argb8888Be,
        PixelFormat::Rgb888Le,
        PixelFormat::Rgb888Be,
        PixelFormat::Rgb565Le,
        PixelFormat::Rgb565Be,
    ];

    for &format in &formats {
        let mut canvas = Canvas::with_format(32, 32, format).unwrap();
        canvas.paint_mut().set_color(Color::WHITE);
        canvas.draw_triangle(&Triangle {
            p0: pt(2.0, 2.0),
            p1: pt(28.0, 3.0),
            p2: pt(5.0, 29.0),
        });

        let btp = format.bytes_per_pixel();
        let data = canvas.bitmap().data();
        let lit = data
            .chunks_exact(btp)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count();
        assert!(lit > 200, "{:?}: {}", format, lit);
        assert!(lit < 500, "{:?}: {}", format, lit);
    }
}

#[cfg(feature = "png-format")]
#[test]
fn png_encode() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.paint_mut().set_color(Color::from_rgb8(255, 0, 0));
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 8.0, 8.0).unwrap());

    let data = canvas.bitmap().encode_png().unwrap();
    assert_eq!(&data[1..4], b"PNG");
}
