use vexel::*;

fn pt(x: f32, y: f32) -> Point {
    Point::from_xy(x, y)
}

fn lit_pixels(canvas: &Canvas) -> usize {
    canvas
        .bitmap()
        .pixels32()
        .unwrap()
        .iter()
        .filter(|&&p| p != 0)
        .count()
}

#[test]
fn axis_rect() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.paint_mut().set_color_rgba8(50, 127, 150, 255);

    let mut path = Path::new();
    path.move_to(pt(0.0, 0.0));
    path.line_to(pt(10.0, 0.0));
    path.line_to(pt(10.0, 5.0));
    path.line_to(pt(0.0, 5.0));
    path.close();
    canvas.draw_path(&mut path);

    let expected_pixel = 0xff327f96;
    let pixels = canvas.bitmap().pixels32().unwrap();
    let mut lit = 0;
    for y in 0..16 {
        for x in 0..16 {
            let p = pixels[y * 16 + x];
            if x < 10 && y < 5 {
                assert_eq!(p, expected_pixel, "wrong pixel at {}x{}", x, y);
                lit += 1;
            } else {
                assert_eq!(p, 0, "stray pixel at {}x{}", x, y);
            }
        }
    }
    assert_eq!(lit, 50);
}

#[test]
fn rect_through_rasterizer_matches_fast_path() {
    // An extra collinear point on the top edge defeats the rect hint,
    // pushing the fill through the scanline rasterizer.
    let mut a = Canvas::new(16, 16).unwrap();
    a.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 5.0).unwrap());

    let mut b = Canvas::new(16, 16).unwrap();
    let mut path = Path::new();
    path.move_to(pt(0.0, 0.0));
    path.line_to(pt(5.0, 0.0));
    path.line_to(pt(10.0, 0.0));
    path.line_to(pt(10.0, 5.0));
    path.line_to(pt(0.0, 5.0));
    path.close();
    assert_eq!(path.hint(), None);
    b.draw_path(&mut path);

    assert_eq!(a.bitmap().data(), b.bitmap().data());
}

#[test]
fn even_odd_donut() {
    let mut canvas = Canvas::new(16, 16).unwrap();

    let mut path = Path::new();
    path.add_rect(&Rect::from_xywh(2.0, 2.0, 10.0, 10.0).unwrap(), PathDirection::CW);
    path.add_rect(&Rect::from_xywh(4.0, 4.0, 6.0, 6.0).unwrap(), PathDirection::CW);
    canvas.draw_path(&mut path);

    assert_eq!(lit_pixels(&canvas), 100 - 36);

    // hole center
    let pixels = canvas.bitmap().pixels32().unwrap();
    assert_eq!(pixels[7 * 16 + 7], 0);
    // ring
    assert_ne!(pixels[3 * 16 + 3], 0);
}

#[test]
fn winding_donut_both_cw_is_solid() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.paint_mut().fill_rule = FillRule::Winding;

    let mut path = Path::new();
    path.add_rect(&Rect::from_xywh(2.0, 2.0, 10.0, 10.0).unwrap(), PathDirection::CW);
    path.add_rect(&Rect::from_xywh(4.0, 4.0, 6.0, 6.0).unwrap(), PathDirection::CW);
    canvas.draw_path(&mut path);

    assert_eq!(lit_pixels(&canvas), 100);
}

#[test]
fn winding_donut_opposite_directions_keeps_the_hole() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.paint_mut().fill_rule = FillRule::Winding;

    let mut path = Path::new();
    path.add_rect(&Rect::from_xywh(2.0, 2.0, 10.0, 10.0).unwrap(), PathDirection::CW);
    path.add_rect(&Rect::from_xywh(4.0, 4.0, 6.0, 6.0).unwrap(), PathDirection::CCW);
    canvas.draw_path(&mut path);

    assert_eq!(lit_pixels(&canvas), 100 - 36);
}

#[test]
fn open_line_fills_to_nothing() {
    let mut canvas = Canvas::new(32, 32).unwrap();

    let mut path = Path::new();
    path.move_to(pt(5.0, 5.0));
    path.line_to(pt(25.0, 20.0));
    canvas.draw_path(&mut path);

    assert_eq!(lit_pixels(&canvas), 0);
}

#[test]
fn translated_rect() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.translate(3.0, 2.0);
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());

    let pixels = canvas.bitmap().pixels32().unwrap();
    for y in 0..16 {
        for x in 0..16 {
            let expected = x >= 3 && x < 7 && y >= 2 && y < 6;
            assert_eq!(pixels[y * 16 + x] != 0, expected, "at {}x{}", x, y);
        }
    }
}

#[test]
fn scaled_rect() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.scale(2.0, 1.0);
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap());

    assert_eq!(lit_pixels(&canvas), 8 * 4);
}

#[test]
fn triangle_fill() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.draw_triangle(&Triangle {
        p0: pt(0.0, 0.0),
        p1: pt(10.0, 0.0),
        p2: pt(0.0, 10.0),
    });

    // Row widths shrink by one per scanline along the hypotenuse.
    let pixels = canvas.bitmap().pixels32().unwrap();
    for y in 0..10 {
        let width = pixels[y * 16..y * 16 + 16]
            .iter()
            .filter(|&&p| p != 0)
            .count();
        assert_eq!(width, 10 - y);
    }
}

#[test]
fn circle_fill_covers_the_disk() {
    let mut canvas = Canvas::new(64, 64).unwrap();
    canvas.draw_circle(&Circle::new(32.0, 32.0, 20.0));

    let pixels = canvas.bitmap().pixels32().unwrap();
    assert_ne!(pixels[32 * 64 + 32], 0);
    assert_eq!(pixels[0], 0);

    // Within a pixel of pi * r^2.
    let lit = lit_pixels(&canvas) as f32;
    let area = core::f32::consts::PI * 20.0 * 20.0;
    assert!((lit - area).abs() < area * 0.05, "lit {}", lit);

    // Nothing escapes the bounding box.
    for y in 0..64 {
        for x in 0..64 {
            if pixels[y * 64 + x] != 0 {
                assert!(x >= 12 && x < 52 && y >= 12 && y < 52);
            }
        }
    }
}

#[test]
fn save_load_paint_round_trip() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.paint_mut().set_color(Color::from_rgb8(10, 20, 30));

    canvas.save_paint();
    canvas.paint_mut().set_color(Color::WHITE);
    canvas.paint_mut().fill_rule = FillRule::Winding;
    canvas.load_paint();

    assert_eq!(canvas.paint().color, Color::from_rgb8(10, 20, 30));
    assert_eq!(canvas.paint().fill_rule, FillRule::EvenOdd);
}

#[test]
fn save_load_matrix_round_trip() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.translate(2.0, 2.0);
    canvas.save_matrix();
    canvas.scale(3.0, 3.0);
    canvas.load_matrix();

    assert_eq!(*canvas.matrix(), Transform::from_translate(2.0, 2.0));
}

#[test]
fn clear_overwrites_everything() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 8.0, 8.0).unwrap());
    canvas.draw_clear(Color::from_rgb8(9, 9, 9));

    let pixels = canvas.bitmap().pixels32().unwrap();
    assert!(pixels.iter().all(|&p| p == 0xff090909));
}
