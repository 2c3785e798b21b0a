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

fn stroke_canvas(width: f32) -> Canvas {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.paint_mut().mode = PaintMode::Stroke;
    canvas.paint_mut().set_stroke_width(width);
    canvas
}

#[test]
fn hairline_line() {
    let mut canvas = stroke_canvas(1.0);
    canvas.draw_line(&Line::new(pt(2.0, 5.0), pt(12.0, 5.0)));

    let pixels = canvas.bitmap().pixels32().unwrap();
    for x in 0..40 {
        let expected = x >= 2 && x <= 12;
        assert_eq!(pixels[5 * 40 + x] != 0, expected, "at x {}", x);
    }
    assert_eq!(lit_pixels(&canvas), 11);
}

#[test]
fn hairline_rect_outline() {
    let mut canvas = stroke_canvas(1.0);
    canvas.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 5.0).unwrap());

    // The perimeter of an 11x6 pixel grid.
    assert_eq!(lit_pixels(&canvas), 2 * 11 + 2 * 6 - 4);
}

#[test]
fn zero_width_stroke_is_a_noop() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.paint_mut().mode = PaintMode::Stroke;
    canvas.paint_mut().stroke.width = 0.0;
    canvas.draw_rect(&Rect::from_xywh(2.0, 2.0, 8.0, 8.0).unwrap());

    assert_eq!(lit_pixels(&canvas), 0);
}

#[test]
fn stroked_rect_is_a_ring() {
    let mut canvas = stroke_canvas(2.0);
    canvas.draw_rect(&Rect::from_xywh(2.0, 2.0, 8.0, 8.0).unwrap());

    // Outer 10x10 ring minus the 6x6 hole.
    assert_eq!(lit_pixels(&canvas), 100 - 36);

    let pixels = canvas.bitmap().pixels32().unwrap();
    // hole center stays empty
    assert_eq!(pixels[6 * 40 + 6], 0);
    // the stroke band is filled
    assert_ne!(pixels[2 * 40 + 2], 0);
}

#[test]
fn fill_stroke_covers_fill_and_ring() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.paint_mut().mode = PaintMode::FillStroke;
    canvas.paint_mut().set_stroke_width(2.0);
    canvas.draw_rect(&Rect::from_xywh(4.0, 4.0, 8.0, 8.0).unwrap());

    // The ring and the interior merge into the full outer square.
    assert_eq!(lit_pixels(&canvas), 100);
}

#[test]
fn circle_stroke_matches_two_ring_fill() {
    // Stroking a circle takes the hint fast path: two concentric
    // ellipse rings. Filling the same rings manually with the winding
    // rule must produce the identical image.
    let mut stroked = Canvas::new(200, 200).unwrap();
    stroked.paint_mut().mode = PaintMode::Stroke;
    stroked.paint_mut().set_stroke_width(4.0);
    stroked.draw_circle(&Circle::new(100.0, 100.0, 50.0));

    let mut filled = Canvas::new(200, 200).unwrap();
    filled.paint_mut().fill_rule = FillRule::Winding;
    let mut rings = Path::new();
    rings.add_circle(&Circle::new(100.0, 100.0, 48.0), PathDirection::CW);
    rings.add_circle(&Circle::new(100.0, 100.0, 52.0), PathDirection::CCW);
    filled.draw_path(&mut rings);

    assert!(lit_pixels(&stroked) > 0);
    assert_eq!(stroked.bitmap().data(), filled.bitmap().data());
}

#[test]
fn open_c_shape() {
    let mut canvas = stroke_canvas(2.0);
    let mut path = Path::new();
    path.move_to(pt(30.0, 10.0));
    path.line_to(pt(15.0, 10.0));
    path.line_to(pt(15.0, 30.0));
    path.line_to(pt(30.0, 30.0));
    canvas.draw_path(&mut path);

    let pixels = canvas.bitmap().pixels32().unwrap();
    let lit = |x: usize, y: usize| pixels[y * 40 + x] != 0;

    // inside the top bar, near the butt cap
    assert!(lit(29, 10));
    // inside the left bar
    assert!(lit(15, 20));
    // inside the bottom bar
    assert!(lit(29, 30));
    // the opening of the C stays empty
    assert!(!lit(29, 20));
    assert!(!lit(20, 20));

    // Butt caps add no extension beyond the segment ends.
    for y in 0..40 {
        for x in 0..40 {
            if lit(x, y) {
                assert!(x >= 14 && x < 31 && y >= 9 && y < 31, "stray at {}x{}", x, y);
            }
        }
    }
}

#[test]
fn miter_corner_is_closed() {
    // A right-angle corner stroked with the default miter join leaves
    // no gap at the outer corner.
    let mut canvas = stroke_canvas(4.0);
    let mut path = Path::new();
    path.move_to(pt(5.0, 5.0));
    path.line_to(pt(25.0, 5.0));
    path.line_to(pt(25.0, 25.0));
    canvas.draw_path(&mut path);

    let pixels = canvas.bitmap().pixels32().unwrap();
    // the outer corner pixel, covered only by the miter
    assert_ne!(pixels[3 * 40 + 26], 0);
}

#[test]
fn points_stroke() {
    let mut canvas = stroke_canvas(4.0);
    canvas.draw_points(&[pt(10.0, 10.0), pt(20.0, 20.0)]);

    // Butt cap points become 4x4 squares.
    assert_eq!(lit_pixels(&canvas), 2 * 16);
}

#[test]
fn hairline_points() {
    let mut canvas = stroke_canvas(1.0);
    canvas.draw_points(&[pt(3.0, 3.0), pt(6.0, 7.0)]);
    assert_eq!(lit_pixels(&canvas), 2);
}

#[test]
fn stroke_scales_with_the_matrix() {
    // A scaled matrix disables the width==1 fast path; the stroker
    // output is transformed like any fill.
    let mut canvas = stroke_canvas(1.0);
    canvas.scale(2.0, 2.0);
    canvas.draw_line(&Line::new(pt(2.0, 5.0), pt(12.0, 5.0)));

    // A 1-wide stroke becomes a 2-wide band from x=4 to x=24.
    let pixels = canvas.bitmap().pixels32().unwrap();
    let row9: usize = (0..40).filter(|&x| pixels[9 * 40 + x] != 0).count();
    let row10: usize = (0..40).filter(|&x| pixels[10 * 40 + x] != 0).count();
    assert_eq!(row9 + row10, 2 * 20);
}
