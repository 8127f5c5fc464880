use super::*;

#[test]
fn wide_box_letterboxes_horizontally() {
    let fit = contain_fit(Size::new(1920.0, 1080.0), Size::new(1000.0, 1000.0)).unwrap();
    assert_eq!(fit.scale, 1.08);
    assert_eq!(fit.offset, Point::new(420.0, 0.0));
    assert_eq!(fit.dest, Rect::new(420.0, 0.0, 1500.0, 1080.0));
}

#[test]
fn tall_box_letterboxes_vertically() {
    let fit = contain_fit(Size::new(400.0, 900.0), Size::new(1600.0, 900.0)).unwrap();
    assert_eq!(fit.scale, 0.25);
    assert_eq!(fit.offset, Point::new(0.0, 337.5));
    assert_eq!(fit.dest.size(), Size::new(400.0, 225.0));
}

#[test]
fn small_image_is_scaled_up() {
    let fit = contain_fit(Size::new(200.0, 100.0), Size::new(20.0, 20.0)).unwrap();
    assert_eq!(fit.scale, 5.0);
    assert_eq!(fit.dest, Rect::new(50.0, 0.0, 150.0, 100.0));
}

#[test]
fn fitted_image_never_exceeds_bounds() {
    for (bw, bh, iw, ih) in [
        (1280.0, 720.0, 1920.0, 1080.0),
        (375.0, 812.0, 1920.0, 1080.0),
        (1024.0, 1024.0, 3.0, 7.0),
    ] {
        let fit = contain_fit(Size::new(bw, bh), Size::new(iw, ih)).unwrap();
        assert!(fit.dest.x0 >= -1e-9 && fit.dest.y0 >= -1e-9);
        assert!(fit.dest.x1 <= bw + 1e-9 && fit.dest.y1 <= bh + 1e-9);
        let touches_w = (fit.dest.width() - bw).abs() < 1e-9;
        let touches_h = (fit.dest.height() - bh).abs() < 1e-9;
        assert!(touches_w || touches_h);
    }
}

#[test]
fn empty_sizes_have_no_fit() {
    assert!(contain_fit(Size::new(0.0, 100.0), Size::new(10.0, 10.0)).is_none());
    assert!(contain_fit(Size::new(100.0, 100.0), Size::new(10.0, 0.0)).is_none());
}
