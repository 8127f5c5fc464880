use std::sync::Arc;

use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat((width * height) as usize)),
    }
}

#[test]
fn new_surface_is_blank_and_sized() {
    let s = CanvasSurface::new(Viewport::new(4, 3));
    assert_eq!((s.width(), s.height()), (4, 3));
    assert_eq!(s.data().len(), 48);
    assert!(s.is_blank());
}

#[test]
fn resize_drops_content() {
    let mut s = CanvasSurface::new(Viewport::new(4, 4));
    s.draw_image(&solid(1, 1, [10, 20, 30, 255]), Rect::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();
    assert!(!s.is_blank());
    s.resize(Viewport::new(6, 2));
    assert_eq!(s.viewport(), Viewport::new(6, 2));
    assert!(s.is_blank());
}

#[test]
fn draw_fills_only_pixels_centered_inside_dest() {
    let mut s = CanvasSurface::new(Viewport::new(8, 4));
    s.draw_image(&solid(2, 2, [0, 0, 200, 255]), Rect::new(2.0, 0.0, 6.0, 4.0))
        .unwrap();
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(2, 1), Some([0, 0, 200, 255]));
    assert_eq!(s.pixel(5, 3), Some([0, 0, 200, 255]));
    assert_eq!(s.pixel(6, 0), Some([0, 0, 0, 0]));
}

#[test]
fn draw_clips_to_surface_bounds() {
    let mut s = CanvasSurface::new(Viewport::new(4, 4));
    s.draw_image(&solid(1, 1, [1, 2, 3, 255]), Rect::new(-10.0, -10.0, 20.0, 20.0))
        .unwrap();
    assert!(s.data().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn bilinear_blends_between_texels() {
    let img = PreparedImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255, 255, 255, 255, 255]),
    };
    let mut s = CanvasSurface::new(Viewport::new(4, 1));
    s.draw_image(&img, Rect::new(0.0, 0.0, 4.0, 1.0)).unwrap();
    let reds: Vec<u8> = (0..4).map(|x| s.pixel(x, 0).unwrap()[0]).collect();
    assert_eq!(reds[0], 0);
    assert_eq!(reds[3], 255);
    assert!(reds[1] > 0 && reds[1] < reds[2] && reds[2] < 255);
}

#[test]
fn mismatched_image_bytes_are_rejected() {
    let bad = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 4]),
    };
    let mut s = CanvasSurface::new(Viewport::new(2, 2));
    assert!(s.draw_image(&bad, Rect::new(0.0, 0.0, 2.0, 2.0)).is_err());
}

#[test]
fn straight_alpha_export_unpremultiplies() {
    let mut s = CanvasSurface::new(Viewport::new(1, 1));
    s.draw_image(&solid(1, 1, [64, 0, 0, 128]), Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    let straight = s.to_rgba8_straight();
    assert_eq!(straight[3], 128);
    assert_eq!(straight[0], 128);
}

#[test]
fn png_export_round_trips_straight_pixels() {
    let mut s = CanvasSurface::new(Viewport::new(3, 2));
    s.draw_image(&solid(1, 1, [100, 50, 0, 128]), Rect::new(0.0, 0.0, 3.0, 2.0))
        .unwrap();
    let dir = std::env::temp_dir().join(format!("brewscroll-canvas-{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    s.save_png(&path).unwrap();

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.as_raw().as_slice(), s.to_rgba8_straight().as_slice());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_surface_cannot_be_exported() {
    let s = CanvasSurface::new(Viewport::new(0, 5));
    assert!(matches!(
        s.save_png(Path::new("never.png")),
        Err(BrewError::Render(_))
    ));
}
