use super::*;

#[test]
fn default_naming_is_three_digit_coffee_frames() {
    let naming = FrameNaming::default();
    assert_eq!(naming.path_for(FrameIndex(1)), "/frames/coffee_frame_001.jpg");
    assert_eq!(naming.path_for(FrameIndex(7)), "/frames/coffee_frame_007.jpg");
    assert_eq!(naming.path_for(FrameIndex(64)), "/frames/coffee_frame_064.jpg");
}

#[test]
fn naming_respects_custom_width_and_trailing_slash() {
    let naming = FrameNaming {
        dir: "/seq/".to_string(),
        stem: "f".to_string(),
        digits: 5,
        ext: "png".to_string(),
    };
    assert_eq!(naming.path_for(FrameIndex(42)), "/seq/f00042.png");
}

#[test]
fn naming_validation() {
    assert!(FrameNaming::default().validate().is_ok());
    let bad = FrameNaming {
        digits: 0,
        ..FrameNaming::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn site_paths_normalize() {
    assert_eq!(
        normalize_site_path("/frames/coffee_frame_001.jpg").unwrap(),
        "frames/coffee_frame_001.jpg"
    );
    assert_eq!(normalize_site_path("frames\\a.jpg").unwrap(), "frames/a.jpg");
    assert_eq!(normalize_site_path("./frames//a.jpg").unwrap(), "frames/a.jpg");
    assert!(normalize_site_path("/frames/../secret").is_err());
    assert!(normalize_site_path("/").is_err());
}

#[test]
fn memory_source_serves_inserted_paths_only() {
    let mut src = MemoryFrameSource::new();
    src.insert("/frames/a.jpg", vec![1, 2, 3]);
    assert_eq!(src.fetch("/frames/a.jpg").unwrap(), vec![1, 2, 3]);
    assert!(matches!(
        src.fetch("/frames/b.jpg"),
        Err(BrewError::Asset(_))
    ));
}

#[test]
fn dir_source_reports_missing_file() {
    let mut src = DirFrameSource::new(std::env::temp_dir().join("brewscroll_no_such_root"));
    let err = src.fetch("/frames/coffee_frame_001.jpg").unwrap_err();
    assert!(err.to_string().contains("read frame bytes"));
}
