use std::sync::Arc;

use super::*;
use crate::{assets::store::FrameState, foundation::error::BrewError, render::renderer::SkipReason};

fn solid(v: u8) -> PreparedImage {
    PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new([v, v, v, 255].repeat(4)),
    }
}

fn small_config(frames: u32) -> SessionConfig {
    SessionConfig {
        frame_count: frames,
        ..SessionConfig::default()
    }
}

fn loaded_session(frames: u32, failing: &[u32]) -> ScrollSession {
    let mut s = ScrollSession::mount(small_config(frames), Viewport::new(4, 4)).unwrap();
    let handle = s.begin_loading();
    for req in handle.requests() {
        let i = req.index.0;
        let outcome = if failing.contains(&i) {
            Err(BrewError::asset("404"))
        } else {
            Ok(solid(i as u8 * 10))
        };
        s.frame_loaded(req.index, outcome).unwrap();
    }
    s
}

#[test]
fn becoming_ready_draws_the_first_frame() {
    let mut s = ScrollSession::mount(small_config(3), Viewport::new(4, 4)).unwrap();
    let handle = s.begin_loading();
    assert_eq!(handle.requests().len(), 3);

    s.frame_loaded(FrameIndex(3), Ok(solid(30))).unwrap();
    s.frame_loaded(FrameIndex(1), Ok(solid(10))).unwrap();
    assert!(s.surface().unwrap().is_blank());
    assert_eq!(s.loading_status().percent, 67);

    let ev = s.frame_loaded(FrameIndex(2), Ok(solid(20))).unwrap().unwrap();
    assert!(ev.became_ready);
    assert_eq!(s.last_outcome().and_then(|o| o.frame()), Some(FrameIndex(1)));
    assert_eq!(s.surface().unwrap().pixel(0, 0), Some([10, 10, 10, 255]));
}

#[test]
fn scroll_before_ready_schedules_nothing_but_moves_overlays() {
    let mut s = ScrollSession::mount(small_config(3), Viewport::new(4, 4)).unwrap();
    s.begin_loading();
    assert!(!s.on_progress(0.55));
    assert!(!s.render_pending());
    assert_eq!(s.on_animation_frame(), None);
    assert!(s.overlays()[2].is_visible());
}

#[test]
fn bursts_of_scroll_coalesce_into_one_render() {
    let mut s = loaded_session(10, &[]);
    assert!(s.on_progress(0.1));
    assert!(!s.on_progress(0.5));
    assert!(!s.on_progress(0.95));

    let out = s.on_animation_frame().unwrap();
    assert_eq!(out.frame(), Some(FrameIndex(9)));
    assert_eq!(s.on_animation_frame(), None);
    assert!(s.on_progress(0.0));
}

#[test]
fn scroll_geometry_drives_progress() {
    let mut s = loaded_session(5, &[]);
    let schedule = s.on_scroll(&ScrollGeometry {
        target_top: -500.0,
        target_height: 2000.0,
        viewport_height: 1000.0,
    });
    assert!(schedule);
    assert_eq!(s.progress(), 0.5);
    assert_eq!(s.current_frame(), FrameIndex(3));
}

#[test]
fn failed_frame_keeps_previous_content() {
    let mut s = loaded_session(5, &[3]);
    assert_eq!(s.store().state(FrameIndex(3)), Some(FrameState::Failed));
    assert!(s.is_ready());

    s.on_progress(0.3);
    s.on_animation_frame();
    let before = s.surface().unwrap().clone();

    s.on_progress(0.5);
    let out = s.on_animation_frame().unwrap();
    assert_eq!(out, RenderOutcome::Skipped(SkipReason::FrameUnavailable(FrameIndex(3))));
    assert_eq!(s.surface().unwrap(), &before);
}

#[test]
fn resize_redraws_at_current_progress() {
    let mut s = loaded_session(5, &[]);
    s.on_progress(1.0);
    s.on_animation_frame();

    let out = s.on_resize(Viewport::new(8, 2)).unwrap();
    assert_eq!(out.frame(), Some(FrameIndex(5)));
    let surface = s.surface().unwrap();
    assert_eq!(surface.width(), 8);
    assert_eq!(surface.pixel(3, 1), Some([50, 50, 50, 255]));
    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn unmount_silences_everything() {
    let mut s = ScrollSession::mount(small_config(2), Viewport::new(4, 4)).unwrap();
    s.begin_loading();
    s.frame_loaded(FrameIndex(1), Ok(solid(1))).unwrap();
    s.unmount();

    assert!(!s.is_mounted());
    assert!(s.surface().is_none());
    assert_eq!(s.frame_loaded(FrameIndex(2), Ok(solid(2))).unwrap(), None);
    assert!(!s.on_progress(0.7));
    assert_eq!(s.on_animation_frame(), None);
    assert_eq!(s.on_resize(Viewport::new(2, 2)), None);
    assert!(!s.begin_loading().is_fresh());
    s.unmount();
}

#[test]
fn detached_session_loads_without_drawing() {
    let mut s = ScrollSession::mount_detached(small_config(1)).unwrap();
    s.begin_loading();
    s.frame_loaded(FrameIndex(1), Ok(solid(5))).unwrap();
    assert!(s.is_ready());
    assert_eq!(s.last_outcome(), Some(RenderOutcome::Skipped(SkipReason::NoSurface)));
}

#[test]
fn invalid_config_fails_mount() {
    let err = ScrollSession::mount(small_config(0), Viewport::new(1, 1)).unwrap_err();
    assert!(matches!(err, BrewError::Validation(_)));
}
