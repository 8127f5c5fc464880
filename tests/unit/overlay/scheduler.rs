use super::*;

#[test]
fn stock_windows_are_disjoint() {
    let s = OverlayScheduler::coffee_pour();
    assert_eq!(s.windows().len(), 4);
    assert!(s.overlapping_pairs().is_empty());
}

#[test]
fn only_the_active_block_is_visible() {
    let s = OverlayScheduler::coffee_pour();
    let states = s.evaluate(0.55);
    let visible: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, st)| st.is_visible())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(visible, vec![2]);
    assert_eq!(states[2].align, Align::Right);
    assert_eq!(states[2].offset_y, 0.0);
}

#[test]
fn gap_between_blocks_shows_nothing() {
    let s = OverlayScheduler::coffee_pour();
    assert!(s.evaluate(0.72).iter().all(|st| !st.is_visible()));
}

#[test]
fn evaluation_is_stateless() {
    let s = OverlayScheduler::coffee_pour();
    let forward = s.evaluate(0.42);
    s.evaluate(0.9);
    s.evaluate(0.1);
    assert_eq!(s.evaluate(0.42), forward);
}

#[test]
fn overlapping_windows_are_computed_independently() {
    let s = OverlayScheduler::new(
        vec![
            OverlayWindow::new(0.2, 0.5, Align::Left, "a"),
            OverlayWindow::new(0.4, 0.6, Align::Right, "b"),
        ],
        50.0,
    )
    .unwrap();
    assert_eq!(s.overlapping_pairs(), vec![(0, 1)]);
    let states = s.evaluate(0.45);
    assert_eq!(states[0].opacity, 1.0);
    assert_eq!(states[1].opacity, 1.0);
}

#[test]
fn custom_slide_distance_scales_offsets() {
    let s = OverlayScheduler::new(
        vec![OverlayWindow::new(0.5, 0.6, Align::Center, "x")],
        120.0,
    )
    .unwrap();
    assert_eq!(s.evaluate(0.0)[0].offset_y, 120.0);
    assert_eq!(s.evaluate(1.0)[0].offset_y, -120.0);
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(OverlayScheduler::new(vec![], -1.0).is_err());
    assert!(
        OverlayScheduler::new(
            vec![OverlayWindow::new(0.6, 0.5, Align::Center, "x")],
            50.0
        )
        .is_err()
    );
}
