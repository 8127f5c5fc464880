use super::*;

#[test]
fn burst_coalesces_to_one_callback_with_latest_value() {
    let s = RenderScheduler::new();
    assert!(s.request(0.1));
    assert!(!s.request(0.2));
    assert!(!s.request(0.15));
    assert!(s.is_pending());
    assert_eq!(s.take(), Some(0.15));
    assert_eq!(s.coalesced(), 2);
}

#[test]
fn take_without_request_is_empty() {
    let s = RenderScheduler::new();
    assert_eq!(s.take(), None);
    s.request(0.4);
    assert_eq!(s.take(), Some(0.4));
    assert_eq!(s.take(), None);
}

#[test]
fn new_request_after_take_schedules_again() {
    let s = RenderScheduler::new();
    assert!(s.request(0.1));
    s.take();
    assert!(s.request(0.9));
}

#[test]
fn cancel_clears_pending() {
    let s = RenderScheduler::new();
    s.request(0.3);
    s.cancel();
    assert!(!s.is_pending());
    assert_eq!(s.take(), None);
    assert_eq!(s.latest(), 0.3);
}
