mod common;

use common::{FakeFrames, FakeTimers};
use metaball_core::{DebounceTimer, RenderScheduler};
use std::time::Duration;

#[test]
fn many_requests_before_a_frame_schedule_one_callback() {
    let mut s = RenderScheduler::new(FakeFrames::default());
    assert!(s.request());
    for _ in 0..9 {
        assert!(!s.request());
    }
    assert_eq!(s.host().requested.len(), 1);

    let mut passes = 0;
    if s.frame_fired() {
        passes += 1;
    }
    // A duplicate callback for the same frame must not render again.
    if s.frame_fired() {
        passes += 1;
    }
    assert_eq!(passes, 1);
}

#[test]
fn request_after_frame_schedules_again() {
    let mut s = RenderScheduler::new(FakeFrames::default());
    s.request();
    assert!(s.frame_fired());
    assert!(!s.is_pending());
    assert!(s.request());
    assert_eq!(s.host().requested, vec![1, 2]);
}

#[test]
fn flush_cancels_the_pending_frame() {
    let mut s = RenderScheduler::new(FakeFrames::default());
    s.request();
    assert!(s.flush());
    assert_eq!(s.host().cancelled, vec![1]);
    assert_eq!(s.host().live(), 0);
    // The callback may still arrive if cancellation raced it.
    assert!(!s.frame_fired());
    assert!(!s.flush());
}

#[test]
fn refused_frame_is_not_pending() {
    let mut frames = FakeFrames::default();
    frames.refuse = true;
    let mut s = RenderScheduler::new(frames);
    assert!(!s.request());
    assert!(!s.is_pending());
    s.host_mut().refuse = false;
    assert!(s.request());
}

#[test]
fn debounce_keeps_only_the_last_timer() {
    let mut t = DebounceTimer::new(FakeTimers::default(), Duration::from_millis(140));
    t.schedule();
    t.schedule();
    t.schedule();
    assert_eq!(t.host().scheduled.len(), 3);
    assert_eq!(t.host().cancelled, vec![1, 2]);
    assert_eq!(t.host().live(), 1);
    assert!(t.fired());
    assert!(!t.fired());
}

#[test]
fn cancelled_timer_does_not_fire() {
    let mut t = DebounceTimer::new(FakeTimers::default(), Duration::from_millis(50));
    t.schedule();
    t.cancel();
    assert!(!t.is_pending());
    assert!(!t.fired());
    assert_eq!(t.host().live(), 0);
    assert_eq!(t.delay(), Duration::from_millis(50));
}
