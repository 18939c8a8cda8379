// In-memory frame and timer hosts. Handles are sequence numbers; nothing
// fires on its own, tests call the editor's callbacks explicitly.

#![allow(dead_code)]

use metaball_core::{FrameHost, TimerHost};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FakeFrames {
    next: u32,
    pub requested: Vec<u32>,
    pub cancelled: Vec<u32>,
    pub refuse: bool,
}

impl FakeFrames {
    /// Frames requested and not cancelled.
    pub fn live(&self) -> usize {
        self.requested.len() - self.cancelled.len()
    }
}

impl FrameHost for FakeFrames {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        if self.refuse {
            return None;
        }
        self.next += 1;
        self.requested.push(self.next);
        Some(self.next)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Default)]
pub struct FakeTimers {
    next: u32,
    pub scheduled: Vec<(u32, Duration)>,
    pub cancelled: Vec<u32>,
}

impl FakeTimers {
    pub fn live(&self) -> usize {
        self.scheduled.len() - self.cancelled.len()
    }
}

impl TimerHost for FakeTimers {
    type Handle = u32;

    fn schedule(&mut self, delay: Duration) -> Option<u32> {
        self.next += 1;
        self.scheduled.push((self.next, delay));
        Some(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

pub fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}
