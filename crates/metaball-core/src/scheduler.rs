//! Deferred work with at most one pending task per purpose.
//!
//! The host traits abstract the platform callbacks (`requestAnimationFrame`,
//! `setTimeout`) so the coalescing rules can be tested without a browser.

use std::time::Duration;

/// Display-refresh callbacks.
pub trait FrameHost {
    type Handle: Copy;

    /// Ask for one callback at the next refresh. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// One-shot timers.
pub trait TimerHost {
    type Handle: Copy;

    fn schedule(&mut self, delay: Duration) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Coalesces redraw requests: any number of `request` calls before the next
/// refresh produce one render pass.
pub struct RenderScheduler<F: FrameHost> {
    host: F,
    pending: Option<F::Handle>,
}

impl<F: FrameHost> RenderScheduler<F> {
    pub fn new(host: F) -> Self {
        Self {
            host,
            pending: None,
        }
    }

    /// Returns true when this call scheduled a new frame.
    pub fn request(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.host.request_frame();
        self.pending.is_some()
    }

    /// Called from the frame callback. True when a render should run; a
    /// callback that was already flushed reports false.
    pub fn frame_fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Drop a scheduled frame because the caller is about to draw now.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.host.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn host(&self) -> &F {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut F {
        &mut self.host
    }
}

/// Last-writer-wins one-shot timer: rescheduling cancels the previous one.
pub struct DebounceTimer<T: TimerHost> {
    host: T,
    delay: Duration,
    pending: Option<T::Handle>,
}

impl<T: TimerHost> DebounceTimer<T> {
    pub fn new(host: T, delay: Duration) -> Self {
        Self {
            host,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self) {
        self.cancel();
        self.pending = self.host.schedule(self.delay);
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel(handle);
        }
    }

    /// Called from the timer callback. False for a timer that was cancelled.
    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn host(&self) -> &T {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut T {
        &mut self.host
    }
}
