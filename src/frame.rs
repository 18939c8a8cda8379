//! Browser-backed hosts for the core scheduler and quality timer.
//!
//! Each host owns a slot for its JS callback. The slot is filled once the
//! app exists (the callback needs the app, the app needs the host), and the
//! same closure is reused for every request, so at most one is ever live.

use metaball_core::{FrameHost, TimerHost};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn callback_slot() -> CallbackSlot {
    Rc::new(RefCell::new(None))
}

pub fn fill_slot(slot: &CallbackSlot, callback: impl FnMut() + 'static) {
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(callback) as Box<dyn FnMut()>));
}

/// `requestAnimationFrame` host.
pub struct RafHost {
    window: web::Window,
    callback: CallbackSlot,
}

impl RafHost {
    pub fn new(window: web::Window, callback: CallbackSlot) -> Self {
        Self { window, callback }
    }
}

impl FrameHost for RafHost {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let Some(cb) = slot.as_ref() else {
            log::warn!("frame requested before the frame callback was installed");
            return None;
        };
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

/// `setTimeout` host.
pub struct TimeoutHost {
    window: web::Window,
    callback: CallbackSlot,
}

impl TimeoutHost {
    pub fn new(window: web::Window, callback: CallbackSlot) -> Self {
        Self { window, callback }
    }
}

impl TimerHost for TimeoutHost {
    type Handle = i32;

    fn schedule(&mut self, delay: Duration) -> Option<i32> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
            .map_err(|e| log::error!("setTimeout failed: {:?}", e))
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}
