//! requestAnimationFrame scheduler (WASM only)

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::frame_loop::FrameScheduler;

/// Shared slot for the frame callback; filled once the loop exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Schedules frames with `window.requestAnimationFrame`
pub struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Slot the host fills with the closure that drives the frame loop
    pub fn callback(&self) -> FrameCallback {
        Rc::clone(&self.callback)
    }
}

impl FrameScheduler for RafScheduler {
    /// RAF request id, `None` if the request failed
    type Handle = Option<i32>;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let closure = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: Option<i32>) {
        if let Some(id) = handle {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
