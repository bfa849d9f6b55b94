//! Single-threaded frame-callback runtime.
//!
//! Hosts drive the runtime by calling [`RuntimeHandle::drain_frame_callbacks`]
//! once per display frame with the frame timestamp in nanoseconds. Everything
//! registered before the drain fires during it; callbacks registered while
//! draining land in the next frame.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    next_frame_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            next_frame_callback_id: Cell::new(0),
            frame_callbacks: RefCell::new(VecDeque::new()),
            needs_frame: Cell::new(false),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Swap the queue out before invoking so callbacks can re-register
        // for the next frame without deadlocking the RefCell.
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::new();
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        if !pending.is_empty() {
            log::trace!("frame {frame_time_nanos}: firing {} callbacks", pending.len());
        }
        for callback in pending {
            callback(frame_time_nanos);
        }
        if self.frame_callbacks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }
}

/// Owning handle to the runtime. Keep one alive per widget host.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak, cheaply-cloneable handle used by animations and widgets.
///
/// Operations on a handle whose [`Runtime`] has been dropped are no-ops;
/// registration returns `None` in that case.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Fires every pending frame callback with the given timestamp.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    /// Whether anything is waiting on the next frame (an animation is live).
    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get() || inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> crate::FrameClock {
        crate::FrameClock::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callback_fires_once_with_frame_time() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in = Rc::clone(&seen);
        handle.register_frame_callback(move |time| seen_in.set(time));

        handle.drain_frame_callbacks(42);
        assert_eq!(seen.get(), 42);

        handle.drain_frame_callbacks(99);
        assert_eq!(seen.get(), 42, "FnOnce callback must not refire");
    }

    #[test]
    fn cancelled_callback_never_fires() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let fired = Rc::new(Cell::new(false));
        let fired_in = Rc::clone(&fired);
        let id = handle
            .register_frame_callback(move |_| fired_in.set(true))
            .expect("runtime alive");
        handle.cancel_frame_callback(id);

        handle.drain_frame_callbacks(0);
        assert!(!fired.get());
        assert!(!handle.needs_frame());
    }

    #[test]
    fn reregistration_during_drain_lands_in_next_frame() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let count = Rc::new(Cell::new(0u32));

        let count_outer = Rc::clone(&count);
        let handle_inner = handle.clone();
        handle.register_frame_callback(move |_| {
            count_outer.set(count_outer.get() + 1);
            let count_inner = Rc::clone(&count_outer);
            handle_inner.register_frame_callback(move |_| {
                count_inner.set(count_inner.get() + 1);
            });
        });

        handle.drain_frame_callbacks(0);
        assert_eq!(count.get(), 1);
        assert!(handle.needs_frame());

        handle.drain_frame_callbacks(16_000_000);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dead_runtime_is_inert() {
        let handle = {
            let runtime = Runtime::new();
            runtime.handle()
        };
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert!(!handle.needs_frame());
        handle.drain_frame_callbacks(0);
    }
}
