use crate::runtime::{FrameCallbackId, RuntimeHandle};

/// Clock facade over the runtime's frame-callback registry.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Registers a one-shot callback for the next frame. Dropping the
    /// returned registration cancels it.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }
}

pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Runtime;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dropping_registration_cancels_callback() {
        let runtime = Runtime::new();
        let clock = runtime.handle().frame_clock();
        let fired = Rc::new(Cell::new(false));
        let fired_in = Rc::clone(&fired);

        let registration = clock.with_frame_nanos(move |_| fired_in.set(true));
        drop(registration);

        runtime.handle().drain_frame_callbacks(0);
        assert!(!fired.get());
    }

    #[test]
    fn millis_conversion() {
        let runtime = Runtime::new();
        let clock = runtime.handle().frame_clock();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in = Rc::clone(&seen);

        let registration = clock.with_frame_millis(move |millis| seen_in.set(millis));
        runtime.handle().drain_frame_callbacks(32_000_000);
        assert_eq!(seen.get(), 32);
        drop(registration);
    }
}
