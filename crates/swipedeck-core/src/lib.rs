//! Core runtime for Swipedeck: frame callbacks, pointer events, velocity.
//!
//! All animation in the widget is driven by frame timestamps delivered
//! through [`RuntimeHandle::drain_frame_callbacks`]; the library never reads
//! a wall clock, which keeps every consumer test deterministic.

mod frame_clock;
mod input;
mod runtime;

pub mod gesture_constants;
pub mod velocity_tracker;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use input::{PointerEvent, PointerEventKind, PointerId, PointerPhase};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use velocity_tracker::{VelocityTracker1D, VelocityTracker2D};
