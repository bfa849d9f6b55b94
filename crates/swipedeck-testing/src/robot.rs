//! Headless harness that drives a [`CardStack`] with synthetic pointer
//! streams and deterministic frame stepping, robot style.
//!
//! The robot owns the runtime and a single virtual clock: pointer samples
//! and animation frames advance together in ~16ms ticks, so velocity
//! tracking and tween timing behave the way a 60Hz host would deliver them.

use swipedeck::{CardPresentation, CardStack, DeckOptions, DragPhase};
use swipedeck_core::{PointerEvent, PointerEventKind, Runtime};
use swipedeck_graphics::Point;

/// Milliseconds per simulated frame.
const FRAME_MS: i64 = 16;

/// Safety bound for [`DeckRobot::settle`].
const MAX_SETTLE_FRAMES: usize = 1_000;

pub struct DeckRobot<T: 'static, V: Clone + 'static = ()> {
    runtime: Runtime,
    stack: CardStack<T, V>,
    now_ms: i64,
    pointer: Option<Point>,
}

impl<T: 'static, V: Clone + 'static> DeckRobot<T, V> {
    /// Builds a stack from the options and takes control of its clock.
    pub fn launch(options: DeckOptions<T, V>) -> Self {
        let runtime = Runtime::new();
        let stack = CardStack::new(options, runtime.handle());
        log::debug!("robot launched with {} items", stack.items().len());
        Self {
            runtime,
            stack,
            now_ms: 0,
            pointer: None,
        }
    }

    pub fn stack(&self) -> &CardStack<T, V> {
        &self.stack
    }

    /// Press the virtual pointer at the provided coordinates.
    pub fn press(&mut self, x: f32, y: f32) {
        let position = Point::new(x, y);
        self.pointer = Some(position);
        self.send(PointerEventKind::Down, position);
    }

    /// Drag the pressed pointer to the target in frame-paced steps.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let from = self.pointer.expect("drag_to requires a pressed pointer");
        let to = Point::new(x, y);
        let steps = 8;
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            let position = from.lerp_toward(to, fraction);
            self.tick();
            self.send(PointerEventKind::Move, position);
        }
        self.pointer = Some(to);
    }

    /// Drag to the target quickly: one frame tick for the whole travel,
    /// which produces flick-level release velocities.
    pub fn flick_to(&mut self, x: f32, y: f32) {
        assert!(self.pointer.is_some(), "flick_to requires a pressed pointer");
        let to = Point::new(x, y);
        self.tick();
        self.send(PointerEventKind::Move, to);
        self.pointer = Some(to);
    }

    /// Release the pointer where it currently is.
    pub fn release(&mut self) {
        let position = self.pointer.take().expect("release requires a pressed pointer");
        self.tick();
        self.send(PointerEventKind::Up, position);
    }

    /// Abandon the gesture, the way a recognizer cancellation would.
    pub fn cancel(&mut self) {
        let position = self.pointer.take().expect("cancel requires a pressed pointer");
        self.tick();
        self.send(PointerEventKind::Cancel, position);
    }

    /// Full gesture: press in the card area, drag by the delta, release.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        self.press(100.0, 100.0);
        self.drag_to(100.0 + dx, 100.0 + dy);
        self.release();
    }

    /// Run a fixed number of animation frames.
    pub fn step_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
            self.drain();
        }
    }

    /// Run frames until no animation wants another one.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.runtime.handle().needs_frame() {
                return;
            }
            self.tick();
            self.drain();
        }
        panic!("deck did not settle within {MAX_SETTLE_FRAMES} frames");
    }

    /// Convenience: the visible window, bottom-first.
    pub fn snapshot(&self) -> Vec<CardPresentation<V>> {
        self.stack.visible_cards()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.stack.drag_phase()
    }

    fn tick(&mut self) {
        self.now_ms += FRAME_MS;
    }

    fn drain(&self) {
        self.runtime
            .handle()
            .drain_frame_callbacks(self.now_ms as u64 * 1_000_000);
    }

    fn send(&self, kind: PointerEventKind, position: Point) {
        self.stack
            .on_pointer_event(&PointerEvent::new(kind, position, self.now_ms));
    }
}

trait LerpToward {
    fn lerp_toward(self, target: Point, fraction: f32) -> Point;
}

impl LerpToward for Point {
    fn lerp_toward(self, target: Point, fraction: f32) -> Point {
        Point::new(
            self.x + (target.x - self.x) * fraction,
            self.y + (target.y - self.y) * fraction,
        )
    }
}
