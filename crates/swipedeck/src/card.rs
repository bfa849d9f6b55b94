//! Drag lifecycle of the active card.
//!
//! One controller instance serves the whole stack: only the top card ever
//! receives gesture input, and the controller resets as the top card changes.

use swipedeck_core::gesture_constants::{
    MAX_FLING_VELOCITY, PARTIAL_DRAG_LIMIT, PARTIAL_SWIPE_INTENT_DISTANCE,
};
use swipedeck_core::{PointerEvent, PointerEventKind, VelocityTracker2D};
use swipedeck_graphics::Point;

use crate::config::{GestureOptions, Thresholds};
use crate::direction::{Direction, DirectionSet};
use crate::gesture::classify;

/// Where the active card's drag lifecycle currently is.
///
/// `Idle` is both the initial state and the state after any settle or
/// commit; removal is represented by the stack cursor advancing, never by a
/// per-card "swiped" state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    SettlingBack,
    Committing,
}

/// What the stack should do in response to one pointer event.
#[derive(Debug)]
pub(crate) enum DragTransition {
    None,
    /// Pointer landed on the card; any in-flight settle must freeze so the
    /// new drag starts from wherever the card currently sits.
    TouchDown,
    /// The drag passed the slop and now owns the card.
    DragClaimed { offset: Point },
    DragMoved { offset: Point },
    Released(ReleaseVerdict),
}

/// Decision for a finished (or cancelled) gesture.
#[derive(Debug)]
pub(crate) enum ReleaseVerdict {
    /// Remove the card toward `direction`.
    Commit { direction: Direction, velocity: Point },
    /// Disabled-direction intent: notify once, then settle back.
    Partial { direction: Direction },
    /// Spring or ease the card back to rest.
    SettleBack,
    /// Press and release that never claimed the card.
    Tap,
}

pub(crate) struct CardGestureController {
    thresholds: Thresholds,
    directions: DirectionSet,
    allow_partial_swipe: bool,
    gesture_threshold: f32,
    phase: DragPhase,
    down_position: Option<Point>,
    /// The press interrupted a settle animation, so a sub-slop release must
    /// resume settling instead of counting as a tap.
    grabbed_mid_settle: bool,
    base_offset: Point,
    raw_delta: Point,
    tracker: VelocityTracker2D,
}

impl CardGestureController {
    pub(crate) fn new(thresholds: Thresholds, gestures: GestureOptions) -> Self {
        Self {
            thresholds,
            directions: gestures.swipe_directions,
            allow_partial_swipe: gestures.allow_partial_swipe,
            gesture_threshold: gestures.gesture_threshold,
            phase: DragPhase::Idle,
            down_position: None,
            grabbed_mid_settle: false,
            base_offset: Point::ZERO,
            raw_delta: Point::ZERO,
            tracker: VelocityTracker2D::new(),
        }
    }

    pub(crate) fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// `current_offset` is the live drag offset at event time; it becomes
    /// the base a new drag accumulates on top of, which is what makes
    /// grabbing a card mid-settle feel continuous.
    pub(crate) fn on_pointer_event(
        &mut self,
        event: &PointerEvent,
        current_offset: Point,
    ) -> DragTransition {
        match event.kind {
            PointerEventKind::Down => self.on_down(event, current_offset),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_release(event, true),
            PointerEventKind::Cancel => self.on_release(event, false),
        }
    }

    fn on_down(&mut self, event: &PointerEvent, current_offset: Point) -> DragTransition {
        match self.phase {
            DragPhase::Committing => return DragTransition::None,
            DragPhase::SettlingBack => {
                self.grabbed_mid_settle = true;
                self.phase = DragPhase::Idle;
            }
            DragPhase::Idle => self.grabbed_mid_settle = false,
            DragPhase::Dragging => return DragTransition::None,
        }

        self.down_position = Some(event.position);
        self.base_offset = current_offset;
        self.raw_delta = Point::ZERO;
        self.tracker.reset();
        self.tracker.add_sample(event.time_ms, event.position);
        DragTransition::TouchDown
    }

    fn on_move(&mut self, event: &PointerEvent) -> DragTransition {
        let Some(down) = self.down_position else {
            return DragTransition::None;
        };
        if event.is_consumed() {
            return DragTransition::None;
        }

        self.tracker.add_sample(event.time_ms, event.position);
        self.raw_delta = event.position - down;

        if self.phase != DragPhase::Dragging {
            let passes_slop = self.raw_delta.x.abs() > self.gesture_threshold
                || self.raw_delta.y.abs() > self.gesture_threshold;
            if !passes_slop {
                return DragTransition::None;
            }
            self.phase = DragPhase::Dragging;
            event.consume();
            log::debug!("drag claimed at delta {:?}", self.raw_delta);
            return DragTransition::DragClaimed {
                offset: self.base_offset + self.clamp_disabled(self.raw_delta),
            };
        }

        event.consume();
        DragTransition::DragMoved {
            offset: self.base_offset + self.clamp_disabled(self.raw_delta),
        }
    }

    fn on_release(&mut self, event: &PointerEvent, allow_commit: bool) -> DragTransition {
        if self.down_position.is_none() {
            return DragTransition::None;
        }
        self.tracker.add_sample(event.time_ms, event.position);
        self.down_position = None;

        if self.phase != DragPhase::Dragging {
            // Never claimed: a pristine press is a tap, a mid-settle grab
            // has to resume travelling back to rest.
            if self.grabbed_mid_settle {
                self.grabbed_mid_settle = false;
                self.phase = DragPhase::SettlingBack;
                return DragTransition::Released(ReleaseVerdict::SettleBack);
            }
            return if allow_commit {
                DragTransition::Released(ReleaseVerdict::Tap)
            } else {
                DragTransition::None
            };
        }

        let raw = self.raw_delta;
        let velocity_per_second = self.tracker.calculate_velocity_with_max(MAX_FLING_VELOCITY);
        // Commit thresholds are tuned in px/ms.
        let velocity = Point::new(velocity_per_second.x / 1000.0, velocity_per_second.y / 1000.0);
        let flicked = velocity.x.abs() > self.thresholds.velocity
            || velocity.y.abs() > self.thresholds.velocity;

        let direction = classify(raw.x, raw.y, &self.thresholds);
        log::debug!(
            "release delta {raw:?} velocity {velocity:?} classified {direction:?}"
        );

        let verdict = match direction {
            Some(direction)
                if self.directions.contains(direction)
                    && allow_commit
                    && (raw.x.abs() > self.thresholds.horizontal
                        || raw.y.abs() > self.thresholds.vertical
                        || flicked) =>
            {
                self.phase = DragPhase::Committing;
                ReleaseVerdict::Commit {
                    direction,
                    velocity,
                }
            }
            Some(direction)
                if !self.directions.contains(direction)
                    && self.allow_partial_swipe
                    && (raw.x.abs() > PARTIAL_SWIPE_INTENT_DISTANCE
                        || raw.y.abs() > PARTIAL_SWIPE_INTENT_DISTANCE) =>
            {
                self.phase = DragPhase::SettlingBack;
                ReleaseVerdict::Partial { direction }
            }
            _ => {
                self.phase = DragPhase::SettlingBack;
                ReleaseVerdict::SettleBack
            }
        };

        DragTransition::Released(verdict)
    }

    /// Bounds travel toward disabled directions: rubber-band limited when
    /// partial swipes are allowed, hard zero per sign otherwise. Enabled
    /// directions pass through unclamped.
    fn clamp_disabled(&self, delta: Point) -> Point {
        let mut dx = delta.x;
        let mut dy = delta.y;

        if self.allow_partial_swipe {
            if !self.directions.contains(Direction::Left) && dx < 0.0 {
                dx = dx.max(-PARTIAL_DRAG_LIMIT);
            }
            if !self.directions.contains(Direction::Right) && dx > 0.0 {
                dx = dx.min(PARTIAL_DRAG_LIMIT);
            }
            if !self.directions.contains(Direction::Up) && dy < 0.0 {
                dy = dy.max(-PARTIAL_DRAG_LIMIT);
            }
            if !self.directions.contains(Direction::Down) && dy > 0.0 {
                dy = dy.min(PARTIAL_DRAG_LIMIT);
            }
        } else {
            if !self.directions.contains(Direction::Left) && dx < 0.0 {
                dx = 0.0;
            }
            if !self.directions.contains(Direction::Right) && dx > 0.0 {
                dx = 0.0;
            }
            if !self.directions.contains(Direction::Up) && dy < 0.0 {
                dy = 0.0;
            }
            if !self.directions.contains(Direction::Down) && dy > 0.0 {
                dy = 0.0;
            }
        }

        Point::new(dx, dy)
    }

    /// The settle-back animation reached rest.
    pub(crate) fn on_settle_complete(&mut self) {
        if self.phase == DragPhase::SettlingBack {
            self.phase = DragPhase::Idle;
        }
    }

    /// The off-screen animation finished and the cursor advanced.
    pub(crate) fn on_commit_complete(&mut self) {
        if self.phase == DragPhase::Committing {
            self.phase = DragPhase::Idle;
        }
    }

    /// Abandons any gesture state, e.g. on deck reset.
    pub(crate) fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.down_position = None;
        self.grabbed_mid_settle = false;
        self.raw_delta = Point::ZERO;
        self.tracker.reset();
    }
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
