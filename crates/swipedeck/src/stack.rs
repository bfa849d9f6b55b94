//! Deck state: the ordered items, the cursor, and the shared drag offset.
//!
//! One [`CardStack`] owns a single animated offset cell reused across cards;
//! ownership passes implicitly to the next card after each commit, with an
//! explicit reset to zero in between so no card ever starts life displaced.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_animation::{
    Animatable, AnimationEnd, AnimationSpec, AnimationType, PiecewiseLinear, SpringSpec,
};
use swipedeck_core::{PointerEvent, RuntimeHandle};
use swipedeck_graphics::{CardTransform, Point};

use crate::card::{CardGestureController, DragPhase, DragTransition, ReleaseVerdict};
use crate::config::{resolve, DeckOptions, ResolvedOptions};
use crate::direction::Direction;
use crate::feedback::IconFeedbackModel;
use crate::icons::IconPlacement;
use crate::semantics::{card_semantics, container_semantics, SemanticsConfiguration};

/// Vertical offset per depth step for cards under the top one.
const STACK_DEPTH_OFFSET: f32 = 10.0;
/// Alpha lost per depth step for cards under the top one.
const STACK_DEPTH_FADE: f32 = 0.1;
/// Horizontal drag at which the tilt saturates.
const ROTATION_INPUT_RANGE: f32 = 200.0;
/// Tilt at saturation, degrees.
const ROTATION_MAX_DEGREES: f32 = 10.0;

/// Everything the host needs to paint one visible card.
pub struct CardPresentation<V> {
    pub index: usize,
    pub relative_index: usize,
    pub is_top: bool,
    pub key: String,
    pub transform: CardTransform,
    /// Output of the configured card renderer, when one was supplied.
    pub content: Option<V>,
    /// Feedback icons over this card; empty for non-top cards.
    pub icons: SmallVec<[IconOverlay<V>; 4]>,
    pub semantics: SemanticsConfiguration,
}

/// One feedback icon with its live opacity.
pub struct IconOverlay<V> {
    pub direction: Direction,
    pub content: V,
    pub placement: IconPlacement,
    pub opacity: f32,
}

/// A commit whose off-screen animation is still running. The generation
/// ticket keeps a superseded animation's completion from advancing the
/// cursor a second time.
struct PendingCommit {
    generation: u64,
    direction: Direction,
    index: usize,
}

struct DeckMut {
    controller: CardGestureController,
    internal_index: usize,
    controlled_index: Option<usize>,
    generation: u64,
    pending_commit: Option<PendingCommit>,
    last_focus: Option<usize>,
    last_reset_trigger: u64,
}

/// The swipeable card stack.
///
/// `T` is the caller's item type, `V` the host's view/node type for rendered
/// content and icons. The stack never inspects items except through the
/// configured render and key functions, and never reorders them; committed
/// swipes only advance a read cursor.
pub struct CardStack<T, V = ()> {
    options: Rc<ResolvedOptions<T, V>>,
    state: Rc<RefCell<DeckMut>>,
    offset: Animatable<Point>,
    feedback: IconFeedbackModel,
}

impl<T: 'static, V: Clone + 'static> CardStack<T, V> {
    pub fn new(options: DeckOptions<T, V>, runtime: RuntimeHandle) -> Self {
        let options = Rc::new(resolve(options));
        let feedback = IconFeedbackModel::new(
            &options.thresholds,
            options.gestures.swipe_directions,
            options.icons.armed(),
        );
        let state = Rc::new(RefCell::new(DeckMut {
            controller: CardGestureController::new(options.thresholds, options.gestures),
            internal_index: 0,
            controlled_index: options.controlled.then_some(options.initial_index),
            generation: 0,
            pending_commit: None,
            last_focus: None,
            last_reset_trigger: options.reset_trigger,
        }));

        let stack = Self {
            options,
            state,
            offset: Animatable::new(Point::ZERO, runtime),
            feedback,
        };
        Self::notify_focus(&stack.options, &stack.state);
        stack
    }

    /// The cursor: position of the active card, `items.len()` when exhausted.
    pub fn current_index(&self) -> usize {
        let state = self.state.borrow();
        state.controlled_index.unwrap_or(state.internal_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index() >= self.options.items.len()
    }

    pub fn items(&self) -> &[T] {
        &self.options.items
    }

    /// Live drag offset of the active card.
    pub fn offset(&self) -> Point {
        self.offset.value()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.state.borrow().controller.phase()
    }

    /// Routes one pointer event into the active card's gesture machine.
    ///
    /// Events arriving while the deck is exhausted are ignored; non-top
    /// cards never receive input by construction since there is a single
    /// controller for the single active card.
    pub fn on_pointer_event(&self, event: &PointerEvent) {
        if self.is_exhausted() {
            return;
        }

        let transition = {
            let mut state = self.state.borrow_mut();
            state.controller.on_pointer_event(event, self.offset.value())
        };

        match transition {
            DragTransition::None => {}
            DragTransition::TouchDown => {
                // Freeze any in-flight settle so the drag base is stable.
                self.offset.snap_to(self.offset.value());
            }
            DragTransition::DragClaimed { offset } => {
                let index = self.current_index();
                if let Some(on_swipe_start) = self.options.callbacks.on_swipe_start.clone() {
                    on_swipe_start(&self.options.items[index], index);
                }
                self.offset.snap_to(offset);
            }
            DragTransition::DragMoved { offset } => {
                self.offset.snap_to(offset);
            }
            DragTransition::Released(verdict) => self.on_release(verdict),
        }
    }

    fn on_release(&self, verdict: ReleaseVerdict) {
        let index = self.current_index();
        match verdict {
            ReleaseVerdict::Tap => {
                if let Some(on_tap) = self.options.callbacks.on_tap.clone() {
                    on_tap(&self.options.items[index], index);
                }
            }
            ReleaseVerdict::SettleBack => self.start_settle(),
            ReleaseVerdict::Partial { direction } => {
                log::debug!("partial swipe toward disabled {direction:?}");
                if let Some(on_swipe) = self.options.callbacks.on_swipe.clone() {
                    on_swipe(direction, &self.options.items[index], index);
                }
                self.start_settle();
            }
            ReleaseVerdict::Commit {
                direction,
                velocity,
            } => {
                log::debug!("committing {direction:?} at {velocity:?} px/ms");
                self.commit(direction, index);
            }
        }
    }

    /// Callback order on commit is release-synchronous: swipe-end, then
    /// swipe, then the off-screen tween begins; completion work happens in
    /// [`Self::complete_commit`].
    fn commit(&self, direction: Direction, index: usize) {
        let item = &self.options.items[index];
        if let Some(on_swipe_end) = self.options.callbacks.on_swipe_end.clone() {
            on_swipe_end(item, direction);
        }
        if let Some(on_swipe) = self.options.callbacks.on_swipe.clone() {
            on_swipe(direction, item, index);
        }

        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.pending_commit = Some(PendingCommit {
                generation: state.generation,
                direction,
                index,
            });
            state.generation
        };

        let viewport = self.options.viewport;
        let target = match direction {
            Direction::Left => Point::new(-viewport.width, 0.0),
            Direction::Right => Point::new(viewport.width, 0.0),
            Direction::Up => Point::new(0.0, -viewport.height),
            Direction::Down => Point::new(0.0, viewport.height),
        };
        let spec = AnimationType::Tween(AnimationSpec::tween(
            self.options.animations.duration_millis,
            self.options.animations.easing,
        ));

        let options = Rc::clone(&self.options);
        let state = Rc::clone(&self.state);
        let offset = self.offset.clone();
        self.offset.animate_to_with(target, spec, move |end| {
            if end == AnimationEnd::Finished {
                Self::complete_commit(&options, &state, &offset, generation);
            }
        });
    }

    fn complete_commit(
        options: &Rc<ResolvedOptions<T, V>>,
        state: &Rc<RefCell<DeckMut>>,
        offset: &Animatable<Point>,
        generation: u64,
    ) {
        let pending = {
            let mut state = state.borrow_mut();
            let current = state
                .pending_commit
                .as_ref()
                .is_some_and(|pending| pending.generation == generation);
            if current {
                state.controller.on_commit_complete();
                state.pending_commit.take()
            } else {
                None
            }
        };
        let Some(pending) = pending else {
            return;
        };

        offset.snap_to(Point::ZERO);

        let new_index = pending.index + 1;
        if new_index >= options.items.len() {
            if let Some(on_stack_empty) = options.callbacks.on_stack_empty.clone() {
                on_stack_empty();
            }
            if let Some(on_empty) = options.callbacks.on_empty.clone() {
                on_empty();
            }
        }

        if options.controlled {
            if let Some(on_index_change) = options.callbacks.on_index_change.clone() {
                on_index_change(new_index);
            }
        } else {
            state.borrow_mut().internal_index = new_index;
        }

        if let Some(on_animation_complete) = options.callbacks.on_animation_complete.clone() {
            on_animation_complete(pending.direction, &options.items[pending.index]);
        }

        Self::notify_focus(options, state);
    }

    fn start_settle(&self) {
        let gestures = &self.options.gestures;
        let spec = match gestures.partial_swipe_return_easing {
            Some(easing) => AnimationType::Tween(AnimationSpec::tween(
                gestures.partial_swipe_return_duration_millis,
                easing,
            )),
            None => AnimationType::Spring(SpringSpec::default_spring()),
        };

        let state = Rc::clone(&self.state);
        self.offset.animate_to_with(Point::ZERO, spec, move |end| {
            if end == AnimationEnd::Finished {
                state.borrow_mut().controller.on_settle_complete();
            }
        });
    }

    /// Fires the focus callback when the active card changed.
    fn notify_focus(options: &Rc<ResolvedOptions<T, V>>, state: &Rc<RefCell<DeckMut>>) {
        let focused = {
            let mut state = state.borrow_mut();
            let index = state.controlled_index.unwrap_or(state.internal_index);
            let top = (index < options.items.len()).then_some(index);
            if top == state.last_focus {
                None
            } else {
                state.last_focus = top;
                top
            }
        };
        if let Some(index) = focused {
            if let Some(on_card_focus) = options.callbacks.on_card_focus.clone() {
                on_card_focus(&options.items[index], index);
            }
        }
    }

    /// Controlled-cursor mode only: the externally-owned index, fed back on
    /// every host render. The supplied value is ground truth; the stack
    /// keeps no drifting shadow copy.
    pub fn set_current_index(&self, index: usize) {
        if !self.options.controlled {
            log::warn!("set_current_index called on an internally-controlled stack; ignored");
            return;
        }
        self.state.borrow_mut().controlled_index = Some(index);
        Self::notify_focus(&self.options, &self.state);
    }

    /// External reset signal: an increase over the last observed trigger
    /// value resets the deck. Unchanged or smaller values do nothing.
    pub fn set_reset_trigger(&self, trigger: u64) {
        {
            let mut state = self.state.borrow_mut();
            if trigger <= state.last_reset_trigger {
                return;
            }
            state.last_reset_trigger = trigger;
        }
        self.reset();
    }

    /// Returns the cursor to 0 and the offset to rest. A deck already at
    /// rest on card 0 is left untouched and no callback fires; previously
    /// swiped items' callbacks are never replayed.
    pub fn reset(&self) {
        let at_rest = {
            let state = self.state.borrow();
            let index = state.controlled_index.unwrap_or(state.internal_index);
            index == 0
                && state.pending_commit.is_none()
                && state.controller.phase() == DragPhase::Idle
                && self.offset.value() == Point::ZERO
        };
        if at_rest {
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            // Invalidate any in-flight commit completion.
            state.generation += 1;
            state.pending_commit = None;
            state.controller.reset();
            if !self.options.controlled {
                state.internal_index = 0;
            }
        }
        self.offset.snap_to(Point::ZERO);

        if self.options.controlled {
            if let Some(on_index_change) = self.options.callbacks.on_index_change.clone() {
                on_index_change(0);
            }
        }
        Self::notify_focus(&self.options, &self.state);
    }

    /// The visible window, in paint order: deepest card first, the active
    /// card last so it is painted topmost.
    pub fn visible_cards(&self) -> Vec<CardPresentation<V>> {
        let index = self.current_index();
        let items = &self.options.items;
        if index >= items.len() {
            return Vec::new();
        }

        let end = (index + self.options.stack_size).min(items.len());
        let offset = self.offset.value();
        let rotation_enabled = self.options.animations.rotation_enabled;

        let mut cards: Vec<CardPresentation<V>> = (index..end)
            .map(|absolute| {
                let relative = absolute - index;
                let is_top = relative == 0;
                let item = &items[absolute];

                let transform = if is_top {
                    CardTransform {
                        translation: offset,
                        rotation_degrees: if rotation_enabled {
                            rotation_ramp().map(offset.x)
                        } else {
                            0.0
                        },
                        alpha: 1.0,
                    }
                } else {
                    CardTransform {
                        translation: Point::new(0.0, relative as f32 * STACK_DEPTH_OFFSET),
                        rotation_degrees: 0.0,
                        alpha: 1.0 - relative as f32 * STACK_DEPTH_FADE,
                    }
                };

                let icons = if is_top {
                    self.icon_overlays(offset)
                } else {
                    SmallVec::new()
                };

                CardPresentation {
                    index: absolute,
                    relative_index: relative,
                    is_top,
                    key: self.options.card_key(item, absolute),
                    transform,
                    content: self
                        .options
                        .render_card
                        .as_ref()
                        .map(|render| render(item, absolute, is_top)),
                    icons,
                    semantics: card_semantics(absolute, &self.options.accessibility.hint),
                }
            })
            .collect();

        cards.reverse();
        cards
    }

    fn icon_overlays(&self, offset: Point) -> SmallVec<[IconOverlay<V>; 4]> {
        let mut overlays = SmallVec::new();
        for direction in Direction::ALL {
            if let Some(slot) = self.options.icons.slot(direction) {
                overlays.push(IconOverlay {
                    direction,
                    content: slot.content.clone(),
                    placement: slot.placement,
                    opacity: self.feedback.opacity(direction, offset, true),
                });
            }
        }
        overlays
    }

    /// Content for the exhausted state, when a renderer was configured.
    /// `None` means the host paints nothing, which is the valid steady
    /// state, not an error.
    pub fn empty_content(&self) -> Option<V> {
        if !self.is_exhausted() {
            return None;
        }
        self.options.render_empty.as_ref().map(|render| render())
    }

    /// Accessibility record for the stack container.
    pub fn container_semantics(&self) -> SemanticsConfiguration {
        container_semantics(&self.options.accessibility)
    }
}

fn rotation_ramp() -> PiecewiseLinear<3> {
    PiecewiseLinear::new(
        [-ROTATION_INPUT_RANGE, 0.0, ROTATION_INPUT_RANGE],
        [-ROTATION_MAX_DEGREES, 0.0, ROTATION_MAX_DEGREES],
    )
}

#[cfg(test)]
#[path = "tests/stack_tests.rs"]
mod tests;
