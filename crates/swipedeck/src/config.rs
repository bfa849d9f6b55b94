//! Deck configuration: option groups, defaults, and resolution.
//!
//! Hosts hand the stack a [`DeckOptions`] where every omitted piece falls
//! back to a documented default. [`resolve`] is the single place partial
//! configuration, legacy overrides, and icon priority chains collapse into a
//! fully-populated [`ResolvedOptions`]; nothing downstream re-derives an
//! option.

use std::rc::Rc;

use swipedeck_animation::Easing;
use swipedeck_graphics::Size;

use crate::direction::{Direction, DirectionSet};
use crate::icons::{IconOptions, ResolvedIcons};

/// Numeric gesture-commit tuning. Distances in logical pixels, velocity in
/// logical pixels per millisecond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Horizontal displacement gating a left/right commit.
    pub horizontal: f32,
    /// Vertical displacement gating an up/down commit.
    pub vertical: f32,
    /// Displacement below which feedback icons stay hidden.
    pub icon_delay: f32,
    /// Release speed letting a short flick commit under the distance gates.
    pub velocity: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            horizontal: 120.0,
            vertical: 120.0,
            icon_delay: 30.0,
            velocity: 0.3,
        }
    }
}

/// Tween behavior for the off-screen fling and the drag-follow transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOptions {
    /// Off-screen animation duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
    /// Whether the top card tilts with horizontal drag.
    pub rotation_enabled: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_millis: 300,
            easing: Easing::FastOutSlowIn,
            rotation_enabled: true,
        }
    }
}

/// Direction enablement and drag policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureOptions {
    /// Directions allowed to commit a swipe.
    pub swipe_directions: DirectionSet,
    /// Rubber-band toward disabled directions instead of hard-blocking, and
    /// notify on intentional releases toward them.
    pub allow_partial_swipe: bool,
    /// Drag slop in logical pixels before the gesture claims the card.
    pub gesture_threshold: f32,
    /// Timed-easing return duration after a non-committing release, used
    /// only when `partial_swipe_return_easing` is set.
    pub partial_swipe_return_duration_millis: u64,
    /// When set, the settle-back uses a timed easing instead of the spring.
    pub partial_swipe_return_easing: Option<Easing>,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            swipe_directions: DirectionSet::ALL,
            allow_partial_swipe: true,
            gesture_threshold: 10.0,
            partial_swipe_return_duration_millis: 300,
            partial_swipe_return_easing: None,
        }
    }
}

/// Render-window depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackBehavior {
    /// Number of cards materialized at once, top included.
    pub stack_size: usize,
}

impl Default for StackBehavior {
    fn default() -> Self {
        Self { stack_size: 2 }
    }
}

/// Passthrough to the host platform's accessibility layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessibilityOptions {
    pub label: Option<String>,
    pub hint: Option<String>,
    pub role: Option<String>,
}

/// Lifecycle notifications. All optional; absent callbacks are skipped.
///
/// Handlers are shared `Fn` closures so the stack can invoke them without
/// holding any internal borrow; hosts needing mutation capture a `Cell` or
/// `RefCell` of their own.
pub struct Callbacks<T> {
    /// A committed swipe, or a partial swipe toward a disabled direction.
    pub on_swipe: Option<Rc<dyn Fn(Direction, &T, usize)>>,
    /// The drag passed the slop and claimed the card.
    pub on_swipe_start: Option<Rc<dyn Fn(&T, usize)>>,
    /// A commit was decided, before the off-screen animation starts.
    pub on_swipe_end: Option<Rc<dyn Fn(&T, Direction)>>,
    /// The cursor moved past the last item.
    pub on_stack_empty: Option<Rc<dyn Fn()>>,
    /// A card became the active (top) card.
    pub on_card_focus: Option<Rc<dyn Fn(&T, usize)>>,
    /// The off-screen animation finished and the cursor advanced.
    pub on_animation_complete: Option<Rc<dyn Fn(Direction, &T)>>,
    /// A press released without ever claiming the card.
    pub on_tap: Option<Rc<dyn Fn(&T, usize)>>,
    /// Convenience duplicate of `on_stack_empty`.
    pub on_empty: Option<Rc<dyn Fn()>>,
    /// Controlled-cursor mode: the stack requests this index change instead
    /// of mutating its own cursor.
    pub on_index_change: Option<Rc<dyn Fn(usize)>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_swipe: None,
            on_swipe_start: None,
            on_swipe_end: None,
            on_stack_empty: None,
            on_card_focus: None,
            on_animation_complete: None,
            on_tap: None,
            on_empty: None,
            on_index_change: None,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_swipe: self.on_swipe.clone(),
            on_swipe_start: self.on_swipe_start.clone(),
            on_swipe_end: self.on_swipe_end.clone(),
            on_stack_empty: self.on_stack_empty.clone(),
            on_card_focus: self.on_card_focus.clone(),
            on_animation_complete: self.on_animation_complete.clone(),
            on_tap: self.on_tap.clone(),
            on_empty: self.on_empty.clone(),
            on_index_change: self.on_index_change.clone(),
        }
    }
}

/// Full option surface for one deck instance.
///
/// `T` is the caller's item type (never inspected except through the render
/// and key functions); `V` is the host's view/node type used for rendered
/// card content, empty content, and icon content.
pub struct DeckOptions<T, V = ()> {
    pub items: Vec<T>,
    /// Produces the visual content for a card: `(item, index, is_active)`.
    pub render_card: Option<Rc<dyn Fn(&T, usize, bool) -> V>>,
    /// Produces the content shown when the deck is exhausted.
    pub render_empty: Option<Rc<dyn Fn() -> V>>,
    /// Stable identity per card; positional index when absent.
    pub key_extractor: Option<Rc<dyn Fn(&T, usize) -> String>>,
    /// Viewport the off-screen animation must clear.
    pub viewport: Size,
    pub thresholds: Thresholds,
    pub animations: AnimationOptions,
    pub gestures: GestureOptions,
    pub stack: StackBehavior,
    pub icons: IconOptions<V>,
    pub callbacks: Callbacks<T>,
    pub accessibility: AccessibilityOptions,
    /// When set, the caller owns the cursor and must feed updates through
    /// [`crate::CardStack::set_current_index`].
    pub controlled_index: Option<usize>,
    /// Monotonically increasing counter; an observed increase resets the deck.
    pub reset_trigger: u64,

    // Deprecated top-level overrides, kept for backward compatibility.
    pub enable_up_swipe: Option<bool>,
    pub animation_duration: Option<u64>,
    pub rotation_enabled: Option<bool>,
    pub stack_size: Option<usize>,
}

impl<T, V> DeckOptions<T, V> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            render_card: None,
            render_empty: None,
            key_extractor: None,
            viewport: DEFAULT_VIEWPORT,
            thresholds: Thresholds::default(),
            animations: AnimationOptions::default(),
            gestures: GestureOptions::default(),
            stack: StackBehavior::default(),
            icons: IconOptions::default(),
            callbacks: Callbacks::default(),
            accessibility: AccessibilityOptions::default(),
            controlled_index: None,
            reset_trigger: 0,
            enable_up_swipe: None,
            animation_duration: None,
            rotation_enabled: None,
            stack_size: None,
        }
    }
}

/// Viewport assumed when the host never measured one.
pub const DEFAULT_VIEWPORT: Size = Size::new(360.0, 640.0);

/// Accessibility strings after defaulting.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAccessibility {
    pub label: String,
    pub hint: String,
    pub role: Option<String>,
}

/// Fully-populated configuration record. Immutable once built.
pub struct ResolvedOptions<T, V = ()> {
    pub items: Vec<T>,
    pub render_card: Option<Rc<dyn Fn(&T, usize, bool) -> V>>,
    pub render_empty: Option<Rc<dyn Fn() -> V>>,
    pub key_extractor: Option<Rc<dyn Fn(&T, usize) -> String>>,
    pub viewport: Size,
    pub thresholds: Thresholds,
    pub animations: AnimationOptions,
    pub gestures: GestureOptions,
    pub stack_size: usize,
    pub icons: ResolvedIcons<V>,
    pub callbacks: Callbacks<T>,
    pub accessibility: ResolvedAccessibility,
    pub controlled: bool,
    pub initial_index: usize,
    pub reset_trigger: u64,
}

impl<T, V> ResolvedOptions<T, V> {
    /// Card identity: the extractor when supplied, else the positional index.
    pub fn card_key(&self, item: &T, index: usize) -> String {
        match &self.key_extractor {
            Some(extract) => extract(item, index),
            None => index.to_string(),
        }
    }
}

/// Collapses a partial [`DeckOptions`] into a [`ResolvedOptions`].
///
/// Pure: no shared default object is consulted or mutated. Deprecated
/// top-level overrides win over their grouped equivalents, matching the
/// precedence the original option surface documented.
pub fn resolve<T, V: Clone>(options: DeckOptions<T, V>) -> ResolvedOptions<T, V> {
    let DeckOptions {
        items,
        render_card,
        render_empty,
        key_extractor,
        viewport,
        thresholds,
        mut animations,
        mut gestures,
        stack,
        icons,
        callbacks,
        accessibility,
        controlled_index,
        reset_trigger,
        enable_up_swipe,
        animation_duration,
        rotation_enabled,
        stack_size,
    } = options;

    if let Some(duration) = animation_duration {
        animations.duration_millis = duration;
    }
    if let Some(rotation) = rotation_enabled {
        animations.rotation_enabled = rotation;
    }
    gestures.swipe_directions = gestures.swipe_directions.apply_legacy_up(enable_up_swipe);

    let stack_size = stack_size.unwrap_or(stack.stack_size).max(1);

    let accessibility = ResolvedAccessibility {
        label: accessibility
            .label
            .unwrap_or_else(|| DEFAULT_ACCESSIBILITY_LABEL.to_string()),
        hint: accessibility
            .hint
            .unwrap_or_else(|| DEFAULT_ACCESSIBILITY_HINT.to_string()),
        role: accessibility.role,
    };

    ResolvedOptions {
        initial_index: controlled_index.unwrap_or(0),
        controlled: controlled_index.is_some(),
        icons: ResolvedIcons::resolve(&icons),
        items,
        render_card,
        render_empty,
        key_extractor,
        viewport,
        thresholds,
        animations,
        gestures,
        stack_size,
        callbacks,
        accessibility,
        reset_trigger,
    }
}

pub const DEFAULT_ACCESSIBILITY_LABEL: &str = "Swipeable cards stack";
pub const DEFAULT_ACCESSIBILITY_HINT: &str =
    "Swipe cards left or right to navigate, swipe up for custom actions";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let resolved = resolve(DeckOptions::<u32>::new(vec![1, 2, 3]));
        assert_eq!(resolved.thresholds.horizontal, 120.0);
        assert_eq!(resolved.thresholds.vertical, 120.0);
        assert_eq!(resolved.thresholds.icon_delay, 30.0);
        assert_eq!(resolved.thresholds.velocity, 0.3);
        assert_eq!(resolved.animations.duration_millis, 300);
        assert_eq!(resolved.stack_size, 2);
        assert_eq!(resolved.gestures.swipe_directions, DirectionSet::ALL);
        assert!(resolved.gestures.allow_partial_swipe);
        assert!(!resolved.controlled);
        assert_eq!(resolved.initial_index, 0);
    }

    #[test]
    fn legacy_overrides_win_over_groups() {
        let mut options = DeckOptions::<u32>::new(vec![]);
        options.animations.duration_millis = 250;
        options.animation_duration = Some(120);
        options.stack.stack_size = 3;
        options.stack_size = Some(5);
        options.rotation_enabled = Some(false);

        let resolved = resolve(options);
        assert_eq!(resolved.animations.duration_millis, 120);
        assert_eq!(resolved.stack_size, 5);
        assert!(!resolved.animations.rotation_enabled);
    }

    #[test]
    fn legacy_up_swipe_merges_into_direction_set() {
        let mut options = DeckOptions::<u32>::new(vec![]);
        options.enable_up_swipe = Some(false);

        let resolved = resolve(options);
        assert!(!resolved.gestures.swipe_directions.contains(Direction::Up));
        assert!(resolved.gestures.swipe_directions.contains(Direction::Down));
    }

    #[test]
    fn stack_size_floor_is_one() {
        let mut options = DeckOptions::<u32>::new(vec![]);
        options.stack.stack_size = 0;
        assert_eq!(resolve(options).stack_size, 1);
    }

    #[test]
    fn accessibility_defaults_fill_absent_fields() {
        let resolved = resolve(DeckOptions::<u32>::new(vec![]));
        assert_eq!(resolved.accessibility.label, DEFAULT_ACCESSIBILITY_LABEL);
        assert_eq!(resolved.accessibility.hint, DEFAULT_ACCESSIBILITY_HINT);
        assert_eq!(resolved.accessibility.role, None);
    }

    #[test]
    fn card_key_defaults_to_position() {
        let resolved = resolve(DeckOptions::<&str>::new(vec!["a", "b"]));
        assert_eq!(resolved.card_key(&"a", 0), "0");

        let mut options = DeckOptions::<&str>::new(vec!["a", "b"]);
        options.key_extractor = Some(Rc::new(|item, _| format!("card-{item}")));
        let resolved = resolve(options);
        assert_eq!(resolved.card_key(&"b", 1), "card-b");
    }
}
