//! Feedback icon configuration and priority-chain resolution.
//!
//! Three generations of the icon surface coexist: direct per-direction
//! fields, the grouped modern fields, and the legacy tick/cross era with its
//! show/hide flags and global positioning. Every logical field is resolved
//! once, at configuration-resolution time, by walking an ordered candidate
//! chain (direct > modern > legacy); render code only ever sees the single
//! canonical slot per direction.

use swipedeck_graphics::Point;

use crate::direction::{Direction, DirectionSet};

/// Where a feedback icon sits on the card.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum IconPlacement {
    /// Centered on the card.
    #[default]
    Center,
    /// Centered horizontally near the top edge.
    Top,
    /// Centered horizontally near the bottom edge.
    Bottom,
    /// Offset from the card center, in logical pixels.
    Custom(Point),
}

/// Per-direction icon content and placement, used by both the direct fields
/// and the modern grouped configuration.
#[derive(Clone, Debug)]
pub struct DirectionalIcons<V> {
    pub left: Option<V>,
    pub right: Option<V>,
    pub up: Option<V>,
    pub down: Option<V>,
    pub left_placement: Option<IconPlacement>,
    pub right_placement: Option<IconPlacement>,
    pub up_placement: Option<IconPlacement>,
    pub down_placement: Option<IconPlacement>,
}

// Manual impl: the derive would demand `V: Default`, which host view types
// cannot be assumed to provide.
impl<V> Default for DirectionalIcons<V> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            up: None,
            down: None,
            left_placement: None,
            right_placement: None,
            up_placement: None,
            down_placement: None,
        }
    }
}

impl<V> DirectionalIcons<V> {
    fn content(&self, direction: Direction) -> Option<&V> {
        match direction {
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    fn placement(&self, direction: Direction) -> Option<IconPlacement> {
        match direction {
            Direction::Left => self.left_placement,
            Direction::Right => self.right_placement,
            Direction::Up => self.up_placement,
            Direction::Down => self.down_placement,
        }
    }
}

/// Deprecated icon surface kept for backward compatibility: tick/cross
/// naming, per-slot show flags, and the global position control.
#[derive(Clone, Debug)]
pub struct LegacyIcons<V> {
    pub tick: Option<V>,
    pub cross: Option<V>,
    pub up: Option<V>,
    pub down: Option<V>,
    pub left: Option<V>,
    pub right: Option<V>,

    pub show_tick: bool,
    pub show_cross: bool,
    pub show_up: bool,
    pub show_down: bool,
    pub show_left: bool,
    pub show_right: bool,

    pub tick_placement: Option<IconPlacement>,
    pub cross_placement: Option<IconPlacement>,
    pub up_placement: Option<IconPlacement>,
    pub down_placement: Option<IconPlacement>,
    pub left_placement: Option<IconPlacement>,
    pub right_placement: Option<IconPlacement>,

    /// Global position applied when no per-slot placement matched.
    pub icon_position: IconPlacement,
}

impl<V> Default for LegacyIcons<V> {
    fn default() -> Self {
        Self {
            tick: None,
            cross: None,
            up: None,
            down: None,
            left: None,
            right: None,
            show_tick: false,
            show_cross: false,
            show_up: false,
            show_down: false,
            show_left: false,
            show_right: false,
            tick_placement: None,
            cross_placement: None,
            up_placement: None,
            down_placement: None,
            left_placement: None,
            right_placement: None,
            icon_position: IconPlacement::Center,
        }
    }
}

impl<V> LegacyIcons<V> {
    /// Legacy content candidates for a direction, in priority order:
    /// the direction-named slot first, then tick (right) / cross (left).
    fn content(&self, direction: Direction) -> Option<&V> {
        match direction {
            Direction::Left => self.left.as_ref().or(self.cross.as_ref()),
            Direction::Right => self.right.as_ref().or(self.tick.as_ref()),
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    fn placement(&self, direction: Direction) -> Option<IconPlacement> {
        match direction {
            Direction::Left => self.left_placement.or(self.cross_placement),
            Direction::Right => self.right_placement.or(self.tick_placement),
            Direction::Up => self.up_placement,
            Direction::Down => self.down_placement,
        }
    }

    fn show_flag(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.show_left || self.show_cross,
            Direction::Right => self.show_right || self.show_tick,
            Direction::Up => self.show_up,
            Direction::Down => self.show_down,
        }
    }
}

/// The whole icon option surface: all three generations.
#[derive(Clone, Debug)]
pub struct IconOptions<V> {
    /// Direct per-direction fields, highest priority.
    pub direct: DirectionalIcons<V>,
    /// The modern grouped configuration.
    pub modern: DirectionalIcons<V>,
    /// The deprecated surface, lowest priority.
    pub legacy: LegacyIcons<V>,
}

impl<V> Default for IconOptions<V> {
    fn default() -> Self {
        Self {
            direct: DirectionalIcons::default(),
            modern: DirectionalIcons::default(),
            legacy: LegacyIcons::default(),
        }
    }
}

/// One canonical resolved icon.
#[derive(Clone, Debug)]
pub struct IconSlot<V> {
    pub content: V,
    pub placement: IconPlacement,
}

/// Canonical per-direction icons after priority-chain collapse.
#[derive(Clone, Debug)]
pub struct ResolvedIcons<V> {
    slots: [Option<IconSlot<V>>; 4],
    armed: DirectionSet,
}

impl<V> Default for ResolvedIcons<V> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None],
            armed: DirectionSet::NONE,
        }
    }
}

impl<V: Clone> ResolvedIcons<V> {
    /// Collapses the candidate chains, once. Content and placement resolve
    /// independently (a direct icon may still pick up a legacy placement).
    pub fn resolve(options: &IconOptions<V>) -> Self {
        let mut slots: [Option<IconSlot<V>>; 4] = [None, None, None, None];
        let mut armed = DirectionSet::NONE;

        for direction in Direction::ALL {
            let content = options
                .direct
                .content(direction)
                .or_else(|| options.modern.content(direction))
                .or_else(|| options.legacy.content(direction));

            let placement = options
                .direct
                .placement(direction)
                .or_else(|| options.modern.placement(direction))
                .or_else(|| options.legacy.placement(direction))
                .unwrap_or(options.legacy.icon_position);

            if content.is_some() || options.legacy.show_flag(direction) {
                armed.insert(direction);
            }

            slots[direction.index()] = content.map(|content| IconSlot {
                content: content.clone(),
                placement,
            });
        }

        Self { slots, armed }
    }
}

impl<V> ResolvedIcons<V> {
    pub fn slot(&self, direction: Direction) -> Option<&IconSlot<V>> {
        self.slots[direction.index()].as_ref()
    }

    /// Directions whose feedback opacity should respond to the drag: any
    /// with resolved content, plus any a legacy show flag armed without
    /// content.
    pub fn armed(&self) -> DirectionSet {
        self.armed
    }
}
