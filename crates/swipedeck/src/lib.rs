//! Swipedeck: a swipeable card-stack widget (dating-app style deck).
//!
//! The stack renders a window of stacked cards, lets the user drag the top
//! card, classifies the release into a swipe direction, flings committed
//! cards off-screen and advances the deck, and springs everything else back
//! to rest. Rendering, layout, and pointer delivery stay on the host side:
//! the host feeds [`swipedeck_core::PointerEvent`]s and frame timestamps in,
//! and paints the [`CardPresentation`]s that come back out.

mod card;
mod config;
mod direction;
mod feedback;
mod gesture;
mod icons;
mod semantics;
mod stack;

pub use card::DragPhase;
pub use config::{
    resolve, AccessibilityOptions, AnimationOptions, Callbacks, DeckOptions, GestureOptions,
    ResolvedAccessibility, ResolvedOptions, StackBehavior, Thresholds, DEFAULT_ACCESSIBILITY_HINT,
    DEFAULT_ACCESSIBILITY_LABEL, DEFAULT_VIEWPORT,
};
pub use direction::{Direction, DirectionSet};
pub use feedback::IconFeedbackModel;
pub use gesture::classify;
pub use icons::{
    DirectionalIcons, IconOptions, IconPlacement, IconSlot, LegacyIcons, ResolvedIcons,
};
pub use semantics::SemanticsConfiguration;
pub use stack::{CardPresentation, CardStack, IconOverlay};

pub mod prelude {
    pub use crate::config::{DeckOptions, GestureOptions, Thresholds};
    pub use crate::direction::{Direction, DirectionSet};
    pub use crate::stack::{CardPresentation, CardStack};
    pub use swipedeck_core::{PointerEvent, PointerEventKind, Runtime, RuntimeHandle};
    pub use swipedeck_graphics::{Point, Size};
}
