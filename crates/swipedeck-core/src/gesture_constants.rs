//! Shared gesture constants for consistent pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens a host
//! may scale them by the device's DPI factor before building its config.

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density. Release velocities above this are clamped before the
/// commit check so a wild tracker sample cannot force a swipe.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Bounded travel, per axis, that a drag toward a disabled direction is
/// allowed when partial swipes are on (the rubber-band limit).
pub const PARTIAL_DRAG_LIMIT: f32 = 50.0;

/// Minimum raw displacement on either axis for a non-committing release
/// toward a disabled direction to count as intentional and notify.
pub const PARTIAL_SWIPE_INTENT_DISTANCE: f32 = 30.0;
