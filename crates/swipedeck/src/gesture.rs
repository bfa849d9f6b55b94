//! Release-gesture classification.

use crate::config::Thresholds;
use crate::direction::Direction;

/// Classifies raw drag deltas into a swipe direction, or `None` when the
/// gesture is insufficient.
///
/// The dominant axis (larger absolute displacement) picks the branch; ties
/// fall to the vertical branch. Only the dominant axis is compared against
/// its commit threshold, so a drag that is mostly horizontal never commits
/// vertically no matter how far it also travelled in y.
///
/// Pure and stateless: the same inputs always produce the same answer.
pub fn classify(dx: f32, dy: f32, thresholds: &Thresholds) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() > thresholds.horizontal {
            return Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            });
        }
    } else if dy.abs() > thresholds.vertical {
        return Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        });
    }

    None
}
