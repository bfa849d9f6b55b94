//! Live icon-opacity feedback derived from the drag offset.

use swipedeck_animation::PiecewiseLinear;
use swipedeck_graphics::Point;

use crate::config::Thresholds;
use crate::direction::{Direction, DirectionSet};

/// Per-direction opacity ramps over the drag displacement.
///
/// Each armed, enabled direction gets a clamped five-point ramp along its
/// axis: dead in `[-icon_delay, icon_delay]`, rising linearly to 1 at the
/// commit threshold on the direction's sign, clamped beyond. Left/up peak on
/// the negative side, right/down on the positive side, so the left↔right and
/// up↔down ramps mirror each other.
pub struct IconFeedbackModel {
    ramps: [Option<PiecewiseLinear<5>>; 4],
}

impl IconFeedbackModel {
    /// Builds ramps for every direction that is enabled for swiping and has
    /// icon feedback armed. Other directions stay flat zero.
    pub fn new(thresholds: &Thresholds, enabled: DirectionSet, armed: DirectionSet) -> Self {
        let mut ramps: [Option<PiecewiseLinear<5>>; 4] = [None, None, None, None];

        for direction in Direction::ALL {
            if !enabled.contains(direction) || !armed.contains(direction) {
                continue;
            }

            let commit = if direction.is_horizontal() {
                thresholds.horizontal
            } else {
                thresholds.vertical
            };
            let delay = thresholds.icon_delay.min(commit);

            let input = [-commit, -delay, 0.0, delay, commit];
            let output = match direction {
                Direction::Right | Direction::Down => [0.0, 0.0, 0.0, 0.0, 1.0],
                Direction::Left | Direction::Up => [1.0, 0.0, 0.0, 0.0, 0.0],
            };
            ramps[direction.index()] = Some(PiecewiseLinear::new(input, output));
        }

        Self { ramps }
    }

    /// Opacity of the given direction's icon for a card at the given drag
    /// offset. Non-top cards always report 0.
    pub fn opacity(&self, direction: Direction, offset: Point, is_top: bool) -> f32 {
        if !is_top {
            return 0.0;
        }
        let Some(ramp) = &self.ramps[direction.index()] else {
            return 0.0;
        };
        let displacement = if direction.is_horizontal() {
            offset.x
        } else {
            offset.y
        };
        ramp.map(displacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(enabled: DirectionSet) -> IconFeedbackModel {
        IconFeedbackModel::new(&Thresholds::default(), enabled, DirectionSet::ALL)
    }

    #[test]
    fn dead_zone_reports_zero() {
        let model = model(DirectionSet::ALL);
        for direction in Direction::ALL {
            assert_eq!(model.opacity(direction, Point::ZERO, true), 0.0);
        }
        assert_eq!(model.opacity(Direction::Right, Point::new(30.0, 0.0), true), 0.0);
        assert_eq!(model.opacity(Direction::Right, Point::new(-90.0, 0.0), true), 0.0);
    }

    #[test]
    fn ramp_midpoint_and_saturation() {
        let model = model(DirectionSet::ALL);
        let mid = model.opacity(Direction::Right, Point::new(75.0, 0.0), true);
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(
            model.opacity(Direction::Right, Point::new(150.0, 0.0), true),
            1.0
        );
    }

    #[test]
    fn ramps_are_antisymmetric_across_opposites() {
        let model = model(DirectionSet::ALL);
        for probe in [40.0f32, 75.0, 119.0, 200.0] {
            let right = model.opacity(Direction::Right, Point::new(probe, 0.0), true);
            let left = model.opacity(Direction::Left, Point::new(-probe, 0.0), true);
            assert!((right - left).abs() < 1e-6);

            let down = model.opacity(Direction::Down, Point::new(0.0, probe), true);
            let up = model.opacity(Direction::Up, Point::new(0.0, -probe), true);
            assert!((down - up).abs() < 1e-6);
        }
    }

    #[test]
    fn monotone_within_ramp() {
        let model = model(DirectionSet::ALL);
        let mut last = 0.0;
        let mut probe = 30.0;
        while probe <= 120.0 {
            let opacity = model.opacity(Direction::Down, Point::new(0.0, probe), true);
            assert!(opacity >= last);
            last = opacity;
            probe += 5.0;
        }
    }

    #[test]
    fn non_top_cards_report_zero() {
        let model = model(DirectionSet::ALL);
        assert_eq!(
            model.opacity(Direction::Right, Point::new(150.0, 0.0), false),
            0.0
        );
    }

    #[test]
    fn disabled_direction_reports_zero() {
        let model = model(DirectionSet::HORIZONTAL);
        assert_eq!(
            model.opacity(Direction::Up, Point::new(0.0, -150.0), true),
            0.0
        );
        assert!(model.opacity(Direction::Left, Point::new(-150.0, 0.0), true) > 0.0);
    }

    #[test]
    fn unarmed_direction_reports_zero() {
        let model = IconFeedbackModel::new(
            &Thresholds::default(),
            DirectionSet::ALL,
            DirectionSet::NONE.with(Direction::Right),
        );
        assert_eq!(
            model.opacity(Direction::Left, Point::new(-150.0, 0.0), true),
            0.0
        );
        assert_eq!(
            model.opacity(Direction::Right, Point::new(150.0, 0.0), true),
            1.0
        );
    }
}
