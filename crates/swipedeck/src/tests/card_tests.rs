use super::*;

use swipedeck_core::{PointerEvent, PointerEventKind};
use swipedeck_graphics::Point;

fn controller_with(gestures: GestureOptions) -> CardGestureController {
    CardGestureController::new(Thresholds::default(), gestures)
}

fn controller() -> CardGestureController {
    controller_with(GestureOptions::default())
}

fn down(x: f32, y: f32, t: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Down, Point::new(x, y), t)
}

fn moved(x: f32, y: f32, t: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Move, Point::new(x, y), t)
}

fn up(x: f32, y: f32, t: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Up, Point::new(x, y), t)
}

fn cancel(x: f32, y: f32, t: i64) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Cancel, Point::new(x, y), t)
}

/// Drags from (100, 100) by the given delta in unhurried 20ms steps and
/// returns the controller ready for release at `t = 100`.
fn dragged(controller: &mut CardGestureController, dx: f32, dy: f32) {
    assert!(matches!(
        controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO),
        DragTransition::TouchDown
    ));
    for step in 1..=5 {
        let fraction = step as f32 / 5.0;
        controller.on_pointer_event(
            &moved(100.0 + dx * fraction, 100.0 + dy * fraction, step * 20),
            Point::ZERO,
        );
    }
}

#[test]
fn sub_slop_movement_claims_nothing() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);
    let transition = controller.on_pointer_event(&moved(105.0, 103.0, 16), Point::ZERO);
    assert!(matches!(transition, DragTransition::None));
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[test]
fn slop_pass_claims_then_moves() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);

    let claim = controller.on_pointer_event(&moved(115.0, 100.0, 16), Point::ZERO);
    match claim {
        DragTransition::DragClaimed { offset } => assert_eq!(offset, Point::new(15.0, 0.0)),
        other => panic!("expected claim, got {other:?}"),
    }
    assert_eq!(controller.phase(), DragPhase::Dragging);

    let movement = controller.on_pointer_event(&moved(150.0, 110.0, 32), Point::ZERO);
    match movement {
        DragTransition::DragMoved { offset } => assert_eq!(offset, Point::new(50.0, 10.0)),
        other => panic!("expected move, got {other:?}"),
    }
}

#[test]
fn claimed_moves_consume_the_event() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);
    let claim_event = moved(120.0, 100.0, 16);
    controller.on_pointer_event(&claim_event, Point::ZERO);
    assert!(claim_event.is_consumed());
}

#[test]
fn drag_base_accumulates_current_offset() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::new(40.0, -5.0));
    let claim = controller.on_pointer_event(&moved(120.0, 100.0, 16), Point::ZERO);
    match claim {
        DragTransition::DragClaimed { offset } => assert_eq!(offset, Point::new(60.0, -5.0)),
        other => panic!("expected claim, got {other:?}"),
    }
}

#[test]
fn committed_release_over_distance_threshold() {
    let mut controller = controller();
    dragged(&mut controller, 150.0, 0.0);

    let release = controller.on_pointer_event(&up(250.0, 100.0, 120), Point::ZERO);
    match release {
        DragTransition::Released(ReleaseVerdict::Commit { direction, .. }) => {
            assert_eq!(direction, Direction::Right);
        }
        other => panic!("expected commit, got {other:?}"),
    }
    assert_eq!(controller.phase(), DragPhase::Committing);
}

#[test]
fn weak_release_settles_back() {
    let mut controller = controller();
    dragged(&mut controller, 50.0, 0.0);

    let release = controller.on_pointer_event(&up(150.0, 100.0, 120), Point::ZERO);
    assert!(matches!(
        release,
        DragTransition::Released(ReleaseVerdict::SettleBack)
    ));
    assert_eq!(controller.phase(), DragPhase::SettlingBack);

    controller.on_settle_complete();
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[test]
fn disabled_direction_rubber_bands_and_notifies() {
    let mut controller = controller_with(GestureOptions {
        swipe_directions: DirectionSet::HORIZONTAL,
        ..GestureOptions::default()
    });
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);

    let claim = controller.on_pointer_event(&moved(100.0, 250.0, 20), Point::ZERO);
    match claim {
        DragTransition::DragClaimed { offset } => {
            assert_eq!(offset, Point::new(0.0, 50.0), "travel bounded by rubber-band");
        }
        other => panic!("expected claim, got {other:?}"),
    }

    let release = controller.on_pointer_event(&up(100.0, 250.0, 40), Point::ZERO);
    match release {
        DragTransition::Released(ReleaseVerdict::Partial { direction }) => {
            assert_eq!(direction, Direction::Down);
        }
        other => panic!("expected partial, got {other:?}"),
    }
}

#[test]
fn disabled_direction_hard_clamps_without_partial() {
    let mut controller = controller_with(GestureOptions {
        swipe_directions: DirectionSet::HORIZONTAL,
        allow_partial_swipe: false,
        ..GestureOptions::default()
    });
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);

    let claim = controller.on_pointer_event(&moved(100.0, 250.0, 20), Point::ZERO);
    match claim {
        DragTransition::DragClaimed { offset } => assert_eq!(offset, Point::ZERO),
        other => panic!("expected claim, got {other:?}"),
    }

    let release = controller.on_pointer_event(&up(100.0, 250.0, 40), Point::ZERO);
    assert!(
        matches!(
            release,
            DragTransition::Released(ReleaseVerdict::SettleBack)
        ),
        "no partial notification when partial swipes are off"
    );
}

#[test]
fn enabled_axis_passes_through_while_disabled_axis_clamps() {
    let mut controller = controller_with(GestureOptions {
        swipe_directions: DirectionSet::HORIZONTAL,
        ..GestureOptions::default()
    });
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);

    let movement = controller.on_pointer_event(&moved(240.0, 250.0, 20), Point::ZERO);
    match movement {
        DragTransition::DragClaimed { offset } => {
            assert_eq!(offset, Point::new(140.0, 50.0));
        }
        other => panic!("expected claim, got {other:?}"),
    }
}

#[test]
fn cancel_never_commits() {
    let mut controller = controller();
    dragged(&mut controller, 200.0, 0.0);

    let release = controller.on_pointer_event(&cancel(300.0, 100.0, 120), Point::ZERO);
    assert!(matches!(
        release,
        DragTransition::Released(ReleaseVerdict::SettleBack)
    ));
    assert_eq!(controller.phase(), DragPhase::SettlingBack);
}

#[test]
fn tap_on_sub_slop_release() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);
    controller.on_pointer_event(&moved(103.0, 101.0, 30), Point::ZERO);

    let release = controller.on_pointer_event(&up(103.0, 101.0, 60), Point::ZERO);
    assert!(matches!(
        release,
        DragTransition::Released(ReleaseVerdict::Tap)
    ));
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[test]
fn sub_slop_cancel_is_silent() {
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);
    let release = controller.on_pointer_event(&cancel(100.0, 100.0, 30), Point::ZERO);
    assert!(matches!(release, DragTransition::None));
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[test]
fn fast_flick_under_both_distance_thresholds_never_commits() {
    // High release velocity cannot conjure a direction: classification is
    // distance-based, and velocity only lowers the commit bar once a
    // direction exists.
    let mut controller = controller();
    controller.on_pointer_event(&down(100.0, 100.0, 0), Point::ZERO);
    controller.on_pointer_event(&moved(120.0, 100.0, 8), Point::ZERO);
    controller.on_pointer_event(&moved(150.0, 100.0, 16), Point::ZERO);

    let release = controller.on_pointer_event(&up(150.0, 100.0, 20), Point::ZERO);
    assert!(matches!(
        release,
        DragTransition::Released(ReleaseVerdict::SettleBack)
    ));
}

#[test]
fn mid_settle_grab_resumes_settling_on_sub_slop_release() {
    let mut controller = controller();
    dragged(&mut controller, 50.0, 0.0);
    controller.on_pointer_event(&up(150.0, 100.0, 120), Point::ZERO);
    assert_eq!(controller.phase(), DragPhase::SettlingBack);

    // Grab the card while it springs back, then let go without dragging.
    let grab = controller.on_pointer_event(&down(130.0, 100.0, 200), Point::new(30.0, 0.0));
    assert!(matches!(grab, DragTransition::TouchDown));

    let release = controller.on_pointer_event(&up(131.0, 100.0, 240), Point::ZERO);
    assert!(
        matches!(
            release,
            DragTransition::Released(ReleaseVerdict::SettleBack)
        ),
        "a mid-settle grab must settle, not tap"
    );
}

#[test]
fn down_during_commit_is_refused() {
    let mut controller = controller();
    dragged(&mut controller, 200.0, 0.0);
    controller.on_pointer_event(&up(300.0, 100.0, 120), Point::ZERO);
    assert_eq!(controller.phase(), DragPhase::Committing);

    let transition = controller.on_pointer_event(&down(100.0, 100.0, 200), Point::ZERO);
    assert!(matches!(transition, DragTransition::None));
}

#[test]
fn reset_abandons_gesture_state() {
    let mut controller = controller();
    dragged(&mut controller, 80.0, 0.0);
    controller.reset();
    assert_eq!(controller.phase(), DragPhase::Idle);

    // A fresh gesture works normally after the reset.
    controller.on_pointer_event(&down(100.0, 100.0, 500), Point::ZERO);
    let claim = controller.on_pointer_event(&moved(120.0, 100.0, 520), Point::ZERO);
    assert!(matches!(claim, DragTransition::DragClaimed { .. }));
}
