//! End-to-end scenarios: synthetic pointer streams through the full stack,
//! with animations driven frame by frame.

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck::{Callbacks, DeckOptions, Direction, DirectionSet, DragPhase};
use swipedeck_graphics::Point;
use swipedeck_testing::DeckRobot;

type Log = Rc<RefCell<Vec<String>>>;

fn deck_options(log: &Log, items: Vec<&'static str>) -> DeckOptions<&'static str> {
    let mut options = DeckOptions::new(items);

    let mut callbacks = Callbacks::default();
    let sink = Rc::clone(log);
    callbacks.on_swipe = Some(Rc::new(move |direction, item, index| {
        sink.borrow_mut().push(format!("swipe:{direction:?}:{item}:{index}"));
    }));
    let sink = Rc::clone(log);
    callbacks.on_stack_empty = Some(Rc::new(move || {
        sink.borrow_mut().push("stack-empty".to_string());
    }));
    let sink = Rc::clone(log);
    callbacks.on_animation_complete = Some(Rc::new(move |direction, item| {
        sink.borrow_mut().push(format!("complete:{direction:?}:{item}"));
    }));
    let sink = Rc::clone(log);
    callbacks.on_index_change = Some(Rc::new(move |index| {
        sink.borrow_mut().push(format!("index:{index}"));
    }));
    options.callbacks = callbacks;

    options
}

#[test]
fn committed_swipe_walks_the_window_forward() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut robot = DeckRobot::launch(deck_options(&log, vec!["alpha", "beta", "gamma"]));

    // Default stack size 2: alpha on top, beta beneath.
    let cards = robot.snapshot();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards.last().unwrap().index, 0);
    assert!(cards.last().unwrap().is_top);
    assert_eq!(cards[0].index, 1);

    robot.swipe(150.0, 0.0);
    assert!(log
        .borrow()
        .contains(&"swipe:Right:alpha:0".to_string()));
    robot.settle();

    assert_eq!(robot.stack().current_index(), 1);
    let cards = robot.snapshot();
    assert_eq!(cards.last().unwrap().index, 1, "beta is now on top");
    assert_eq!(cards[0].index, 2, "gamma is now beneath");
    assert!(log
        .borrow()
        .contains(&"complete:Right:alpha".to_string()));
}

#[test]
fn sub_threshold_drag_springs_back() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut robot = DeckRobot::launch(deck_options(&log, vec!["alpha", "beta", "gamma"]));

    robot.swipe(20.0, 0.0);
    robot.settle();

    assert_eq!(robot.stack().current_index(), 0);
    assert_eq!(robot.stack().offset(), Point::ZERO);
    assert_eq!(robot.drag_phase(), DragPhase::Idle);
    assert!(
        !log.borrow().iter().any(|entry| entry.starts_with("swipe:")),
        "no swipe callback below threshold"
    );
}

#[test]
fn fast_short_flick_under_thresholds_stays_put() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut robot = DeckRobot::launch(deck_options(&log, vec!["alpha", "beta"]));

    // 80px in one frame is far past the velocity threshold, but under both
    // distance thresholds no direction classifies, so nothing commits.
    robot.press(100.0, 100.0);
    robot.flick_to(180.0, 100.0);
    robot.release();
    robot.settle();

    assert_eq!(robot.stack().current_index(), 0);
    assert!(!log.borrow().iter().any(|entry| entry.starts_with("swipe:")));
}

#[test]
fn disabled_vertical_swipe_notifies_and_stays() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut options = deck_options(&log, vec!["alpha", "beta"]);
    options.gestures.swipe_directions = DirectionSet::from_directions(&[
        Direction::Left,
        Direction::Right,
    ]);
    let mut robot = DeckRobot::launch(options);

    robot.swipe(0.0, 150.0);
    robot.settle();

    assert_eq!(robot.stack().current_index(), 0);
    assert_eq!(robot.stack().offset(), Point::ZERO);
    let swipes: Vec<_> = log
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with("swipe:"))
        .cloned()
        .collect();
    assert_eq!(swipes, ["swipe:Down:alpha:0"], "partial notification fires once");
}

#[test]
fn deck_exhausts_once_across_mixed_directions() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut robot = DeckRobot::launch(deck_options(&log, vec!["alpha", "beta", "gamma"]));

    robot.swipe(160.0, 0.0);
    robot.settle();
    robot.swipe(-160.0, 0.0);
    robot.settle();
    robot.swipe(0.0, -160.0);
    robot.settle();

    assert!(robot.stack().is_exhausted());
    assert!(robot.snapshot().is_empty());

    let swipes: Vec<_> = log
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with("swipe:"))
        .cloned()
        .collect();
    assert_eq!(
        swipes,
        [
            "swipe:Right:alpha:0",
            "swipe:Left:beta:1",
            "swipe:Up:gamma:2"
        ]
    );
    let empties = log
        .borrow()
        .iter()
        .filter(|entry| entry.as_str() == "stack-empty")
        .count();
    assert_eq!(empties, 1);
}

#[test]
fn controlled_window_truncates_and_requests_changes() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut options = deck_options(&log, vec!["alpha", "beta", "gamma"]);
    options.controlled_index = Some(2);
    let mut robot = DeckRobot::launch(options);

    let cards = robot.snapshot();
    assert_eq!(cards.len(), 1, "window truncated at the sequence end");
    assert_eq!(cards[0].index, 2);

    robot.swipe(150.0, 0.0);
    robot.settle();

    assert!(log.borrow().contains(&"index:3".to_string()));
    assert_eq!(
        robot.stack().current_index(),
        2,
        "the external cursor stays ground truth until the owner moves it"
    );
}

#[test]
fn interrupted_settle_can_be_redragged_to_commit() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut robot = DeckRobot::launch(deck_options(&log, vec!["alpha", "beta"]));

    // A weak drag starts springing back...
    robot.swipe(60.0, 0.0);
    robot.step_frames(2);
    assert_eq!(robot.drag_phase(), DragPhase::SettlingBack);

    // ...but the user catches the card and finishes the swipe.
    robot.press(100.0, 100.0);
    robot.drag_to(260.0, 100.0);
    robot.release();
    robot.settle();

    assert_eq!(robot.stack().current_index(), 1);
}
