use std::rc::Rc;

use swipedeck::{Callbacks, DeckOptions, DirectionalIcons};
use swipedeck_testing::DeckRobot;

#[derive(Clone, Debug)]
struct Profile {
    name: &'static str,
    tagline: &'static str,
}

fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            name: "Ada",
            tagline: "writes the first program before the machine exists",
        },
        Profile {
            name: "Grace",
            tagline: "debugger of actual moths",
        },
        Profile {
            name: "Edsger",
            tagline: "considers your goto harmful",
        },
        Profile {
            name: "Barbara",
            tagline: "abstracts your data types",
        },
    ]
}

fn print_deck(robot: &DeckRobot<Profile, String>) {
    let cards = robot.snapshot();
    if cards.is_empty() {
        match robot.stack().empty_content() {
            Some(empty) => println!("  [deck] {empty}"),
            None => println!("  [deck] (nothing to render)"),
        }
        return;
    }
    for card in &cards {
        let marker = if card.is_top { "top" } else { "   " };
        println!(
            "  [{marker}] {} translation=({:.0},{:.0}) alpha={:.2}",
            card.content.as_deref().unwrap_or("<no renderer>"),
            card.transform.translation.x,
            card.transform.translation.y,
            card.transform.alpha,
        );
        for icon in &card.icons {
            if icon.opacity > 0.0 {
                println!(
                    "        icon {:?} \"{}\" opacity={:.2}",
                    icon.direction, icon.content, icon.opacity
                );
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Swipedeck headless demo ===");
    println!("Drives a card deck with synthetic gestures and prints each step:");
    println!("  - a committed right swipe (accept)");
    println!("  - a weak drag that springs back");
    println!("  - a committed left swipe (reject)");
    println!("  - a fast vertical dismissal of the rest");
    println!();

    let mut options: DeckOptions<Profile, String> = DeckOptions::new(profiles());
    options.render_card = Some(Rc::new(|profile: &Profile, index, is_active| {
        if is_active {
            format!("{} — {}", profile.name, profile.tagline)
        } else {
            format!("{} (waiting at #{index})", profile.name)
        }
    }));
    options.render_empty = Some(Rc::new(|| "No more profiles. Touch grass.".to_string()));
    options.icons.direct = DirectionalIcons {
        right: Some("❤".to_string()),
        left: Some("✕".to_string()),
        up: Some("★".to_string()),
        ..Default::default()
    };

    let mut callbacks = Callbacks::default();
    callbacks.on_swipe = Some(Rc::new(|direction, profile: &Profile, index| {
        println!("  -> swiped {direction:?}: {} (card {index})", profile.name);
    }));
    callbacks.on_stack_empty = Some(Rc::new(|| println!("  -> the deck is empty")));
    options.callbacks = callbacks;

    let mut robot = DeckRobot::launch(options);

    println!("initial deck:");
    print_deck(&robot);

    println!("\naccepting the top card (drag right 160px):");
    robot.press(100.0, 100.0);
    robot.drag_to(190.0, 100.0);
    print_deck(&robot);
    robot.drag_to(260.0, 100.0);
    robot.release();
    robot.settle();
    print_deck(&robot);

    println!("\nhesitating (drag right 40px, let go):");
    robot.swipe(40.0, 0.0);
    robot.settle();
    print_deck(&robot);

    println!("\nrejecting (drag left 160px):");
    robot.swipe(-160.0, 0.0);
    robot.settle();
    print_deck(&robot);

    println!("\nsending the rest upward:");
    while !robot.stack().is_exhausted() {
        log::info!(
            "dismissing card {} of {}",
            robot.stack().current_index() + 1,
            robot.stack().items().len()
        );
        robot.swipe(0.0, -160.0);
        robot.settle();
    }
    print_deck(&robot);
}
