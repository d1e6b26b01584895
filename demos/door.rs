//! A door that can be opened, closed and finally broken down.
//!
//! Run with engine traces:
//!
//! ```text
//! RUST_LOG=debug cargo run --example door
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use eventide_fsm::{state_entry_action, Event, StateMachine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let machine = StateMachine::new();
    let knocks = Arc::new(AtomicUsize::new(0));

    machine.add_state_with_actions(
        "closed",
        Some(state_entry_action(|_event, _current, previous| {
            if previous.is_empty() {
                println!("the door starts closed");
            } else {
                println!("the door is closed again");
            }
        })),
        None,
    );
    machine.add_state("open");
    machine.add_state_with_actions(
        "broken",
        Some(state_entry_action(|event, _current, _previous| {
            println!("the door broke ({})", event.name());
        })),
        None,
    );
    machine.set_initial_transition("closed", None);

    machine.add_state_transition("closed", "open_door", "open", None, None);
    machine.add_state_transition("open", "close_door", "closed", None, None);
    machine.add_state_transition("open", "slam_door", "broken", None, None);

    let counter = Arc::clone(&knocks);
    machine.add_internal_transition(
        "closed",
        "knock",
        Box::new(move |_event: &Event, _current: &str| {
            let total = counter.fetch_add(1, Ordering::SeqCst) + 1;
            println!("knock knock ({total})");
        }),
        None,
    );

    assert!(machine.validate(), "the door machine should validate");
    assert!(machine.start());

    for name in ["knock", "open_door", "close_door", "knock", "open_door", "slam_door"] {
        machine.add_event_to_back(Event::new(name));
    }

    while machine.poll() {}

    println!(
        "final state: {} (started: {})",
        machine.current_state(),
        machine.is_started()
    );
    if let Some(event) = machine.take_final_event() {
        println!("stopped by: {}", event.name());
    }
}
