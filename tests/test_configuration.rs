//! Contract tests for the configuration API: every mutation refuses bad
//! input, refuses to run on a started machine, and resets the validation
//! status on success.

use eventide_fsm::{Event, StateMachine, ValidationStatus};

/// Smallest machine that validates: `a -[go]-> b`, `b` final.
fn valid_machine() -> StateMachine {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));
    assert!(machine.set_initial_transition("a", None));
    assert!(machine.add_state_transition("a", "go", "b", None, None));
    assert!(machine.validate());
    machine
}

#[test]
fn add_state_accepts_unique_non_empty_names() {
    let machine = StateMachine::new();

    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));

    assert!(!machine.add_state(""));
    assert!(!machine.add_state("a"));
}

#[test]
fn add_state_with_actions_attaches_both_slots() {
    let machine = StateMachine::new();

    assert!(machine.add_state_with_actions(
        "a",
        Some(Box::new(|_event, _current, _previous| {})),
        Some(Box::new(|_event, _current, _next| {})),
    ));

    // Both slots are taken now.
    assert!(!machine.set_state_entry_action("a", Box::new(|_e, _c, _p| {})));
    assert!(!machine.set_state_exit_action("a", Box::new(|_e, _c, _n| {})));
}

#[test]
fn entry_and_exit_actions_require_an_existing_state_and_an_empty_slot() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));

    assert!(!machine.set_state_entry_action("missing", Box::new(|_e, _c, _p| {})));
    assert!(!machine.set_state_exit_action("missing", Box::new(|_e, _c, _n| {})));

    assert!(machine.set_state_entry_action("a", Box::new(|_e, _c, _p| {})));
    assert!(!machine.set_state_entry_action("a", Box::new(|_e, _c, _p| {})));

    assert!(machine.set_state_exit_action("a", Box::new(|_e, _c, _n| {})));
    assert!(!machine.set_state_exit_action("a", Box::new(|_e, _c, _n| {})));
}

#[test]
fn initial_transition_is_set_exactly_once_to_an_existing_state() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));

    assert!(!machine.set_initial_transition("missing", None));
    assert_eq!(machine.initial_state(), "");

    assert!(machine.set_initial_transition("a", None));
    assert_eq!(machine.initial_state(), "a");

    assert!(!machine.set_initial_transition("b", None));
    assert_eq!(machine.initial_state(), "a");
}

#[test]
fn state_transitions_require_known_states_and_a_non_empty_trigger() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));

    assert!(!machine.add_state_transition("missing", "go", "b", None, None));
    assert!(!machine.add_state_transition("a", "go", "missing", None, None));
    assert!(!machine.add_state_transition("a", "", "b", None, None));

    assert!(machine.add_state_transition("a", "go", "b", None, None));
    // Same (state, trigger) pair, either kind, is a duplicate.
    assert!(!machine.add_state_transition("a", "go", "b", None, None));
    assert!(!machine.add_internal_transition("a", "go", Box::new(|_e, _c| {}), None));
}

#[test]
fn internal_transitions_require_a_known_state_and_a_non_empty_trigger() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));

    assert!(!machine.add_internal_transition("missing", "tick", Box::new(|_e, _c| {}), None));
    assert!(!machine.add_internal_transition("a", "", Box::new(|_e, _c| {}), None));

    assert!(machine.add_internal_transition("a", "tick", Box::new(|_e, _c| {}), None));
    assert!(!machine.add_internal_transition("a", "tick", Box::new(|_e, _c| {}), None));
    // The trigger is taken by the internal table; the state table sees it too.
    assert!(!machine.add_state_transition("a", "tick", "b", None, None));
}

#[test]
fn a_state_holds_at_most_one_default_transition_of_either_kind() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));

    assert!(machine.set_default_state_transition("a", "b", None, None));
    assert!(!machine.set_default_state_transition("a", "b", None, None));
    assert!(!machine.set_default_internal_transition("a", Box::new(|_e, _c| {}), None));

    assert!(machine.set_default_internal_transition("b", Box::new(|_e, _c| {}), None));
    assert!(!machine.set_default_state_transition("b", "a", None, None));
    assert!(!machine.set_default_internal_transition("b", Box::new(|_e, _c| {}), None));
}

#[test]
fn default_transitions_require_existing_states() {
    let machine = StateMachine::new();
    assert!(machine.add_state("a"));

    assert!(!machine.set_default_state_transition("missing", "a", None, None));
    assert!(!machine.set_default_state_transition("a", "missing", None, None));
    assert!(!machine.set_default_internal_transition("missing", Box::new(|_e, _c| {}), None));
}

#[test]
fn every_successful_mutation_resets_the_validation_status() {
    let machine = StateMachine::new();
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);

    assert!(machine.add_state("a"));
    assert!(machine.add_state("b"));
    assert!(machine.set_initial_transition("a", None));
    assert!(machine.add_state_transition("a", "go", "b", None, None));
    assert!(machine.validate());
    assert_eq!(machine.validation_status(), ValidationStatus::Valid);

    assert!(machine.add_state_transition("b", "back", "a", None, None));
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);

    assert!(machine.validate());
    assert!(machine.set_state_entry_action("b", Box::new(|_e, _c, _p| {})));
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);

    assert!(machine.validate());
    assert!(machine.add_internal_transition("b", "tick", Box::new(|_e, _c| {}), None));
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);

    assert!(machine.validate());
    assert!(machine.set_default_state_transition("b", "a", None, None));
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);
}

#[test]
fn a_failed_mutation_leaves_the_status_untouched() {
    let machine = valid_machine();
    assert_eq!(machine.validation_status(), ValidationStatus::Valid);

    assert!(!machine.add_state("a"));
    assert!(!machine.add_state_transition("a", "go", "b", None, None));
    assert!(!machine.set_initial_transition("b", None));

    assert_eq!(machine.validation_status(), ValidationStatus::Valid);
}

#[test]
fn configuration_is_refused_while_the_machine_is_started() {
    let machine = valid_machine();
    assert!(machine.start());

    assert!(!machine.add_state("c"));
    assert!(!machine.add_state_with_actions("c", None, None));
    assert!(!machine.set_state_entry_action("b", Box::new(|_e, _c, _p| {})));
    assert!(!machine.set_state_exit_action("a", Box::new(|_e, _c, _n| {})));
    assert!(!machine.set_initial_transition("b", None));
    assert!(!machine.add_state_transition("b", "back", "a", None, None));
    assert!(!machine.add_internal_transition("a", "tick", Box::new(|_e, _c| {}), None));
    assert!(!machine.set_default_state_transition("a", "b", None, None));
    assert!(!machine.set_default_internal_transition("a", Box::new(|_e, _c| {}), None));

    // Refusals while started leave the status alone.
    assert_eq!(machine.validation_status(), ValidationStatus::Valid);

    assert!(machine.stop());
    assert!(machine.add_state_transition("b", "back", "a", None, None));
    assert_eq!(machine.validation_status(), ValidationStatus::Unvalidated);
}

#[test]
fn processing_is_refused_on_a_stopped_machine() {
    let machine = valid_machine();

    assert!(!machine.process_next_event());
    assert!(!machine.poll());
    assert!(!machine.add_event_to_back(Event::new("go")));
    assert!(!machine.add_event_to_front(Event::new("go")));
}
