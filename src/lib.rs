//! Embeddable, queue-driven finite state machine (FSM) engine.
//!
//! `eventide-fsm` implements a runtime-configured machine: client code
//! declares named states, one initial transition and a set of transitions
//! keyed by event name, validates the resulting graph, and then drives the
//! machine by queueing [`Event`]s and asking it to process them one at a
//! time. All behavior lives in user-supplied closures (entry/exit actions,
//! transition actions and guard conditions) invoked synchronously on the
//! calling thread.
//!
//! The engine is intentionally small:
//! - No hierarchy, regions, history or deferred events; the graph is flat.
//! - No timers and no event loop; the host decides when to call
//!   [`StateMachine::process_next_event`] or [`StateMachine::poll`].
//! - Failures are reported as a `false` return plus a trace message on the
//!   `"StateMachine"` target; there is no error type to thread through
//!   callbacks.
//!
//! ## Quick start
//!
//! A machine that counts one door cycle and stops when the door breaks:
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use eventide_fsm::{Event, StateMachine};
//!
//! let machine = StateMachine::new();
//! let cycles = Arc::new(AtomicUsize::new(0));
//!
//! machine.add_state("closed");
//! machine.add_state("open");
//! machine.add_state("broken");
//! machine.set_initial_transition("closed", None);
//!
//! machine.add_state_transition("closed", "open_door", "open", None, None);
//! let counter = Arc::clone(&cycles);
//! machine.add_state_transition(
//!     "open",
//!     "close_door",
//!     "closed",
//!     Some(Box::new(move |_event, _from, _to| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })),
//!     None,
//! );
//! machine.add_state_transition("open", "slam_door", "broken", None, None);
//!
//! assert!(machine.validate());
//! assert!(machine.start());
//!
//! machine.add_event_to_back(Event::new("open_door"));
//! machine.add_event_to_back(Event::new("close_door"));
//! while machine.poll() {}
//!
//! assert_eq!(machine.current_state(), "closed");
//! assert_eq!(cycles.load(Ordering::SeqCst), 1);
//!
//! // "broken" has no outgoing transitions: reaching it stops the machine
//! // and keeps the event that caused it.
//! machine.add_event_to_back(Event::new("open_door"));
//! machine.add_event_to_back(Event::new("slam_door"));
//! while machine.poll() {}
//!
//! assert!(!machine.is_started());
//! assert!(machine.final_state_reached());
//! assert_eq!(machine.take_final_event().unwrap().name(), "slam_door");
//! ```
//!
//! ## Transition resolution
//!
//! Each processed event is resolved against the current state in a fixed
//! order: specific internal transition, specific state transition, default
//! internal transition, default state transition. An event that matches
//! nothing is dropped silently; the call still succeeds because the queue
//! advanced. A guard that returns `false` aborts its transition with no
//! observable side effect beyond the guard call itself.
//!
//! A state transition runs `guard → exit action → transition action →
//! entry action → state commit`; an internal transition runs only its
//! action and never touches entry/exit actions or the current state.
//!
//! ## Final states and auto-stop
//!
//! A state with no outgoing transitions of any kind is *final*. When a
//! transition lands in a final state the machine stores the triggering
//! event (retrievable once via [`StateMachine::take_final_event`]) and
//! stops itself. Validation rejects final states that carry an exit
//! action, and rejects any state unreachable from the initial state.
//!
//! ## Threads and reentrancy
//!
//! Every method takes `&self`; the machine is `Send + Sync` and is shared
//! across threads behind an `Arc`. Processing is cooperative and
//! single-threaded: `process_next_event` runs callbacks synchronously on
//! the calling thread while holding the machine's api lock. Callbacks may
//! enqueue events on their own machine ([`StateMachine::add_event_to_back`]
//! and [`StateMachine::add_event_to_front`] take only the queue and
//! started locks) but must not call any other method on it, since those
//! take the api lock and would deadlock.

pub mod actions;
pub mod event;
pub mod machine;
pub mod types;

pub use actions::{
    initial_transition_action, initial_transition_action_simple, internal_transition_action,
    internal_transition_action_simple, internal_transition_guard,
    internal_transition_guard_simple, state_entry_action, state_entry_action_simple,
    state_exit_action, state_exit_action_simple, state_transition_action,
    state_transition_action_simple, state_transition_guard, state_transition_guard_simple,
    InitialTransitionAction, InternalTransitionAction, InternalTransitionGuard, StateEntryAction,
    StateExitAction, StateTransitionAction, StateTransitionGuard,
};
pub use event::Event;
pub use machine::{StateMachine, STARTED_EVENT_NAME};
pub use types::ValidationStatus;
