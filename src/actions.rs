//! Callback type aliases and adapter helpers.
//!
//! The machine stores one boxed closure per slot. User code that wants the
//! full argument list passes a closure of the alias's signature (directly
//! or through the full adapter); user code that only cares about being
//! called uses the `*_simple` adapter, which binds a zero-argument closure.

use crate::event::Event;

/// Action run once during startup, before the entry action of the initial
/// state. Arguments: trigger event, initial state name.
pub type InitialTransitionAction = Box<dyn FnMut(&Event, &str) + Send>;

/// Action run when a state is entered. Arguments: trigger event, entered
/// state, previous state (empty during the initial transition).
pub type StateEntryAction = Box<dyn FnMut(&Event, &str, &str) + Send>;

/// Action run when a state is exited. Arguments: trigger event, exited
/// state, next state.
pub type StateExitAction = Box<dyn FnMut(&Event, &str, &str) + Send>;

/// Predicate deciding whether a state transition may run. Arguments:
/// trigger event, current state, target state.
pub type StateTransitionGuard = Box<dyn FnMut(&Event, &str, &str) -> bool + Send>;

/// Action run between the exit and entry actions of a state transition.
/// Arguments: trigger event, current state, target state.
pub type StateTransitionAction = Box<dyn FnMut(&Event, &str, &str) + Send>;

/// Predicate deciding whether an internal transition may run. Arguments:
/// trigger event, current state.
pub type InternalTransitionGuard = Box<dyn FnMut(&Event, &str) -> bool + Send>;

/// Action of an internal transition; the only observable effect of the
/// transition, since the state does not change. Arguments: trigger event,
/// current state.
pub type InternalTransitionAction = Box<dyn FnMut(&Event, &str) + Send>;

/// Wraps a full-signature initial transition action.
pub fn initial_transition_action<F>(action: F) -> InitialTransitionAction
where
    F: FnMut(&Event, &str) + Send + 'static,
{
    Box::new(action)
}

/// Wraps a zero-argument closure as an initial transition action.
pub fn initial_transition_action_simple<F>(mut action: F) -> InitialTransitionAction
where
    F: FnMut() + Send + 'static,
{
    Box::new(move |_trigger, _state| action())
}

/// Wraps a full-signature state entry action.
pub fn state_entry_action<F>(action: F) -> StateEntryAction
where
    F: FnMut(&Event, &str, &str) + Send + 'static,
{
    Box::new(action)
}

/// Wraps a zero-argument closure as a state entry action.
pub fn state_entry_action_simple<F>(mut action: F) -> StateEntryAction
where
    F: FnMut() + Send + 'static,
{
    Box::new(move |_trigger, _current, _previous| action())
}

/// Wraps a full-signature state exit action.
pub fn state_exit_action<F>(action: F) -> StateExitAction
where
    F: FnMut(&Event, &str, &str) + Send + 'static,
{
    Box::new(action)
}

/// Wraps a zero-argument closure as a state exit action.
pub fn state_exit_action_simple<F>(mut action: F) -> StateExitAction
where
    F: FnMut() + Send + 'static,
{
    Box::new(move |_trigger, _current, _next| action())
}

/// Wraps a full-signature state transition guard.
pub fn state_transition_guard<F>(guard: F) -> StateTransitionGuard
where
    F: FnMut(&Event, &str, &str) -> bool + Send + 'static,
{
    Box::new(guard)
}

/// Wraps a zero-argument predicate as a state transition guard.
pub fn state_transition_guard_simple<F>(mut guard: F) -> StateTransitionGuard
where
    F: FnMut() -> bool + Send + 'static,
{
    Box::new(move |_trigger, _current, _next| guard())
}

/// Wraps a full-signature state transition action.
pub fn state_transition_action<F>(action: F) -> StateTransitionAction
where
    F: FnMut(&Event, &str, &str) + Send + 'static,
{
    Box::new(action)
}

/// Wraps a zero-argument closure as a state transition action.
pub fn state_transition_action_simple<F>(mut action: F) -> StateTransitionAction
where
    F: FnMut() + Send + 'static,
{
    Box::new(move |_trigger, _current, _next| action())
}

/// Wraps a full-signature internal transition guard.
pub fn internal_transition_guard<F>(guard: F) -> InternalTransitionGuard
where
    F: FnMut(&Event, &str) -> bool + Send + 'static,
{
    Box::new(guard)
}

/// Wraps a zero-argument predicate as an internal transition guard.
pub fn internal_transition_guard_simple<F>(mut guard: F) -> InternalTransitionGuard
where
    F: FnMut() -> bool + Send + 'static,
{
    Box::new(move |_trigger, _current| guard())
}

/// Wraps a full-signature internal transition action.
pub fn internal_transition_action<F>(action: F) -> InternalTransitionAction
where
    F: FnMut(&Event, &str) + Send + 'static,
{
    Box::new(action)
}

/// Wraps a zero-argument closure as an internal transition action.
pub fn internal_transition_action_simple<F>(mut action: F) -> InternalTransitionAction
where
    F: FnMut() + Send + 'static,
{
    Box::new(move |_trigger, _current| action())
}
