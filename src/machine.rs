//! The state machine engine: configuration, validation, lifecycle and
//! event processing.

use std::collections::{HashMap, HashSet, VecDeque};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::actions::{
    InitialTransitionAction, InternalTransitionAction, InternalTransitionGuard, StateEntryAction,
    StateExitAction, StateTransitionAction, StateTransitionGuard,
};
use crate::event::Event;
use crate::types::ValidationStatus;

/// Name of the trigger event synthesized by [`StateMachine::start`].
pub const STARTED_EVENT_NAME: &str = "Started";

/// A transition that changes the current state.
struct StateTransition {
    target: String,
    guard: Option<StateTransitionGuard>,
    action: Option<StateTransitionAction>,
}

/// A transition that reacts to an event without changing state; entry and
/// exit actions do not fire for it.
struct InternalTransition {
    guard: Option<InternalTransitionGuard>,
    action: InternalTransitionAction,
}

#[derive(Default)]
struct StateData {
    entry_action: Option<StateEntryAction>,
    exit_action: Option<StateExitAction>,
    state_transitions: HashMap<String, StateTransition>,
    internal_transitions: HashMap<String, InternalTransition>,
    default_state_transition: Option<StateTransition>,
    default_internal_transition: Option<InternalTransition>,
}

impl StateData {
    /// A state with no outgoing transitions of any kind is final; reaching
    /// it stops the machine.
    fn is_final(&self) -> bool {
        self.state_transitions.is_empty()
            && self.internal_transitions.is_empty()
            && self.default_state_transition.is_none()
            && self.default_internal_transition.is_none()
    }
}

#[derive(Default)]
struct InitialTransition {
    /// Empty while the initial transition has not been set.
    target: String,
    action: Option<InitialTransitionAction>,
}

/// Configuration and execution state guarded by the api lock.
#[derive(Default)]
struct MachineState {
    states: HashMap<String, StateData>,
    initial_transition: InitialTransition,
    validation_status: ValidationStatus,
    /// Empty when the machine has never been started.
    current_state: String,
    /// Event that drove the machine into a final state, kept until taken
    /// or until the next start.
    final_event: Option<Event>,
}

impl MachineState {
    /// Depth-first traversal over state transition targets, including the
    /// default state transition. Internal transitions never change state
    /// and contribute nothing to reachability.
    fn traverse_states(&self, state_name: &str, reached: &mut HashSet<String>) {
        reached.insert(state_name.to_string());

        let Some(data) = self.states.get(state_name) else {
            error!(
                target: "StateMachine",
                "state [{state_name}] does not resolve to a state record"
            );
            return;
        };

        for transition in data.state_transitions.values() {
            if !reached.contains(&transition.target) {
                self.traverse_states(&transition.target, reached);
            }
        }

        if let Some(transition) = &data.default_state_transition {
            if !reached.contains(&transition.target) {
                self.traverse_states(&transition.target, reached);
            }
        }
    }
}

/// Which transition table resolved the dequeued event.
enum Resolution {
    Internal,
    State,
    DefaultInternal,
    DefaultState,
    Ignore,
}

/// An embeddable finite state machine driven by a FIFO event queue.
///
/// The machine is configured at runtime from state and event names, then
/// validated and started. All methods take `&self`; the machine is
/// `Send + Sync` and can be shared across threads behind an `Arc`.
///
/// Three locks protect the machine, always acquired in the order
/// api → queue → started. The api lock is held across user callbacks, so a
/// callback must not call `start`, `stop`, `validate`, `process_next_event`,
/// `poll` or any configuration method on its own machine; it may enqueue
/// events and query `is_started` / `has_pending_events`, which take only
/// the queue and started locks.
///
/// ```
/// use eventide_fsm::{Event, StateMachine, ValidationStatus};
///
/// let machine = StateMachine::new();
/// assert!(machine.add_state("closed"));
/// assert!(machine.add_state("open"));
/// assert!(machine.set_initial_transition("closed", None));
/// assert!(machine.add_state_transition("closed", "open_door", "open", None, None));
/// assert!(machine.add_state_transition("open", "close_door", "closed", None, None));
///
/// assert!(machine.validate());
/// assert_eq!(machine.validation_status(), ValidationStatus::Valid);
///
/// assert!(machine.start());
/// assert_eq!(machine.current_state(), "closed");
///
/// assert!(machine.add_event_to_back(Event::new("open_door")));
/// assert!(machine.process_next_event());
/// assert_eq!(machine.current_state(), "open");
///
/// assert!(machine.stop());
/// ```
pub struct StateMachine {
    /// api lock: configuration, current state and final event.
    inner: Mutex<MachineState>,
    /// queue lock.
    event_queue: Mutex<VecDeque<Event>>,
    /// started lock.
    started: Mutex<bool>,
}

impl StateMachine {
    /// Creates an empty, unvalidated, stopped machine.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MachineState::default()),
            event_queue: Mutex::new(VecDeque::new()),
            started: Mutex::new(false),
        }
    }

    // ---- configuration -------------------------------------------------

    /// Adds a state with no entry or exit action.
    pub fn add_state(&self, name: &str) -> bool {
        self.add_state_with_actions(name, None, None)
    }

    /// Adds a state, optionally attaching its entry and exit actions in
    /// the same call.
    ///
    /// Fails if the machine is started, the name is empty, or a state with
    /// the same name exists.
    pub fn add_state_with_actions(
        &self,
        name: &str,
        entry_action: Option<StateEntryAction>,
        exit_action: Option<StateExitAction>,
    ) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "states can only be added while the state machine is stopped"
            );
            return false;
        }

        if name.is_empty() {
            warn!(target: "StateMachine", "state name cannot be empty");
            return false;
        }

        if inner.states.contains_key(name) {
            warn!(target: "StateMachine", "a state with the same name already exists: [{name}]");
            return false;
        }

        inner.states.insert(
            name.to_string(),
            StateData {
                entry_action,
                exit_action,
                ..StateData::default()
            },
        );
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(target: "StateMachine", "added a new state: [{name}]");
        true
    }

    /// Attaches an entry action to an existing state that does not have
    /// one yet.
    pub fn set_state_entry_action(&self, name: &str, entry_action: StateEntryAction) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "entry actions can only be set while the state machine is stopped"
            );
            return false;
        }

        let Some(data) = inner.states.get_mut(name) else {
            warn!(target: "StateMachine", "state does not exist: [{name}]");
            return false;
        };

        if data.entry_action.is_some() {
            warn!(target: "StateMachine", "the entry action of state [{name}] is already set");
            return false;
        }

        data.entry_action = Some(entry_action);
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(target: "StateMachine", "set the entry action of state [{name}]");
        true
    }

    /// Attaches an exit action to an existing state that does not have one
    /// yet.
    pub fn set_state_exit_action(&self, name: &str, exit_action: StateExitAction) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "exit actions can only be set while the state machine is stopped"
            );
            return false;
        }

        let Some(data) = inner.states.get_mut(name) else {
            warn!(target: "StateMachine", "state does not exist: [{name}]");
            return false;
        };

        if data.exit_action.is_some() {
            warn!(target: "StateMachine", "the exit action of state [{name}] is already set");
            return false;
        }

        data.exit_action = Some(exit_action);
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(target: "StateMachine", "set the exit action of state [{name}]");
        true
    }

    /// Records the initial transition: the state the machine enters on
    /// start, with an optional action that runs before that state's entry
    /// action. Can only be set once.
    pub fn set_initial_transition(
        &self,
        state: &str,
        action: Option<InitialTransitionAction>,
    ) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "the initial transition can only be set while the state machine is stopped"
            );
            return false;
        }

        if !inner.initial_transition.target.is_empty() {
            warn!(
                target: "StateMachine",
                "the initial transition is already set: [{}]",
                inner.initial_transition.target
            );
            return false;
        }

        if !inner.states.contains_key(state) {
            warn!(
                target: "StateMachine",
                "only an existing state can be set as the initial state: [{state}]"
            );
            return false;
        }

        inner.initial_transition = InitialTransition {
            target: state.to_string(),
            action,
        };
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(target: "StateMachine", "set the initial transition to state [{state}]");
        true
    }

    /// Adds a state transition from `from` to `to`, triggered by events
    /// named `trigger`.
    ///
    /// Fails if the machine is started, either state is unknown, the
    /// trigger is empty, or `from` already has a transition of either kind
    /// for the trigger.
    pub fn add_state_transition(
        &self,
        from: &str,
        trigger: &str,
        to: &str,
        action: Option<StateTransitionAction>,
        guard: Option<StateTransitionGuard>,
    ) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "transitions can only be added while the state machine is stopped"
            );
            return false;
        }

        if trigger.is_empty() {
            warn!(target: "StateMachine", "the trigger of a transition cannot be empty");
            return false;
        }

        if !inner.states.contains_key(to) {
            warn!(target: "StateMachine", "state to transition to does not exist: [{to}]");
            return false;
        }

        let Some(data) = inner.states.get_mut(from) else {
            warn!(target: "StateMachine", "state to transition from does not exist: [{from}]");
            return false;
        };

        if data.state_transitions.contains_key(trigger)
            || data.internal_transitions.contains_key(trigger)
        {
            warn!(
                target: "StateMachine",
                "a transition from state [{from}] on [{trigger}] already exists"
            );
            return false;
        }

        data.state_transitions.insert(
            trigger.to_string(),
            StateTransition {
                target: to.to_string(),
                guard,
                action,
            },
        );
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(
            target: "StateMachine",
            "added a state transition from [{from}] on [{trigger}] to [{to}]"
        );
        true
    }

    /// Adds an internal transition on `state`, triggered by events named
    /// `trigger`. Internal transitions run their action without changing
    /// state and without entry or exit actions.
    pub fn add_internal_transition(
        &self,
        state: &str,
        trigger: &str,
        action: InternalTransitionAction,
        guard: Option<InternalTransitionGuard>,
    ) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "transitions can only be added while the state machine is stopped"
            );
            return false;
        }

        if trigger.is_empty() {
            warn!(target: "StateMachine", "the trigger of a transition cannot be empty");
            return false;
        }

        let Some(data) = inner.states.get_mut(state) else {
            warn!(
                target: "StateMachine",
                "state of the internal transition does not exist: [{state}]"
            );
            return false;
        };

        if data.state_transitions.contains_key(trigger)
            || data.internal_transitions.contains_key(trigger)
        {
            warn!(
                target: "StateMachine",
                "a transition from state [{state}] on [{trigger}] already exists"
            );
            return false;
        }

        data.internal_transitions
            .insert(trigger.to_string(), InternalTransition { guard, action });
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(
            target: "StateMachine",
            "added an internal transition to state [{state}] on [{trigger}]"
        );
        true
    }

    /// Sets the default state transition of `from`: the fallback fired
    /// when no specific transition matches the event name. A state holds
    /// at most one default transition of either kind.
    pub fn set_default_state_transition(
        &self,
        from: &str,
        to: &str,
        action: Option<StateTransitionAction>,
        guard: Option<StateTransitionGuard>,
    ) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "transitions can only be added while the state machine is stopped"
            );
            return false;
        }

        if !inner.states.contains_key(to) {
            warn!(target: "StateMachine", "state to transition to does not exist: [{to}]");
            return false;
        }

        let Some(data) = inner.states.get_mut(from) else {
            warn!(target: "StateMachine", "state to transition from does not exist: [{from}]");
            return false;
        };

        if data.default_state_transition.is_some() || data.default_internal_transition.is_some() {
            warn!(
                target: "StateMachine",
                "a default transition for state [{from}] already exists"
            );
            return false;
        }

        data.default_state_transition = Some(StateTransition {
            target: to.to_string(),
            guard,
            action,
        });
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(
            target: "StateMachine",
            "set the default state transition from [{from}] to [{to}]"
        );
        true
    }

    /// Sets the default internal transition of `state`; mutually exclusive
    /// with a default state transition.
    pub fn set_default_internal_transition(
        &self,
        state: &str,
        action: InternalTransitionAction,
        guard: Option<InternalTransitionGuard>,
    ) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        if self.is_started() {
            warn!(
                target: "StateMachine",
                "transitions can only be added while the state machine is stopped"
            );
            return false;
        }

        let Some(data) = inner.states.get_mut(state) else {
            warn!(
                target: "StateMachine",
                "state of the internal transition does not exist: [{state}]"
            );
            return false;
        };

        if data.default_state_transition.is_some() || data.default_internal_transition.is_some() {
            warn!(
                target: "StateMachine",
                "a default transition for state [{state}] already exists"
            );
            return false;
        }

        data.default_internal_transition = Some(InternalTransition { guard, action });
        inner.validation_status = ValidationStatus::Unvalidated;

        debug!(
            target: "StateMachine",
            "set the default internal transition for state [{state}]"
        );
        true
    }

    // ---- validation ----------------------------------------------------

    /// The current validation status.
    pub fn validation_status(&self) -> ValidationStatus {
        self.inner.lock().validation_status
    }

    /// Checks the configuration: at least one state, an initial
    /// transition, no final state with an exit action, and every declared
    /// state reachable from the initial state.
    ///
    /// On success the status becomes `Valid`; on any failure it becomes
    /// `Invalid`. The configuration itself is never modified.
    pub fn validate(&self) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        debug!(target: "StateMachine", "validating the state machine");

        if self.is_started() {
            warn!(target: "StateMachine", "validation attempted on a started state machine");
            inner.validation_status = ValidationStatus::Invalid;
            return false;
        }

        if inner.states.is_empty() {
            warn!(target: "StateMachine", "the state machine has no states");
            inner.validation_status = ValidationStatus::Invalid;
            return false;
        }

        if inner.initial_transition.target.is_empty() {
            warn!(target: "StateMachine", "the state machine has no initial transition");
            inner.validation_status = ValidationStatus::Invalid;
            return false;
        }

        for (name, data) in &inner.states {
            if data.is_final() && data.exit_action.is_some() {
                warn!(
                    target: "StateMachine",
                    "a final state cannot have an exit action: [{name}]"
                );
                inner.validation_status = ValidationStatus::Invalid;
                return false;
            }
        }

        let mut reached = HashSet::new();
        inner.traverse_states(&inner.initial_transition.target, &mut reached);

        if reached.len() != inner.states.len() {
            let unreachable: Vec<&str> = inner
                .states
                .keys()
                .filter(|name| !reached.contains(*name))
                .map(String::as_str)
                .collect();
            warn!(
                target: "StateMachine",
                "the following states cannot be reached: {unreachable:?}"
            );
            inner.validation_status = ValidationStatus::Invalid;
            return false;
        }

        inner.validation_status = ValidationStatus::Valid;
        debug!(target: "StateMachine", "state machine validated successfully");
        true
    }

    // ---- lifecycle -----------------------------------------------------

    /// Whether the machine is between a successful start and a stop.
    pub fn is_started(&self) -> bool {
        *self.started.lock()
    }

    /// Starts the machine with a synthesized trigger event named
    /// [`STARTED_EVENT_NAME`].
    pub fn start(&self) -> bool {
        self.start_with(Event::new(STARTED_EVENT_NAME))
    }

    /// Starts the machine: clears the queue, the current state and any
    /// stored final event, then runs the initial transition (initial
    /// action, entry action of the initial state, state commit). If the
    /// initial state is final the trigger is stored as the final event and
    /// the machine stops again; `start_with` still returns `true`.
    ///
    /// Fails if the trigger has an empty name, the machine is already
    /// started, or the configuration is not `Valid`.
    pub fn start_with(&self, trigger: Event) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        debug!(target: "StateMachine", "starting the state machine");

        if trigger.name().is_empty() {
            warn!(target: "StateMachine", "cannot start with an event that has an empty name");
            return false;
        }

        {
            let mut queue = self.event_queue.lock();
            let mut started = self.started.lock();

            if *started {
                warn!(target: "StateMachine", "state machine is already started");
                return false;
            }

            if inner.validation_status != ValidationStatus::Valid {
                warn!(
                    target: "StateMachine",
                    "state machine can only be started when it is valid"
                );
                return false;
            }

            queue.clear();
            *started = true;
        }

        inner.current_state.clear();
        inner.final_event = None;

        info!(target: "StateMachine", "state machine started");

        self.execute_initial_transition(inner, trigger);
        true
    }

    /// Stops a started machine. The current state, the event queue and any
    /// stored final event stay inspectable until the next start.
    pub fn stop(&self) -> bool {
        let _locked = self.inner.lock();
        self.stop_internal()
    }

    /// Name of the current state; empty while the machine has never been
    /// started.
    pub fn current_state(&self) -> String {
        self.inner.lock().current_state.clone()
    }

    /// Name of the configured initial state; empty until the initial
    /// transition is set.
    pub fn initial_state(&self) -> String {
        self.inner.lock().initial_transition.target.clone()
    }

    /// Whether the current state is a declared final state.
    pub fn final_state_reached(&self) -> bool {
        let inner = self.inner.lock();

        match inner.states.get(&inner.current_state) {
            Some(data) => data.is_final(),
            None => {
                if !inner.current_state.is_empty() {
                    error!(
                        target: "StateMachine",
                        "current state [{}] does not resolve to a state record",
                        inner.current_state
                    );
                }
                false
            }
        }
    }

    /// Whether a final event is stored and has not been taken yet.
    pub fn has_final_event(&self) -> bool {
        self.inner.lock().final_event.is_some()
    }

    /// Moves out the event that drove the machine into a final state, if
    /// any. Subsequent calls return `None` until the next auto-stop.
    pub fn take_final_event(&self) -> Option<Event> {
        self.inner.lock().final_event.take()
    }

    // ---- event queue ---------------------------------------------------

    /// Whether the queue holds at least one event.
    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.lock().is_empty()
    }

    /// Appends an event to the back of the queue. Fails if the event name
    /// is empty or the machine is not started.
    pub fn add_event_to_back(&self, event: Event) -> bool {
        let mut queue = self.event_queue.lock();
        let started = self.started.lock();

        if event.name().is_empty() {
            warn!(target: "StateMachine", "cannot queue an event with an empty name");
            return false;
        }

        if !*started {
            warn!(
                target: "StateMachine",
                "cannot queue an event on a stopped state machine: [{}]",
                event.name()
            );
            return false;
        }

        debug!(target: "StateMachine", "queued event to the back: [{}]", event.name());
        queue.push_back(event);
        true
    }

    /// Inserts an event in front of all queued events. Fails if the event
    /// name is empty or the machine is not started.
    pub fn add_event_to_front(&self, event: Event) -> bool {
        let mut queue = self.event_queue.lock();
        let started = self.started.lock();

        if event.name().is_empty() {
            warn!(target: "StateMachine", "cannot queue an event with an empty name");
            return false;
        }

        if !*started {
            warn!(
                target: "StateMachine",
                "cannot queue an event on a stopped state machine: [{}]",
                event.name()
            );
            return false;
        }

        debug!(target: "StateMachine", "queued event to the front: [{}]", event.name());
        queue.push_front(event);
        true
    }

    /// Dequeues one event and resolves it against the current state.
    ///
    /// Resolution precedence: specific internal transition, specific state
    /// transition, default internal transition, default state transition.
    /// An event that matches nothing is dropped; that still counts as
    /// success because the queue advanced.
    ///
    /// Fails only if the machine is not started or the queue is empty.
    pub fn process_next_event(&self) -> bool {
        let mut locked = self.inner.lock();
        let inner = &mut *locked;

        debug!(target: "StateMachine", "processing the next event");

        if !self.is_started() {
            warn!(target: "StateMachine", "state machine is not started");
            return false;
        }

        let event = {
            let mut queue = self.event_queue.lock();
            match queue.pop_front() {
                Some(event) => event,
                None => {
                    warn!(target: "StateMachine", "no pending events to process");
                    return false;
                }
            }
        };

        debug!(target: "StateMachine", "processing event [{}]", event.name());

        let current = inner.current_state.clone();
        let trigger = event.name().to_string();

        let resolution = match inner.states.get(&current) {
            Some(data) => {
                if data.internal_transitions.contains_key(&trigger) {
                    Resolution::Internal
                } else if data.state_transitions.contains_key(&trigger) {
                    Resolution::State
                } else if data.default_internal_transition.is_some() {
                    Resolution::DefaultInternal
                } else if data.default_state_transition.is_some() {
                    Resolution::DefaultState
                } else {
                    Resolution::Ignore
                }
            }
            None => {
                error!(
                    target: "StateMachine",
                    "current state [{current}] does not resolve to a state record"
                );
                return false;
            }
        };

        match resolution {
            Resolution::Internal => {
                self.execute_internal_transition(inner, Some(&trigger), &event);
            }
            Resolution::State => {
                self.execute_state_transition(inner, Some(&trigger), event);
            }
            Resolution::DefaultInternal => {
                self.execute_internal_transition(inner, None, &event);
            }
            Resolution::DefaultState => {
                self.execute_state_transition(inner, None, event);
            }
            Resolution::Ignore => {
                debug!(
                    target: "StateMachine",
                    "no transition for event [{trigger}], ignoring it"
                );
            }
        }

        debug!(target: "StateMachine", "event processed");
        true
    }

    /// Convenience: processes one event if the machine is started and the
    /// queue is non-empty, otherwise returns `false` quietly.
    pub fn poll(&self) -> bool {
        if !self.is_started() || !self.has_pending_events() {
            return false;
        }
        self.process_next_event()
    }

    // ---- execution -----------------------------------------------------

    fn stop_internal(&self) -> bool {
        let mut started = self.started.lock();

        debug!(target: "StateMachine", "stopping the state machine");

        if !*started {
            warn!(target: "StateMachine", "state machine is already stopped");
            return false;
        }

        *started = false;
        info!(target: "StateMachine", "state machine stopped");
        true
    }

    fn execute_initial_transition(&self, inner: &mut MachineState, trigger: Event) {
        let target = inner.initial_transition.target.clone();

        debug!(
            target: "StateMachine",
            "transitioning to the initial state [{target}] on [{}]",
            trigger.name()
        );

        if let Some(action) = inner.initial_transition.action.as_mut() {
            debug!(target: "StateMachine", "executing the initial transition action");
            action(&trigger, &target);
            debug!(target: "StateMachine", "initial transition action executed");
        }

        let Some(data) = inner.states.get_mut(&target) else {
            error!(
                target: "StateMachine",
                "initial state [{target}] does not resolve to a state record"
            );
            return;
        };

        if let Some(entry_action) = data.entry_action.as_mut() {
            debug!(target: "StateMachine", "executing the entry action of [{target}]");
            entry_action(&trigger, &target, "");
            debug!(target: "StateMachine", "entry action of [{target}] executed");
        }

        inner.current_state = target.clone();
        debug!(target: "StateMachine", "transitioned to the initial state [{target}]");

        let reached_final = inner.states.get(&target).is_some_and(StateData::is_final);

        if reached_final {
            debug!(
                target: "StateMachine",
                "the initial state [{target}] is a final state, stopping"
            );
            inner.final_event = Some(trigger);
            self.stop_internal();
        }
    }

    /// Runs a state transition of `current_state`: the one keyed by
    /// `trigger`, or the default state transition when `trigger` is
    /// `None`. Order: guard, exit action, transition action, entry action,
    /// state commit, auto-stop check.
    fn execute_state_transition(
        &self,
        inner: &mut MachineState,
        trigger: Option<&str>,
        event: Event,
    ) {
        let from = inner.current_state.clone();

        let Some(data) = inner.states.get_mut(&from) else {
            error!(
                target: "StateMachine",
                "current state [{from}] does not resolve to a state record"
            );
            return;
        };

        let Some(transition) = (match trigger {
            Some(name) => data.state_transitions.get_mut(name),
            None => data.default_state_transition.as_mut(),
        }) else {
            return;
        };

        let to = transition.target.clone();

        if let Some(guard) = transition.guard.as_mut() {
            if !guard(&event, &from, &to) {
                debug!(
                    target: "StateMachine",
                    "transition from [{from}] to [{to}] on [{}] was blocked by its guard",
                    event.name()
                );
                return;
            }
            debug!(
                target: "StateMachine",
                "guard allowed the transition from [{from}] to [{to}]"
            );
        }

        debug!(
            target: "StateMachine",
            "transitioning from [{from}] to [{to}] on [{}]",
            event.name()
        );

        if let Some(exit_action) = data.exit_action.as_mut() {
            debug!(target: "StateMachine", "executing the exit action of [{from}]");
            exit_action(&event, &from, &to);
            debug!(target: "StateMachine", "exit action of [{from}] executed");
        }

        if let Some(action) = transition.action.as_mut() {
            debug!(target: "StateMachine", "executing the transition action");
            action(&event, &from, &to);
            debug!(target: "StateMachine", "transition action executed");
        }

        if let Some(next_data) = inner.states.get_mut(&to) {
            if let Some(entry_action) = next_data.entry_action.as_mut() {
                debug!(target: "StateMachine", "executing the entry action of [{to}]");
                entry_action(&event, &to, &from);
                debug!(target: "StateMachine", "entry action of [{to}] executed");
            }
        }

        inner.current_state = to.clone();
        debug!(target: "StateMachine", "transitioned to state [{to}]");

        let reached_final = inner.states.get(&to).is_some_and(StateData::is_final);

        if reached_final {
            debug!(target: "StateMachine", "transitioned to a final state [{to}], stopping");
            inner.final_event = Some(event);
            self.stop_internal();
        }
    }

    /// Runs an internal transition of `current_state`: the one keyed by
    /// `trigger`, or the default internal transition when `trigger` is
    /// `None`. The state does not change and no entry or exit action
    /// fires.
    fn execute_internal_transition(
        &self,
        inner: &mut MachineState,
        trigger: Option<&str>,
        event: &Event,
    ) {
        let current = inner.current_state.clone();

        let Some(data) = inner.states.get_mut(&current) else {
            error!(
                target: "StateMachine",
                "current state [{current}] does not resolve to a state record"
            );
            return;
        };

        let Some(transition) = (match trigger {
            Some(name) => data.internal_transitions.get_mut(name),
            None => data.default_internal_transition.as_mut(),
        }) else {
            return;
        };

        if let Some(guard) = transition.guard.as_mut() {
            if !guard(event, &current) {
                debug!(
                    target: "StateMachine",
                    "internal transition of [{current}] on [{}] was blocked by its guard",
                    event.name()
                );
                return;
            }
            debug!(
                target: "StateMachine",
                "guard allowed the internal transition of [{current}]"
            );
        }

        debug!(
            target: "StateMachine",
            "executing the internal transition of [{current}] on [{}]",
            event.name()
        );
        (transition.action)(event, &current);
        debug!(target: "StateMachine", "internal transition action executed");
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
