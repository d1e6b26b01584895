//! Event type consumed by the machine's queue.

use std::any::Any;
use std::fmt;

/// A named stimulus with an optional type-erased payload.
///
/// Events are move-only: the payload is exclusively owned, so there is no
/// copy path that would silently duplicate or alias it. Callers that need
/// two identical events construct two.
///
/// The payload is stored as `Box<dyn Any + Send>` and recovered with a
/// typed downcast; asking for the wrong type yields `None` rather than an
/// error.
///
/// ```
/// use eventide_fsm::Event;
///
/// let event = Event::with_parameter("upload", vec![0_u8, 1, 2]);
/// assert_eq!(event.name(), "upload");
/// assert_eq!(event.parameter::<Vec<u8>>(), Some(&vec![0, 1, 2]));
/// assert_eq!(event.parameter::<String>(), None);
/// ```
pub struct Event {
    name: String,
    parameter: Option<Box<dyn Any + Send>>,
}

impl Event {
    /// Creates an event with no payload.
    ///
    /// The name is not checked here; the machine refuses events with an
    /// empty name when they reach it (`start_with`, `add_event_to_back`,
    /// `add_event_to_front`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter: None,
        }
    }

    /// Creates an event carrying an arbitrary owned payload.
    pub fn with_parameter(name: impl Into<String>, parameter: impl Any + Send) -> Self {
        Self {
            name: name.into(),
            parameter: Some(Box::new(parameter)),
        }
    }

    /// The event's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the event carries a payload of any type.
    pub fn has_parameter(&self) -> bool {
        self.parameter.is_some()
    }

    /// Borrows the payload as `T`, or `None` if there is no payload or it
    /// holds a different type.
    pub fn parameter<T: Any>(&self) -> Option<&T> {
        self.parameter.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    /// Mutably borrows the payload as `T`.
    pub fn parameter_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.parameter
            .as_deref_mut()
            .and_then(|p| p.downcast_mut::<T>())
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_parameter", &self.parameter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_without_parameter() {
        let event = Event::new("go");
        assert_eq!(event.name(), "go");
        assert!(!event.has_parameter());
        assert_eq!(event.parameter::<i32>(), None);
    }

    #[test]
    fn parameter_downcast_hits_the_stored_type_only() {
        let event = Event::with_parameter("count", 7_i32);
        assert!(event.has_parameter());
        assert_eq!(event.parameter::<i32>(), Some(&7));
        assert_eq!(event.parameter::<u32>(), None);
        assert_eq!(event.parameter::<String>(), None);
    }

    #[test]
    fn parameter_can_be_mutated_in_place() {
        let mut event = Event::with_parameter("label", String::from("a"));
        event.parameter_mut::<String>().unwrap().push('b');
        assert_eq!(event.parameter::<String>(), Some(&String::from("ab")));
    }

    #[test]
    fn parameter_may_hold_a_unique_owned_payload() {
        struct Payload {
            bytes: Vec<u8>,
        }

        let event = Event::with_parameter("blob", Payload { bytes: vec![1, 2] });
        assert_eq!(event.parameter::<Payload>().unwrap().bytes, vec![1, 2]);
    }

    #[test]
    fn empty_names_are_representable_until_the_machine_boundary() {
        let event = Event::new("");
        assert_eq!(event.name(), "");
    }
}
