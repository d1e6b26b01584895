//! Shared vocabulary types for the state machine engine.

/// Validation state of a machine's configuration.
///
/// Every successful configuration change resets the status to
/// [`Unvalidated`](ValidationStatus::Unvalidated); only a machine whose
/// status is [`Valid`](ValidationStatus::Valid) can be started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// Validation has not run since the configuration last changed.
    #[default]
    Unvalidated,
    /// The last validation pass succeeded.
    Valid,
    /// The last validation pass failed.
    Invalid,
}
