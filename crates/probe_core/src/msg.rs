use crate::RegistrationId;

/// Inputs to the worker-lifecycle state machine.
///
/// Collaborator results arrive with their faults already stringified; the
/// machine never sees the underlying error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleMsg {
    /// The landing routine started.
    PageLoaded,
    /// Result of probing for the worker-hosting capability.
    CapabilityChecked { available: bool },
    /// Result of enumerating the existing registrations.
    RegistrationsListed(Result<Vec<RegistrationId>, String>),
    /// Result of the all-or-nothing unregister batch.
    UnregisterBatchFinished(Result<(), String>),
    /// Result of registering the worker script.
    WorkerRegistered(Result<(), String>),
}
