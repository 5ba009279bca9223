use crate::{FailureStage, RegistrationId};

/// Side effects requested by the worker-lifecycle state machine.
///
/// The machine itself performs no IO; the effect driver executes these
/// against the injected registry, reporter, and navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEffect {
    /// Probe whether the worker-hosting capability exists.
    CheckCapability,
    /// Enumerate the current worker registrations.
    ListRegistrations,
    /// Unregister every listed handle, as one all-or-nothing batch.
    UnregisterRegistrations { handles: Vec<RegistrationId> },
    /// Register the configured worker script.
    RegisterWorker,
    /// Deliver a lifecycle failure report (no specific target, `url` null).
    ReportFailure {
        stage: FailureStage,
        message: String,
    },
    /// Trigger navigation away: immediately, or after the configured delay.
    ScheduleRedirect { immediate: bool },
}
