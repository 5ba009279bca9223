use crate::{
    FailureStage, InstallStrategy, LifecycleEffect, LifecycleMachine, LifecycleMsg, LifecyclePhase,
};

/// Pure update function: applies a message to the machine and returns any effects.
///
/// A failure at any stage moves to the terminal `Failed` phase and emits both
/// a failure report and a redirect: navigation away is never gated on the
/// install outcome. Messages arriving in a terminal phase are ignored.
pub fn update(
    mut machine: LifecycleMachine,
    msg: LifecycleMsg,
) -> (LifecycleMachine, Vec<LifecycleEffect>) {
    if machine.is_terminal() {
        return (machine, Vec::new());
    }

    let effects = match (machine.phase(), msg) {
        (LifecyclePhase::Unregistered, LifecycleMsg::PageLoaded) => {
            vec![LifecycleEffect::CheckCapability]
        }
        (LifecyclePhase::Unregistered, LifecycleMsg::CapabilityChecked { available: false }) => {
            fail(
                &mut machine,
                FailureStage::ServiceWorkerCheck,
                "worker registry was unavailable".to_string(),
            )
        }
        (LifecyclePhase::Unregistered, LifecycleMsg::CapabilityChecked { available: true }) => {
            match machine.strategy() {
                InstallStrategy::FreshInstall => {
                    machine.set_phase(LifecyclePhase::Registering);
                    vec![LifecycleEffect::RegisterWorker]
                }
                InstallStrategy::ForcedReinstall => {
                    machine.set_phase(LifecyclePhase::Unregistering);
                    vec![LifecycleEffect::ListRegistrations]
                }
            }
        }
        (LifecyclePhase::Unregistering, LifecycleMsg::RegistrationsListed(Ok(handles))) => {
            vec![LifecycleEffect::UnregisterRegistrations { handles }]
        }
        (LifecyclePhase::Unregistering, LifecycleMsg::RegistrationsListed(Err(message))) => {
            fail(&mut machine, FailureStage::ServiceWorkerUnregisterOuter, message)
        }
        (LifecyclePhase::Unregistering, LifecycleMsg::UnregisterBatchFinished(Ok(()))) => {
            machine.set_phase(LifecyclePhase::Registering);
            vec![LifecycleEffect::RegisterWorker]
        }
        (LifecyclePhase::Unregistering, LifecycleMsg::UnregisterBatchFinished(Err(message))) => {
            fail(&mut machine, FailureStage::ServiceWorkerUnregisterInner, message)
        }
        (LifecyclePhase::Registering, LifecycleMsg::WorkerRegistered(Ok(()))) => {
            machine.set_phase(LifecyclePhase::Active);
            // A forced reinstall redirects as soon as the fresh registration
            // lands; the fresh-install path leaves the page on its timer.
            let immediate = machine.strategy() == InstallStrategy::ForcedReinstall;
            vec![LifecycleEffect::ScheduleRedirect { immediate }]
        }
        (LifecyclePhase::Registering, LifecycleMsg::WorkerRegistered(Err(message))) => {
            fail(&mut machine, FailureStage::ServiceWorkerRegister, message)
        }
        // Out-of-phase collaborator results carry no information.
        _ => Vec::new(),
    };

    (machine, effects)
}

fn fail(
    machine: &mut LifecycleMachine,
    stage: FailureStage,
    message: String,
) -> Vec<LifecycleEffect> {
    machine.set_phase(LifecyclePhase::Failed(stage));
    vec![
        LifecycleEffect::ReportFailure { stage, message },
        LifecycleEffect::ScheduleRedirect { immediate: false },
    ]
}
