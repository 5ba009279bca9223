use std::collections::VecDeque;
use std::time::{Duration, Instant};

use agent_logging::agent_debug;
use futures_util::future::try_join_all;
use probe_core::{
    update, AgentConfig, LifecycleEffect, LifecycleMachine, LifecycleMsg, LifecyclePhase,
    RegistrationId,
};
use thiserror::Error;

use crate::{FetchOutcome, Reporter};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("worker registry unavailable")]
    Unavailable,
    #[error("invalid worker script url {0:?}")]
    InvalidScriptUrl(String),
    #[error("registration {0} not found")]
    RegistrationNotFound(RegistrationId),
    #[error("{0}")]
    Backend(String),
}

/// The ambient worker registration set, injected so the lifecycle routine
/// can run against a fake in tests.
#[async_trait::async_trait]
pub trait WorkerRegistry: Send + Sync {
    /// Whether the worker-hosting capability exists at all.
    fn available(&self) -> bool;
    async fn registrations(&self) -> Result<Vec<RegistrationId>, RegistryError>;
    async fn unregister(&self, id: RegistrationId) -> Result<(), RegistryError>;
    async fn register(&self, script_url: &str) -> Result<(), RegistryError>;
}

/// Navigation away from the landing page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Drive the lifecycle state machine to a terminal phase.
///
/// Executes each requested effect against the injected collaborators and
/// feeds the result back as the next message. Failure reports and the
/// redirect run independently at the end: navigation fires on schedule even
/// if the collector is unreachable, and never cancels in-flight work.
pub async fn run_lifecycle(
    config: &AgentConfig,
    registry: &dyn WorkerRegistry,
    reporter: &dyn Reporter,
    navigator: &dyn Navigator,
) -> LifecyclePhase {
    let started = Instant::now();
    let mut machine = LifecycleMachine::new(config.install_strategy);
    let mut queue = VecDeque::from([LifecycleMsg::PageLoaded]);
    let mut failure_report: Option<FetchOutcome> = None;
    let mut redirect: Option<bool> = None;

    while let Some(msg) = queue.pop_front() {
        let (next, effects) = update(machine, msg);
        machine = next;
        for effect in effects {
            match effect {
                LifecycleEffect::CheckCapability => {
                    queue.push_back(LifecycleMsg::CapabilityChecked {
                        available: registry.available(),
                    });
                }
                LifecycleEffect::ListRegistrations => {
                    agent_debug!("Listing worker registrations");
                    let listed = registry.registrations().await;
                    queue.push_back(LifecycleMsg::RegistrationsListed(
                        listed.map_err(|err| err.to_string()),
                    ));
                }
                LifecycleEffect::UnregisterRegistrations { handles } => {
                    agent_debug!("Unregistering {} registrations", handles.len());
                    // All-or-nothing join over the batch.
                    let batch =
                        try_join_all(handles.iter().map(|&id| registry.unregister(id))).await;
                    queue.push_back(LifecycleMsg::UnregisterBatchFinished(
                        batch.map(|_| ()).map_err(|err| err.to_string()),
                    ));
                }
                LifecycleEffect::RegisterWorker => {
                    agent_debug!("Registering worker script {}", config.worker_script_url);
                    let registered = registry.register(&config.worker_script_url).await;
                    queue.push_back(LifecycleMsg::WorkerRegistered(
                        registered.map_err(|err| err.to_string()),
                    ));
                }
                LifecycleEffect::ReportFailure { stage, message } => {
                    failure_report = Some(FetchOutcome::lifecycle_failure(
                        stage,
                        message,
                        elapsed_ms(started),
                    ));
                }
                LifecycleEffect::ScheduleRedirect { immediate } => {
                    redirect = Some(immediate);
                }
            }
        }
    }

    let report = async {
        if let Some(outcome) = &failure_report {
            reporter.report(outcome).await;
        }
    };
    let navigate = async {
        if let Some(immediate) = redirect {
            if !immediate {
                tokio::time::sleep(Duration::from_millis(config.redirect_delay_ms)).await;
            }
            navigator.navigate(&config.redirect_url);
        }
    };
    futures_util::future::join(report, navigate).await;

    machine.phase()
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
