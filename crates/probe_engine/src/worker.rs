use std::sync::Arc;

use agent_logging::agent_debug;
use probe_core::{AgentConfig, CaptureMode};

use crate::{orchestrator, Reporter, TargetFetcher};

/// The background worker installed by the landing routine: holds the target
/// list and runs one fetch pass per activation.
pub struct ProbeWorker {
    targets: Vec<String>,
    mode: CaptureMode,
    auto_invoke: bool,
    fetcher: Arc<dyn TargetFetcher>,
    reporter: Arc<dyn Reporter>,
}

impl ProbeWorker {
    pub fn new(
        config: &AgentConfig,
        fetcher: Arc<dyn TargetFetcher>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            targets: config.targets.clone(),
            mode: config.capture_mode,
            auto_invoke: config.auto_invoke,
            fetcher,
            reporter,
        }
    }

    /// Runs at registration time. Fetches immediately when auto-invoke is
    /// set; otherwise the pass waits for an explicit [`Self::invoke`].
    pub async fn activate(&self) {
        if self.auto_invoke {
            self.run_pass().await;
        } else {
            agent_debug!("Worker activated; waiting for explicit invocation");
        }
    }

    /// Explicit trigger for deployments that disable auto-invoke.
    pub async fn invoke(&self) {
        self.run_pass().await;
    }

    async fn run_pass(&self) {
        agent_debug!("Fetching all {} targets", self.targets.len());
        orchestrator::run_targets(
            self.fetcher.as_ref(),
            self.reporter.as_ref(),
            self.mode,
            &self.targets,
        )
        .await;
    }
}
