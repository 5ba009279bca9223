use std::sync::Arc;

use agent_logging::agent_info;
use probe_core::AgentConfig;
use probe_engine::{
    run_lifecycle, FetchSettings, HttpReporter, InProcessRegistry, Navigator, ProbeWorker,
    Reporter, ReqwestFetcher,
};

/// Navigation is a log line here; in a deployed agent the redirect happens
/// in the hosting page.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, url: &str) {
        agent_info!("Navigating away to {}", url);
    }
}

/// Wire the real collaborators together and run one landing-routine pass.
pub async fn run(config: AgentConfig) -> anyhow::Result<()> {
    config.validate()?;

    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::for_mode(
        config.capture_mode,
    )));
    let reporter: Arc<dyn Reporter> = Arc::new(HttpReporter::new(
        config.success_report_url.clone(),
        config.failure_report_url.clone(),
    )?);
    let worker = Arc::new(ProbeWorker::new(&config, fetcher, reporter.clone()));
    let registry = InProcessRegistry::new(worker);
    let navigator = LogNavigator;

    agent_info!(
        "Starting lifecycle ({:?}, {} targets)",
        config.install_strategy,
        config.targets.len()
    );
    let phase = run_lifecycle(&config, &registry, reporter.as_ref(), &navigator).await;
    agent_info!("Lifecycle finished in phase {:?}", phase);

    // The landing page is gone after the redirect, but the worker outlives
    // it; drain in-flight probe passes before the process exits.
    registry.await_idle().await;
    Ok(())
}
