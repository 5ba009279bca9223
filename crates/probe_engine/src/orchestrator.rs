use agent_logging::agent_debug;
use probe_core::CaptureMode;

use crate::{capture_target, Reporter, TargetFetcher};

/// Fan the capture pipeline out across the target list.
///
/// All pipelines are polled concurrently with no ordering guarantee, no
/// concurrency cap, and no overall timeout. Duplicates are fetched and
/// reported independently. An empty list is a no-op, not an error.
pub async fn run_targets(
    fetcher: &dyn TargetFetcher,
    reporter: &dyn Reporter,
    mode: CaptureMode,
    targets: &[String],
) {
    if targets.is_empty() {
        agent_debug!("No targets configured");
        return;
    }

    let pipelines = targets.iter().map(|url| async move {
        let outcome = capture_target(fetcher, mode, url).await;
        reporter.report(&outcome).await;
    });
    futures_util::future::join_all(pipelines).await;
}
