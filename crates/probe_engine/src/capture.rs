use std::time::Instant;

use agent_logging::agent_debug;
use probe_core::CaptureMode;

use crate::{decode, transport, FetchOutcome, TargetFetcher};

/// Run the capture pipeline for one target: fetch, materialize, encode.
///
/// Always reaches exactly one terminal state; elapsed time is measured from
/// fetch start, so a late-stage failure reports total elapsed time.
pub async fn capture_target(
    fetcher: &dyn TargetFetcher,
    mode: CaptureMode,
    url: &str,
) -> FetchOutcome {
    let started = Instant::now();
    agent_debug!("Fetching {}", url);

    let capture = match fetcher.fetch(url).await {
        Ok(capture) => capture,
        Err(err) => {
            return FetchOutcome::Failure {
                url: Some(url.to_string()),
                stage: err.stage,
                message: err.message,
                duration_ms: elapsed_ms(started),
            }
        }
    };

    let content = match mode {
        CaptureMode::Credentialed => transport::encode_content(&capture.body),
        CaptureMode::CacheBypass => {
            match decode::decode_text(&capture.body, capture.content_type.as_deref()) {
                Ok(decoded) => {
                    agent_debug!(
                        "Got text for {} ({} chars, {})",
                        url,
                        decoded.text.chars().count(),
                        decoded.encoding_label
                    );
                    transport::encode_content(decoded.text.as_bytes())
                }
                Err(err) => {
                    return FetchOutcome::Failure {
                        url: Some(url.to_string()),
                        stage: mode.text_stage(),
                        message: err.to_string(),
                        duration_ms: elapsed_ms(started),
                    }
                }
            }
        }
    };

    FetchOutcome::Success {
        url: url.to_string(),
        content,
        duration_ms: elapsed_ms(started),
        http_status: mode.includes_status().then_some(capture.http_status),
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
