use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use agent_logging::agent_debug;
use bytes::BytesMut;
use futures_util::StreamExt;
use probe_core::{CaptureMode, FailureStage};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};

use crate::{CaptureError, TargetCapture};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub capture_mode: CaptureMode,
    /// Browser-like ceiling on followed redirects.
    pub redirect_limit: usize,
}

impl FetchSettings {
    pub fn for_mode(capture_mode: CaptureMode) -> Self {
        Self {
            capture_mode,
            ..Self::default()
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            capture_mode: CaptureMode::Credentialed,
            redirect_limit: 20,
        }
    }
}

/// One credentialed fetch of a target URL.
///
/// Implementations resolve every fault to a stage-tagged [`CaptureError`];
/// there is no other error channel out of a probe.
#[async_trait::async_trait]
pub trait TargetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<TargetCapture, CaptureError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, CaptureError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        let mut builder = reqwest::Client::builder().redirect(policy);
        if self.settings.capture_mode == CaptureMode::Credentialed {
            // Ambient same-origin credentials: cookies ride along.
            builder = builder.cookie_store(true);
        }
        builder
            .build()
            .map_err(|err| CaptureError::new(FailureStage::UrlFetch, err.to_string()))
    }
}

#[async_trait::async_trait]
impl TargetFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<TargetCapture, CaptureError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| CaptureError::new(FailureStage::UrlFetch, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        let mut request = client.get(parsed);
        if self.settings.capture_mode == CaptureMode::CacheBypass {
            request = request.header(CACHE_CONTROL, "no-store");
        }

        // Any fault before the response resolves is a url_fetch failure; an
        // error status is not a fault, it is a captured result.
        let response = request
            .send()
            .await
            .map_err(|err| CaptureError::new(FailureStage::UrlFetch, err.to_string()))?;

        let http_status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        agent_debug!(
            "Got result for {} (status {}, redirects {})",
            url,
            http_status,
            redirect_counter.load(Ordering::Relaxed)
        );

        let body_stage = self.settings.capture_mode.body_stage();
        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| CaptureError::new(body_stage, err.to_string()))?;
            body.extend_from_slice(&chunk);
        }
        agent_debug!("Got body for {} ({} bytes)", url, body.len());

        Ok(TargetCapture {
            http_status,
            content_type,
            body: body.freeze(),
        })
    }
}
