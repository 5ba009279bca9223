use agent_logging::{agent_debug, agent_warn};
use futures_util::future::BoxFuture;
use probe_core::FailureStage;
use serde::Serialize;

use crate::FetchOutcome;

#[derive(Debug, Serialize)]
struct SuccessBody<'a> {
    url: Option<&'a str>,
    content: &'a str,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    url: Option<&'a str>,
    location: &'a str,
    err_msg: &'a str,
    duration: f64,
}

/// Delivers outcomes to the collector.
///
/// Delivery is fire-and-forget: `report` never surfaces an error to the
/// pipeline, whatever happens on the wire.
#[async_trait::async_trait]
pub trait Reporter: Send + Sync {
    async fn report(&self, outcome: &FetchOutcome);
}

/// Two-endpoint collector client: POST, JSON, cookies included, manual
/// redirect handling, no referrer.
pub struct HttpReporter {
    client: reqwest::Client,
    success_url: String,
    failure_url: String,
}

impl HttpReporter {
    pub fn new(
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .referer(false)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            success_url: success_url.into(),
            failure_url: failure_url.into(),
        })
    }

    /// Bounded-depth delivery: depth 0 is the primary report, depth 1 the
    /// single secondary report synthesized for a failed success delivery.
    /// Nothing ever recurses past depth 1.
    fn deliver<'a>(&'a self, outcome: &'a FetchOutcome, depth: u8) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            match outcome {
                FetchOutcome::Success {
                    url,
                    content,
                    duration_ms,
                    http_status,
                } => {
                    let body = SuccessBody {
                        url: Some(url.as_str()),
                        content,
                        duration: *duration_ms,
                        status: *http_status,
                    };
                    match self.post(&self.success_url, &body).await {
                        Ok(status) => {
                            agent_debug!("Delivered success report for {} ({})", url, status);
                        }
                        Err(err) if depth == 0 => {
                            let secondary = FetchOutcome::Failure {
                                url: Some(url.clone()),
                                stage: FailureStage::SuccessReport,
                                message: err.to_string(),
                                duration_ms: *duration_ms,
                            };
                            self.deliver(&secondary, depth + 1).await;
                        }
                        Err(err) => {
                            agent_debug!("Dropping report delivery failure for {}: {}", url, err);
                        }
                    }
                }
                FetchOutcome::Failure {
                    url,
                    stage,
                    message,
                    duration_ms,
                } => {
                    agent_debug!(
                        "Got error at url {:?} (location '{}'): {}",
                        url,
                        stage,
                        message
                    );
                    let body = FailureBody {
                        url: url.as_deref(),
                        location: stage.as_str(),
                        err_msg: message,
                        duration: *duration_ms,
                    };
                    // A failed failure-report delivery is dropped with no
                    // further signal; there is no tertiary layer.
                    if let Err(err) = self.post(&self.failure_url, &body).await {
                        agent_debug!("Failure report delivery failed: {}", err);
                    }
                }
            }
        })
    }

    /// A resolved response counts as delivered, whatever its status; only
    /// transport faults feed the secondary reporting path.
    async fn post<T: Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::StatusCode, reqwest::Error> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            agent_warn!("Collector answered {} at {}", status, url);
        }
        Ok(status)
    }
}

#[async_trait::async_trait]
impl Reporter for HttpReporter {
    async fn report(&self, outcome: &FetchOutcome) {
        self.deliver(outcome, 0).await;
    }
}
