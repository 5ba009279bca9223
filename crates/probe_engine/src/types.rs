use bytes::Bytes;
use probe_core::FailureStage;

/// Terminal result of one capture pipeline run, or of a lifecycle stage.
///
/// Produced exactly once per target per activation and consumed exactly once
/// by the reporting client; never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success {
        url: String,
        /// Transport-safe encoding of the captured body.
        content: String,
        /// Wall-clock elapsed time from fetch start, milliseconds.
        duration_ms: f64,
        /// Present only in capture modes that report the response status.
        http_status: Option<u16>,
    },
    Failure {
        /// `None` for lifecycle failures with no specific target.
        url: Option<String>,
        stage: FailureStage,
        message: String,
        duration_ms: f64,
    },
}

impl FetchOutcome {
    /// Failure outcome for a lifecycle stage (`url` is null on the wire).
    pub fn lifecycle_failure(stage: FailureStage, message: String, duration_ms: f64) -> Self {
        FetchOutcome::Failure {
            url: None,
            stage,
            message,
            duration_ms,
        }
    }
}

/// Raw response captured from a target, before transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCapture {
    pub http_status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// A capture fault, tagged with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureError {
    pub stage: FailureStage,
    pub message: String,
}

impl CaptureError {
    pub fn new(stage: FailureStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}
