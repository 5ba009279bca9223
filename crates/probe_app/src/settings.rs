use std::fs;
use std::path::Path;

use probe_core::AgentConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

/// Load the agent configuration from a RON file.
///
/// Unlike transient probe faults, a broken config file is fatal: there is
/// nothing to probe and nowhere to report without one.
pub fn load(path: &Path) -> Result<AgentConfig, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use probe_core::{CaptureMode, InstallStrategy};

    const SAMPLE: &str = r#"(
    worker_script_url: "https://probe.example/sw.js",
    targets: ["https://a.example/", "https://b.example/"],
    redirect_url: "https://news.example/",
    redirect_delay_ms: 1500,
    debug_logging: true,
    auto_invoke: true,
    install_strategy: ForcedReinstall,
    capture_mode: CacheBypass,
    success_report_url: "https://probe.example/api/success",
    failure_report_url: "https://probe.example/api/failure",
)"#;

    #[test]
    fn loads_a_complete_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");

        let config = load(file.path()).expect("load config");

        assert_eq!(config.worker_script_url, "https://probe.example/sw.js");
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.redirect_delay_ms, 1500);
        assert_eq!(config.install_strategy, InstallStrategy::ForcedReinstall);
        assert_eq!(config.capture_mode, CaptureMode::CacheBypass);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load(Path::new("/nonexistent/agent.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn malformed_content_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"(worker_script_url: 42)").expect("write junk");

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
