//! Probe engine: IO pipeline and lifecycle effect execution.
mod capture;
mod decode;
mod fetch;
mod lifecycle;
mod orchestrator;
mod registry;
mod report;
mod transport;
mod types;
mod worker;

pub use capture::capture_target;
pub use decode::{decode_text, DecodeError, DecodedText};
pub use fetch::{FetchSettings, ReqwestFetcher, TargetFetcher};
pub use lifecycle::{run_lifecycle, Navigator, RegistryError, WorkerRegistry};
pub use orchestrator::run_targets;
pub use registry::InProcessRegistry;
pub use report::{HttpReporter, Reporter};
pub use transport::{decode_content, encode_content};
pub use types::{CaptureError, FetchOutcome, TargetCapture};
pub use worker::ProbeWorker;
