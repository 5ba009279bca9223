use std::fmt;

/// Pipeline stage at which a failure occurred.
///
/// Every failure in the system carries exactly one of these tags; the
/// collector receives them as the `location` field of a failure report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The worker-hosting capability was absent in the execution environment.
    ServiceWorkerCheck,
    /// Registering the worker script was rejected.
    ServiceWorkerRegister,
    /// Enumerating existing registrations failed before the unregister batch.
    ServiceWorkerUnregisterOuter,
    /// The unregister batch itself failed.
    ServiceWorkerUnregisterInner,
    /// The target fetch itself failed (DNS, TLS, connect, abort).
    UrlFetch,
    /// The response body could not be materialized (cache-bypass capture).
    BlobDecoding,
    /// The response body could not be materialized (credentialed capture).
    ResponseDecoding,
    /// The materialized body could not be transcoded to text.
    TextDecoding,
    /// Delivering a success report failed.
    SuccessReport,
}

impl FailureStage {
    /// Wire label used in failure reports.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStage::ServiceWorkerCheck => "service_worker_check",
            FailureStage::ServiceWorkerRegister => "service_worker_register",
            FailureStage::ServiceWorkerUnregisterOuter => "service_worker_unregister_outer",
            FailureStage::ServiceWorkerUnregisterInner => "service_worker_unregister_inner",
            FailureStage::UrlFetch => "url_fetch",
            FailureStage::BlobDecoding => "blob_decoding",
            FailureStage::ResponseDecoding => "response_decoding",
            FailureStage::TextDecoding => "text_decoding",
            FailureStage::SuccessReport => "success_report",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
