use thiserror::Error;

use super::TransportMode;

/// Errors reported by geocoding and directions providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Description of the failure.
        message: String,
    },
    /// The service reported an application-level error.
    #[error("service error {code}: {message}")]
    Service {
        /// Service status code, e.g. OSRM's `"InvalidQuery"`.
        code: String,
        /// Message returned alongside the code.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse provider response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
    /// The provider cannot route with the requested transport mode.
    #[error("transport mode {mode} is not supported by this provider")]
    UnsupportedTransportMode {
        /// The rejected mode.
        mode: TransportMode,
    },
}
