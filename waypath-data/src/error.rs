//! Errors shared by the HTTP provider adapters.

use thiserror::Error;
use waypath_core::ProviderError;

/// Errors raised while constructing an HTTP provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        base_url: String,
        /// Parse failure reported by `url`.
        #[source]
        source: url::ParseError,
    },
}

/// Map a `reqwest` failure onto the provider error taxonomy.
pub(crate) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout_secs: u64,
) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Timeout {
            url: url.to_owned(),
            timeout_secs,
        };
    }

    if let Some(status) = error.status() {
        return ProviderError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    if error.is_decode() {
        return ProviderError::Parse {
            message: error.to_string(),
        };
    }

    ProviderError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}
