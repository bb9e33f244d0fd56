//! HTTP-based `GeocodingProvider` using the Pelias search API.

use std::num::NonZeroU8;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use waypath_core::{Coordinate, GeocodingProvider, Placemark, ProviderError};

use super::pelias::{Feature, SearchResponse};
use crate::error::{ProviderBuildError, convert_reqwest_error};

/// Default user agent for geocoding requests.
pub const DEFAULT_USER_AGENT: &str = "waypath-geocoding/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_RESULT_SIZE: NonZeroU8 = match NonZeroU8::new(5) {
    Some(size) => size,
    None => NonZeroU8::MIN,
};

/// Configuration for [`PeliasGeocodingProvider`].
#[derive(Debug, Clone)]
pub struct PeliasGeocodingProviderConfig {
    /// Base URL for the Pelias service (e.g., `"https://api.openrouteservice.org/geocode"`).
    pub base_url: String,
    /// API key sent as the `api_key` query parameter, if the service needs one.
    pub api_key: Option<String>,
    /// Maximum number of matches requested per lookup.
    pub size: NonZeroU8,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for PeliasGeocodingProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_owned(),
            api_key: None,
            size: DEFAULT_RESULT_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl PeliasGeocodingProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the maximum number of matches per lookup.
    #[must_use]
    pub const fn with_size(mut self, size: NonZeroU8) -> Self {
        self.size = size;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Geocoder backed by a Pelias `/v1/search` endpoint.
///
/// Matches are returned in the service's ranking order. Features without a
/// usable point geometry are kept as placemarks without a coordinate so the
/// caller can decide how to treat them.
#[derive(Clone)]
pub struct PeliasGeocodingProvider {
    client: Client,
    config: PeliasGeocodingProviderConfig,
    search_url: Url,
}

impl std::fmt::Debug for PeliasGeocodingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeliasGeocodingProvider")
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.config.api_key.as_ref().map(|_| "<redacted>"))
            .field("size", &self.config.size)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl PeliasGeocodingProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(PeliasGeocodingProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: PeliasGeocodingProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = format!("{}/v1/search", config.base_url.trim_end_matches('/'));
        let search_url = match Url::parse(&endpoint) {
            Ok(url) => url,
            Err(source) => {
                return Err(ProviderBuildError::InvalidBaseUrl {
                    base_url: config.base_url,
                    source,
                });
            }
        };
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            search_url,
        })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &PeliasGeocodingProviderConfig {
        &self.config
    }

    /// Build the search URL for `address`, percent-encoding the query.
    fn build_search_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("text", address)
                .append_pair("size", &self.config.size.to_string());
            if let Some(api_key) = &self.config.api_key {
                query.append_pair("api_key", api_key);
            }
        }
        url
    }

    fn convert_response(response: SearchResponse) -> Vec<Placemark> {
        response.features.into_iter().map(convert_feature).collect()
    }
}

#[async_trait]
impl GeocodingProvider for PeliasGeocodingProvider {
    async fn geocode(&self, address: &str) -> Result<Vec<Placemark>, ProviderError> {
        let url = self.build_search_url(address);
        let timeout_secs = self.config.timeout.as_secs();
        // The API key stays out of error messages and logs.
        let reported = self.search_url.as_str();
        log::debug!("geocoding {address:?} via {reported}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err.without_url(), reported, timeout_secs))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err.without_url(), reported, timeout_secs))?;

        let body: SearchResponse = response.json().await.map_err(|err| ProviderError::Parse {
            message: err.without_url().to_string(),
        })?;

        let placemarks = Self::convert_response(body);
        log::debug!("geocoder returned {} matches for {address:?}", placemarks.len());
        Ok(placemarks)
    }
}

fn convert_feature(feature: Feature) -> Placemark {
    let coordinate = feature.geometry.and_then(|geometry| match geometry.coordinates[..] {
        [longitude, latitude] => Coordinate::from_lon_lat([longitude, latitude]).ok(),
        _ => None,
    });
    let properties = feature.properties;
    Placemark {
        name: properties.name.or(properties.label),
        coordinate,
    }
}
