//! HTTP-based `DirectionsProvider` using OSRM's Route API.
//!
//! [`OsrmDirectionsProvider`] asks an OSRM server for the routes between two
//! coordinates and converts each returned route into a [`CandidateRoute`].
//! Choosing between candidates is left to the orchestrator.
//!
//! # Example
//!
//! ```no_run
//! use waypath_core::{Coordinate, DirectionsProvider, DirectionsRequest, TransportMode};
//! use waypath_data::routing::OsrmDirectionsProvider;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OsrmDirectionsProvider::new("http://localhost:5000")?;
//! let request = DirectionsRequest {
//!     origin: Coordinate::new(51.5, -0.1)?,
//!     destination: Coordinate::new(51.6, -0.2)?,
//!     allow_alternates: true,
//!     transport_mode: TransportMode::Walking,
//! };
//!
//! let candidates = provider.route(&request).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use waypath_core::{
    CandidateRoute, Coordinate, DirectionsProvider, DirectionsRequest, ProviderError,
    TransportMode,
};

use super::osrm::{OsrmRoute, RouteResponse};
use crate::error::{ProviderBuildError, convert_reqwest_error};

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "waypath-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmDirectionsProvider`].
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmDirectionsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

/// Directions provider backed by the OSRM Route API.
///
/// Automobile requests use the `driving` profile and walking requests the
/// `foot` profile. OSRM has no public transport profile, so transit
/// requests fail with [`ProviderError::UnsupportedTransportMode`] before any
/// network traffic.
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProvider {
    client: Client,
    config: OsrmDirectionsProviderConfig,
}

impl OsrmDirectionsProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: OsrmDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        if let Err(source) = Url::parse(&config.base_url) {
            return Err(ProviderBuildError::InvalidBaseUrl {
                base_url: config.base_url,
                source,
            });
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &OsrmDirectionsProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for a request.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?alternatives=..`.
    fn build_route_url(&self, request: &DirectionsRequest) -> Result<String, ProviderError> {
        let profile = profile_for(request.transport_mode)?;
        Ok(format!(
            "{}/route/v1/{}/{};{}?alternatives={}&overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            profile,
            lon_lat(request.origin),
            lon_lat(request.destination),
            request.allow_alternates,
        ))
    }

    /// Interpret a 4xx answer, which carries an OSRM status body when the
    /// request reached the routing engine.
    fn convert_rejection(
        url: &str,
        status: u16,
        body: &[u8],
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        match serde_json::from_slice::<RouteResponse>(body) {
            Ok(response) => Self::convert_response(response),
            Err(err) => {
                log::debug!("HTTP {status} body from {url} is not an OSRM response: {err}");
                Err(ProviderError::Http {
                    url: url.to_owned(),
                    status,
                    message: String::from_utf8_lossy(body).into_owned(),
                })
            }
        }
    }

    /// Convert an OSRM response into candidate routes.
    fn convert_response(response: RouteResponse) -> Result<Vec<CandidateRoute>, ProviderError> {
        if response.is_no_route() {
            return Ok(Vec::new());
        }
        if !response.is_ok() {
            return Err(ProviderError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        response
            .routes
            .ok_or_else(|| ProviderError::Parse {
                message: "OSRM response missing routes array".to_owned(),
            })?
            .into_iter()
            .map(convert_route)
            .collect()
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        let url = self.build_route_url(request)?;
        let timeout_secs = self.config.timeout.as_secs();
        log::debug!("requesting OSRM route: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, timeout_secs))?;

        // osrm-routed reports every non-`Ok` code with HTTP 400 and a JSON body.
        let status = response.status();
        if status.is_client_error() {
            let bytes = response
                .bytes()
                .await
                .map_err(|err| convert_reqwest_error(&err, &url, timeout_secs))?;
            return Self::convert_rejection(&url, status.as_u16(), &bytes);
        }

        let accepted = response
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, &url, timeout_secs))?;

        let body: RouteResponse = accepted.json().await.map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })?;

        Self::convert_response(body)
    }
}

const fn profile_for(mode: TransportMode) -> Result<&'static str, ProviderError> {
    match mode {
        TransportMode::Automobile => Ok("driving"),
        TransportMode::Walking => Ok("foot"),
        TransportMode::Transit => Err(ProviderError::UnsupportedTransportMode { mode }),
    }
}

fn lon_lat(coordinate: Coordinate) -> String {
    format!("{},{}", coordinate.longitude, coordinate.latitude)
}

fn convert_route(route: OsrmRoute) -> Result<CandidateRoute, ProviderError> {
    let polyline = route
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinate::from_lon_lat)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ProviderError::Parse {
            message: format!("invalid route geometry: {err}"),
        })?;
    CandidateRoute::new(polyline, route.distance).map_err(|err| ProviderError::Parse {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::LineGeometry;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> OsrmDirectionsProvider {
        OsrmDirectionsProvider::new("http://osrm.example.com").expect("provider should build")
    }

    fn request(mode: TransportMode, allow_alternates: bool) -> DirectionsRequest {
        DirectionsRequest {
            origin: Coordinate::new(51.5, -0.1).expect("valid origin"),
            destination: Coordinate::new(51.6, -0.2).expect("valid destination"),
            allow_alternates,
            transport_mode: mode,
        }
    }

    fn route(distance: f64, coordinates: Vec<[f64; 2]>) -> OsrmRoute {
        OsrmRoute {
            distance,
            geometry: LineGeometry { coordinates },
        }
    }

    #[rstest]
    #[case(TransportMode::Automobile, "driving")]
    #[case(TransportMode::Walking, "foot")]
    fn build_route_url_selects_profile(
        provider: OsrmDirectionsProvider,
        #[case] mode: TransportMode,
        #[case] profile: &str,
    ) {
        let url = provider
            .build_route_url(&request(mode, true))
            .expect("mode should be supported");

        assert_eq!(
            url,
            format!(
                "http://osrm.example.com/route/v1/{profile}/-0.1,51.5;-0.2,51.6\
                 ?alternatives=true&overview=full&geometries=geojson"
            )
        );
    }

    #[rstest]
    fn build_route_url_passes_alternates_flag(provider: OsrmDirectionsProvider) {
        let url = provider
            .build_route_url(&request(TransportMode::Automobile, false))
            .expect("mode should be supported");

        assert!(url.contains("alternatives=false"));
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash() {
        let provider =
            OsrmDirectionsProvider::new("http://osrm.example.com/").expect("provider should build");

        let url = provider
            .build_route_url(&request(TransportMode::Walking, true))
            .expect("mode should be supported");

        assert!(url.starts_with("http://osrm.example.com/route/"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn build_route_url_rejects_transit(provider: OsrmDirectionsProvider) {
        let err = provider
            .build_route_url(&request(TransportMode::Transit, true))
            .expect_err("transit is unsupported");

        assert_eq!(
            err,
            ProviderError::UnsupportedTransportMode {
                mode: TransportMode::Transit
            }
        );
    }

    #[rstest]
    fn convert_response_keeps_route_order() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: Some(vec![
                route(1204.7, vec![[-0.1, 51.5], [-0.2, 51.6]]),
                route(980.0, vec![[-0.1, 51.5], [-0.15, 51.55], [-0.2, 51.6]]),
            ]),
        };

        let candidates =
            OsrmDirectionsProvider::convert_response(response).expect("should convert");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].distance_meters, 1204.7);
        assert_eq!(candidates[1].distance_meters, 980.0);
        assert_eq!(candidates[1].polyline.len(), 3);
        assert_eq!(candidates[0].polyline[0].latitude, 51.5);
        assert_eq!(candidates[0].polyline[0].longitude, -0.1);
    }

    #[rstest]
    fn convert_response_maps_no_route_to_empty() {
        let response = RouteResponse {
            code: "NoRoute".to_owned(),
            message: Some("Impossible route between points".to_owned()),
            routes: None,
        };

        let candidates =
            OsrmDirectionsProvider::convert_response(response).expect("should convert");

        assert!(candidates.is_empty());
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = RouteResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Query string malformed".to_owned()),
            routes: None,
        };

        let err = OsrmDirectionsProvider::convert_response(response).expect_err("should fail");

        match err {
            ProviderError::Service { code, message } => {
                assert_eq!(code, "InvalidQuery");
                assert_eq!(message, "Query string malformed");
            }
            _ => panic!("expected Service error, got {err:?}"),
        }
    }

    #[rstest]
    #[case::missing_routes(None)]
    #[case::negative_distance(Some(vec![route(-5.0, vec![[-0.1, 51.5]])]))]
    #[case::latitude_out_of_range(Some(vec![route(10.0, vec![[-0.1, 95.0]])]))]
    fn convert_response_rejects_malformed_routes(#[case] routes: Option<Vec<OsrmRoute>>) {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes,
        };

        let err = OsrmDirectionsProvider::convert_response(response).expect_err("should fail");

        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[rstest]
    fn convert_rejection_reads_no_route_body() {
        let body = br#"{"code":"NoRoute","message":"Impossible route between points"}"#;

        let candidates = OsrmDirectionsProvider::convert_rejection("http://osrm.test", 400, body)
            .expect("NoRoute should convert");

        assert!(candidates.is_empty());
    }

    #[rstest]
    fn convert_rejection_reads_service_code() {
        let body = br#"{"code":"NoSegment","message":"Could not find a matching segment"}"#;

        let err = OsrmDirectionsProvider::convert_rejection("http://osrm.test", 400, body)
            .expect_err("should fail");

        assert_eq!(
            err,
            ProviderError::Service {
                code: "NoSegment".to_owned(),
                message: "Could not find a matching segment".to_owned(),
            }
        );
    }

    #[rstest]
    fn convert_rejection_falls_back_to_http_error() {
        let err =
            OsrmDirectionsProvider::convert_rejection("http://osrm.test", 404, b"Not Found")
                .expect_err("should fail");

        assert_eq!(
            err,
            ProviderError::Http {
                url: "http://osrm.test".to_owned(),
                status: 404,
                message: "Not Found".to_owned(),
            }
        );
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = OsrmDirectionsProvider::new("not a url").expect_err("should fail");

        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = OsrmDirectionsProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
