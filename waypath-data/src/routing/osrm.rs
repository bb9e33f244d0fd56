//! OSRM API response types for the Route service.
//!
//! The Route service finds the fastest path between the supplied
//! coordinates, optionally with alternatives. Geometries are requested as
//! GeoJSON so coordinates arrive as `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// The `code` field reports the status; `routes` is present on success.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Routes found, fastest first.
    pub routes: Option<Vec<OsrmRoute>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the service found no path between the coordinates.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        self.code == "NoRoute"
    }
}

/// A single route in an OSRM response.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route length in metres.
    pub distance: f64,
    /// Route geometry.
    pub geometry: LineGeometry,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Vertices as `[longitude, latitude]`.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {
                    "distance": 1204.7,
                    "duration": 160.2,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-0.1, 51.5], [-0.2, 51.6]]
                    }
                }
            ],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert!(response.message.is_none());
        let routes = response.routes.expect("should have routes");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].distance, 1204.7);
        assert_eq!(
            routes[0].geometry.coordinates,
            vec![[-0.1, 51.5], [-0.2, 51.6]]
        );
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "InvalidQuery",
            "message": "Query string malformed close to position 28"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(!response.is_no_route());
        assert_eq!(
            response.message.as_deref(),
            Some("Query string malformed close to position 28")
        );
        assert!(response.routes.is_none());
    }

    #[test]
    fn deserialise_no_route_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_no_route());
    }
}
