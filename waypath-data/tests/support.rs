//! Canned service payloads and mock server wiring for adapter tests.

use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// OSRM Route API body with one straight route per distance.
pub fn osrm_routes(distances: &[f64]) -> Value {
    let routes: Vec<Value> = distances
        .iter()
        .map(|distance| {
            json!({
                "distance": distance,
                "duration": 120.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[1.0, 1.0], [2.0, 2.0]]
                }
            })
        })
        .collect();
    json!({ "code": "Ok", "routes": routes, "waypoints": [] })
}

/// Pelias search body with a single point feature.
pub fn pelias_match(name: &str, longitude: f64, latitude: f64) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [longitude, latitude] },
            "properties": { "name": name, "label": format!("{name}, Springfield") }
        }]
    })
}

/// Answer every OSRM route request with `template`.
pub async fn mount_osrm(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/[a-z]+/"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Answer Pelias searches for `text` with `template`.
pub async fn mount_pelias(server: &MockServer, text: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("text", text))
        .respond_with(template)
        .mount(server)
        .await;
}
