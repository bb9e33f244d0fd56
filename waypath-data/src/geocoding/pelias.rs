//! Pelias search response types.
//!
//! Pelias answers `/v1/search` with a GeoJSON `FeatureCollection`. Only the
//! fields the geocoder reads are modelled; everything else is ignored.
//!
//! See: <https://github.com/pelias/documentation/blob/master/search.md>

use serde::Deserialize;

/// Top-level search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single search match.
#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Point geometry; absent or malformed for some records.
    pub geometry: Option<PointGeometry>,
    /// Descriptive properties.
    #[serde(default)]
    pub properties: FeatureProperties,
}

/// GeoJSON `Point` geometry.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// Position as `[longitude, latitude]`.
    pub coordinates: Vec<f64>,
}

/// Feature properties used for labelling.
#[derive(Debug, Default, Deserialize)]
pub struct FeatureProperties {
    /// Short name of the place, e.g. `"10 Main St"`.
    pub name: Option<String>,
    /// Fully qualified label, e.g. `"10 Main St, Springfield, USA"`.
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_feature_collection() {
        let json = r#"{
            "geocoding": {"version": "0.2"},
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-0.1, 51.5]},
                    "properties": {"name": "10 Downing St", "label": "10 Downing St, London, UK"}
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.features.len(), 1);
        let feature = &response.features[0];
        assert_eq!(
            feature.geometry.as_ref().map(|g| g.coordinates.clone()),
            Some(vec![-0.1, 51.5])
        );
        assert_eq!(feature.properties.name.as_deref(), Some("10 Downing St"));
        assert_eq!(
            feature.properties.label.as_deref(),
            Some("10 Downing St, London, UK")
        );
    }

    #[test]
    fn deserialise_sparse_feature() {
        let json = r#"{"features": [{"type": "Feature"}]}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("should deserialise");

        let feature = &response.features[0];
        assert!(feature.geometry.is_none());
        assert!(feature.properties.name.is_none());
    }

    #[test]
    fn missing_features_means_no_matches() {
        let response: SearchResponse = serde_json::from_str("{}").expect("should deserialise");

        assert!(response.features.is_empty());
    }
}
