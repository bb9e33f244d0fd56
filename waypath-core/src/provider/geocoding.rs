//! Address resolution.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Coordinate;

use super::ProviderError;

/// A geocoding match for an address.
///
/// Services may return matches without a usable position; the orchestrator
/// treats such a placemark as a failed lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placemark {
    /// Display name of the match, when the service supplies one.
    pub name: Option<String>,
    /// Position of the match.
    pub coordinate: Option<Coordinate>,
}

impl Placemark {
    /// Construct a placemark with a known position.
    #[must_use]
    pub fn at(name: Option<String>, coordinate: Coordinate) -> Self {
        Self {
            name,
            coordinate: Some(coordinate),
        }
    }
}

/// Resolve free-text addresses into placemarks.
///
/// Results are ordered best match first. An empty vector means the service
/// found nothing; it is not an error at this boundary.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use waypath_core::{Coordinate, GeocodingProvider, Placemark, ProviderError};
///
/// struct NullIsland;
///
/// #[async_trait]
/// impl GeocodingProvider for NullIsland {
///     async fn geocode(&self, _address: &str) -> Result<Vec<Placemark>, ProviderError> {
///         let origin = Coordinate::new(0.0, 0.0).expect("valid coordinate");
///         Ok(vec![Placemark::at(Some("Null Island".into()), origin)])
///     }
/// }
/// ```
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Return placemarks matching `address`.
    async fn geocode(&self, address: &str) -> Result<Vec<Placemark>, ProviderError>;
}

#[async_trait]
impl<T> GeocodingProvider for Arc<T>
where
    T: GeocodingProvider + ?Sized,
{
    async fn geocode(&self, address: &str) -> Result<Vec<Placemark>, ProviderError> {
        (**self).geocode(address).await
    }
}
