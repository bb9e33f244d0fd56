//! Geocoding providers backed by Pelias-compatible search services.
//!
//! [`PeliasGeocodingProvider`] implements [`waypath_core::GeocodingProvider`]
//! for self-hosted Pelias instances and hosted services exposing the same
//! `/v1/search` API, such as openrouteservice.
//!
//! # Example
//!
//! ```no_run
//! use waypath_core::GeocodingProvider;
//! use waypath_data::geocoding::{PeliasGeocodingProvider, PeliasGeocodingProviderConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PeliasGeocodingProviderConfig::new("https://api.openrouteservice.org/geocode")
//!     .with_api_key("your-key");
//! let geocoder = PeliasGeocodingProvider::with_config(config)?;
//! let placemarks = geocoder.geocode("10 Downing St, London").await?;
//! # Ok(())
//! # }
//! ```

mod pelias;
mod provider;

pub use provider::{DEFAULT_USER_AGENT, PeliasGeocodingProvider, PeliasGeocodingProviderConfig};
