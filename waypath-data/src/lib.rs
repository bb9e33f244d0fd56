//! HTTP provider adapters for Waypath.
//!
//! The core crate defines the geocoding and directions seams; this crate
//! plugs real services into them:
//!
//! - [`routing::OsrmDirectionsProvider`] queries an OSRM Route API.
//! - [`geocoding::PeliasGeocodingProvider`] queries a Pelias `/v1/search`
//!   endpoint.
//!
//! Transport failures from either adapter are reported as
//! [`waypath_core::ProviderError`]; construction failures as
//! [`ProviderBuildError`].

#![forbid(unsafe_code)]

mod error;
pub mod geocoding;
pub mod routing;

pub use error::ProviderBuildError;
