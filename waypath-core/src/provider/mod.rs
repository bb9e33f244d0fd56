//! Boundaries to external geocoding and directions services.
//!
//! The orchestrator never resolves addresses or computes paths itself. It
//! talks to a [`GeocodingProvider`] and a [`DirectionsProvider`], both of
//! which report failures as [`ProviderError`].

mod directions;
mod error;
mod geocoding;

pub use directions::{DirectionsProvider, DirectionsRequest, TransportMode};
pub use error::ProviderError;
pub use geocoding::{GeocodingProvider, Placemark};
