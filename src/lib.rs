//! Facade crate for the Waypath routing orchestrator.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the OSRM and Pelias adapters.

#![forbid(unsafe_code)]

pub use waypath_core::{
    CandidateRoute, Coordinate, CoordinateError, DirectionsProvider, DirectionsRequest,
    GeocodingProvider, Hop, OrchestratorConfig, OrchestratorError, OrchestratorEvent, Placemark,
    ProviderError, RecomputeReport, ResolvedRoute, RouteError, RouteOrchestrator, TransportMode,
    Waypoint, WaypointId, hops_for, select_shortest,
};

#[cfg(feature = "http")]
pub use waypath_data::{
    ProviderBuildError,
    geocoding::{PeliasGeocodingProvider, PeliasGeocodingProviderConfig},
    routing::{OsrmDirectionsProvider, OsrmDirectionsProviderConfig},
};
