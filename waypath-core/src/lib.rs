//! Core domain types and orchestration for Waypath.
//!
//! The crate models waypoints, the hops between consecutive waypoints and the
//! routes chosen for them. Geocoding and path finding are delegated to
//! [`GeocodingProvider`] and [`DirectionsProvider`] implementations; the
//! [`RouteOrchestrator`] sequences those calls and keeps a consistent view of
//! the journey. Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
pub mod orchestrator;
pub mod provider;
mod route;
mod waypoint;

#[doc(hidden)]
pub mod test_support;

pub use coordinate::{Coordinate, CoordinateError};
pub use orchestrator::{
    OrchestratorConfig, OrchestratorError, OrchestratorEvent, RecomputeReport, RouteOrchestrator,
};
pub use provider::{
    DirectionsProvider, DirectionsRequest, GeocodingProvider, Placemark, ProviderError,
    TransportMode,
};
pub use route::{CandidateRoute, Hop, ResolvedRoute, RouteError, hops_for, select_shortest};
pub use waypoint::{Waypoint, WaypointId};
