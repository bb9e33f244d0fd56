//! Notifications published to subscribers such as a map view.

use crate::{ResolvedRoute, Waypoint};

/// A change in orchestrator state.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    /// A waypoint was appended to the list.
    WaypointAdded(Waypoint),
    /// A recomputation settled; carries every resolved route by hop index.
    RoutesUpdated(Vec<ResolvedRoute>),
    /// Directions for a hop could not be computed. Any earlier route for the
    /// hop is still in place.
    HopFailed {
        /// Index of the failing hop.
        hop: usize,
        /// Description of the failure.
        message: String,
    },
    /// All waypoints and routes were cleared.
    Reset,
}
