use thiserror::Error;

/// Errors reported by [`RouteOrchestrator`](super::RouteOrchestrator).
///
/// Every failure is local to one geocode or one hop; the orchestrator stays
/// usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// The address was empty or only whitespace.
    #[error("address must not be empty")]
    EmptyAddress,
    /// The address could not be resolved to a coordinate.
    #[error("could not geocode {address:?}: {message}")]
    GeocodeFailed {
        /// The address as supplied by the caller.
        address: String,
        /// Description of the failure, suitable for showing to a user.
        message: String,
    },
    /// No route could be computed for a hop.
    #[error("could not compute directions for hop {hop}: {message}")]
    DirectionsFailed {
        /// Index of the failing hop.
        hop: usize,
        /// Description of the failure, suitable for showing to a user.
        message: String,
    },
}
