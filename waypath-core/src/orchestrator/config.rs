use std::num::NonZeroUsize;

use crate::TransportMode;

/// Configuration for [`RouteOrchestrator`](super::RouteOrchestrator).
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use waypath_core::{OrchestratorConfig, TransportMode};
///
/// let config = OrchestratorConfig::new()
///     .with_transport_mode(TransportMode::Walking)
///     .with_max_concurrent_hops(NonZeroUsize::new(4));
/// assert!(config.allow_alternates);
/// assert_eq!(config.transport_mode, TransportMode::Walking);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrchestratorConfig {
    /// Means of travel requested for every hop.
    pub transport_mode: TransportMode,
    /// Ask providers for alternative routes so the shortest can be chosen.
    pub allow_alternates: bool,
    /// Upper bound on hop requests in flight at once. `None` issues all hops
    /// of a recomputation together.
    pub max_concurrent_hops: Option<NonZeroUsize>,
    /// Capacity of the event channel; slow subscribers lag past this.
    pub event_capacity: usize,
}

/// Default capacity of the orchestrator's event channel.
const DEFAULT_EVENT_CAPACITY: usize = 64;

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            transport_mode: TransportMode::Automobile,
            allow_alternates: true,
            max_concurrent_hops: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl OrchestratorConfig {
    /// Create the default configuration: automobile routing with alternates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport mode.
    #[must_use]
    pub const fn with_transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = transport_mode;
        self
    }

    /// Enable or disable alternative routes.
    #[must_use]
    pub const fn with_alternates(mut self, allow_alternates: bool) -> Self {
        self.allow_alternates = allow_alternates;
        self
    }

    /// Bound the number of concurrent hop requests.
    #[must_use]
    pub const fn with_max_concurrent_hops(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrent_hops = limit;
        self
    }

    /// Set the event channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}
