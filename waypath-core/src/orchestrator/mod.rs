//! Multi-waypoint route orchestration.
//!
//! [`RouteOrchestrator`] owns an ordered list of waypoints and keeps one
//! [`ResolvedRoute`] per consecutive pair. Addresses are resolved through a
//! [`GeocodingProvider`]; routes come from a [`DirectionsProvider`], and the
//! shortest candidate per hop is kept.
//!
//! # Recompute-all-hops policy
//!
//! Whenever the waypoint list grows, directions are requested for *every*
//! hop, not just the newest one. Unchanged hops are requested again; in
//! exchange the resolved routes always describe the full current list once
//! the recomputation settles.
//!
//! # Concurrency
//!
//! State lives behind a single mutex that is never held across an `.await`.
//! Provider calls run without the lock. Each call captures the state's
//! generation when it is issued and its result is dropped if a
//! [`reset`](RouteOrchestrator::reset) bumped the generation in the meantime.
//! Provider calls themselves are not cancelled.
//!
//! # Example
//!
//! ```
//! use waypath_core::RouteOrchestrator;
//! use waypath_core::test_support::{StubDirectionsProvider, StubGeocodingProvider};
//! use waypath_core::Coordinate;
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let geocoder = StubGeocodingProvider::new()
//!     .with_address("10 Main St", Coordinate::new(1.0, 1.0).expect("valid"))
//!     .with_address("20 Oak Ave", Coordinate::new(2.0, 2.0).expect("valid"));
//! let directions = StubDirectionsProvider::with_distances(&[500.0]);
//! let orchestrator = RouteOrchestrator::new(geocoder, directions);
//!
//! orchestrator.add_waypoint_by_address("10 Main St").await?;
//! orchestrator.add_waypoint_by_address("20 Oak Ave").await?;
//!
//! let routes = orchestrator.resolved_routes();
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].distance_meters(), 500.0);
//! # Ok::<(), waypath_core::OrchestratorError>(())
//! # }).expect("orchestration succeeds");
//! ```

mod config;
mod error;
mod events;
mod state;

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::stream::{self, StreamExt};
use tokio::sync::broadcast;

use crate::{
    Coordinate, DirectionsProvider, DirectionsRequest, GeocodingProvider, Hop, Placemark,
    ResolvedRoute, Waypoint, select_shortest,
};

pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use events::OrchestratorEvent;

use state::{Apply, OrchestratorState};

/// Outcome of one recompute-all-hops pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Hop indices whose route was stored, in completion order.
    pub applied: Vec<usize>,
    /// Hops whose directions request failed.
    pub failed: Vec<OrchestratorError>,
    /// Completions dropped because a reset happened while they were in flight.
    pub discarded: usize,
}

impl RecomputeReport {
    /// `true` when no hop failed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    const fn is_stale(&self) -> bool {
        self.applied.is_empty() && self.failed.is_empty() && self.discarded > 0
    }
}

/// Coordinates geocoding and per-hop directions for an ordered waypoint list.
///
/// All methods take `&self`; wrap the orchestrator in an `Arc` to share it
/// between tasks.
pub struct RouteOrchestrator<G, D>
where
    G: GeocodingProvider,
    D: DirectionsProvider,
{
    geocoder: G,
    directions: D,
    config: OrchestratorConfig,
    state: Mutex<OrchestratorState>,
    events: broadcast::Sender<OrchestratorEvent>,
}

impl<G, D> fmt::Debug for RouteOrchestrator<G, D>
where
    G: GeocodingProvider,
    D: DirectionsProvider,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOrchestrator")
            .field("config", &self.config)
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl<G, D> RouteOrchestrator<G, D>
where
    G: GeocodingProvider,
    D: DirectionsProvider,
{
    /// Construct an orchestrator using default configuration.
    #[must_use]
    pub fn new(geocoder: G, directions: D) -> Self {
        Self::with_config(geocoder, directions, OrchestratorConfig::default())
    }

    /// Construct an orchestrator with explicit configuration.
    #[must_use]
    pub fn with_config(geocoder: G, directions: D, config: OrchestratorConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            geocoder,
            directions,
            config,
            state: Mutex::new(OrchestratorState::default()),
            events,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Receive [`OrchestratorEvent`]s published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrchestratorEvent> {
        self.events.subscribe()
    }

    /// Geocode `address` and append the first match as a waypoint.
    ///
    /// Returns `Ok(None)` when a [`reset`](Self::reset) happened while the
    /// geocoder was working; the late result is discarded and the state is
    /// left as the reset made it. When the list reaches two or more
    /// waypoints, every hop is recomputed before this method returns. Hop
    /// failures do not fail the add; they are published as
    /// [`OrchestratorEvent::HopFailed`].
    ///
    /// # Errors
    ///
    /// - [`OrchestratorError::EmptyAddress`] for a blank address.
    /// - [`OrchestratorError::GeocodeFailed`] when the provider fails,
    ///   returns no placemarks, or its first placemark has no coordinate.
    pub async fn add_waypoint_by_address(
        &self,
        raw_address: &str,
    ) -> Result<Option<Waypoint>, OrchestratorError> {
        let address = raw_address.trim();
        if address.is_empty() {
            return Err(OrchestratorError::EmptyAddress);
        }

        let generation = self.lock().generation();
        log::debug!("geocoding {address:?} for generation {generation}");
        let placemarks = self
            .geocoder
            .geocode(address)
            .await
            .map_err(|err| geocode_failed(address, err.to_string()))?;
        let (label, coordinate) = first_position(address, placemarks)?;

        let Some(waypoint) = self.append(generation, label, coordinate) else {
            log::debug!("discarding geocode result for {address:?}: reset since request");
            return Ok(None);
        };
        log::info!("added waypoint {} for {address:?}", waypoint.id);
        self.after_append(&waypoint).await;
        Ok(Some(waypoint))
    }

    /// Append a waypoint at a known position, e.g. the device location.
    ///
    /// Behaves like [`add_waypoint_by_address`](Self::add_waypoint_by_address)
    /// without the geocoding step.
    pub async fn add_waypoint_at(&self, coordinate: Coordinate, label: Option<String>) -> Waypoint {
        let waypoint = self.append_unchecked(label, coordinate);
        log::info!("added waypoint {} at {coordinate:?}", waypoint.id);
        self.after_append(&waypoint).await;
        waypoint
    }

    /// Request directions for every current hop and store the results.
    ///
    /// Hops are issued together, bounded by
    /// [`OrchestratorConfig::max_concurrent_hops`], and each completion is
    /// applied as soon as it arrives. A failed hop keeps whatever route it
    /// had before. Once all hops settle, [`OrchestratorEvent::RoutesUpdated`]
    /// is published unless a reset made the whole pass stale.
    ///
    /// With fewer than two waypoints this does nothing.
    pub async fn recompute_routes(&self) -> RecomputeReport {
        let (generation, hops) = self.lock().hop_snapshot();
        let mut report = RecomputeReport::default();
        if hops.is_empty() {
            return report;
        }

        let limit = self
            .config
            .max_concurrent_hops
            .map_or(hops.len(), NonZeroUsize::get);
        log::debug!(
            "recomputing {} hops for generation {generation} (limit {limit})",
            hops.len()
        );

        let mut outcomes = stream::iter(hops)
            .map(|hop| self.compute_hop(hop))
            .buffer_unordered(limit);
        while let Some(outcome) = outcomes.next().await {
            self.settle(generation, outcome, &mut report);
        }

        if report.is_stale() {
            log::debug!("recomputation for generation {generation} was superseded");
            return report;
        }
        {
            let state = self.lock();
            if state.generation() == generation {
                self.publish(OrchestratorEvent::RoutesUpdated(state.resolved_routes()));
            }
        }
        report
    }

    /// Clear all waypoints and routes.
    ///
    /// Hop and geocode results still in flight are discarded when they
    /// complete. Calling this repeatedly is harmless.
    pub fn reset(&self) {
        let generation = {
            let mut state = self.lock();
            state.reset();
            self.publish(OrchestratorEvent::Reset);
            state.generation()
        };
        log::info!("reset waypoints; now at generation {generation}");
    }

    /// Resolved routes ordered by hop index.
    #[must_use]
    pub fn resolved_routes(&self) -> Vec<ResolvedRoute> {
        self.lock().resolved_routes()
    }

    /// Waypoints in visiting order.
    #[must_use]
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.lock().waypoints().to_vec()
    }

    /// Number of waypoints currently held.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.lock().waypoints().len()
    }

    /// Push a waypoint and announce it in one critical section, unless a
    /// reset moved the state past `generation`.
    fn append(
        &self,
        generation: u64,
        label: Option<String>,
        coordinate: Coordinate,
    ) -> Option<Waypoint> {
        let mut state = self.lock();
        if state.generation() != generation {
            return None;
        }
        Some(self.push_and_announce(&mut state, label, coordinate))
    }

    fn append_unchecked(&self, label: Option<String>, coordinate: Coordinate) -> Waypoint {
        let mut state = self.lock();
        self.push_and_announce(&mut state, label, coordinate)
    }

    /// Events are sent while the guard is held so subscribers observe them
    /// in the order the state changed.
    fn push_and_announce(
        &self,
        state: &mut OrchestratorState,
        label: Option<String>,
        coordinate: Coordinate,
    ) -> Waypoint {
        let waypoint = state.push_waypoint(label, coordinate);
        self.publish(OrchestratorEvent::WaypointAdded(waypoint.clone()));
        waypoint
    }

    async fn after_append(&self, waypoint: &Waypoint) {
        let report = self.recompute_routes().await;
        if !report.is_complete() {
            log::warn!(
                "{} of {} hops failed after adding waypoint {}",
                report.failed.len(),
                report.failed.len() + report.applied.len(),
                waypoint.id
            );
        }
    }

    async fn compute_hop(&self, hop: Hop) -> Result<ResolvedRoute, OrchestratorError> {
        let request = DirectionsRequest {
            origin: hop.origin.coordinate,
            destination: hop.destination.coordinate,
            allow_alternates: self.config.allow_alternates,
            transport_mode: self.config.transport_mode,
        };
        let candidates = self
            .directions
            .route(&request)
            .await
            .map_err(|err| directions_failed(hop.index, err.to_string()))?;
        let route = select_shortest(&candidates)
            .cloned()
            .ok_or_else(|| directions_failed(hop.index, "no routes returned".to_owned()))?;
        log::debug!(
            "hop {} resolved to {:.1} m from {} candidates",
            hop.index,
            route.distance_meters,
            candidates.len()
        );
        Ok(ResolvedRoute { hop, route })
    }

    fn settle(
        &self,
        generation: u64,
        outcome: Result<ResolvedRoute, OrchestratorError>,
        report: &mut RecomputeReport,
    ) {
        match outcome {
            Ok(resolved) => {
                let index = resolved.hop.index;
                let applied = self.lock().apply(generation, resolved);
                match applied {
                    Apply::Applied => report.applied.push(index),
                    Apply::Stale => report.discarded += 1,
                }
            }
            Err(err) => {
                let state = self.lock();
                if state.generation() != generation {
                    report.discarded += 1;
                    return;
                }
                if let OrchestratorError::DirectionsFailed { hop, message } = &err {
                    log::warn!("directions for hop {hop} failed: {message}");
                    self.publish(OrchestratorEvent::HopFailed {
                        hop: *hop,
                        message: message.clone(),
                    });
                }
                drop(state);
                report.failed.push(err);
            }
        }
    }

    fn publish(&self, event: OrchestratorEvent) {
        if self.events.send(event).is_err() {
            log::trace!("no subscribers for orchestrator event");
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrchestratorState> {
        // Critical sections never panic midway, so a poisoned state is intact.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn geocode_failed(address: &str, message: String) -> OrchestratorError {
    OrchestratorError::GeocodeFailed {
        address: address.to_owned(),
        message,
    }
}

const fn directions_failed(hop: usize, message: String) -> OrchestratorError {
    OrchestratorError::DirectionsFailed { hop, message }
}

/// Take the first placemark's label and coordinate.
fn first_position(
    address: &str,
    placemarks: Vec<Placemark>,
) -> Result<(Option<String>, Coordinate), OrchestratorError> {
    let placemark = placemarks
        .into_iter()
        .next()
        .ok_or_else(|| geocode_failed(address, "no matching places".to_owned()))?;
    let coordinate = placemark
        .coordinate
        .ok_or_else(|| geocode_failed(address, "first match has no location".to_owned()))?;
    Ok((placemark.name, coordinate))
}
