//! Deterministic provider doubles used by unit, behaviour and doc tests.
//!
//! [`StubGeocodingProvider`] and [`StubDirectionsProvider`] answer from
//! pre-configured tables without network access. [`Gated`] wraps either of
//! them so a test can hold calls in flight and interleave a reset.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{
    CandidateRoute, Coordinate, DirectionsProvider, DirectionsRequest, GeocodingProvider,
    Placemark, ProviderError,
};

/// Geocoder answering from an address table.
///
/// Unknown addresses yield an empty placemark list.
#[derive(Debug, Default)]
pub struct StubGeocodingProvider {
    answers: HashMap<String, Result<Vec<Placemark>, ProviderError>>,
    calls: AtomicUsize,
}

impl StubGeocodingProvider {
    /// Create a geocoder that knows no addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `address` to a single placemark named after the address.
    #[must_use]
    pub fn with_address(self, address: &str, coordinate: Coordinate) -> Self {
        self.with_placemarks(address, vec![Placemark::at(Some(address.to_owned()), coordinate)])
    }

    /// Resolve `address` to the given placemarks.
    #[must_use]
    pub fn with_placemarks(mut self, address: &str, placemarks: Vec<Placemark>) -> Self {
        self.answers.insert(address.to_owned(), Ok(placemarks));
        self
    }

    /// Fail lookups of `address` with `error`.
    #[must_use]
    pub fn with_error(mut self, address: &str, error: ProviderError) -> Self {
        self.answers.insert(address.to_owned(), Err(error));
        self
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for StubGeocodingProvider {
    async fn geocode(&self, address: &str) -> Result<Vec<Placemark>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(address)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Canned directions response.
#[derive(Debug, Clone, PartialEq)]
pub enum StubRoutes {
    /// Return these candidates.
    Candidates(Vec<CandidateRoute>),
    /// Fail with this error.
    Error(ProviderError),
}

impl StubRoutes {
    /// Straight-line candidates with the given distances.
    ///
    /// # Panics
    ///
    /// Panics if a distance is negative or not finite.
    #[must_use]
    pub fn distances(distances: &[f64]) -> Self {
        Self::Candidates(
            distances
                .iter()
                .map(|&distance| {
                    CandidateRoute::new(Vec::new(), distance)
                        .unwrap_or_else(|err| panic!("invalid stub distance: {err}"))
                })
                .collect(),
        )
    }
}

/// Directions provider answering by origin coordinate.
///
/// Responses can be changed while the provider is shared through an `Arc`,
/// which lets tests make a hop fail on a later recomputation.
#[derive(Debug)]
pub struct StubDirectionsProvider {
    fallback: Mutex<StubRoutes>,
    by_origin: Mutex<Vec<(Coordinate, StubRoutes)>>,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl StubDirectionsProvider {
    /// Answer every request with `routes`.
    #[must_use]
    pub fn new(routes: StubRoutes) -> Self {
        Self {
            fallback: Mutex::new(routes),
            by_origin: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with straight-line candidates of `distances`.
    #[must_use]
    pub fn with_distances(distances: &[f64]) -> Self {
        Self::new(StubRoutes::distances(distances))
    }

    /// Answer requests starting at `origin` with `routes`, replacing any
    /// earlier rule for the same origin.
    pub fn respond_from(&self, origin: Coordinate, routes: StubRoutes) {
        let mut rules = self.by_origin.lock().unwrap_or_else(PoisonError::into_inner);
        rules.retain(|(existing, _)| *existing != origin);
        rules.push((origin, routes));
    }

    /// Replace the answer for origins without a specific rule.
    pub fn respond_by_default(&self, routes: StubRoutes) {
        *self.fallback.lock().unwrap_or_else(PoisonError::into_inner) = routes;
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer_for(&self, origin: Coordinate) -> StubRoutes {
        let rules = self.by_origin.lock().unwrap_or_else(PoisonError::into_inner);
        rules
            .iter()
            .find(|(candidate, _)| *candidate == origin)
            .map(|(_, routes)| routes.clone())
            .unwrap_or_else(|| {
                self.fallback
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
    }
}

#[async_trait]
impl DirectionsProvider for StubDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*request);
        match self.answer_for(request.origin) {
            StubRoutes::Candidates(candidates) => Ok(candidates),
            StubRoutes::Error(error) => Err(error),
        }
    }
}

/// Barrier that holds provider calls until a test opens it.
#[derive(Debug)]
pub struct Gate {
    entered: watch::Sender<usize>,
    open: watch::Sender<bool>,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            entered: watch::Sender::new(0),
            open: watch::Sender::new(false),
        }
    }
}

impl Gate {
    /// Create a closed gate.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until at least `count` calls are held at the gate.
    pub async fn entered(&self, count: usize) {
        let mut entered = self.entered.subscribe();
        if entered.wait_for(|n| *n >= count).await.is_err() {
            log::debug!("gate dropped while waiting for {count} calls");
        }
    }

    /// Let every held and future call through.
    pub fn open(&self) {
        self.open.send_replace(true);
    }

    async fn pass(&self) {
        let mut open = self.open.subscribe();
        self.entered.send_modify(|n| *n += 1);
        if open.wait_for(|is_open| *is_open).await.is_err() {
            log::debug!("gate dropped while a call was held");
        }
    }
}

/// Provider wrapper that waits at a [`Gate`] before delegating.
#[derive(Debug)]
pub struct Gated<P> {
    inner: P,
    gate: Arc<Gate>,
}

impl<P> Gated<P> {
    /// Wrap `inner` so each call waits at `gate`.
    pub const fn new(inner: P, gate: Arc<Gate>) -> Self {
        Self { inner, gate }
    }
}

#[async_trait]
impl<P> GeocodingProvider for Gated<P>
where
    P: GeocodingProvider,
{
    async fn geocode(&self, address: &str) -> Result<Vec<Placemark>, ProviderError> {
        self.gate.pass().await;
        self.inner.geocode(address).await
    }
}

#[async_trait]
impl<P> DirectionsProvider for Gated<P>
where
    P: DirectionsProvider,
{
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        self.gate.pass().await;
        self.inner.route(request).await
    }
}

/// Coordinate helper for tests: `(value, value)`.
///
/// # Panics
///
/// Panics if `value` is outside `[-90, 90]`.
#[must_use]
pub fn diagonal(value: f64) -> Coordinate {
    Coordinate::new(value, value).unwrap_or_else(|err| panic!("invalid test coordinate: {err}"))
}
