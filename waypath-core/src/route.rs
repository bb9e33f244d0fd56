//! Routes between consecutive waypoints.
//!
//! A [`Hop`] pairs two adjacent waypoints. Directions providers return a set
//! of [`CandidateRoute`]s per hop and [`select_shortest`] picks the one the
//! orchestrator keeps as a [`ResolvedRoute`].

use geo::LineString;
use thiserror::Error;

use crate::{Coordinate, Waypoint};

/// One route option returned by a directions provider.
///
/// # Examples
/// ```
/// use waypath_core::{CandidateRoute, Coordinate};
///
/// # fn main() -> Result<(), waypath_core::RouteError> {
/// let start = Coordinate::new(0.0, 0.0).expect("valid coordinate");
/// let end = Coordinate::new(0.0, 0.01).expect("valid coordinate");
/// let route = CandidateRoute::new(vec![start, end], 1_113.2)?;
/// assert_eq!(route.polyline.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRoute {
    /// Ordered path geometry.
    pub polyline: Vec<Coordinate>,
    /// Length of the route in metres.
    pub distance_meters: f64,
}

/// Errors returned by [`CandidateRoute::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RouteError {
    /// Distance was negative, NaN or infinite.
    #[error("route distance {0} must be finite and non-negative")]
    InvalidDistance(f64),
}

impl CandidateRoute {
    /// Validates and constructs a [`CandidateRoute`].
    pub fn new(polyline: Vec<Coordinate>, distance_meters: f64) -> Result<Self, RouteError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(RouteError::InvalidDistance(distance_meters));
        }
        Ok(Self {
            polyline,
            distance_meters,
        })
    }

    /// Return the polyline as a `geo` line string for rendering or analysis.
    #[must_use]
    pub fn line_string(&self) -> LineString<f64> {
        self.polyline.iter().copied().map(geo::Coord::from).collect()
    }
}

/// Pick the candidate with the strictly smallest distance.
///
/// The scan runs left to right and only replaces the current best when a
/// later candidate is strictly shorter, so the first of several equal
/// minima wins. Returns `None` for an empty slice.
///
/// # Examples
/// ```
/// use waypath_core::{CandidateRoute, select_shortest};
///
/// let candidates = [120.5, 98.2, 150.0]
///     .into_iter()
///     .map(|d| CandidateRoute::new(Vec::new(), d).expect("valid distance"))
///     .collect::<Vec<_>>();
/// let best = select_shortest(&candidates).expect("non-empty");
/// assert_eq!(best.distance_meters, 98.2);
/// ```
#[must_use]
pub fn select_shortest(candidates: &[CandidateRoute]) -> Option<&CandidateRoute> {
    let mut iter = candidates.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, candidate| {
        if candidate.distance_meters < best.distance_meters {
            candidate
        } else {
            best
        }
    }))
}

/// An ordered pair of consecutive waypoints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hop {
    /// Position of the hop; equals the origin's position in the waypoint list.
    pub index: usize,
    /// Where the hop starts.
    pub origin: Waypoint,
    /// Where the hop ends.
    pub destination: Waypoint,
}

/// Derive one [`Hop`] per adjacent pair of `waypoints`.
///
/// `n` waypoints yield `n - 1` hops; fewer than two yield none.
#[must_use]
pub fn hops_for(waypoints: &[Waypoint]) -> Vec<Hop> {
    waypoints
        .windows(2)
        .enumerate()
        .filter_map(|(index, pair)| match pair {
            [origin, destination] => Some(Hop {
                index,
                origin: origin.clone(),
                destination: destination.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// The route kept for a hop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRoute {
    /// The hop this route serves.
    pub hop: Hop,
    /// The shortest candidate offered for the hop.
    pub route: CandidateRoute,
}

impl ResolvedRoute {
    /// Distance of the chosen route in metres.
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.route.distance_meters
    }
}
