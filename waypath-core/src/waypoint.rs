use std::fmt;

use crate::Coordinate;

/// Opaque identifier assigned to a [`Waypoint`] when it is created.
///
/// Identifiers are allocated from a monotonic counter and are never reused
/// by the same orchestrator, even after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointId(u64);

impl WaypointId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wp-{}", self.0)
    }
}

/// A stop on the planned journey.
///
/// Waypoints are immutable once created; their position in the orchestrator's
/// list is their visiting order.
///
/// # Examples
/// ```
/// use waypath_core::{Coordinate, Waypoint, WaypointId};
///
/// let coordinate = Coordinate::new(1.0, 1.0).expect("valid coordinate");
/// let waypoint = Waypoint::new(WaypointId::new(7), Some("Depot".into()), coordinate);
///
/// assert_eq!(waypoint.id.get(), 7);
/// assert_eq!(waypoint.label.as_deref(), Some("Depot"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Unique identifier.
    pub id: WaypointId,
    /// Optional display name, e.g. the geocoder's placemark name.
    pub label: Option<String>,
    /// Position of the waypoint.
    pub coordinate: Coordinate,
}

impl Waypoint {
    /// Construct a waypoint.
    #[must_use]
    pub const fn new(id: WaypointId, label: Option<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            label,
            coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_is_prefixed() {
        assert_eq!(WaypointId::new(3).to_string(), "wp-3");
    }
}
