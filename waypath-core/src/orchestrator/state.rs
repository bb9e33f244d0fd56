//! Waypoint and route bookkeeping owned by the orchestrator.
//!
//! Every method runs inside one critical section of the orchestrator's
//! mutex, so each leaves the state consistent on return.

use std::collections::BTreeMap;

use crate::{Coordinate, Hop, ResolvedRoute, Waypoint, WaypointId, hops_for};

/// Generation-tagged waypoint list and per-hop routes.
#[derive(Debug, Default)]
pub(crate) struct OrchestratorState {
    waypoints: Vec<Waypoint>,
    resolved: BTreeMap<usize, ResolvedRoute>,
    generation: u64,
    next_id: u64,
}

/// Result of offering a hop result to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Apply {
    Applied,
    Stale,
}

impl OrchestratorState {
    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Append a waypoint with a freshly allocated identifier.
    pub(crate) fn push_waypoint(
        &mut self,
        label: Option<String>,
        coordinate: Coordinate,
    ) -> Waypoint {
        let waypoint = Waypoint::new(WaypointId::new(self.next_id), label, coordinate);
        self.next_id = self.next_id.saturating_add(1);
        self.waypoints.push(waypoint.clone());
        waypoint
    }

    /// Current hops together with the generation they belong to.
    pub(crate) fn hop_snapshot(&self) -> (u64, Vec<Hop>) {
        (self.generation, hops_for(&self.waypoints))
    }

    /// Store `route` for its hop unless a reset happened after `generation`.
    pub(crate) fn apply(&mut self, generation: u64, route: ResolvedRoute) -> Apply {
        if generation != self.generation {
            return Apply::Stale;
        }
        let index = route.hop.index;
        debug_assert!(
            index + 1 < self.waypoints.len(),
            "hop {index} outside waypoint list of {}",
            self.waypoints.len()
        );
        self.resolved.insert(index, route);
        Apply::Applied
    }

    /// Resolved routes ordered by hop index.
    pub(crate) fn resolved_routes(&self) -> Vec<ResolvedRoute> {
        self.resolved.values().cloned().collect()
    }

    /// Drop all waypoints and routes and start a new generation.
    pub(crate) fn reset(&mut self) {
        self.waypoints.clear();
        self.resolved.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CandidateRoute;
    use rstest::{fixture, rstest};

    fn coordinate(value: f64) -> Coordinate {
        Coordinate::new(value, value).expect("valid coordinate")
    }

    fn resolved(hop: Hop, distance: f64) -> ResolvedRoute {
        ResolvedRoute {
            hop,
            route: CandidateRoute::new(Vec::new(), distance).expect("valid route"),
        }
    }

    #[fixture]
    fn populated() -> OrchestratorState {
        let mut state = OrchestratorState::default();
        state.push_waypoint(Some("A".into()), coordinate(1.0));
        state.push_waypoint(Some("B".into()), coordinate(2.0));
        state.push_waypoint(None, coordinate(3.0));
        state
    }

    #[rstest]
    fn ids_are_unique_across_resets(mut populated: OrchestratorState) {
        let before: Vec<_> = populated.waypoints().iter().map(|w| w.id).collect();
        populated.reset();
        let after = populated.push_waypoint(None, coordinate(4.0));
        assert!(!before.contains(&after.id));
    }

    #[rstest]
    fn applies_current_generation(mut populated: OrchestratorState) {
        let (generation, hops) = populated.hop_snapshot();
        assert_eq!(hops.len(), 2);
        let hop = hops[1].clone();
        assert_eq!(
            populated.apply(generation, resolved(hop, 10.0)),
            Apply::Applied
        );
        let routes = populated.resolved_routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hop.index, 1);
    }

    #[rstest]
    fn rejects_stale_generation(mut populated: OrchestratorState) {
        let (generation, hops) = populated.hop_snapshot();
        populated.reset();
        populated.push_waypoint(None, coordinate(1.0));
        populated.push_waypoint(None, coordinate(2.0));
        let hop = hops[0].clone();
        assert_eq!(populated.apply(generation, resolved(hop, 1.0)), Apply::Stale);
        assert!(populated.resolved_routes().is_empty());
    }

    #[rstest]
    fn reset_clears_everything(mut populated: OrchestratorState) {
        let (generation, hops) = populated.hop_snapshot();
        populated.apply(generation, resolved(hops[0].clone(), 5.0));
        populated.reset();
        assert!(populated.waypoints().is_empty());
        assert!(populated.resolved_routes().is_empty());
        assert_eq!(populated.generation(), generation + 1);
    }

    #[rstest]
    fn routes_are_ordered_by_hop(mut populated: OrchestratorState) {
        let (generation, hops) = populated.hop_snapshot();
        populated.apply(generation, resolved(hops[1].clone(), 2.0));
        populated.apply(generation, resolved(hops[0].clone(), 1.0));
        let indices: Vec<_> = populated
            .resolved_routes()
            .iter()
            .map(|r| r.hop.index)
            .collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
