//! Route and route-leg types.

use super::Location;

/// A single leg of a vehicle's route: the stop reached (or a synthetic
/// start/end sentinel carrying the depot location), the distance traveled
/// to reach it, and the cumulative distance for that vehicle so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Stop identifier, or `"<vehicleId>-start"` / `"<vehicleId>-end"` for
    /// the depot sentinels.
    pub stop_id: String,
    /// Location of this leg's stop.
    pub location: Location,
    /// Distance traveled to reach this leg from the previous one.
    pub distance: i64,
    /// Running distance for this vehicle up to and including this leg.
    pub cumulative_distance: i64,
}

/// An ordered sequence of legs assigned to a single vehicle.
///
/// Always begins with the vehicle's start sentinel and ends with its end
/// sentinel; stops visited appear in between.
///
/// # Examples
///
/// ```
/// use route_solver::models::{Location, Route, RouteLeg};
///
/// let mut route = Route::new("v1");
/// route.push_leg(RouteLeg {
///     stop_id: "v1-start".into(),
///     location: Location::new(0.0, 0.0),
///     distance: 0,
///     cumulative_distance: 0,
/// });
/// assert_eq!(route.vehicle_id(), "v1");
/// assert_eq!(route.num_stops(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle_id: String,
    legs: Vec<RouteLeg>,
    total_distance: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            legs: Vec::new(),
            total_distance: 0,
        }
    }

    /// Appends a leg; the route total tracks the last leg's cumulative.
    pub fn push_leg(&mut self, leg: RouteLeg) {
        self.total_distance = leg.cumulative_distance;
        self.legs.push(leg);
    }

    /// The vehicle assigned to this route.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// The ordered legs, sentinels included.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Number of stops visited (sentinels excluded).
    pub fn num_stops(&self) -> usize {
        self.legs.len().saturating_sub(2)
    }

    /// This vehicle's own leg-distance sum.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Stop identifiers in visit order (sentinels excluded).
    pub fn stop_ids(&self) -> Vec<&str> {
        let n = self.legs.len();
        if n < 2 {
            return Vec::new();
        }
        self.legs[1..n - 1]
            .iter()
            .map(|leg| leg.stop_id.as_str())
            .collect()
    }
}
