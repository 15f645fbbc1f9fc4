//! Validated routing problem instance.

use super::{Location, Stop, Vehicle};

/// A validated CVRP instance: one depot shared by all vehicles, an ordered
/// list of stops, and a non-empty fleet.
///
/// Read-only during solving; constructed once per invocation from the
/// parsed input.
///
/// # Examples
///
/// ```
/// use route_solver::models::{Location, Problem, Stop, Vehicle};
///
/// let problem = Problem::new(
///     Location::new(0.0, 0.0),
///     vec![Stop::new("s1", Location::new(0.0, 1.0), 5)],
///     vec![Vehicle::new("v1", 10)],
/// );
/// assert_eq!(problem.num_stops(), 1);
/// assert_eq!(problem.num_vehicles(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    depot: Location,
    stops: Vec<Stop>,
    vehicles: Vec<Vehicle>,
}

impl Problem {
    /// Creates a problem instance.
    pub fn new(depot: Location, stops: Vec<Stop>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            depot,
            stops,
            vehicles,
        }
    }

    /// The common start/end location for every vehicle.
    pub fn depot(&self) -> Location {
        self.depot
    }

    /// Stops in input order. Node id k (1-based) corresponds to `stops()[k-1]`.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The available vehicles.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of stops.
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_accessors() {
        let p = Problem::new(
            Location::new(1.0, 2.0),
            vec![
                Stop::new("a", Location::new(0.0, 1.0), 5),
                Stop::new("b", Location::new(0.0, 2.0), 3),
            ],
            vec![Vehicle::new("v", 10)],
        );
        assert_eq!(p.depot(), Location::new(1.0, 2.0));
        assert_eq!(p.num_stops(), 2);
        assert_eq!(p.num_vehicles(), 1);
        assert_eq!(p.stops()[1].id(), "b");
        assert_eq!(p.vehicles()[0].capacity(), 10);
    }
}
