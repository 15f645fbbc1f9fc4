//! Stop type: a delivery point with a demand quantity.

use super::Location;

/// A stop to be visited by exactly one vehicle.
///
/// # Examples
///
/// ```
/// use route_solver::models::{Location, Stop};
///
/// let s = Stop::new("s1", Location::new(0.0, 1.0), 5);
/// assert_eq!(s.id(), "s1");
/// assert_eq!(s.quantity(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Stop {
    id: String,
    location: Location,
    quantity: i64,
}

impl Stop {
    /// Creates a stop with the given identifier, location, and demand.
    pub fn new(id: impl Into<String>, location: Location, quantity: i64) -> Self {
        Self {
            id: id.into(),
            location,
            quantity,
        }
    }

    /// Stop identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stop location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Demand quantity consumed from the vehicle's capacity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}
