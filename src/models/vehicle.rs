//! Vehicle type with load capacity.

/// A vehicle that starts and ends its route at the shared depot.
///
/// Capacity is resolved at input time: a vehicle without an explicit
/// capacity takes the fleet-wide default.
///
/// # Examples
///
/// ```
/// use route_solver::models::Vehicle;
///
/// let v = Vehicle::new("v1", 200);
/// assert_eq!(v.id(), "v1");
/// assert_eq!(v.capacity(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: String,
    capacity: i64,
}

impl Vehicle {
    /// Creates a vehicle with the given identifier and capacity.
    pub fn new(id: impl Into<String>, capacity: i64) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    /// Vehicle identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}
