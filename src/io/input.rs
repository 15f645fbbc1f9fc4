//! Input shapes and validation.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Location, Problem, Stop, Vehicle};

/// Rejection of malformed input, surfaced before any model construction.
///
/// JSON shape and type errors (missing fields, non-numeric quantities)
/// are caught earlier by deserialization; these variants cover what the
/// type system cannot express.
#[derive(Debug, Error)]
pub enum InputError {
    /// The vehicle list is empty.
    #[error("input contains no vehicles")]
    NoVehicles,
    /// A stop declares a negative demand.
    #[error("stop {id}: quantity must be non-negative, got {quantity}")]
    NegativeQuantity {
        /// Offending stop id.
        id: String,
        /// Declared quantity.
        quantity: i64,
    },
    /// A vehicle (or the default) declares a negative capacity.
    #[error("vehicle {id}: capacity must be non-negative, got {capacity}")]
    NegativeCapacity {
        /// Offending vehicle id (or `"defaults"`).
        id: String,
        /// Declared capacity.
        capacity: i64,
    },
    /// Two stops share an identifier.
    #[error("duplicate stop id: {0}")]
    DuplicateStop(String),
    /// Two vehicles share an identifier.
    #[error("duplicate vehicle id: {0}")]
    DuplicateVehicle(String),
}

/// A vehicle as it appears on the wire; capacity falls back to the
/// fleet-wide default when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleInput {
    /// Vehicle identifier.
    pub id: String,
    /// Optional per-vehicle capacity override.
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// A stop as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct StopInput {
    /// Stop identifier.
    pub id: String,
    /// Stop location.
    pub location: Location,
    /// Demand quantity.
    pub quantity: i64,
}

/// Fleet-wide vehicle defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleDefaults {
    /// Capacity for vehicles without an explicit one.
    pub capacity: i64,
    /// The depot every vehicle starts and ends at.
    pub start_location: Location,
}

/// The `defaults` input section.
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// Vehicle defaults.
    pub vehicles: VehicleDefaults,
}

/// The top-level input document.
///
/// # Examples
///
/// ```
/// use route_solver::io::Input;
///
/// let input: Input = serde_json::from_str(r#"{
///     "vehicles": [{"id": "v1"}],
///     "stops": [{"id": "s1", "location": {"lat": 0.0, "lon": 1.0}, "quantity": 5}],
///     "defaults": {"vehicles": {"capacity": 10,
///                               "start_location": {"lat": 0.0, "lon": 0.0}}}
/// }"#).unwrap();
/// let problem = input.into_problem().unwrap();
/// assert_eq!(problem.num_stops(), 1);
/// assert_eq!(problem.vehicles()[0].capacity(), 10);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
    /// The fleet.
    pub vehicles: Vec<VehicleInput>,
    /// Stops to serve.
    #[serde(default)]
    pub stops: Vec<StopInput>,
    /// Fleet-wide defaults.
    pub defaults: Defaults,
}

impl Input {
    /// Validates the input and resolves it into a [`Problem`].
    ///
    /// Fails fast on an empty fleet, negative quantities or capacities,
    /// and duplicate identifiers; no partial problem is produced.
    pub fn into_problem(self) -> Result<Problem, InputError> {
        if self.vehicles.is_empty() {
            return Err(InputError::NoVehicles);
        }

        let default_capacity = self.defaults.vehicles.capacity;
        if default_capacity < 0 {
            return Err(InputError::NegativeCapacity {
                id: "defaults".to_string(),
                capacity: default_capacity,
            });
        }

        let mut vehicle_ids = HashSet::new();
        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        for v in self.vehicles {
            if !vehicle_ids.insert(v.id.clone()) {
                return Err(InputError::DuplicateVehicle(v.id));
            }
            let capacity = v.capacity.unwrap_or(default_capacity);
            if capacity < 0 {
                return Err(InputError::NegativeCapacity { id: v.id, capacity });
            }
            vehicles.push(Vehicle::new(v.id, capacity));
        }

        let mut stop_ids = HashSet::new();
        let mut stops = Vec::with_capacity(self.stops.len());
        for s in self.stops {
            if !stop_ids.insert(s.id.clone()) {
                return Err(InputError::DuplicateStop(s.id));
            }
            if s.quantity < 0 {
                return Err(InputError::NegativeQuantity {
                    id: s.id,
                    quantity: s.quantity,
                });
            }
            stops.push(Stop::new(s.id, s.location, s.quantity));
        }

        Ok(Problem::new(
            self.defaults.vehicles.start_location,
            stops,
            vehicles,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input(vehicles: &str, stops: &str) -> Input {
        let doc = format!(
            r#"{{
                "vehicles": {vehicles},
                "stops": {stops},
                "defaults": {{"vehicles": {{"capacity": 10,
                              "start_location": {{"lat": 0.0, "lon": 0.0}}}}}}
            }}"#
        );
        serde_json::from_str(&doc).expect("valid json")
    }

    #[test]
    fn test_capacity_default_and_override() {
        let input = base_input(r#"[{"id": "v1"}, {"id": "v2", "capacity": 3}]"#, "[]");
        let problem = input.into_problem().expect("valid");
        assert_eq!(problem.vehicles()[0].capacity(), 10);
        assert_eq!(problem.vehicles()[1].capacity(), 3);
    }

    #[test]
    fn test_empty_vehicles_rejected() {
        let input = base_input("[]", "[]");
        assert!(matches!(input.into_problem(), Err(InputError::NoVehicles)));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let input = base_input(
            r#"[{"id": "v1"}]"#,
            r#"[{"id": "s1", "location": {"lat": 0.0, "lon": 1.0}, "quantity": -2}]"#,
        );
        assert!(matches!(
            input.into_problem(),
            Err(InputError::NegativeQuantity { quantity: -2, .. })
        ));
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let input = base_input(r#"[{"id": "v1", "capacity": -1}]"#, "[]");
        assert!(matches!(
            input.into_problem(),
            Err(InputError::NegativeCapacity { capacity: -1, .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let input = base_input(r#"[{"id": "v1"}, {"id": "v1"}]"#, "[]");
        assert!(matches!(
            input.into_problem(),
            Err(InputError::DuplicateVehicle(id)) if id == "v1"
        ));

        let input = base_input(
            r#"[{"id": "v1"}]"#,
            r#"[{"id": "s1", "location": {"lat": 0.0, "lon": 1.0}, "quantity": 1},
                {"id": "s1", "location": {"lat": 0.0, "lon": 2.0}, "quantity": 1}]"#,
        );
        assert!(matches!(
            input.into_problem(),
            Err(InputError::DuplicateStop(id)) if id == "s1"
        ));
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let doc = r#"{"vehicles": [{"id": "v1"}]}"#;
        assert!(serde_json::from_str::<Input>(doc).is_err());
    }

    #[test]
    fn test_non_numeric_quantity_is_a_parse_error() {
        let doc = r#"{
            "vehicles": [{"id": "v1"}],
            "stops": [{"id": "s1", "location": {"lat": 0.0, "lon": 1.0},
                       "quantity": "five"}],
            "defaults": {"vehicles": {"capacity": 10,
                         "start_location": {"lat": 0.0, "lon": 0.0}}}
        }"#;
        assert!(serde_json::from_str::<Input>(doc).is_err());
    }

    #[test]
    fn test_stops_default_to_empty() {
        let doc = r#"{
            "vehicles": [{"id": "v1"}],
            "defaults": {"vehicles": {"capacity": 10,
                         "start_location": {"lat": 0.0, "lon": 0.0}}}
        }"#;
        let input: Input = serde_json::from_str(doc).expect("valid");
        let problem = input.into_problem().expect("valid");
        assert_eq!(problem.num_stops(), 0);
    }
}
