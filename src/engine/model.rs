//! Routing model: registered callbacks, arc costs, and dimensions.

use crate::distance::DistanceMatrix;
use crate::models::{Stop, Vehicle};

use super::IndexManager;

/// Cost of traveling between two model indices.
pub type TransitCallback = Box<dyn Fn(usize, usize) -> i64 + Send + Sync>;

/// Per-index contribution to a cumulative dimension.
pub type UnaryTransitCallback = Box<dyn Fn(usize) -> i64 + Send + Sync>;

/// A cumulative routing constraint over all vehicles.
///
/// The cumulative value starts at zero at each vehicle's start sentinel and
/// accumulates the demand callback's value at every visited index, with no
/// slack. A route is feasible while the accumulated magnitude stays within
/// the vehicle's capacity, so the capacity bound holds for either demand
/// sign convention.
struct Dimension {
    name: String,
    demand_callback: usize,
    slack_max: i64,
    vehicle_capacities: Vec<i64>,
}

/// The engine-facing routing model.
///
/// Owns the [`IndexManager`], the registered transit and demand callbacks,
/// the arc-cost evaluator, and the declared dimensions. Domain identifiers
/// never appear here; everything is expressed in model indices.
pub struct RoutingModel {
    manager: IndexManager,
    transit_callbacks: Vec<TransitCallback>,
    unary_callbacks: Vec<UnaryTransitCallback>,
    arc_cost_evaluator: Option<usize>,
    dimensions: Vec<Dimension>,
}

impl RoutingModel {
    /// Creates an empty model over the given index space.
    pub fn new(manager: IndexManager) -> Self {
        Self {
            manager,
            transit_callbacks: Vec::new(),
            unary_callbacks: Vec::new(),
            arc_cost_evaluator: None,
            dimensions: Vec::new(),
        }
    }

    /// The model's index manager.
    pub fn manager(&self) -> &IndexManager {
        &self.manager
    }

    /// Registers a transit callback and returns its id.
    pub fn register_transit_callback(&mut self, callback: TransitCallback) -> usize {
        self.transit_callbacks.push(callback);
        self.transit_callbacks.len() - 1
    }

    /// Registers a unary transit callback and returns its id.
    pub fn register_unary_transit_callback(&mut self, callback: UnaryTransitCallback) -> usize {
        self.unary_callbacks.push(callback);
        self.unary_callbacks.len() - 1
    }

    /// Uses the given transit callback as the arc-cost evaluator for every
    /// vehicle.
    pub fn set_arc_cost_evaluator_of_all_vehicles(&mut self, callback_id: usize) {
        self.arc_cost_evaluator = Some(callback_id);
    }

    /// Declares a cumulative dimension bounded per vehicle.
    ///
    /// `slack_max` is kept for contract parity with the search engine's
    /// dimension API; the capacity dimension is declared with zero slack.
    pub fn add_dimension_with_vehicle_capacity(
        &mut self,
        demand_callback_id: usize,
        slack_max: i64,
        vehicle_capacities: Vec<i64>,
        name: impl Into<String>,
    ) {
        self.dimensions.push(Dimension {
            name: name.into(),
            demand_callback: demand_callback_id,
            slack_max,
            vehicle_capacities,
        });
    }

    /// Arc cost between two model indices for the given vehicle.
    ///
    /// The contract allows per-vehicle evaluators; in this model every
    /// vehicle shares the single registered evaluator. Zero when no
    /// evaluator has been set.
    pub fn arc_cost_for_vehicle(&self, from: usize, to: usize, _vehicle: usize) -> i64 {
        match self.arc_cost_evaluator {
            Some(id) => self.transit_callbacks[id](from, to),
            None => 0,
        }
    }

    /// Evaluates the demand callback of the dimension at `dim` for `index`.
    fn demand(&self, dim: &Dimension, index: usize) -> i64 {
        self.unary_callbacks[dim.demand_callback](index)
    }

    /// Checks every declared dimension along a candidate route.
    ///
    /// `stop_indices` are the visited stop model indices in order,
    /// sentinels excluded. The cumulative value starts at zero and must
    /// keep its magnitude within the vehicle's bound after every visit.
    pub fn route_is_feasible(&self, vehicle: usize, stop_indices: &[usize]) -> bool {
        for dim in &self.dimensions {
            // Zero slack in the capacity dimension makes the bound exact.
            let bound = dim.vehicle_capacities[vehicle] + dim.slack_max;
            let mut cumul: i64 = 0;
            for &index in stop_indices {
                cumul += self.demand(dim, index);
                if cumul.abs() > bound {
                    return false;
                }
            }
        }
        true
    }

    /// Names of the declared dimensions, in declaration order.
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name.as_str()).collect()
    }
}

/// Builds the capacitated routing model for a distance matrix and fleet.
///
/// Translates the domain into engine primitives exactly once per solve:
///
/// - an [`IndexManager`] over `matrix.size()` nodes, the fleet size, and
///   depot node 0;
/// - a transit callback resolving model indices to node ids and returning
///   the matching matrix entry, registered as the arc-cost evaluator for
///   all vehicles;
/// - a demand callback contributing 0 for the depot and the negative of
///   the stop's quantity otherwise;
/// - one zero-slack capacity dimension with the per-vehicle capacities.
///
/// A stop whose quantity exceeds every vehicle's capacity makes the model
/// infeasible by construction; that surfaces later as a solve status,
/// never as an error here.
pub fn build_routing_model(
    matrix: &DistanceMatrix,
    stops: &[Stop],
    vehicles: &[Vehicle],
) -> RoutingModel {
    let manager = IndexManager::new(matrix.size(), vehicles.len(), 0);
    let mut model = RoutingModel::new(manager.clone());

    let transit_matrix = matrix.clone();
    let transit_manager = manager.clone();
    let transit_id = model.register_transit_callback(Box::new(move |from, to| {
        let from_node = transit_manager.index_to_node(from);
        let to_node = transit_manager.index_to_node(to);
        transit_matrix.get(from_node, to_node)
    }));
    model.set_arc_cost_evaluator_of_all_vehicles(transit_id);

    let quantities: Vec<i64> = stops.iter().map(|s| s.quantity()).collect();
    let demand_manager = manager.clone();
    let demand_id = model.register_unary_transit_callback(Box::new(move |index| {
        let node = demand_manager.index_to_node(index);
        if node == demand_manager.depot() {
            0
        } else {
            -quantities[node - 1]
        }
    }));

    let capacities: Vec<i64> = vehicles.iter().map(|v| v.capacity()).collect();
    model.add_dimension_with_vehicle_capacity(demand_id, 0, capacities, "Capacity");

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn sample_model() -> RoutingModel {
        let depot = Location::new(0.0, 0.0);
        let stops = vec![
            Stop::new("a", Location::new(0.0, 1.0), 5),
            Stop::new("b", Location::new(0.0, 2.0), 5),
        ];
        let vehicles = vec![Vehicle::new("v1", 10), Vehicle::new("v2", 4)];
        let matrix = DistanceMatrix::from_problem(depot, &stops);
        build_routing_model(&matrix, &stops, &vehicles)
    }

    #[test]
    fn test_transit_resolves_through_node_ids() {
        let model = sample_model();
        // Stop index 0 is node 1, stop index 1 is node 2.
        assert_eq!(model.arc_cost_for_vehicle(0, 1, 0), 111);
        // Start sentinel resolves to the depot node.
        let start = model.manager().start(0);
        assert_eq!(model.arc_cost_for_vehicle(start, 0, 0), 111);
        assert_eq!(model.arc_cost_for_vehicle(start, 1, 0), 222);
    }

    #[test]
    fn test_arc_cost_uniform_across_vehicles() {
        let model = sample_model();
        assert_eq!(
            model.arc_cost_for_vehicle(0, 1, 0),
            model.arc_cost_for_vehicle(0, 1, 1)
        );
    }

    #[test]
    fn test_depot_contributes_zero_demand() {
        let model = sample_model();
        let dim = &model.dimensions[0];
        let start = model.manager().start(1);
        assert_eq!(model.demand(dim, start), 0);
        // Stops contribute the negative of their quantity.
        assert_eq!(model.demand(dim, 0), -5);
        assert_eq!(model.demand(dim, 1), -5);
    }

    #[test]
    fn test_capacity_dimension_bounds() {
        let model = sample_model();
        // Vehicle 0 (capacity 10) can take both stops.
        assert!(model.route_is_feasible(0, &[0, 1]));
        // Vehicle 1 (capacity 4) can take neither.
        assert!(!model.route_is_feasible(1, &[0]));
        assert!(!model.route_is_feasible(1, &[1]));
        // Empty routes are always feasible.
        assert!(model.route_is_feasible(1, &[]));
    }

    #[test]
    fn test_dimension_declared() {
        let model = sample_model();
        assert_eq!(model.dimension_names(), vec!["Capacity"]);
        assert_eq!(model.dimensions[0].slack_max, 0);
    }

    #[test]
    fn test_no_evaluator_means_zero_cost() {
        let model = RoutingModel::new(IndexManager::new(1, 1, 0));
        assert_eq!(model.arc_cost_for_vehicle(0, 1, 0), 0);
    }
}
