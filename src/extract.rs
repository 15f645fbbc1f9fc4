//! Solution extraction: per-vehicle route reconstruction.
//!
//! Walks the assignment's next-index relation for every vehicle, from its
//! start sentinel to its end sentinel, computing each leg's distance under
//! that vehicle's arc-cost evaluator and a per-vehicle cumulative. Nodes
//! map back to domain stops through the model's index manager; synthetic
//! sentinel ids never collide with stop ids.
//!
//! The reported `total_distance` of each route is that vehicle's own leg
//! sum (not a fleet-wide running total); the fleet-wide sum is carried
//! separately as the objective value.

use crate::engine::{Assignment, RoutingModel};
use crate::models::{Problem, Route, RouteLeg, Solution};

/// Reconstructs ordered per-vehicle routes from a solved assignment.
///
/// Every vehicle yields a route bracketed by its `"<id>-start"` and
/// `"<id>-end"` sentinels carrying the depot location. Stops missing from
/// every route are collected into the solution's unplanned list, so each
/// input stop appears in exactly one route or in that list.
pub fn extract_solution(
    problem: &Problem,
    model: &RoutingModel,
    assignment: &Assignment,
) -> Solution {
    let manager = model.manager();
    let mut solution = Solution::new();

    for (v, vehicle) in problem.vehicles().iter().enumerate() {
        let mut route = Route::new(vehicle.id());
        let mut cumulative = 0;

        route.push_leg(RouteLeg {
            stop_id: format!("{}-start", vehicle.id()),
            location: problem.depot(),
            distance: 0,
            cumulative_distance: 0,
        });

        let end = manager.end(v);
        let mut index = manager.start(v);
        while index != end {
            let previous = index;
            index = assignment.next(previous);
            let distance = model.arc_cost_for_vehicle(previous, index, v);
            cumulative += distance;

            let node = manager.index_to_node(index);
            let (stop_id, location) = if node == manager.depot() {
                (format!("{}-end", vehicle.id()), problem.depot())
            } else {
                let stop = &problem.stops()[node - 1];
                (stop.id().to_string(), stop.location())
            };

            route.push_leg(RouteLeg {
                stop_id,
                location,
                distance,
                cumulative_distance: cumulative,
            });
        }

        solution.add_route(route);
    }

    // Unplanned is the set difference between input stops and routed
    // stops; it is always populated, never silently left empty.
    for (i, stop) in problem.stops().iter().enumerate() {
        if !assignment.is_performed(i) {
            solution.add_unplanned(stop.id());
        }
    }

    solution
}
