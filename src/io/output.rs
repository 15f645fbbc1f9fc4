//! Output shapes and result formatting.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::models::{Location, Problem, Solution, SolverStatus};

/// Version block identifying the producer.
#[derive(Debug, Serialize)]
pub struct Version {
    /// Solver version.
    pub solver: String,
}

/// Echo of the options the solve ran with.
#[derive(Debug, Serialize)]
pub struct OptionsOut {
    /// Wall-clock budget in seconds.
    pub duration: u64,
}

/// A stop (or depot sentinel) as it appears in a route leg.
#[derive(Debug, Serialize)]
pub struct StopOut {
    /// Stop identifier, or the `-start` / `-end` sentinel id.
    pub id: String,
    /// Stop location.
    pub location: Location,
    /// Demand quantity; absent for sentinels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// One leg of a vehicle's route.
#[derive(Debug, Serialize)]
pub struct LegOut {
    /// The stop reached on this leg.
    pub stop: StopOut,
    /// Distance traveled to reach it.
    pub travel_duration: i64,
    /// This vehicle's running distance so far.
    pub cumulative_travel_duration: i64,
}

/// A vehicle with its ordered route.
#[derive(Debug, Serialize)]
pub struct VehicleOut {
    /// Vehicle identifier.
    pub id: String,
    /// Ordered legs, sentinels included.
    pub route: Vec<LegOut>,
    /// This vehicle's own leg-distance sum.
    pub route_travel_distance: i64,
}

/// One solution: routes plus the stops nothing serves.
#[derive(Debug, Serialize)]
pub struct SolutionOut {
    /// Identifiers of stops no vehicle serves.
    pub unplanned: Vec<String>,
    /// Routes in vehicle input order.
    pub vehicles: Vec<VehicleOut>,
}

/// Result statistics: objective, timing, and terminal status.
#[derive(Debug, Serialize)]
pub struct ResultStats {
    /// Solve duration in seconds.
    pub duration: f64,
    /// Objective value (total travel distance).
    pub value: i64,
    /// Terminal solver status (`optimal`, `suboptimal`, `infeasible`,
    /// `unbounded`, or `unknown`).
    pub status: String,
}

/// Run statistics.
#[derive(Debug, Serialize)]
pub struct RunStats {
    /// End-to-end run duration in seconds.
    pub duration: f64,
}

/// The statistics block.
#[derive(Debug, Serialize)]
pub struct Statistics {
    /// Result statistics.
    pub result: ResultStats,
    /// Run statistics.
    pub run: RunStats,
    /// Statistics schema version.
    pub schema: String,
}

/// The top-level output document.
#[derive(Debug, Serialize)]
pub struct Output {
    /// Producer version block.
    pub version: Version,
    /// Echoed options.
    pub options: OptionsOut,
    /// Solutions (a single entry for a batch solve).
    pub solutions: Vec<SolutionOut>,
    /// Statistics block.
    pub statistics: Statistics,
}

/// Assembles the final output document from a solution and its status.
///
/// Pure transformation: no side effects beyond producing the value that
/// is handed to serialization. Route legs embed the full stop (with its
/// quantity); sentinel legs carry only the id and depot location.
pub fn format_output(
    problem: &Problem,
    solution: &Solution,
    status: SolverStatus,
    elapsed: Duration,
    max_duration_secs: u64,
) -> Output {
    let quantities: HashMap<&str, i64> = problem
        .stops()
        .iter()
        .map(|s| (s.id(), s.quantity()))
        .collect();

    let vehicles = solution
        .routes()
        .iter()
        .map(|route| VehicleOut {
            id: route.vehicle_id().to_string(),
            route: route
                .legs()
                .iter()
                .map(|leg| LegOut {
                    stop: StopOut {
                        id: leg.stop_id.clone(),
                        location: leg.location,
                        quantity: quantities.get(leg.stop_id.as_str()).copied(),
                    },
                    travel_duration: leg.distance,
                    cumulative_travel_duration: leg.cumulative_distance,
                })
                .collect(),
            route_travel_distance: route.total_distance(),
        })
        .collect();

    let duration = elapsed.as_secs_f64();
    Output {
        version: Version {
            solver: format!("v{}", env!("CARGO_PKG_VERSION")),
        },
        options: OptionsOut {
            duration: max_duration_secs,
        },
        solutions: vec![SolutionOut {
            unplanned: solution.unplanned().to_vec(),
            vehicles,
        }],
        statistics: Statistics {
            result: ResultStats {
                duration,
                value: solution.total_distance(),
                status: status.as_str().to_string(),
            },
            run: RunStats { duration },
            schema: "v1".to_string(),
        },
    }
}
