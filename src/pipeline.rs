//! End-to-end solve pipeline.
//!
//! One stateless batch computation per invocation: build the distance
//! matrix, translate the domain into the routing model, run the search
//! synchronously until it converges or the time budget expires, extract
//! the per-vehicle routes, and format the output document. Nothing
//! persists between invocations.

use std::time::Instant;

use log::info;

use crate::distance::DistanceMatrix;
use crate::engine::{self, build_routing_model, SearchParameters, SolveStatus};
use crate::extract::extract_solution;
use crate::io::{format_output, Output};
use crate::models::{Problem, SolverStatus};

/// Maps the engine's terminal status into the output vocabulary.
fn map_status(status: SolveStatus) -> SolverStatus {
    match status {
        SolveStatus::Optimal => SolverStatus::Optimal,
        SolveStatus::Feasible => SolverStatus::Suboptimal,
        SolveStatus::Infeasible => SolverStatus::Infeasible,
        SolveStatus::Unbounded => SolverStatus::Unbounded,
        SolveStatus::NotSolved => SolverStatus::Unknown,
    }
}

/// Solves a validated problem and assembles the output document.
///
/// Infeasible and unbounded results are statuses in the output, never
/// errors: the caller always receives a complete document with whatever
/// partial solution the search produced.
pub fn solve(problem: &Problem, params: &SearchParameters) -> Output {
    let started = Instant::now();

    let matrix = DistanceMatrix::from_problem(problem.depot(), problem.stops());
    let model = build_routing_model(&matrix, problem.stops(), problem.vehicles());
    let assignment = engine::solve(&model, params);
    let solution = extract_solution(problem, &model, &assignment);
    let status = map_status(assignment.status());

    info!(
        "solved {} stops with {} vehicles in {:?}: {} ({} unplanned, objective {})",
        problem.num_stops(),
        problem.num_vehicles(),
        started.elapsed(),
        status.as_str(),
        solution.num_unplanned(),
        solution.total_distance(),
    );

    format_output(
        problem,
        &solution,
        status,
        started.elapsed(),
        params.time_limit.as_secs(),
    )
}
