//! Solution and solver status types.

use super::Route;

/// Terminal status of a solve attempt, using a fixed vocabulary.
///
/// Infeasible and unbounded outcomes are statuses, not errors: the solver
/// still returns whatever partial solution it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Solution proven optimal.
    Optimal,
    /// Feasible solution found, optimality unproven (anytime result).
    Suboptimal,
    /// The model cannot serve every stop.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// Anything else (no solve attempt completed).
    Unknown,
}

impl SolverStatus {
    /// Stable string form used in the output statistics block.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Suboptimal => "suboptimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Unknown => "unknown",
        }
    }
}

/// A complete solution: one route per vehicle plus the identifiers of
/// stops that could not be assigned to any vehicle.
///
/// # Examples
///
/// ```
/// use route_solver::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new("v1"));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_unplanned(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solution {
    routes: Vec<Route>,
    unplanned: Vec<String>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vehicle route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a stop as unplanned.
    pub fn add_unplanned(&mut self, stop_id: impl Into<String>) {
        self.unplanned.push(stop_id.into());
    }

    /// Routes in vehicle input order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Identifiers of stops not served by any vehicle.
    pub fn unplanned(&self) -> &[String] {
        &self.unplanned
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of unplanned stops.
    pub fn num_unplanned(&self) -> usize {
        self.unplanned.len()
    }

    /// Total distance across all routes (the objective value).
    pub fn total_distance(&self) -> i64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }
}
