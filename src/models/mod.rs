//! Domain model types for the routing solver.
//!
//! Provides the core abstractions: geographic locations, stops with demand
//! quantities, vehicles with capacity, the validated problem instance, and
//! the solved routes with per-leg distances.

mod location;
mod problem;
mod route;
mod solution;
mod stop;
mod vehicle;

pub use location::Location;
pub use problem::Problem;
pub use route::{Route, RouteLeg};
pub use solution::{Solution, SolverStatus};
pub use stop::Stop;
pub use vehicle::Vehicle;
