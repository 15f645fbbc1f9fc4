//! # route-solver
//!
//! Capacitated vehicle routing (CVRP): given a depot, a fleet of vehicles
//! with load capacities, and stops with demand quantities, produce
//! per-vehicle routes that visit every stop (or report which stops cannot
//! be served) while respecting capacity and minimizing travel distance.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, Stop, Vehicle, Problem, Route, Solution)
//! - [`distance`] — Haversine great-circle distance matrix
//! - [`engine`] — Routing model, index manager, search parameters, and the
//!   embedded search (cheapest-arc construction + guided local search)
//! - [`extract`] — Per-vehicle route reconstruction from a solved assignment
//! - [`io`] — JSON input/output shapes, validation, and result formatting
//! - [`pipeline`] — End-to-end solve: matrix → model → search → extraction

pub mod distance;
pub mod engine;
pub mod extract;
pub mod io;
pub mod models;
pub mod pipeline;
