//! Routing-engine layer: index mapping, model primitives, and search.
//!
//! The engine is consumed through a narrow contract so model construction
//! and extraction never depend on how the search itself works:
//!
//! - [`IndexManager`] — bidirectional mapping between domain node ids and
//!   per-vehicle model indices
//! - [`RoutingModel`] — registered transit/demand callbacks, arc costs,
//!   and the capacity dimension ([`build_routing_model`])
//! - [`SearchParameters`] — first-solution strategy, metaheuristic, and
//!   wall-clock time limit
//! - [`solve`] — the embedded search driver; returns an [`Assignment`]
//!   supporting next-node traversal and per-arc cost lookup

mod assignment;
mod index;
mod model;
mod search;
mod solve;

pub use assignment::{Assignment, SolveStatus};
pub use index::IndexManager;
pub use model::{build_routing_model, RoutingModel, TransitCallback, UnaryTransitCallback};
pub use search::{
    FirstSolutionStrategy, Metaheuristic, SearchParameters, DEFAULT_TIME_LIMIT_SECS,
};
pub use solve::solve;
