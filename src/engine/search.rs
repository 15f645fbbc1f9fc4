//! Search configuration.

use std::time::Duration;

/// Default wall-clock budget for a solve, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 10;

/// Strategy used to construct the first feasible solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstSolutionStrategy {
    /// Extend each route greedily with the cheapest feasible arc from the
    /// route's current tail.
    PathCheapestArc,
    /// Insert each stop at the globally cheapest feasible position across
    /// all routes.
    ParallelCheapestInsertion,
}

/// Improvement metaheuristic applied after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metaheuristic {
    /// Plain local-search descent; stops at the first local optimum.
    GreedyDescent,
    /// Guided local search: at each local optimum, penalize the arc with
    /// the highest utility and continue on the penalty-augmented cost,
    /// keeping the best solution by true cost.
    GuidedLocalSearch,
}

/// Parameter bundle driving the search.
///
/// A pure configuration object: substituting the heuristic, metaheuristic,
/// or time limit never touches model-construction code. The search is
/// anytime — it returns the best solution found by the deadline even when
/// optimality is unproven.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_solver::engine::{FirstSolutionStrategy, Metaheuristic, SearchParameters};
///
/// let params = SearchParameters::default();
/// assert_eq!(params.first_solution, FirstSolutionStrategy::PathCheapestArc);
/// assert_eq!(params.metaheuristic, Metaheuristic::GuidedLocalSearch);
/// assert_eq!(params.time_limit, Duration::from_secs(10));
///
/// let quick = SearchParameters::default().with_time_limit(Duration::from_millis(50));
/// assert_eq!(quick.time_limit, Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct SearchParameters {
    /// First-solution construction heuristic.
    pub first_solution: FirstSolutionStrategy,
    /// Improvement metaheuristic.
    pub metaheuristic: Metaheuristic,
    /// Wall-clock budget for the whole search.
    pub time_limit: Duration,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution: FirstSolutionStrategy::PathCheapestArc,
            metaheuristic: Metaheuristic::GuidedLocalSearch,
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

impl SearchParameters {
    /// Replaces the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Replaces the first-solution strategy.
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    /// Replaces the metaheuristic.
    pub fn with_metaheuristic(mut self, metaheuristic: Metaheuristic) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let params = SearchParameters::default()
            .with_first_solution(FirstSolutionStrategy::ParallelCheapestInsertion)
            .with_metaheuristic(Metaheuristic::GreedyDescent)
            .with_time_limit(Duration::from_secs(1));
        assert_eq!(
            params.first_solution,
            FirstSolutionStrategy::ParallelCheapestInsertion
        );
        assert_eq!(params.metaheuristic, Metaheuristic::GreedyDescent);
        assert_eq!(params.time_limit, Duration::from_secs(1));
    }
}
