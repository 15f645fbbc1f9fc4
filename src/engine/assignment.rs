//! Solved assignment: the queryable result of a search.

/// Engine-side terminal status of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The returned solution is provably optimal.
    Optimal,
    /// A feasible solution serving every stop, optimality unproven.
    Feasible,
    /// Not every stop could be served; the assignment is partial.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// The search produced nothing usable.
    NotSolved,
}

/// The solved route graph, queryable by "next visited index" traversal.
///
/// For each vehicle the chain `start(v) → ... → end(v)` lists its visits
/// in order; stop indices absent from every chain are unperformed. The
/// assignment speaks only in model indices — mapping back to domain
/// identifiers is the extractor's job.
#[derive(Debug, Clone)]
pub struct Assignment {
    next: Vec<usize>,
    performed: Vec<bool>,
    status: SolveStatus,
    objective: i64,
}

impl Assignment {
    /// Creates an assignment from the solved next-index relation.
    ///
    /// `next` must have one entry per model index; `performed` one entry
    /// per stop index.
    pub fn new(next: Vec<usize>, performed: Vec<bool>, status: SolveStatus, objective: i64) -> Self {
        Self {
            next,
            performed,
            status,
            objective,
        }
    }

    /// The index visited immediately after `index` on its route.
    ///
    /// End sentinels and unperformed stops map to themselves.
    pub fn next(&self, index: usize) -> usize {
        self.next[index]
    }

    /// Whether the stop at `stop_index` is visited by some vehicle.
    pub fn is_performed(&self, stop_index: usize) -> bool {
        self.performed[stop_index]
    }

    /// Terminal status of the search.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Total arc cost of the assignment (the objective value).
    pub fn objective(&self) -> i64 {
        self.objective
    }
}
