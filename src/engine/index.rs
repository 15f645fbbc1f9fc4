//! Bidirectional mapping between domain node ids and model indices.

/// Maps between the domain's node ids and the engine's model indices.
///
/// Node ids are the domain side: 0 is the depot, 1..=N are the stops in
/// input order. Model indices are the engine side: each stop node k owns
/// index `k - 1`, and each vehicle owns its own synthetic start and end
/// indices, all of which resolve back to the depot node. Keeping the
/// translation in one place means sentinel indices never leak into
/// domain-level stop or vehicle identifiers.
///
/// # Examples
///
/// ```
/// use route_solver::engine::IndexManager;
///
/// // 3 nodes (depot + 2 stops), 2 vehicles, depot node 0.
/// let manager = IndexManager::new(3, 2, 0);
/// assert_eq!(manager.index_to_node(manager.start(1)), 0);
/// assert_eq!(manager.index_to_node(0), 1);
/// assert_eq!(manager.node_to_index(2), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct IndexManager {
    num_nodes: usize,
    num_vehicles: usize,
    depot: usize,
}

impl IndexManager {
    /// Creates a manager for `num_nodes` domain nodes (depot included),
    /// `num_vehicles` vehicles, and the given depot node id.
    pub fn new(num_nodes: usize, num_vehicles: usize, depot: usize) -> Self {
        Self {
            num_nodes,
            num_vehicles,
            depot,
        }
    }

    /// Number of domain nodes (depot + stops).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// The depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of stop nodes (every node except the depot).
    pub fn num_stops(&self) -> usize {
        self.num_nodes - 1
    }

    /// Total count of model indices: one per stop plus a start and an end
    /// sentinel per vehicle.
    pub fn num_indices(&self) -> usize {
        self.num_stops() + 2 * self.num_vehicles
    }

    /// The start sentinel index owned by vehicle `v`.
    pub fn start(&self, v: usize) -> usize {
        self.num_stops() + 2 * v
    }

    /// The end sentinel index owned by vehicle `v`.
    pub fn end(&self, v: usize) -> usize {
        self.num_stops() + 2 * v + 1
    }

    /// Returns `true` if `index` is some vehicle's start sentinel.
    pub fn is_start(&self, index: usize) -> bool {
        index >= self.num_stops() && (index - self.num_stops()) % 2 == 0
    }

    /// Returns `true` if `index` is some vehicle's end sentinel.
    pub fn is_end(&self, index: usize) -> bool {
        index >= self.num_stops() && (index - self.num_stops()) % 2 == 1
    }

    /// The vehicle owning a sentinel index, or `None` for stop indices.
    pub fn sentinel_vehicle(&self, index: usize) -> Option<usize> {
        if index < self.num_stops() {
            None
        } else {
            Some((index - self.num_stops()) / 2)
        }
    }

    /// Resolves a model index to its domain node id.
    ///
    /// Every sentinel index resolves to the depot.
    pub fn index_to_node(&self, index: usize) -> usize {
        if index < self.num_stops() {
            index + 1
        } else {
            self.depot
        }
    }

    /// Resolves a stop node id to its model index.
    ///
    /// Returns `None` for the depot: its indices are per-vehicle, so
    /// callers must use [`start`](Self::start) or [`end`](Self::end).
    pub fn node_to_index(&self, node: usize) -> Option<usize> {
        if node == self.depot || node >= self.num_nodes {
            None
        } else {
            Some(node - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_indices_round_trip() {
        let m = IndexManager::new(4, 2, 0);
        for node in 1..4 {
            let index = m.node_to_index(node).expect("stop node");
            assert_eq!(m.index_to_node(index), node);
        }
    }

    #[test]
    fn test_depot_has_no_plain_index() {
        let m = IndexManager::new(4, 2, 0);
        assert_eq!(m.node_to_index(0), None);
        assert_eq!(m.node_to_index(9), None);
    }

    #[test]
    fn test_per_vehicle_sentinels() {
        let m = IndexManager::new(3, 3, 0);
        let mut seen = Vec::new();
        for v in 0..3 {
            let s = m.start(v);
            let e = m.end(v);
            assert_ne!(s, e);
            assert!(m.is_start(s));
            assert!(m.is_end(e));
            assert!(!m.is_end(s));
            // Both sentinels map to the same depot node id.
            assert_eq!(m.index_to_node(s), 0);
            assert_eq!(m.index_to_node(e), 0);
            assert_eq!(m.sentinel_vehicle(s), Some(v));
            assert_eq!(m.sentinel_vehicle(e), Some(v));
            seen.push(s);
            seen.push(e);
        }
        // Sentinel indices are distinct across vehicles.
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_index_count() {
        let m = IndexManager::new(5, 2, 0);
        assert_eq!(m.num_stops(), 4);
        assert_eq!(m.num_indices(), 4 + 2 * 2);
        assert!(m.sentinel_vehicle(3).is_none());
        assert!(!m.is_start(0));
    }

    #[test]
    fn test_zero_stops() {
        let m = IndexManager::new(1, 2, 0);
        assert_eq!(m.num_stops(), 0);
        assert_eq!(m.start(0), 0);
        assert_eq!(m.end(1), 3);
        assert_eq!(m.index_to_node(m.start(0)), 0);
    }
}
