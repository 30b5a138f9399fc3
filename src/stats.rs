use std::ops::AddAssign;

/// Counters describing the work done by one spanning tree computation.
///
/// One instance is threaded through a computation and returned with its result, in place of
/// any process-wide instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmstStats {
    /// Number of Boruvka rounds run.
    pub rounds: usize,
    /// Number of point-to-point distances computed.
    pub distance_evaluations: u64,
    /// Number of leaf by leaf node pairs scanned exhaustively.
    pub base_cases: u64,
    /// Node pairs skipped because both nodes lie within the same component.
    pub same_component_prunes: u64,
    /// Node pairs skipped because they are too far apart to improve any candidate.
    pub distance_prunes: u64,
}

impl AddAssign for EmstStats {
    fn add_assign(&mut self, other: Self) {
        self.rounds += other.rounds;
        self.distance_evaluations += other.distance_evaluations;
        self.base_cases += other.base_cases;
        self.same_component_prunes += other.same_component_prunes;
        self.distance_prunes += other.distance_prunes;
    }
}
