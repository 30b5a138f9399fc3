use crate::components::ComponentTracker;
use crate::data_wrappers::Edge;
use crate::{EmstError, EmstStats};
use num_traits::Float;

#[cfg(feature = "parallel")]
pub(super) mod parallel;
#[cfg(feature = "serial")]
pub(super) mod serial;
pub(super) mod traversal;

/// Below this many points the automatic strategy selection scans all pairs directly.
const NAIVE_N_SAMPLES_LIMIT: usize = 64;

/// The spanning tree algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmstAlgorithm {
    /// The algorithm is selected internally based on the number of points
    Auto,
    /// Boruvka rounds driven by a dual-tree traversal of a spatial index
    DualTreeBoruvka,
    /// Boruvka rounds with an exhaustive scan over all pairs of points. Only suitable for
    /// small datasets or for cross-checking the dual-tree algorithm.
    Naive,
}

impl EmstAlgorithm {
    pub(crate) fn resolve(self, n_samples: usize) -> EmstAlgorithm {
        match (self, n_samples) {
            (EmstAlgorithm::Auto, usize::MIN..=NAIVE_N_SAMPLES_LIMIT) => EmstAlgorithm::Naive,
            (EmstAlgorithm::Auto, _) => EmstAlgorithm::DualTreeBoruvka,
            (algorithm, _) => algorithm,
        }
    }
}

/// Finds, for every component, its cheapest edge to any other component.
pub(crate) trait CandidateSearch<T: Float> {
    /// Fills the tracker's candidate table. Called once per round, after `reset_round`.
    fn find_candidates(&mut self, tracker: &mut ComponentTracker<T>, stats: &mut EmstStats);
}

/// Runs Boruvka rounds until a single component remains.
///
/// Each round the search supplies one candidate per component. All candidates are merged at
/// once, which at least halves the number of components, so the loop ends after at most
/// log2(N) rounds. A round without a candidate for some component, or a candidate joining
/// two points that are already connected, is reported as an invariant violation.
pub(crate) fn boruvka<T, S>(
    n_samples: usize,
    search: &mut S,
    stats: &mut EmstStats,
) -> Result<Vec<Edge<T>>, EmstError>
where
    T: Float,
    S: CandidateSearch<T>,
{
    let mut tracker = ComponentTracker::new(n_samples);
    let mut min_spanning_tree = Vec::with_capacity(n_samples.saturating_sub(1));
    let mut round = 0;

    while tracker.n_components() > 1 {
        if round >= n_samples {
            return Err(EmstError::InvariantViolation(format!(
                "{} components remain after {round} rounds",
                tracker.n_components()
            )));
        }
        round += 1;
        stats.rounds += 1;
        let n_components_before = tracker.n_components();

        tracker.reset_round();
        search.find_candidates(&mut tracker, stats);

        for edge in tracker.round_edges()? {
            if tracker.find(edge.point_a) == tracker.find(edge.point_b) {
                return Err(EmstError::InvariantViolation(format!(
                    "edge ({}, {}) would close a cycle in round {round}",
                    edge.point_a, edge.point_b
                )));
            }
            tracker.union(edge.point_a, edge.point_b);
            min_spanning_tree.push(edge);
        }

        log::debug!(
            "boruvka round {round}: {n_components_before} -> {} components",
            tracker.n_components()
        );
    }

    Ok(min_spanning_tree)
}
