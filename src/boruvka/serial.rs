use super::traversal::{DualTreeTraversal, NodeState};
use super::{boruvka, CandidateSearch, EmstAlgorithm};
use crate::components::ComponentTracker;
use crate::data_wrappers::Edge;
use crate::spatial::{SpatialIndex, SpatialIndexKind};
use crate::{BallTree, EmstError, EmstParams, EmstStats, KdTree, PointSet};
use num_traits::Float;

pub(crate) struct MstCalculator<'a, T> {
    points: PointSet<'a, T>,
    algorithm: EmstAlgorithm,
    index: SpatialIndexKind,
    leaf_size: usize,
}

impl<'a, T: Float> MstCalculator<'a, T> {
    pub(crate) fn new(points: PointSet<'a, T>, params: &EmstParams) -> Self {
        Self {
            points,
            algorithm: params.algorithm,
            index: params.index,
            leaf_size: params.leaf_size,
        }
    }

    pub(crate) fn calc_min_spanning_tree(
        &self,
        stats: &mut EmstStats,
    ) -> Result<Vec<Edge<T>>, EmstError> {
        let n_samples = self.points.len();
        match (self.algorithm.resolve(n_samples), self.index) {
            (EmstAlgorithm::Naive, _) => {
                let mut search = Naive::new(self.points);
                boruvka(n_samples, &mut search, stats)
            }
            (_, SpatialIndexKind::KdTree) => {
                let tree = KdTree::build(&self.points, self.leaf_size);
                let mut search = DualTree::new(self.points, &tree);
                boruvka(n_samples, &mut search, stats)
            }
            (_, SpatialIndexKind::BallTree) => {
                let tree = BallTree::build(&self.points, self.leaf_size);
                let mut search = DualTree::new(self.points, &tree);
                boruvka(n_samples, &mut search, stats)
            }
        }
    }
}

/// Scans every pair of points once per round.
pub(crate) struct Naive<'a, T> {
    points: PointSet<'a, T>,
}

impl<'a, T: Float> Naive<'a, T> {
    pub(crate) fn new(points: PointSet<'a, T>) -> Self {
        Self { points }
    }
}

impl<'a, T: Float> CandidateSearch<T> for Naive<'a, T> {
    fn find_candidates(&mut self, tracker: &mut ComponentTracker<T>, stats: &mut EmstStats) {
        let n_samples = self.points.len();
        for p in 0..n_samples {
            for q in (p + 1)..n_samples {
                let component_p = tracker.membership()[p];
                let component_q = tracker.membership()[q];
                if component_p == component_q {
                    continue;
                }
                let distance = self.points.distance(p, q);
                stats.distance_evaluations += 1;
                tracker.update_candidate(component_p, p, q, distance);
                tracker.update_candidate(component_q, q, p, distance);
            }
        }
    }
}

/// Traverses the index against itself once per round, starting from the root pair.
pub(crate) struct DualTree<'a, T, I> {
    points: PointSet<'a, T>,
    index: &'a I,
}

impl<'a, T: Float, I: SpatialIndex<T>> DualTree<'a, T, I> {
    pub(crate) fn new(points: PointSet<'a, T>, index: &'a I) -> Self {
        Self { points, index }
    }
}

impl<'a, T: Float, I: SpatialIndex<T>> CandidateSearch<T> for DualTree<'a, T, I> {
    fn find_candidates(&mut self, tracker: &mut ComponentTracker<T>, stats: &mut EmstStats) {
        let (membership, candidates) = tracker.round_state();
        let NodeState { components, bounds } = NodeState::new(self.index, membership);
        let mut round_stats = EmstStats::default();
        let mut traversal = DualTreeTraversal::new(
            self.points,
            self.index,
            membership,
            &components,
            bounds,
            candidates,
            &mut round_stats,
        );
        traversal.traverse(self.index.root(), self.index.root());
        log::trace!(
            "dual-tree traversal: {} base cases, {} distances, {} same-component and {} distance prunes",
            round_stats.base_cases,
            round_stats.distance_evaluations,
            round_stats.same_component_prunes,
            round_stats.distance_prunes
        );
        *stats += round_stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_wrappers::SpanningTree;

    fn spiral(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64 * 0.41;
                vec![t * t.cos(), t * t.sin(), (i % 7) as f64 * 0.3]
            })
            .collect()
    }

    fn run<S: CandidateSearch<f64>>(n_samples: usize, search: &mut S) -> SpanningTree<f64> {
        let mut stats = EmstStats::default();
        let edges = boruvka(n_samples, search, &mut stats).unwrap();
        SpanningTree::new(edges, stats)
    }

    #[test]
    fn dual_tree_matches_naive() {
        let data = spiral(150);
        let points = PointSet::new(&data).unwrap();
        let naive = run(data.len(), &mut Naive::new(points));
        for leaf_size in [1, 3, 20] {
            let kd_tree = KdTree::build(&points, leaf_size);
            let dual_tree = run(data.len(), &mut DualTree::new(points, &kd_tree));
            assert_eq!(naive.edges(), dual_tree.edges());
            let ball_tree = BallTree::build(&points, leaf_size);
            let dual_tree = run(data.len(), &mut DualTree::new(points, &ball_tree));
            assert_eq!(naive.edges(), dual_tree.edges());
        }
    }

    #[test]
    fn dual_tree_prunes_work() {
        let data = spiral(300);
        let points = PointSet::new(&data).unwrap();
        let naive = run(data.len(), &mut Naive::new(points));
        let kd_tree = KdTree::build(&points, 1);
        let dual_tree = run(data.len(), &mut DualTree::new(points, &kd_tree));
        assert!(dual_tree.stats().distance_prunes > 0);
        assert!(dual_tree.stats().same_component_prunes > 0);
        assert!(dual_tree.stats().distance_evaluations < naive.stats().distance_evaluations);
    }

    #[test]
    fn calculator_respects_naive_choice() {
        let data = spiral(200);
        let points = PointSet::new(&data).unwrap();
        let params = EmstParams::builder().use_naive(true).build();
        let mut stats = EmstStats::default();
        let edges = MstCalculator::new(points, &params)
            .calc_min_spanning_tree(&mut stats)
            .unwrap();
        assert_eq!(199, edges.len());
        assert_eq!(0, stats.base_cases);
    }
}
