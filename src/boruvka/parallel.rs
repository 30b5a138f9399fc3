#![cfg(feature = "parallel")]
use super::traversal::{DualTreeTraversal, NodeState};
use super::{boruvka, CandidateSearch, EmstAlgorithm};
use crate::components::{CandidateTable, ComponentTracker};
use crate::data_wrappers::{Candidate, Edge};
use crate::spatial::{NodeId, NodeKind, SpatialIndex, SpatialIndexKind};
use crate::{BallTree, EmstError, EmstParams, EmstStats, KdTree, PointSet};
use num_traits::Float;
use rayon::prelude::*;

/// Number of independent query subtrees handed to each worker thread per round.
const SUBTREES_PER_THREAD: usize = 4;

pub(crate) struct MstCalculatorPar<'a, T> {
    points: PointSet<'a, T>,
    algorithm: EmstAlgorithm,
    index: SpatialIndexKind,
    leaf_size: usize,
}

impl<'a, T: Float + Send + Sync> MstCalculatorPar<'a, T> {
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
                let mut search = NaivePar::new(self.points);
                boruvka(n_samples, &mut search, stats)
            }
            (_, SpatialIndexKind::KdTree) => {
                let tree = KdTree::build(&self.points, self.leaf_size);
                let mut search = DualTreePar::new(self.points, &tree);
                boruvka(n_samples, &mut search, stats)
            }
            (_, SpatialIndexKind::BallTree) => {
                let tree = BallTree::build(&self.points, self.leaf_size);
                let mut search = DualTreePar::new(self.points, &tree);
                boruvka(n_samples, &mut search, stats)
            }
        }
    }
}

/// Scans all pairs, one point per task. Each task finds the best edge leaving its own point,
/// and the results are reduced into the per component table.
pub(crate) struct NaivePar<'a, T> {
    points: PointSet<'a, T>,
}

impl<'a, T: Float + Send + Sync> NaivePar<'a, T> {
    pub(crate) fn new(points: PointSet<'a, T>) -> Self {
        Self { points }
    }
}

impl<'a, T: Float + Send + Sync> CandidateSearch<T> for NaivePar<'a, T> {
    fn find_candidates(&mut self, tracker: &mut ComponentTracker<T>, stats: &mut EmstStats) {
        let points = self.points;
        let (membership, candidates) = tracker.round_state();

        let per_point: Vec<(Option<Candidate<T>>, u64)> = (0..points.len())
            .into_par_iter()
            .map(|p| {
                let mut best: Option<Candidate<T>> = None;
                let mut evaluations = 0;
                for q in 0..points.len() {
                    if membership[q] == membership[p] {
                        continue;
                    }
                    evaluations += 1;
                    let candidate = Candidate {
                        owner: p,
                        neighbour: q,
                        distance: points.distance(p, q),
                    };
                    if best.map_or(true, |current| candidate.precedes(&current)) {
                        best = Some(candidate);
                    }
                }
                (best, evaluations)
            })
            .collect();

        for (best, evaluations) in per_point {
            stats.distance_evaluations += evaluations;
            if let Some(candidate) = best {
                candidates.offer(membership[candidate.owner], candidate);
            }
        }
    }
}

/// Splits the query side of the traversal into disjoint subtrees traversed in parallel
/// against the whole index, each into its own candidate table. Candidate updates are a
/// commutative minimum, so reducing the tables gives exactly the serial result.
pub(crate) struct DualTreePar<'a, T, I> {
    points: PointSet<'a, T>,
    index: &'a I,
    query_roots: Vec<NodeId>,
}

impl<'a, T, I> DualTreePar<'a, T, I>
where
    T: Float + Send + Sync,
    I: SpatialIndex<T> + Sync,
{
    pub(crate) fn new(points: PointSet<'a, T>, index: &'a I) -> Self {
        let target = rayon::current_num_threads() * SUBTREES_PER_THREAD;
        let query_roots = split_into_subtrees(index, target);
        Self {
            points,
            index,
            query_roots,
        }
    }
}

impl<'a, T, I> CandidateSearch<T> for DualTreePar<'a, T, I>
where
    T: Float + Send + Sync,
    I: SpatialIndex<T> + Sync,
{
    fn find_candidates(&mut self, tracker: &mut ComponentTracker<T>, stats: &mut EmstStats) {
        let (membership, candidates) = tracker.round_state();
        let node_state = NodeState::new(self.index, membership);
        let (points, index) = (self.points, self.index);
        let n_samples = points.len();

        let results: Vec<(CandidateTable<T>, EmstStats)> = self
            .query_roots
            .par_iter()
            .map(|&query| {
                let mut local_candidates = CandidateTable::new(n_samples);
                let mut local_stats = EmstStats::default();
                let mut traversal = DualTreeTraversal::new(
                    points,
                    index,
                    membership,
                    &node_state.components,
                    node_state.bounds.clone(),
                    &mut local_candidates,
                    &mut local_stats,
                );
                traversal.traverse(query, index.root());
                (local_candidates, local_stats)
            })
            .collect();

        for (local_candidates, local_stats) in results {
            candidates.merge(&local_candidates);
            *stats += local_stats;
        }
    }
}

/// Repeatedly splits the largest internal node until there are at least `target` subtrees
/// or only leaves remain. The subtrees partition the points.
fn split_into_subtrees<T: Float, I: SpatialIndex<T>>(index: &I, target: usize) -> Vec<NodeId> {
    let mut subtrees = vec![index.root()];
    while subtrees.len() < target {
        let largest = subtrees
            .iter()
            .enumerate()
            .filter(|&(_, &id)| !index.node(id).is_leaf())
            .max_by_key(|&(_, &id)| index.node(id).len())
            .map(|(position, _)| position);
        let Some(position) = largest else {
            break;
        };
        let id = subtrees.swap_remove(position);
        if let NodeKind::Internal { left, right } = index.node(id).kind() {
            subtrees.push(left);
            subtrees.push(right);
        }
    }
    subtrees
}
