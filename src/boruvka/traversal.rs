use crate::components::CandidateTable;
use crate::spatial::{BoundingRegion, NodeId, NodeKind, SpatialIndex};
use crate::{EmstStats, PointSet};
use num_traits::Float;

/// Per node facts that hold for one Boruvka round.
///
/// * `components[node]` is the component every point below the node belongs to, or `None`
///   when the node spans several components.
/// * `bounds[node]` is an upper bound on the final candidate distance of every component
///   with a point below the node. A node spanning several components contains, for each of
///   them, an outgoing pair no longer than the node's diameter, which seeds the bound.
///   Children inherit their parent's bound. A single-component child of a node spanning
///   several components reaches a foreign point in its sibling, so it is also bounded by
///   the maximum distance to the sibling.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeState<T> {
    pub(crate) components: Vec<Option<usize>>,
    pub(crate) bounds: Vec<T>,
}

impl<T: Float> NodeState<T> {
    pub(crate) fn new<I: SpatialIndex<T>>(index: &I, membership: &[usize]) -> Self {
        let n_nodes = index.node_count();
        let mut components = vec![None; n_nodes];
        let mut bounds = vec![T::infinity(); n_nodes];

        // Children are stored after their parents, so a reverse sweep is bottom-up
        for id in (0..n_nodes).rev() {
            let node = index.node(id);
            let (component, children_bound) = match node.kind() {
                NodeKind::Leaf => {
                    let indices = index.point_indices(id);
                    let first = membership[indices[0]];
                    let is_pure = indices.iter().all(|&p| membership[p] == first);
                    (if is_pure { Some(first) } else { None }, T::infinity())
                }
                NodeKind::Internal { left, right } => {
                    let component = match (components[left], components[right]) {
                        (Some(a), Some(b)) if a == b => Some(a),
                        _ => None,
                    };
                    (component, bounds[left].max(bounds[right]))
                }
            };
            components[id] = component;
            bounds[id] = match component {
                Some(_) => children_bound,
                None => children_bound.min(node.bound().diameter()),
            };
        }

        // Parents come before their children, so a forward sweep is top-down
        for id in 0..n_nodes {
            if let NodeKind::Internal { left, right } = index.node(id).kind() {
                for (child, sibling) in [(left, right), (right, left)] {
                    let mut bound = bounds[child].min(bounds[id]);
                    if components[id].is_none() && components[child].is_some() {
                        let sibling_bound = index.node(sibling).bound();
                        bound = bound.min(index.node(child).bound().max_distance(sibling_bound));
                    }
                    bounds[child] = bound;
                }
            }
        }

        NodeState { components, bounds }
    }
}

/// One dual-tree traversal of a spatial index against itself, recording in `candidates` the
/// cheapest edge leaving every component reachable from the query node it is started on.
pub(crate) struct DualTreeTraversal<'a, T, I> {
    points: PointSet<'a, T>,
    index: &'a I,
    membership: &'a [usize],
    node_components: &'a [Option<usize>],
    bounds: Vec<T>,
    candidates: &'a mut CandidateTable<T>,
    stats: &'a mut EmstStats,
}

impl<'a, T: Float, I: SpatialIndex<T>> DualTreeTraversal<'a, T, I> {
    pub(crate) fn new(
        points: PointSet<'a, T>,
        index: &'a I,
        membership: &'a [usize],
        node_components: &'a [Option<usize>],
        bounds: Vec<T>,
        candidates: &'a mut CandidateTable<T>,
        stats: &'a mut EmstStats,
    ) -> Self {
        DualTreeTraversal {
            points,
            index,
            membership,
            node_components,
            bounds,
            candidates,
            stats,
        }
    }

    pub(crate) fn traverse(&mut self, query: NodeId, reference: NodeId) {
        let index = self.index;
        let query_node = index.node(query);
        let reference_node = index.node(reference);

        if let (Some(a), Some(b)) = (
            self.node_components[query],
            self.node_components[reference],
        ) {
            if a == b {
                self.stats.same_component_prunes += 1;
                return;
            }
        }
        let min_distance = query_node.bound().min_distance(reference_node.bound());
        if min_distance > self.query_bound(query) {
            self.stats.distance_prunes += 1;
            return;
        }

        match (query_node.kind(), reference_node.kind()) {
            (NodeKind::Leaf, NodeKind::Leaf) => self.base_case(query, reference),
            (NodeKind::Leaf, NodeKind::Internal { left, right }) => {
                self.traverse_nearest_first(query, left, right);
            }
            (NodeKind::Internal { left, right }, NodeKind::Leaf) => {
                self.traverse(left, reference);
                self.traverse(right, reference);
                self.tighten(query, left, right);
            }
            (
                NodeKind::Internal { left, right },
                NodeKind::Internal {
                    left: reference_left,
                    right: reference_right,
                },
            ) => {
                self.traverse_nearest_first(left, reference_left, reference_right);
                self.traverse_nearest_first(right, reference_left, reference_right);
                self.tighten(query, left, right);
            }
        }
    }

    /// Visits the closer reference child first, so candidates tighten before the farther
    /// child is considered.
    fn traverse_nearest_first(&mut self, query: NodeId, reference_a: NodeId, reference_b: NodeId) {
        let index = self.index;
        let query_bound = index.node(query).bound();
        let distance_a = query_bound.min_distance(index.node(reference_a).bound());
        let distance_b = query_bound.min_distance(index.node(reference_b).bound());
        if distance_b < distance_a {
            self.traverse(query, reference_b);
            self.traverse(query, reference_a);
        } else {
            self.traverse(query, reference_a);
            self.traverse(query, reference_b);
        }
    }

    fn base_case(&mut self, query: NodeId, reference: NodeId) {
        self.stats.base_cases += 1;
        let index = self.index;
        let reference_indices = index.point_indices(reference);

        for &p in index.point_indices(query) {
            let component = self.membership[p];
            for &q in reference_indices {
                if self.membership[q] == component {
                    continue;
                }
                let distance = self.points.distance(p, q);
                self.stats.distance_evaluations += 1;
                self.candidates.update(component, p, q, distance);
            }
        }

        let leaf_bound = index
            .point_indices(query)
            .iter()
            .map(|&p| self.candidates.distance(self.membership[p]))
            .fold(T::neg_infinity(), T::max);
        self.bounds[query] = self.bounds[query].min(leaf_bound);
    }

    fn tighten(&mut self, query: NodeId, left: NodeId, right: NodeId) {
        let children_bound = self.bounds[left].max(self.bounds[right]);
        self.bounds[query] = self.query_bound(query).min(children_bound);
    }

    fn query_bound(&self, query: NodeId) -> T {
        match self.node_components[query] {
            Some(component) => self.bounds[query].min(self.candidates.distance(component)),
            None => self.bounds[query],
        }
    }
}
