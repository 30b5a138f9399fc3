use crate::EmstStats;
use num_traits::Float;
use std::cmp::Ordering;

/// An edge of the spanning tree. By convention `point_a < point_b`, and the weight is the
/// Euclidean distance between the two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<T> {
    pub point_a: usize,
    pub point_b: usize,
    pub weight: T,
}

impl<T: Float> Edge<T> {
    /// Creates an edge, ordering the endpoints so that `point_a < point_b`.
    pub fn new(a: usize, b: usize, weight: T) -> Self {
        Edge {
            point_a: a.min(b),
            point_b: a.max(b),
            weight,
        }
    }

    /// The edge as an `(index_a, index_b, weight)` row.
    pub fn as_row(&self) -> (usize, usize, T) {
        (self.point_a, self.point_b, self.weight)
    }

    /// Orders by weight, then by endpoints.
    pub(crate) fn cmp_by_weight(&self, other: &Self) -> Ordering {
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(Ordering::Equal)
            .then(self.point_a.cmp(&other.point_a))
            .then(self.point_b.cmp(&other.point_b))
    }
}

/// The cheapest known edge leaving a component during a Boruvka round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate<T> {
    pub(crate) owner: usize,
    pub(crate) neighbour: usize,
    pub(crate) distance: T,
}

impl<T: Float> Candidate<T> {
    /// Candidates are ordered by distance, then by the ordered pair of endpoint indices.
    /// This is a total order over edges, so every strategy and every visit order selects
    /// the same candidate for a component, and simultaneous merges can never close a cycle.
    pub(crate) fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.endpoints() < other.endpoints()
    }

    pub(crate) fn to_edge(self) -> Edge<T> {
        Edge::new(self.owner, self.neighbour, self.distance)
    }

    fn endpoints(&self) -> (usize, usize) {
        (
            self.owner.min(self.neighbour),
            self.owner.max(self.neighbour),
        )
    }
}

/// A completed Euclidean minimum spanning tree: N-1 edges sorted ascending by weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree<T> {
    edges: Vec<Edge<T>>,
    stats: EmstStats,
}

impl<T: Float> SpanningTree<T> {
    pub(crate) fn new(mut edges: Vec<Edge<T>>, stats: EmstStats) -> Self {
        edges.sort_by(|a, b| a.cmp_by_weight(b));
        SpanningTree { edges, stats }
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge<T>> {
        self.edges
    }

    /// Number of edges, which is one less than the number of points.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The sum of all edge weights.
    pub fn total_weight(&self) -> T {
        self.edges
            .iter()
            .map(|edge| edge.weight)
            .fold(T::zero(), std::ops::Add::add)
    }

    /// Counters collected while computing the tree.
    pub fn stats(&self) -> &EmstStats {
        &self.stats
    }
}
