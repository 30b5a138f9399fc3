use crate::{EmstError, PointSet};
use num_traits::Float;
use std::cmp::Ordering;
use std::marker::PhantomData;

pub(crate) mod ball_tree;
pub(crate) mod kd_tree;

/// The spatial index the dual-tree algorithm is run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialIndexKind {
    /// Axis-aligned bounding boxes, split at the median of the widest dimension.
    KdTree,
    /// Bounding balls around the centroid, split the same way. Can prune better than a
    /// kd-tree on higher dimensional data.
    BallTree,
}

/// Identifier of a node within a spatial index. Nodes are stored in pre-order, so children
/// always have larger ids than their parent and the root is node 0.
pub type NodeId = usize;

/// Whether a node stores its points directly or delegates to two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Internal { left: NodeId, right: NodeId },
}

/// A node of a spatial index, covering a contiguous run of the index's permuted point
/// indices with a bounding region.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialNode<B> {
    bound: B,
    start: usize,
    end: usize,
    kind: NodeKind,
}

impl<B> SpatialNode<B> {
    pub fn bound(&self) -> &B {
        &self.bound
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Number of points below this node.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The bounding-distance capability the dual-tree traversal prunes with.
///
/// Implementations must be sound under floating point rounding with respect to
/// the Euclidean distance computed between points: `min_distance` may never exceed the
/// distance of a pair drawn from the two regions, and `diameter` may never be smaller than
/// the distance of a pair drawn from within one region.
pub trait BoundingRegion<T: Float>: Sized {
    /// The region covering the points at `indices`, which is never empty.
    fn enclosing(points: &PointSet<'_, T>, indices: &[usize]) -> Self;

    /// Lower bound on the distance between any point in `self` and any point in `other`.
    fn min_distance(&self, other: &Self) -> T;

    /// Upper bound on the distance between any point in `self` and any point in `other`.
    fn max_distance(&self, other: &Self) -> T;

    /// Upper bound on the distance between any two points within the region.
    fn diameter(&self) -> T;
}

/// A static hierarchical index over a point set, built once and immutable afterwards.
///
/// The Boruvka engine only relies on this trait, so any bounding-volume hierarchy whose
/// regions implement [`BoundingRegion`] can drive it.
pub trait SpatialIndex<T: Float> {
    type Region: BoundingRegion<T>;

    fn root(&self) -> NodeId;

    fn node(&self, id: NodeId) -> &SpatialNode<Self::Region>;

    /// Total number of nodes. Node ids range over `0..node_count()`, in pre-order.
    fn node_count(&self) -> usize;

    /// Indices of the original points below the node.
    fn point_indices(&self, id: NodeId) -> &[usize];

    fn n_points(&self) -> usize;
}

/// A binary space-partitioning tree. Each node splits its points at the median of the
/// dimension with the widest spread until at most `leaf_size` points remain. The bounding
/// region type decides the geometry: see [`KdTree`](crate::KdTree) and
/// [`BallTree`](crate::BallTree).
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialTree<T, B> {
    nodes: Vec<SpatialNode<B>>,
    indices: Vec<usize>,
    leaf_size: usize,
    _coords: PhantomData<T>,
}

impl<T: Float, B: BoundingRegion<T>> SpatialTree<T, B> {
    /// Builds the tree over an already validated point set. Deterministic for a given input
    /// and leaf size. A `leaf_size` of zero is treated as one.
    ///
    /// # Examples
    /// ```
    ///use emst::{KdTree, PointSet, SpatialIndex};
    ///
    ///let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![5.0, 5.0], vec![6.0, 5.0]];
    ///let points = PointSet::new(&data).unwrap();
    ///let tree = KdTree::build(&points, 2);
    ///assert_eq!(3, tree.node_count());
    ///assert_eq!(4, tree.point_indices(tree.root()).len());
    /// ```
    pub fn build(points: &PointSet<'_, T>, leaf_size: usize) -> Self {
        let mut tree = SpatialTree {
            nodes: Vec::with_capacity(2 * points.len()),
            indices: (0..points.len()).collect(),
            leaf_size: leaf_size.max(1),
            _coords: PhantomData,
        };
        tree.build_node(points, 0, points.len());
        tree
    }

    /// Validates `data` and builds the tree over it.
    ///
    /// # Returns
    /// * The tree, or an error if there are fewer than 2 points or the data is malformed.
    pub fn from_data(data: &[Vec<T>], leaf_size: usize) -> Result<Self, EmstError> {
        let points = PointSet::new(data)?;
        Ok(Self::build(&points, leaf_size))
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    fn build_node(&mut self, points: &PointSet<'_, T>, start: usize, end: usize) -> NodeId {
        let id = self.nodes.len();
        let bound = B::enclosing(points, &self.indices[start..end]);
        self.nodes.push(SpatialNode {
            bound,
            start,
            end,
            kind: NodeKind::Leaf,
        });
        if end - start <= self.leaf_size {
            return id;
        }

        let split_dim = widest_dimension(points, &self.indices[start..end]);
        let mid = start + (end - start) / 2;
        self.indices[start..end].select_nth_unstable_by(mid - start, |&a, &b| {
            points
                .coord(a, split_dim)
                .partial_cmp(&points.coord(b, split_dim))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        let left = self.build_node(points, start, mid);
        let right = self.build_node(points, mid, end);
        self.nodes[id].kind = NodeKind::Internal { left, right };
        id
    }
}

impl<T: Float, B: BoundingRegion<T>> SpatialIndex<T> for SpatialTree<T, B> {
    type Region = B;

    fn root(&self) -> NodeId {
        0
    }

    fn node(&self, id: NodeId) -> &SpatialNode<B> {
        &self.nodes[id]
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn point_indices(&self, id: NodeId) -> &[usize] {
        let node = &self.nodes[id];
        &self.indices[node.start..node.end]
    }

    fn n_points(&self) -> usize {
        self.indices.len()
    }
}

fn widest_dimension<T: Float>(points: &PointSet<'_, T>, indices: &[usize]) -> usize {
    let mut widest = 0;
    let mut widest_spread = T::neg_infinity();
    for dim in 0..points.n_dims() {
        let (lo, hi) = indices.iter().fold(
            (T::infinity(), T::neg_infinity()),
            |(lo, hi), &idx| {
                let value = points.coord(idx, dim);
                (lo.min(value), hi.max(value))
            },
        );
        if hi - lo > widest_spread {
            widest_spread = hi - lo;
            widest = dim;
        }
    }
    widest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KdTree;

    fn grid_data() -> Vec<Vec<f64>> {
        (0..7)
            .flat_map(|x| (0..5).map(move |y| vec![x as f64 * 1.5, y as f64]))
            .collect()
    }

    #[test]
    fn every_point_indexed_once() {
        let data = grid_data();
        let points = PointSet::new(&data).unwrap();
        let tree = KdTree::build(&points, 3);
        let mut indices = tree.point_indices(tree.root()).to_vec();
        indices.sort();
        assert_eq!((0..data.len()).collect::<Vec<_>>(), indices);
    }

    #[test]
    fn children_partition_parent() {
        let data = grid_data();
        let points = PointSet::new(&data).unwrap();
        let tree = KdTree::build(&points, 2);
        for id in 0..tree.node_count() {
            let node = tree.node(id);
            match node.kind() {
                NodeKind::Leaf => assert!(node.len() <= 2 && !node.is_empty()),
                NodeKind::Internal { left, right } => {
                    assert!(left > id && right > id);
                    assert_eq!(node.len(), tree.node(left).len() + tree.node(right).len());
                    let mut joined = tree.point_indices(left).to_vec();
                    joined.extend_from_slice(tree.point_indices(right));
                    assert_eq!(tree.point_indices(id), joined.as_slice());
                }
            }
        }
    }

    #[test]
    fn zero_leaf_size_treated_as_one() {
        let data = grid_data();
        let points = PointSet::new(&data).unwrap();
        let tree = KdTree::build(&points, 0);
        assert_eq!(1, tree.leaf_size());
        assert_eq!(2 * data.len() - 1, tree.node_count());
    }

    #[test]
    fn identical_points_still_split() {
        let data = vec![vec![1.0, 1.0]; 9];
        let points = PointSet::new(&data).unwrap();
        let tree = KdTree::build(&points, 1);
        assert_eq!(17, tree.node_count());
        assert_eq!(0.0, tree.node(tree.root()).bound().diameter());
    }

    #[test]
    fn build_is_deterministic() {
        let data = grid_data();
        assert_eq!(KdTree::from_data(&data, 4), KdTree::from_data(&data, 4));
    }

    #[test]
    fn from_data_validates() {
        let data = vec![vec![1.0, f64::INFINITY], vec![0.0, 0.0]];
        assert!(matches!(
            KdTree::from_data(&data, 1),
            Err(EmstError::NonFiniteCoordinate(..))
        ));
    }
}
