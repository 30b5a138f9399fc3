//! Euclidean minimum spanning trees ("EMST") in Rust, computed with the dual-tree Boruvka
//! algorithm. Generic over floating point numeric types.
//!
//! The EMST of a set of points is the tree connecting all of them whose total edge length,
//! measured by Euclidean distance, is as small as possible. It underlies single-linkage and
//! friends-of-friends clustering. Computing it naively needs every pairwise distance. Dual-tree
//! Boruvka instead:
//!  1. Builds a spatial index (a kd-tree or a ball tree) over the points once;
//!  2. Runs Boruvka rounds, each of which finds the cheapest edge leaving every component and
//!     merges along all of them at once, at least halving the number of components; and
//!  3. Finds those edges by traversing the index against itself, skipping node pairs that lie
//!     within one component or are too far apart to improve any component's best edge.
//!
//! Every algorithm and index produces exactly the same tree: equal length edges are ordered by
//! their endpoint indices, which makes the minimum spanning tree unique.
//!
//! # Examples
//! ```
//!use emst::Emst;
//!
//!let data: Vec<Vec<f32>> = vec![
//!    vec![1.5, 2.2],
//!    vec![1.0, 1.1],
//!    vec![1.2, 1.4],
//!    vec![0.8, 1.0],
//!    vec![3.7, 4.0],
//!    vec![3.9, 3.9],
//!];
//!let tree = Emst::default_params(&data).compute().unwrap();
//!assert_eq!(5, tree.len());
//!for edge in tree.edges() {
//!    println!("{},{},{}", edge.point_a, edge.point_b, edge.weight);
//!}
//! ```
//!
//! # References
//! * [March, W.B.; Ram, P.; Gray, A.G. Fast Euclidean minimum spanning tree: algorithm, analysis, and applications.](https://dl.acm.org/doi/10.1145/1835804.1835882)

pub use crate::boruvka::EmstAlgorithm;
pub use crate::data_wrappers::{Edge, SpanningTree};
pub use crate::emst::Emst;
pub use crate::error::EmstError;
pub use crate::params::{EmstParams, ParamBuilder};
pub use crate::point_set::PointSet;
pub use crate::spatial::ball_tree::{BallTree, BoundingBall};
pub use crate::spatial::kd_tree::{BoundingBox, KdTree};
pub use crate::spatial::{
    BoundingRegion, NodeId, NodeKind, SpatialIndex, SpatialIndexKind, SpatialNode, SpatialTree,
};
pub use crate::stats::EmstStats;

mod boruvka;
mod components;
mod data_wrappers;
mod distance;
mod emst;
mod error;
mod params;
mod point_set;
mod spatial;
mod stats;
mod union_find;
mod validation;
