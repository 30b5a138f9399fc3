#[cfg(feature = "parallel")]
use crate::boruvka::parallel::MstCalculatorPar;
#[cfg(feature = "serial")]
use crate::boruvka::serial::MstCalculator;
use crate::data_wrappers::{Edge, SpanningTree};
use crate::{EmstError, EmstParams, EmstStats, PointSet};
use num_traits::Float;

/// The Euclidean minimum spanning tree of a set of points, computed by dual-tree Boruvka.
/// Generic over floating point numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct Emst<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    params: EmstParams,
}

impl<'a, T: Float + Send + Sync> Emst<'a, T> {
    /// Creates an instance of the spanning tree model using a custom parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the points, a collection of vectors of floating points
    ///            numbers. The vectors must all be of the same dimensionality and contain no
    ///            non-finite values.
    /// * `params` - the parameter configuration.
    ///
    /// # Returns
    /// * The model instance.
    ///
    /// # Examples
    /// ```
    ///use emst::{Emst, EmstParams, SpatialIndexKind};
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.3, 1.1],
    ///    vec![1.3, 1.2],
    ///    vec![1.0, 1.1],
    ///    vec![3.7, 4.0],
    ///];
    ///let params = EmstParams::builder()
    ///    .leaf_size(2)
    ///    .index(SpatialIndexKind::BallTree)
    ///    .build();
    ///let emst = Emst::new(&data, params);
    /// ```
    pub fn new(data: &'a [Vec<T>], params: EmstParams) -> Self {
        let n_samples = data.len();
        Emst {
            data,
            n_samples,
            params,
        }
    }

    /// Creates an instance of the spanning tree model using the default parameters.
    ///
    /// # Parameters
    /// * `data` - a reference to the points, a collection of vectors of floating points
    ///            numbers. The vectors must all be of the same dimensionality and contain no
    ///            non-finite values.
    ///
    /// # Returns
    /// * The model instance.
    pub fn default_params(data: &'a [Vec<T>]) -> Emst<'a, T> {
        Emst::new(data, EmstParams::default())
    }

    /// Computes the minimum spanning tree of the points passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the N-1 edges of the tree sorted ascending by
    ///   weight, with ties ordered by endpoint indices. An Error will be returned if there are
    ///   fewer than two points, if the dimensionality of the input vectors is mismatched or
    ///   zero, or if any vector contains non-finite coordinates.
    ///
    /// # Examples
    /// ```
    ///use emst::Emst;
    ///
    ///let data: Vec<Vec<f64>> = vec![
    ///    vec![0.0, 0.0],
    ///    vec![1.0, 1.0],
    ///    vec![3.0, 3.0],
    ///    vec![0.5, 0.0],
    ///    vec![1000.0, 0.0],
    ///    vec![1001.0, 0.0],
    ///];
    ///let tree = Emst::default_params(&data).compute().unwrap();
    ///let pairs: Vec<_> = tree.edges().iter().map(|e| (e.point_a, e.point_b)).collect();
    ///assert_eq!(vec![(0, 3), (4, 5), (1, 3), (1, 2), (2, 4)], pairs);
    ///assert!((tree.total_weight() - 1002.450975).abs() < 1e-6);
    /// ```
    #[cfg(feature = "serial")]
    pub fn compute(&self) -> Result<SpanningTree<T>, EmstError> {
        let points = PointSet::new(self.data)?;
        self.log_start(&points);
        let mut stats = EmstStats::default();
        let calculator = MstCalculator::new(points, &self.params);
        let edges = calculator.calc_min_spanning_tree(&mut stats)?;
        self.finish(edges, stats)
    }

    /// Computes the minimum spanning tree of the points passed to the constructor, with
    /// candidate searches spread over the rayon thread pool. The result is identical to
    /// `compute`. Not recommended for small datasets.
    ///
    /// # Returns
    /// * A result that, if successful, contains the N-1 edges of the tree sorted ascending by
    ///   weight, with ties ordered by endpoint indices. An Error will be returned if there are
    ///   fewer than two points, if the dimensionality of the input vectors is mismatched or
    ///   zero, or if any vector contains non-finite coordinates.
    ///
    /// # Examples
    /// ```
    ///use emst::Emst;
    ///
    ///let data: Vec<Vec<f64>> = (0..200)
    ///    .map(|i| vec![(i % 20) as f64, (i / 20) as f64 * 1.5])
    ///    .collect();
    ///let tree = Emst::default_params(&data).compute_par().unwrap();
    ///assert_eq!(199, tree.len());
    ///assert!((tree.total_weight() - (190.0 + 9.0 * 1.5)).abs() < 1e-9);
    /// ```
    #[cfg(feature = "parallel")]
    pub fn compute_par(&self) -> Result<SpanningTree<T>, EmstError> {
        let points = PointSet::new(self.data)?;
        self.log_start(&points);
        let mut stats = EmstStats::default();
        let calculator = MstCalculatorPar::new(points, &self.params);
        let edges = calculator.calc_min_spanning_tree(&mut stats)?;
        self.finish(edges, stats)
    }

    fn log_start(&self, points: &PointSet<'_, T>) {
        log::debug!(
            "computing spanning tree of {} points in {} dimensions with {:?} over {:?} (leaf size {})",
            self.n_samples,
            points.n_dims(),
            self.params.algorithm.resolve(self.n_samples),
            self.params.index,
            self.params.leaf_size
        );
    }

    fn finish(&self, edges: Vec<Edge<T>>, stats: EmstStats) -> Result<SpanningTree<T>, EmstError> {
        if edges.len() + 1 != self.n_samples {
            return Err(EmstError::InvariantViolation(format!(
                "{} edges found for {} points",
                edges.len(),
                self.n_samples
            )));
        }
        let n_coincident = edges
            .iter()
            .filter(|edge| edge.weight == T::zero())
            .count();
        if n_coincident > 0 {
            log::warn!(
                "{n_coincident} zero weight edges: the input contains coincident points"
            );
        }
        log::debug!(
            "spanning tree complete after {} rounds and {} distance evaluations",
            stats.rounds,
            stats.distance_evaluations
        );
        Ok(SpanningTree::new(edges, stats))
    }
}
