use crate::distance;
use crate::validation::DataValidator;
use crate::EmstError;
use num_traits::Float;

/// A validated, read-only view over N points in d-dimensional space.
///
/// Points are identified by their position in the input slice, which stays stable for the
/// lifetime of the view. Construction guarantees at least two points, a consistent and
/// non-zero dimensionality, and finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSet<'a, T> {
    data: &'a [Vec<T>],
    n_dims: usize,
}

impl<'a, T: Float> PointSet<'a, T> {
    /// Validates the data and wraps it.
    ///
    /// # Parameters
    /// * `data` - a collection of vectors of floating point numbers, all of the same
    ///            dimensionality and containing only finite values.
    ///
    /// # Returns
    /// * The point set, or an error if there are fewer than 2 points, the dimensions are
    ///   mismatched or zero, or any coordinate is NaN or infinite.
    ///
    /// # Examples
    /// ```
    ///use emst::{EmstError, PointSet};
    ///
    ///let data = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
    ///let points = PointSet::new(&data).unwrap();
    ///assert_eq!(2, points.len());
    ///assert_eq!(5.0, points.distance(0, 1));
    ///
    ///let single = vec![vec![0.0, 0.0]];
    ///assert_eq!(Err(EmstError::TooFewPoints(1)), PointSet::new(&single));
    /// ```
    pub fn new(data: &'a [Vec<T>]) -> Result<Self, EmstError> {
        DataValidator::new(data).validate_input_data()?;
        Ok(PointSet {
            data,
            n_dims: data[0].len(),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a valid point set holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    pub fn point(&self, idx: usize) -> &'a [T] {
        &self.data[idx]
    }

    pub fn coord(&self, idx: usize, dim: usize) -> T {
        self.data[idx][dim]
    }

    /// Euclidean distance between the points at indices `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> T {
        distance::euclidean_distance(&self.data[a], &self.data[b])
    }
}
