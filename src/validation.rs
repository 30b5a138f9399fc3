use crate::distance::{rounding_slack, scaled_norm};
use crate::EmstError;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>]) -> Self {
        Self { data }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), EmstError> {
        let n_samples = self.data.len();
        if n_samples < 2 {
            return Err(EmstError::TooFewPoints(n_samples));
        }
        let dims_0th = self.data[0].len();
        if dims_0th == 0 {
            return Err(EmstError::WrongDimension(String::from(
                "Points must have at least one dimension",
            )));
        }
        for (n, datapoint) in self.data.iter().enumerate() {
            let dims_nth = datapoint.len();
            if dims_nth != dims_0th {
                return Err(EmstError::WrongDimension(format!(
                    "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
            if datapoint.iter().any(|element| !element.is_finite()) {
                return Err(EmstError::NonFiniteCoordinate(format!(
                    "{n}th vector contains non-finite element(s)"
                )));
            }
        }
        self.validate_extent(dims_0th)
    }

    /// Bounds between tree nodes sum up to two diameters, so the diagonal of the data's
    /// bounding box must stay a factor of four below overflow.
    fn validate_extent(&self, n_dims: usize) -> Result<(), EmstError> {
        let mut lo = vec![T::infinity(); n_dims];
        let mut hi = vec![T::neg_infinity(); n_dims];
        for datapoint in self.data {
            for (dim, &value) in datapoint.iter().enumerate() {
                lo[dim] = lo[dim].min(value);
                hi[dim] = hi[dim].max(value);
            }
        }
        let diagonal = scaled_norm(n_dims, |dim| hi[dim] - lo[dim]);
        let headroom = T::from(4).unwrap_or(T::one()) * (T::one() + rounding_slack(n_dims));
        if !(diagonal * headroom).is_finite() {
            return Err(EmstError::CoordinateRangeTooLarge(String::from(
                "Distances between the points would overflow",
            )));
        }
        Ok(())
    }
}
