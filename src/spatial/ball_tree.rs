use super::{BoundingRegion, SpatialTree};
use crate::distance::{euclidean_distance, rounding_slack, widen_down, widen_up};
use crate::PointSet;
use num_traits::Float;

/// A ball tree: a [`SpatialTree`] whose nodes are bounded by hyper-spheres around the
/// centroid of their points.
pub type BallTree<T> = SpatialTree<T, BoundingBall<T>>;

/// A hyper-sphere. The radius is inflated, and the distance bounds widened, by a few ulps
/// relative to the magnitudes involved so that rounding never makes a bound unsound.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBall<T> {
    center: Vec<T>,
    radius: T,
}

impl<T: Float> BoundingBall<T> {
    pub fn center(&self) -> &[T] {
        &self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    fn slack(&self) -> T {
        rounding_slack(self.center.len())
    }
}

impl<T: Float> BoundingRegion<T> for BoundingBall<T> {
    fn enclosing(points: &PointSet<'_, T>, indices: &[usize]) -> Self {
        let count = T::from(indices.len()).unwrap_or(T::one());
        // Dividing first keeps the running sum within the coordinate range
        let mut center = vec![T::zero(); points.n_dims()];
        for &idx in indices {
            for (sum, &value) in center.iter_mut().zip(points.point(idx)) {
                *sum = *sum + value / count;
            }
        }
        let radius = indices
            .iter()
            .map(|&idx| euclidean_distance(&center, points.point(idx)))
            .fold(T::zero(), T::max);
        let slack = rounding_slack(center.len());
        BoundingBall {
            center,
            radius: widen_up(radius, slack),
        }
    }

    fn min_distance(&self, other: &Self) -> T {
        let between = euclidean_distance(&self.center, &other.center);
        let reach = self.radius + other.radius;
        let gap = between - reach - self.slack() * (between + reach);
        widen_down(gap.max(T::zero()), T::zero())
    }

    fn max_distance(&self, other: &Self) -> T {
        let between = euclidean_distance(&self.center, &other.center);
        widen_up(between + self.radius + other.radius, self.slack())
    }

    fn diameter(&self) -> T {
        widen_up(self.radius + self.radius, self.slack())
    }
}
