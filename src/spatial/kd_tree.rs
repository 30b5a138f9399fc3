use super::{BoundingRegion, SpatialTree};
use crate::distance::{rounding_slack, scaled_norm, widen_down, widen_up};
use crate::PointSet;
use num_traits::Float;

/// A kd-tree: a [`SpatialTree`] whose nodes are bounded by axis-aligned boxes.
pub type KdTree<T> = SpatialTree<T, BoundingBox<T>>;

/// An axis-aligned hyper-rectangle, stored as per dimension lower and upper corners.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox<T> {
    lo: Vec<T>,
    hi: Vec<T>,
}

impl<T: Float> BoundingBox<T> {
    pub fn lo(&self) -> &[T] {
        &self.lo
    }

    pub fn hi(&self) -> &[T] {
        &self.hi
    }

    fn gap(&self, other: &Self, dim: usize) -> T {
        if other.lo[dim] > self.hi[dim] {
            other.lo[dim] - self.hi[dim]
        } else if self.lo[dim] > other.hi[dim] {
            self.lo[dim] - other.hi[dim]
        } else {
            T::zero()
        }
    }

    fn slack(&self) -> T {
        rounding_slack(self.lo.len())
    }
}

impl<T: Float> BoundingRegion<T> for BoundingBox<T> {
    fn enclosing(points: &PointSet<'_, T>, indices: &[usize]) -> Self {
        let mut lo = vec![T::infinity(); points.n_dims()];
        let mut hi = vec![T::neg_infinity(); points.n_dims()];
        for &idx in indices {
            for (dim, &value) in points.point(idx).iter().enumerate() {
                lo[dim] = lo[dim].min(value);
                hi[dim] = hi[dim].max(value);
            }
        }
        BoundingBox { lo, hi }
    }

    // Per dimension gaps and spans never undercut, respectively exceed, the coordinate
    // differences of the points inside, so only the norm's rounding needs the slack.
    fn min_distance(&self, other: &Self) -> T {
        let norm = scaled_norm(self.lo.len(), |dim| self.gap(other, dim));
        widen_down(norm, self.slack())
    }

    fn max_distance(&self, other: &Self) -> T {
        let norm = scaled_norm(self.lo.len(), |dim| {
            (other.hi[dim] - self.lo[dim]).max(self.hi[dim] - other.lo[dim])
        });
        widen_up(norm, self.slack())
    }

    fn diameter(&self) -> T {
        let norm = scaled_norm(self.lo.len(), |dim| self.hi[dim] - self.lo[dim]);
        widen_up(norm, self.slack())
    }
}
