use num_traits::Float;

/// The Euclidean distance between two points of equal dimensionality.
pub(crate) fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    scaled_norm(a.len(), |dim| a[dim] - b[dim])
}

/// Euclidean norm of the vector whose components are `component(0..n_dims)`.
///
/// Components are divided by the largest magnitude before squaring and the result is scaled
/// back, so the norm neither overflows nor underflows while it is itself representable.
pub(crate) fn scaled_norm<T: Float>(n_dims: usize, component: impl Fn(usize) -> T) -> T {
    let scale = (0..n_dims)
        .map(|dim| component(dim).abs())
        .fold(T::zero(), T::max);
    if scale == T::zero() || scale.is_infinite() {
        return scale;
    }
    let sum = (0..n_dims)
        .map(|dim| {
            let ratio = component(dim) / scale;
            ratio * ratio
        })
        .fold(T::zero(), std::ops::Add::add);
    scale * sum.sqrt()
}

/// Relative widening applied to region bounds. Two norms of `n_dims` components computed
/// with `scaled_norm` differ from their exact values by well under this much.
pub(crate) fn rounding_slack<T: Float>(n_dims: usize) -> T {
    T::epsilon() * T::from(2 * n_dims + 16).unwrap_or(T::one())
}

/// `value` lowered by `slack`, relative. Subnormal values, which carry no relative
/// precision, become zero.
pub(crate) fn widen_down<T: Float>(value: T, slack: T) -> T {
    if value < T::min_positive_value() {
        T::zero()
    } else {
        value * (T::one() - slack)
    }
}

/// `value` raised by `slack`, relative. Subnormal values become the smallest normal value.
pub(crate) fn widen_up<T: Float>(value: T, slack: T) -> T {
    if value == T::zero() {
        value
    } else if value < T::min_positive_value() {
        T::min_positive_value()
    } else {
        value * (T::one() + slack)
    }
}
