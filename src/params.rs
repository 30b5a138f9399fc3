use crate::boruvka::EmstAlgorithm;
use crate::spatial::SpatialIndexKind;

// Defaults for parameters
const LEAF_SIZE_DEFAULT: usize = 1;
const ALGORITHM_DEFAULT: EmstAlgorithm = EmstAlgorithm::Auto;
const INDEX_DEFAULT: SpatialIndexKind = SpatialIndexKind::KdTree;

// Valid minimums/left bounds of parameters
const LEAF_SIZE_MINIMUM: usize = 1;

/// A wrapper around the parameters used when computing a spanning tree.
/// Only use if you want to tune the computation. Otherwise use `Emst::default_params()` to
/// instantiate the model with default parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EmstParams {
    pub(crate) leaf_size: usize,
    pub(crate) algorithm: EmstAlgorithm,
    pub(crate) index: SpatialIndexKind,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamBuilder {
    leaf_size: Option<usize>,
    algorithm: Option<EmstAlgorithm>,
    index: Option<SpatialIndexKind>,
}

impl EmstParams {
    pub(crate) fn default() -> Self {
        Self::builder().build()
    }

    /// Enters the builder pattern, allowing custom parameters to be set using various
    /// setter methods.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder() -> ParamBuilder {
        ParamBuilder::default()
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn algorithm(&self) -> EmstAlgorithm {
        self.algorithm
    }

    pub fn index(&self) -> SpatialIndexKind {
        self.index
    }
}

impl ParamBuilder {
    /// Sets the maximum number of points stored in a leaf of the spatial index. Larger
    /// leaves mean a shallower tree and more brute force distance computations per base case.
    /// Values below 1 are raised to 1. Defaults to 1.
    ///
    /// # Parameters
    /// * leaf_size - the leaf size
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn leaf_size(mut self, leaf_size: usize) -> ParamBuilder {
        let valid_leaf_size =
            ParamBuilder::validate_input_left_bound(leaf_size, LEAF_SIZE_MINIMUM, "leaf_size");
        self.leaf_size = Some(valid_leaf_size);
        self
    }

    /// Forces the exhaustive pairwise algorithm when true, or the dual-tree algorithm when
    /// false. Shorthand for `algorithm` with `EmstAlgorithm::Naive` or
    /// `EmstAlgorithm::DualTreeBoruvka`.
    ///
    /// # Parameters
    /// * use_naive - whether to scan all pairs of points every round
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn use_naive(mut self, use_naive: bool) -> ParamBuilder {
        self.algorithm = Some(if use_naive {
            EmstAlgorithm::Naive
        } else {
            EmstAlgorithm::DualTreeBoruvka
        });
        self
    }

    /// Sets the spanning tree algorithm. The primary reason for changing this parameter is
    /// performance or cross-checking, as every algorithm produces exactly the same tree.
    /// Defaults to Auto, whereby the algorithm is chosen internally based on the number of
    /// points.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn algorithm(mut self, algorithm: EmstAlgorithm) -> ParamBuilder {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets the spatial index used by the dual-tree algorithm. Ignored by the naive
    /// algorithm. Defaults to a kd-tree.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn index(mut self, index: SpatialIndexKind) -> ParamBuilder {
        self.index = Some(index);
        self
    }

    /// Finishes the building of the parameter configuration. A call to this method is
    /// required to exit the builder pattern and complete the construction of the parameters.
    ///
    /// # Returns
    /// * The completed parameter configuration.
    pub fn build(self) -> EmstParams {
        EmstParams {
            leaf_size: self.leaf_size.unwrap_or(LEAF_SIZE_DEFAULT),
            algorithm: self.algorithm.unwrap_or(ALGORITHM_DEFAULT),
            index: self.index.unwrap_or(INDEX_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: usize, left_bound: usize, param: &str) -> usize {
        if input_param < left_bound {
            log::warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
