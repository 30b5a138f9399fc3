use thiserror::Error;

/// Possible errors that arise due to issues with EMST input data, or with the internal
/// consistency of a computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmstError {
    /// A spanning tree needs at least two points. Carries the number of points supplied.
    #[error("At least 2 points are required to build a spanning tree, but {0} were provided")]
    TooFewPoints(usize),
    #[error("Input vectors have mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    /// The points are spread so far apart that distances between them are not representable.
    #[error("Coordinate range too large: {0}")]
    CoordinateRangeTooLarge(String),
    /// Should never occur. Signals a bug in a spatial index bound or in the pruning rules,
    /// and aborts the computation instead of returning a wrong tree.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}
