//! Errors raised while shaping input into a chart payload.

use thiserror::Error;

/// Reasons an input cannot produce a chart payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The input contains no samples.
    #[error("input contains no samples")]
    EmptyInput,
    /// A flat coordinate buffer must hold `x, y` pairs.
    #[error("coordinate buffer has odd length {0}")]
    OddCoordinateBuffer(usize),
    /// At least two dimensions are needed to plot one against another.
    #[error("need at least 2 dimensions, found {0}")]
    TooFewDimensions(usize),
    /// A requested dimension index does not exist.
    #[error("dimension {index} out of range for {count} dimensions")]
    DimensionOutOfRange {
        /// Requested dimension.
        index: usize,
        /// Dimensions available.
        count: usize,
    },
    /// The value count is not a multiple of the dimension count.
    #[error("{values} values do not divide into rows of {dimensions}")]
    RaggedBuffer {
        /// Total values in the buffer.
        values: usize,
        /// Dimensions per row.
        dimensions: usize,
    },
}
