//! Error Types for Window Accumulation
//!
//! ## Design Philosophy
//!
//! Every failure the engine can report is fatal for the call that produced it:
//!
//! 1. **Setup errors** (`InvalidConfig`) stop construction. No accumulator exists
//!    afterwards, so there is nothing to clean up.
//!
//! 2. **Per-window errors** (`Shape`) abort the current emission before either
//!    output channel sees anything. The buffers have already advanced, so the
//!    window is lost rather than retried.
//!
//! 3. **Internal failures** (`TimestampCount`, `Range`) mean the engine's own
//!    bookkeeping is broken. They are surfaced as errors instead of panics so the
//!    host decides how to die.
//!
//! 4. **Lifecycle violations** (`Finalized`) reject calls on a drained
//!    accumulator.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use lapwindow_core::WindowError;
//!
//! fn report(err: WindowError) -> &'static str {
//!     match err {
//!         WindowError::InvalidConfig { reason } => reason,
//!         WindowError::Shape(_) => "frames do not share a shape",
//!         WindowError::Finalized => "stream already closed",
//!         _ => "internal failure",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::tensor::Shape;

/// Result type for accumulator operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Shape failures reported by a [`Tensor`](crate::tensor::Tensor) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Trailing dimensions of a concatenation part differ from the first part
    #[error("Shape mismatch at part {index}: expected trailing {expected:?}, found {found:?}")]
    Mismatch {
        /// Position of the offending part in the concatenation list
        index: usize,
        /// Shape of the first part
        expected: Shape,
        /// Shape of the offending part
        found: Shape,
    },

    /// Axis insertion would exceed the supported rank
    #[error("Rank {rank} exceeds the supported maximum of {max}")]
    RankOverflow {
        /// Rank the operation would have produced
        rank: usize,
        /// Largest supported rank
        max: usize,
    },

    /// Reshaping changed the number of elements
    #[error("Element count changed from {before} to {after}")]
    ElementCount {
        /// Elements before the reshape
        before: usize,
        /// Elements after the reshape
        after: usize,
    },

    /// Concatenation of a scalar along axis 0
    #[error("Cannot concatenate rank-0 values")]
    Scalar,

    /// Concatenation of zero parts
    #[error("Nothing to concatenate")]
    Empty,
}

/// Out-of-range ring buffer access
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Index {index} out of range for buffer of length {len}")]
pub struct RangeError {
    /// Requested logical index
    pub index: usize,
    /// Number of buffered elements at the time of access
    pub len: usize,
}

/// Accumulator errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Configuration rejected at construction
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },

    /// Frame could not be reshaped or buffered frames could not be concatenated
    #[error("Shape error: {0}")]
    Shape(ShapeError),

    /// Emitted timestamp list does not hold exactly one entry per slot
    #[error("Window carries {actual} timestamps, expected {expected}")]
    TimestampCount {
        /// Configured buffer size
        expected: usize,
        /// Timestamps actually collected
        actual: usize,
    },

    /// Ring buffer index outside the buffered range
    #[error("Buffer access failed: {0}")]
    Range(RangeError),

    /// Call made after the accumulator was finalized
    #[error("Accumulator already finalized")]
    Finalized,
}

impl From<ShapeError> for WindowError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl From<RangeError> for WindowError {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WindowError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::Shape(_) =>
                defmt::write!(fmt, "Shape error"),
            Self::TimestampCount { expected, actual } =>
                defmt::write!(fmt, "Timestamps {} != {}", actual, expected),
            Self::Range(RangeError { index, len }) =>
                defmt::write!(fmt, "Index {} out of {}", index, len),
            Self::Finalized =>
                defmt::write!(fmt, "Already finalized"),
        }
    }
}
