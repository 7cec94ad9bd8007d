//! Error types for buffer, array, and plex operations.
//!
//! Every failure is detected locally and synchronously. None of them is
//! worth retrying: the caller has to correct its arguments.

use std::error::Error;
use std::fmt;

use crate::dtype::{DataKind, DataType};
use crate::shape::Shape;

/// Errors from raw buffer allocation, typed array access, and array plex
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide the requested bytes.
    AllocationFailed {
        /// Number of bytes requested, or `None` when the byte count does
        /// not fit in `usize`.
        requested: Option<usize>,
    },
    /// A dtype name outside the supported enumeration.
    UnsupportedDatatype {
        /// The rejected name.
        name: String,
    },
    /// A fill value whose kind does not match the dtype family.
    TypeMismatch {
        /// Family the destination dtype accepts.
        expected: DataKind,
        /// Family of the supplied value.
        found: DataKind,
    },
    /// A typed view was requested for a different element type than the
    /// one the array holds.
    DtypeMismatch {
        /// Element type of the array.
        actual: DataType,
        /// Element type that was requested.
        requested: DataType,
    },
    /// An indexed access outside the shape bounds.
    OutOfRange {
        /// The offending coordinate.
        index: Shape,
        /// Shape of the array.
        shape: Shape,
    },
    /// A coordinate whose rank does not match the array rank.
    RankMismatch {
        /// Rank of the array.
        expected: usize,
        /// Rank of the supplied coordinate.
        actual: usize,
    },
    /// A shape argument that cannot be interpreted.
    InvalidShape {
        /// What went wrong.
        reason: String,
    },
    /// Byte length of a buffer disagrees with `product(shape) * itemsize`.
    BufferSizeMismatch {
        /// Byte length required by the shape and dtype.
        expected: usize,
        /// Byte length of the supplied buffer.
        actual: usize,
    },
    /// Foreign memory is not aligned for the element type.
    Misaligned {
        /// Required alignment in bytes.
        align: usize,
    },
    /// Foreign memory holds bytes that are not valid for the element type.
    InvalidBitPattern {
        /// The element type that rejected the bytes.
        dtype: DataType,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                requested: Some(bytes),
            } => write!(f, "failed to allocate {bytes} bytes"),
            Self::AllocationFailed { requested: None } => {
                write!(f, "failed to allocate: byte count overflows usize")
            }
            Self::UnsupportedDatatype { name } => write!(f, "unsupported datatype '{name}'"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "data type mismatch, expected {expected} value, got {found}")
            }
            Self::DtypeMismatch { actual, requested } => {
                write!(f, "array holds {actual}, requested {requested}")
            }
            Self::OutOfRange { index, shape } => {
                write!(
                    f,
                    "index {:?} out of range for shape {:?}",
                    index.as_slice(),
                    shape.as_slice()
                )
            }
            Self::RankMismatch { expected, actual } => {
                write!(f, "expected a rank-{expected} index, got rank {actual}")
            }
            Self::InvalidShape { reason } => write!(f, "invalid shape: {reason}"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer holds {actual} bytes, shape and dtype require {expected}"
                )
            }
            Self::Misaligned { align } => {
                write!(f, "buffer is not aligned to {align} bytes")
            }
            Self::InvalidBitPattern { dtype } => {
                write!(f, "buffer contains bytes that are not valid {dtype} values")
            }
        }
    }
}

impl Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn display_mentions_mismatch() {
        let err = BufferError::TypeMismatch {
            expected: DataKind::Bool,
            found: DataKind::Integer,
        };
        assert_eq!(
            err.to_string(),
            "data type mismatch, expected bool value, got int"
        );
    }

    #[test]
    fn display_out_of_range() {
        let err = BufferError::OutOfRange {
            index: smallvec![3, 0],
            shape: smallvec![3, 2],
        };
        assert_eq!(
            err.to_string(),
            "index [3, 0] out of range for shape [3, 2]"
        );
    }

    #[test]
    fn display_overflowed_allocation() {
        let err = BufferError::AllocationFailed { requested: None };
        assert!(err.to_string().contains("overflows"));
    }
}
