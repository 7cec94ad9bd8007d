//! Error types for mesh construction and table access.

use plexmesh_core::BufferError;
use std::error::Error;
use std::fmt;

/// Errors arising from mesh construction, table lookup, or topology queries.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshError {
    /// The mesh dimensionality is not 2 or 3.
    InvalidDimension {
        /// The rejected dimensionality.
        ndim: usize,
    },
    /// A count does not fit the `i32` indices stored in connectivity tables.
    CountOverflow {
        /// Which count.
        name: &'static str,
        /// The requested value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
    /// Allocating or accessing a table failed.
    Buffer(BufferError),
    /// No table has this name.
    UnknownTable {
        /// The name that was looked up.
        name: String,
    },
    /// A type table holds an id that is unknown or illegal for the mesh.
    IllegalCellType {
        /// `"fctpn"` or `"cltpn"`.
        table: &'static str,
        /// Row of the offending entry.
        index: usize,
        /// The stored id.
        id: i32,
        /// Dimensionality of the mesh.
        ndim: usize,
    },
    /// A node, face, or cell index is past the end of its table.
    IndexOutOfRange {
        /// `"node"`, `"face"`, or `"cell"`.
        what: &'static str,
        /// The requested index.
        index: usize,
        /// Number of entries.
        len: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { ndim } => {
                write!(f, "mesh dimensionality must be 2 or 3, got {ndim}")
            }
            Self::CountOverflow { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::Buffer(e) => write!(f, "table storage: {e}"),
            Self::UnknownTable { name } => write!(f, "no mesh table named '{name}'"),
            Self::IllegalCellType {
                table,
                index,
                id,
                ndim,
            } => write!(
                f,
                "{table}[{index}] holds type id {id}, not a legal shape for a {ndim}-D mesh"
            ),
            Self::IndexOutOfRange { what, index, len } => {
                write!(f, "{what} index {index} out of range (0..{len})")
            }
        }
    }
}

impl Error for MeshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Buffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for MeshError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_errors_convert_and_chain() {
        let err: MeshError = BufferError::AllocationFailed {
            requested: Some(8),
        }
        .into();
        assert!(matches!(err, MeshError::Buffer(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = MeshError::UnknownTable {
            name: "ndcrds".into(),
        };
        assert_eq!(err.to_string(), "no mesh table named 'ndcrds'");
        let err = MeshError::InvalidDimension { ndim: 4 };
        assert!(err.to_string().contains("got 4"));
    }
}
