//! plexmesh: dtype-erased arrays and fixed-size unstructured mesh storage.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! plexmesh sub-crates. For most users, adding `plexmesh` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use plexmesh::prelude::*;
//!
//! // A runtime-typed array, chosen by dtype name.
//! let mut plex = ArrayPlex::with_value(&[2, 3], 1.5, "float64").unwrap();
//! assert_eq!(plex.data_type(), DataType::Float64);
//!
//! // Filling with the wrong kind of value fails and leaves the data alone.
//! assert!(matches!(plex.fill(1i32), Err(BufferError::TypeMismatch { .. })));
//!
//! // A typed copy never aliases the plex.
//! let typed: TypedArray<f64> = plex.typed().unwrap();
//! assert_eq!(typed.as_slice(), &[1.5; 6]);
//!
//! // A planar mesh: 4 nodes, 5 faces, 2 cells, 4 boundary faces.
//! let mut mesh = StaticMesh::new(2, 4, 5, 2, 4).unwrap();
//! mesh.cltpn_mut().fill(CellType::TRIANGLE.id());
//! assert_eq!(mesh.clnds().shape(), &[2, 8]);
//! assert_eq!(mesh.cell_type(1).unwrap(), CellType::TRIANGLE);
//! assert_eq!(mesh.clnds().get(&[0, 0]).unwrap(), INVALID_INDEX);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plexmesh-core` | Dtypes, shapes, fill values, `BufferError` |
//! | [`buffer`] | `plexmesh-buffer` | `RawBuffer`, `TypedArray`, `ArrayPlex`, foreign arrays |
//! | [`mesh`] | `plexmesh-mesh` | Cell-type catalog and `StaticMesh` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Dtypes, shapes, fill values, and buffer errors (`plexmesh-core`).
pub use plexmesh_core as types;

/// Raw buffers, typed arrays, and the array plex (`plexmesh-buffer`).
///
/// Most users only need [`buffer::ArrayPlex`] and [`buffer::TypedArray`],
/// which are also available in the [`prelude`].
pub use plexmesh_buffer as buffer;

/// Cell-type catalog and fixed-size mesh tables (`plexmesh-mesh`).
pub use plexmesh_mesh as mesh;

/// Common imports for typical plexmesh usage.
///
/// ```rust
/// use plexmesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use plexmesh_core::{BufferError, DataKind, DataType, FillValue, ShapeArg};

    // Arrays
    pub use plexmesh_buffer::{ArrayPlex, Element, ForeignArray, TypedArray};

    // Mesh
    pub use plexmesh_mesh::{
        CellType, MeshArray, MeshConfig, MeshError, StaticMesh, INVALID_INDEX,
    };
}
