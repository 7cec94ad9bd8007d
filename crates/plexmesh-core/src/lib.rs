//! Core types for the plexmesh array engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other plexmesh crate: the closed set of
//! supported element types ([`DataType`]), the kinds of fill values a
//! loosely-typed caller may supply ([`FillValue`]), array shapes
//! ([`Shape`], [`ShapeArg`]), and the buffer error taxonomy
//! ([`BufferError`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dtype;
pub mod error;
pub mod shape;
pub mod value;

pub use dtype::{DataKind, DataType};
pub use error::BufferError;
pub use shape::{element_count, parse_shape, row_major_strides, Shape, ShapeArg};
pub use value::FillValue;
