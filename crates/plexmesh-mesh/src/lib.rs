//! Unstructured mesh storage for finite-volume solvers.
//!
//! This crate defines the [`CellType`] catalog of supported shapes and
//! [`StaticMesh`], a fixed-size bundle of geometry, meta, and connectivity
//! tables backed by [`plexmesh_buffer::TypedArray`].
//!
//! # Tables
//!
//! - geometry (`f64`): `ndcrd`, `fccnd`, `fcnml`, `fcara`, `clcnd`, `clvol`
//! - meta (`i32`): `fctpn`, `cltpn`, `clgrp`
//! - connectivity (`i32`, padded with [`INVALID_INDEX`]): `fcnds`, `fccls`,
//!   `clnds`, `clfcs`
//!
//! Populating the tables (mesh generation, file import) and computing
//! derived geometry are left to collaborators.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod celltype;
pub mod config;
pub mod error;
pub mod mesh;

pub use celltype::{CellType, CLNFC_MAX, CLNND_MAX, FCNCL_MAX, FCNND_MAX, NTYPE};
pub use config::MeshConfig;
pub use error::MeshError;
pub use mesh::{MeshArray, StaticMesh, TableGroup, TableMut, TableRef, INVALID_INDEX};
