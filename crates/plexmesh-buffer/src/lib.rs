//! Raw buffers, typed arrays, and the dtype-erased array plex.
//!
//! Outside test support, this crate is the only one in the workspace that
//! may contain `unsafe` code. It is confined to the private `raw` helpers
//! and the handful of call sites that turn a pointer into a slice.
//!
//! # Architecture
//!
//! ```text
//! ArrayPlex (one variant per dtype)
//! └── TypedArray<T: Element> (shape, row-major strides)
//!     └── RawBuffer (contiguous bytes + one Release capability)
//!         ├── owned: 64-byte aligned, zeroed, freed on drop
//!         └── borrowed: foreign memory, release callback on drop
//! ```
//!
//! # Ownership
//!
//! Every byte region has exactly one owner. A plex owns its typed array, a
//! typed array owns its buffer, and a buffer invokes its release capability
//! exactly once. Foreign arrays ([`ForeignArray`]) are wrapped without
//! copying; the foreign handle itself moves into the release capability.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod buffer;
pub mod element;
pub mod foreign;
pub mod plex;
mod raw;

// Public re-exports for the primary API surface.
pub use array::TypedArray;
pub use buffer::{RawBuffer, Release};
pub use element::Element;
pub use foreign::ForeignArray;
pub use plex::ArrayPlex;
