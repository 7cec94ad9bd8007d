//! Test utilities and mock types for plexmesh development.
//!
//! Provides [`MockForeignArray`], a stand-in for an array object owned by a
//! foreign runtime, and mesh fixtures in [`fixtures`].

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::two_triangle_mesh;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use plexmesh_buffer::ForeignArray;

/// A foreign-array double with a shared release counter.
///
/// Data lives in a `Vec<u64>`, so the region is 8-byte aligned unless
/// [`misaligned`](MockForeignArray::misaligned) shifts it. Dropping the mock
/// increments the counter returned by
/// [`release_counter`](MockForeignArray::release_counter), which is how
/// tests observe that a wrapping buffer released its foreign handle exactly
/// once.
pub struct MockForeignArray {
    storage: Vec<u64>,
    offset: usize,
    shape: Vec<usize>,
    dtype: String,
    nbytes: usize,
    null_data: bool,
    released: Arc<AtomicUsize>,
}

impl MockForeignArray {
    /// Build a mock holding a copy of `bytes`.
    pub fn new(shape: &[usize], dtype: &str, bytes: &[u8]) -> Self {
        // One spare word so `misaligned` can shift the data by a byte.
        let words = bytes.len().div_ceil(8) + 1;
        let mut storage = vec![0u64; words];
        bytemuck::cast_slice_mut::<u64, u8>(&mut storage)[..bytes.len()].copy_from_slice(bytes);
        Self {
            storage,
            offset: 0,
            shape: shape.to_vec(),
            dtype: dtype.to_string(),
            nbytes: bytes.len(),
            null_data: false,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Build a mock holding a copy of `data`.
    pub fn from_slice<T: bytemuck::NoUninit>(shape: &[usize], dtype: &str, data: &[T]) -> Self {
        Self::new(shape, dtype, bytemuck::cast_slice(data))
    }

    /// Report `nbytes` as the byte length.
    ///
    /// Panics if `nbytes` exceeds the stored data, which would let the
    /// wrapping buffer read past the allocation.
    pub fn with_reported_nbytes(mut self, nbytes: usize) -> Self {
        assert!(nbytes <= self.nbytes, "cannot report more bytes than stored");
        self.nbytes = nbytes;
        self
    }

    /// Shift the data one byte past the aligned start of the storage.
    pub fn misaligned(mut self) -> Self {
        let bytes = bytemuck::cast_slice_mut::<u64, u8>(&mut self.storage);
        bytes.copy_within(..self.nbytes, 1);
        self.offset = 1;
        self
    }

    /// Hand out a null data pointer while still reporting the stored length.
    pub fn with_null_data(mut self) -> Self {
        self.null_data = true;
        self
    }

    /// Counter incremented when this mock is dropped.
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.released)
    }

    /// Current bytes of the data region.
    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.storage)[self.offset..self.offset + self.nbytes]
    }
}

impl Drop for MockForeignArray {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

// SAFETY: the storage `Vec` is never resized, so its heap region stays put
// when the mock moves, and `nbytes` never exceeds the bytes stored past
// `offset`. The mock hands out no other access while a buffer wraps it.
#[allow(unsafe_code)]
unsafe impl ForeignArray for MockForeignArray {
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn dtype_name(&self) -> String {
        self.dtype.clone()
    }

    fn nbytes(&self) -> usize {
        self.nbytes
    }

    fn data_ptr(&mut self) -> *mut u8 {
        if self.null_data {
            return std::ptr::null_mut();
        }
        bytemuck::cast_slice_mut::<u64, u8>(&mut self.storage)[self.offset..].as_mut_ptr()
    }
}
