//! Low-level primitives for raw memory.
//!
//! Pointer arithmetic and allocator calls live here; the rest of the crate
//! only opts into `unsafe` at the few sites that call these helpers. Every
//! `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

use plexmesh_core::BufferError;

/// Byte alignment of every owned allocation.
///
/// Large enough for any supported element type and for 512-bit SIMD loads.
pub(crate) const ALIGN: usize = 64;

/// An allocation obtained from the global allocator.
///
/// Carries the pointer together with the layout it was allocated with, so
/// freeing it needs no further bookkeeping.
pub(crate) struct Allocation {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: the allocation is plain bytes with no thread affinity; ownership
// moves with the value and `free` consumes it.
unsafe impl Send for Allocation {}

impl Allocation {
    /// Allocate `len` zeroed bytes aligned to [`ALIGN`].
    ///
    /// Zero-length requests return a dangling, well-aligned pointer and never
    /// touch the allocator.
    pub(crate) fn zeroed(len: usize) -> Result<Self, BufferError> {
        let layout = Layout::from_size_align(len, ALIGN).map_err(|_| {
            BufferError::AllocationFailed {
                requested: Some(len),
            }
        })?;
        if len == 0 {
            return Ok(Self {
                ptr: dangling(),
                layout,
            });
        }
        // SAFETY: layout has non-zero size (checked above).
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(BufferError::AllocationFailed {
            requested: Some(len),
        })?;
        Ok(Self { ptr, layout })
    }

    pub(crate) fn ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Return the memory to the allocator.
    pub(crate) fn free(self) {
        if self.layout.size() == 0 {
            return;
        }
        // SAFETY: ptr was returned by `alloc_zeroed` with exactly this layout
        // and `self` is consumed, so it cannot be freed twice.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

/// A non-null pointer aligned to [`ALIGN`] for zero-length regions.
pub(crate) fn dangling() -> NonNull<u8> {
    // ALIGN is non-zero, so the pointer is non-null.
    NonNull::new(std::ptr::without_provenance_mut::<u8>(ALIGN)).unwrap_or(NonNull::dangling())
}

/// View `len` bytes at `ptr` as a shared slice.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` initialised bytes for the
/// lifetime `'a`, and nothing may write through another pointer meanwhile.
pub(crate) unsafe fn bytes<'a>(ptr: NonNull<u8>, len: usize) -> &'a [u8] {
    // SAFETY: forwarded to the caller.
    unsafe { std::slice::from_raw_parts(ptr.as_ptr(), len) }
}

/// View `len` bytes at `ptr` as a mutable slice.
///
/// # Safety
///
/// As [`bytes`], plus `ptr` must be valid for writes and the returned slice
/// must be the only live reference to the region.
pub(crate) unsafe fn bytes_mut<'a>(ptr: NonNull<u8>, len: usize) -> &'a mut [u8] {
    // SAFETY: forwarded to the caller.
    unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), len) }
}

/// View `count` elements of `T` at `ptr`.
///
/// # Safety
///
/// `ptr` must be aligned for `T` and valid for reads of `count` elements
/// that are valid bit patterns of `T`, for the lifetime `'a`.
pub(crate) unsafe fn elements<'a, T>(ptr: NonNull<u8>, count: usize) -> &'a [T] {
    // SAFETY: forwarded to the caller.
    unsafe { std::slice::from_raw_parts(ptr.as_ptr().cast::<T>(), count) }
}

/// Mutable counterpart of [`elements`].
///
/// # Safety
///
/// As [`elements`], plus exclusive write access for `'a`.
pub(crate) unsafe fn elements_mut<'a, T>(ptr: NonNull<u8>, count: usize) -> &'a mut [T] {
    // SAFETY: forwarded to the caller.
    unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr().cast::<T>(), count) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_allocation_is_aligned_and_zero() {
        let a = Allocation::zeroed(100).unwrap();
        assert_eq!(a.ptr().as_ptr() as usize % ALIGN, 0);
        // SAFETY: 100 zeroed bytes were just allocated.
        let view = unsafe { bytes(a.ptr(), 100) };
        assert!(view.iter().all(|&b| b == 0));
        a.free();
    }

    #[test]
    fn zero_length_skips_allocator() {
        let a = Allocation::zeroed(0).unwrap();
        assert_eq!(a.ptr().as_ptr() as usize, ALIGN);
        a.free();
    }

    #[test]
    fn impossible_layout_is_an_error() {
        let err = Allocation::zeroed(usize::MAX).err().unwrap();
        assert_eq!(
            err,
            BufferError::AllocationFailed {
                requested: Some(usize::MAX)
            }
        );
    }
}
