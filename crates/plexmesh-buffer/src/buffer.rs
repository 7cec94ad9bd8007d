//! Contiguous byte regions with a single release obligation.
//!
//! A [`RawBuffer`] is the physical backing store of exactly one typed
//! array. Whether the bytes came from the global allocator or from a
//! foreign runtime's array object, the buffer carries one [`Release`]
//! capability and invokes it exactly once, on drop. The rest of the crate
//! never needs to know which kind of buffer it holds.

use std::fmt;
use std::ptr::NonNull;

use plexmesh_core::BufferError;

use crate::raw::{self, Allocation};

/// The capability to give a buffer's memory back to whoever provided it.
///
/// For owned buffers this frees the allocation; for borrowed buffers it
/// drops (and thereby decrements) the foreign handle.
pub struct Release(Box<dyn FnOnce() + Send>);

impl Release {
    /// Wrap a callback.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    fn invoke(self) {
        (self.0)()
    }
}

impl fmt::Debug for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Release(..)")
    }
}

/// An owned or borrowed contiguous byte region.
///
/// The length is fixed at construction. `RawBuffer` is not `Clone`: use
/// [`RawBuffer::try_clone`] for an explicit deep copy into a fresh owning
/// buffer.
pub struct RawBuffer {
    ptr: NonNull<u8>,
    len: usize,
    owned: bool,
    release: Option<Release>,
}

// SAFETY: the buffer exclusively owns its region (or, for foreign memory,
// the caller of `wrap` promised exclusive access), and the release
// capability is `Send`.
#[allow(unsafe_code)]
unsafe impl Send for RawBuffer {}

// SAFETY: shared references only permit reads of the region.
#[allow(unsafe_code)]
unsafe impl Sync for RawBuffer {}

impl RawBuffer {
    /// Alignment of every owned allocation, in bytes.
    pub const ALIGN: usize = raw::ALIGN;

    /// Allocate an owning buffer of `len` bytes.
    ///
    /// The content is zeroed, which is a valid bit pattern for every
    /// supported element type. Fails with
    /// [`BufferError::AllocationFailed`] if the allocator cannot satisfy the
    /// request; allocation is all-or-nothing.
    pub fn allocate(len: usize) -> Result<Self, BufferError> {
        let allocation = Allocation::zeroed(len)?;
        let ptr = allocation.ptr();
        tracing::trace!(bytes = len, "allocated raw buffer");
        Ok(Self {
            ptr,
            len,
            owned: true,
            release: Some(Release::new(move || allocation.free())),
        })
    }

    /// Borrow `len` bytes of foreign memory at `ptr`.
    ///
    /// `release` runs exactly once, when the returned buffer is dropped,
    /// instead of freeing memory.
    ///
    /// # Safety
    ///
    /// Until `release` has run, `ptr` must be valid for reads and writes of
    /// `len` initialised bytes, and no other code may access the region.
    #[allow(unsafe_code)]
    pub unsafe fn wrap(len: usize, ptr: NonNull<u8>, release: impl FnOnce() + Send + 'static) -> Self {
        tracing::trace!(bytes = len, "wrapped foreign buffer");
        Self {
            ptr,
            len,
            owned: false,
            release: Some(Release::new(release)),
        }
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the memory came from this crate's allocator.
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Pointer to the first byte.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn non_null(&self) -> NonNull<u8> {
        self.ptr
    }

    /// The region as bytes.
    #[allow(unsafe_code)]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the region is valid for `len` bytes for as long as `self`
        // lives (owned allocation, or the `wrap` contract).
        unsafe { raw::bytes(self.ptr, self.len) }
    }

    /// The region as mutable bytes.
    #[allow(unsafe_code)]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as `as_bytes`; `&mut self` guarantees exclusivity.
        unsafe { raw::bytes_mut(self.ptr, self.len) }
    }

    /// Deep copy into a fresh owning buffer.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        let mut copy = Self::allocate(self.len)?;
        copy.as_bytes_mut().copy_from_slice(self.as_bytes());
        Ok(copy)
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(bytes = self.len, owned = self.owned, "releasing raw buffer");
            release.invoke();
        }
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("len", &self.len)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn allocate_is_zeroed_and_owned() {
        let buf = RawBuffer::allocate(32).unwrap();
        assert_eq!(buf.len(), 32);
        assert!(buf.is_owned());
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.as_ptr() as usize % RawBuffer::ALIGN, 0);
    }

    #[test]
    fn zero_length_buffer() {
        let buf = RawBuffer::allocate(0).unwrap();
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn writes_are_visible() {
        let mut buf = RawBuffer::allocate(4).unwrap();
        buf.as_bytes_mut().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn wrapped_release_runs_exactly_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut storage = vec![7u8; 16];
        let ptr = NonNull::new(storage.as_mut_ptr()).unwrap();
        let counter = Arc::clone(&released);
        #[allow(unsafe_code)]
        // SAFETY: `storage` outlives the buffer and is not touched meanwhile.
        let buf = unsafe {
            RawBuffer::wrap(16, ptr, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        };
        assert!(!buf.is_owned());
        assert_eq!(buf.as_bytes()[0], 7);
        assert_eq!(released.load(Ordering::SeqCst), 0);
        drop(buf);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        drop(storage);
    }

    #[test]
    fn try_clone_is_owned_and_independent() {
        let mut storage = vec![9u8; 8];
        let ptr = NonNull::new(storage.as_mut_ptr()).unwrap();
        #[allow(unsafe_code)]
        // SAFETY: `storage` outlives the buffer.
        let foreign = unsafe { RawBuffer::wrap(8, ptr, || {}) };
        let mut copy = foreign.try_clone().unwrap();
        assert!(copy.is_owned());
        copy.as_bytes_mut()[0] = 1;
        assert_eq!(foreign.as_bytes()[0], 9);
        drop(foreign);
        drop(storage);
    }

    #[test]
    fn oversized_allocation_fails() {
        let err = RawBuffer::allocate(usize::MAX).unwrap_err();
        assert!(matches!(err, BufferError::AllocationFailed { .. }));
    }
}
