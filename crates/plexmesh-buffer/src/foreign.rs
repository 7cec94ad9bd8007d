//! Arrays owned by a foreign runtime.
//!
//! A binding layer implements [`ForeignArray`] for its host's array handle
//! (a reference-counted object, typically). [`ArrayPlex::from_foreign`]
//! then borrows the handle's memory without copying and moves the handle
//! itself into the buffer's release capability: dropping the plex drops
//! the handle, which is how the host's reference count gets decremented.
//!
//! [`ArrayPlex::from_foreign`]: crate::ArrayPlex::from_foreign

/// A contiguous, C-ordered array whose memory belongs to a foreign runtime.
///
/// # Safety
///
/// Implementors guarantee that, for as long as the value is alive (moving
/// it included), [`data_ptr`](ForeignArray::data_ptr) points to
/// [`nbytes`](ForeignArray::nbytes) initialised bytes laid out as a
/// row-major array of [`shape`](ForeignArray::shape) elements of
/// [`dtype_name`](ForeignArray::dtype_name), and that nothing else reads
/// or writes that memory meanwhile. A null pointer is read as an empty data
/// region whatever `nbytes` reports.
#[allow(unsafe_code)]
pub unsafe trait ForeignArray: Send + 'static {
    /// Dimension sizes.
    fn shape(&self) -> Vec<usize>;

    /// Dtype name in the external spelling (`"float64"`, `"int32"`, ...).
    fn dtype_name(&self) -> String;

    /// Byte length of the data region.
    fn nbytes(&self) -> usize;

    /// Pointer to the first byte of the data region.
    fn data_ptr(&mut self) -> *mut u8;
}
