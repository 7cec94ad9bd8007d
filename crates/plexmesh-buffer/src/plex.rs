//! The dtype-erased array handle.
//!
//! [`ArrayPlex`] is a closed tagged union with one variant per supported
//! dtype. The variant *is* the dtype tag, so the tag can never disagree with
//! the owned array and can never change after construction. Every operation
//! that needs the concrete type goes through [`dispatch_plex!`], whose
//! `match` lists all variants; adding a dtype breaks the build until each
//! dispatch site handles it.

use std::ptr::NonNull;

use plexmesh_core::{parse_shape, BufferError, DataType, FillValue, ShapeArg};

use crate::array::TypedArray;
use crate::buffer::RawBuffer;
use crate::element::Element;
use crate::foreign::ForeignArray;
use crate::raw;

/// Run `$body` with `$array` bound to the typed array inside `$plex`.
///
/// `$plex` may be an `ArrayPlex`, `&ArrayPlex`, or `&mut ArrayPlex`; the
/// binding follows the usual match ergonomics. `$body` is instantiated once
/// per element type, so it must type-check for all of them.
#[macro_export]
macro_rules! dispatch_plex {
    ($plex:expr, $array:ident => $body:expr) => {
        match $plex {
            $crate::ArrayPlex::Bool($array) => $body,
            $crate::ArrayPlex::Int8($array) => $body,
            $crate::ArrayPlex::Int16($array) => $body,
            $crate::ArrayPlex::Int32($array) => $body,
            $crate::ArrayPlex::Int64($array) => $body,
            $crate::ArrayPlex::Uint8($array) => $body,
            $crate::ArrayPlex::Uint16($array) => $body,
            $crate::ArrayPlex::Uint32($array) => $body,
            $crate::ArrayPlex::Uint64($array) => $body,
            $crate::ArrayPlex::Float32($array) => $body,
            $crate::ArrayPlex::Float64($array) => $body,
        }
    };
}

/// A runtime-typed array owning exactly one [`TypedArray<T>`].
#[derive(Debug)]
pub enum ArrayPlex {
    /// `bool` elements.
    Bool(TypedArray<bool>),
    /// `i8` elements.
    Int8(TypedArray<i8>),
    /// `i16` elements.
    Int16(TypedArray<i16>),
    /// `i32` elements.
    Int32(TypedArray<i32>),
    /// `i64` elements.
    Int64(TypedArray<i64>),
    /// `u8` elements.
    Uint8(TypedArray<u8>),
    /// `u16` elements.
    Uint16(TypedArray<u16>),
    /// `u32` elements.
    Uint32(TypedArray<u32>),
    /// `u64` elements.
    Uint64(TypedArray<u64>),
    /// `f32` elements.
    Float32(TypedArray<f32>),
    /// `f64` elements.
    Float64(TypedArray<f64>),
}

fn alloc<T: Element>(shape: &[usize]) -> Result<ArrayPlex, BufferError> {
    TypedArray::<T>::new(shape).map(T::into_plex)
}

fn adopt<T: Element>(shape: &[usize], buffer: RawBuffer) -> Result<ArrayPlex, BufferError> {
    TypedArray::<T>::from_buffer(shape, buffer).map(T::into_plex)
}

impl ArrayPlex {
    /// Allocate a zeroed array of the dtype named `dtype`.
    ///
    /// Fails with [`BufferError::UnsupportedDatatype`] if the name is not
    /// one of the supported spellings.
    pub fn new(shape: &[usize], dtype: &str) -> Result<Self, BufferError> {
        Self::with_dtype(shape, DataType::from_name(dtype)?)
    }

    /// Allocate a zeroed array of `dtype`.
    pub fn with_dtype(shape: &[usize], dtype: DataType) -> Result<Self, BufferError> {
        match dtype {
            DataType::Bool => alloc::<bool>(shape),
            DataType::Int8 => alloc::<i8>(shape),
            DataType::Int16 => alloc::<i16>(shape),
            DataType::Int32 => alloc::<i32>(shape),
            DataType::Int64 => alloc::<i64>(shape),
            DataType::Uint8 => alloc::<u8>(shape),
            DataType::Uint16 => alloc::<u16>(shape),
            DataType::Uint32 => alloc::<u32>(shape),
            DataType::Uint64 => alloc::<u64>(shape),
            DataType::Float32 => alloc::<f32>(shape),
            DataType::Float64 => alloc::<f64>(shape),
        }
    }

    /// Allocate an array of the dtype named `dtype` filled with `value`.
    ///
    /// The value's kind is checked against the dtype family before any
    /// memory is allocated: booleans only for `bool`, integers only for the
    /// integer dtypes (narrowed with wraparound), floats only for the float
    /// dtypes. A mismatch fails with [`BufferError::TypeMismatch`] and
    /// produces no array.
    pub fn with_value(
        shape: &[usize],
        value: impl Into<FillValue>,
        dtype: &str,
    ) -> Result<Self, BufferError> {
        let dtype = DataType::from_name(dtype)?;
        let value = value.into();
        value.check(dtype)?;
        let mut plex = Self::with_dtype(shape, dtype)?;
        plex.fill(value)?;
        Ok(plex)
    }

    /// [`ArrayPlex::new`] for a loosely-typed shape argument.
    pub fn from_shape_arg(shape: &ShapeArg, dtype: &str) -> Result<Self, BufferError> {
        Self::new(&parse_shape(shape)?, dtype)
    }

    /// [`ArrayPlex::with_value`] for a loosely-typed shape argument.
    pub fn from_shape_arg_with_value(
        shape: &ShapeArg,
        value: impl Into<FillValue>,
        dtype: &str,
    ) -> Result<Self, BufferError> {
        Self::with_value(&parse_shape(shape)?, value, dtype)
    }

    /// Interpret `buffer` as an array of `dtype` without copying.
    pub fn from_buffer(
        shape: &[usize],
        buffer: RawBuffer,
        dtype: DataType,
    ) -> Result<Self, BufferError> {
        match dtype {
            DataType::Bool => adopt::<bool>(shape, buffer),
            DataType::Int8 => adopt::<i8>(shape, buffer),
            DataType::Int16 => adopt::<i16>(shape, buffer),
            DataType::Int32 => adopt::<i32>(shape, buffer),
            DataType::Int64 => adopt::<i64>(shape, buffer),
            DataType::Uint8 => adopt::<u8>(shape, buffer),
            DataType::Uint16 => adopt::<u16>(shape, buffer),
            DataType::Uint32 => adopt::<u32>(shape, buffer),
            DataType::Uint64 => adopt::<u64>(shape, buffer),
            DataType::Float32 => adopt::<f32>(shape, buffer),
            DataType::Float64 => adopt::<f64>(shape, buffer),
        }
    }

    /// Wrap foreign memory without copying.
    ///
    /// `release` runs exactly once: when the plex is dropped, or before
    /// this function returns if the dtype name or the buffer is rejected.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawBuffer::wrap`].
    #[allow(unsafe_code)]
    pub unsafe fn from_raw_parts(
        shape: &[usize],
        ptr: NonNull<u8>,
        nbytes: usize,
        dtype: &str,
        release: impl FnOnce() + Send + 'static,
    ) -> Result<Self, BufferError> {
        // SAFETY: forwarded to the caller.
        let buffer = unsafe { RawBuffer::wrap(nbytes, ptr, release) };
        let dtype = DataType::from_name(dtype)?;
        Self::from_buffer(shape, buffer, dtype)
    }

    /// Borrow a foreign array's memory, taking shape and dtype from it.
    ///
    /// No data is copied. The foreign handle is kept alive inside the
    /// plex and dropped exactly once, when the plex is dropped (or right
    /// away if the foreign array is rejected).
    #[allow(unsafe_code)]
    pub fn from_foreign<F: ForeignArray>(mut foreign: F) -> Result<Self, BufferError> {
        let shape = foreign.shape();
        let dtype = foreign.dtype_name();
        // A null pointer holds no bytes; validation then measures the shape
        // against an empty region.
        let (ptr, nbytes) = match NonNull::new(foreign.data_ptr()) {
            Some(ptr) => (ptr, foreign.nbytes()),
            None => (raw::dangling(), 0),
        };
        tracing::debug!(dtype = %dtype, ?shape, nbytes, "wrapping foreign array");
        // SAFETY: `ForeignArray` guarantees the region stays valid and
        // unaliased while `foreign` lives, and `foreign` lives inside the
        // release closure until the buffer is dropped.
        unsafe {
            Self::from_raw_parts(&shape, ptr, nbytes, &dtype, move || {
                tracing::debug!(nbytes, "releasing foreign array");
                drop(foreign);
            })
        }
    }

    /// Runtime dtype tag.
    pub fn data_type(&self) -> DataType {
        dispatch_plex!(self, array => array.data_type())
    }

    /// Shape of the owned array.
    pub fn shape(&self) -> &[usize] {
        dispatch_plex!(self, array => array.shape())
    }

    /// Rank of the owned array.
    pub fn ndim(&self) -> usize {
        dispatch_plex!(self, array => array.ndim())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        dispatch_plex!(self, array => array.len())
    }

    /// Whether the array holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the data in bytes.
    pub fn nbytes(&self) -> usize {
        dispatch_plex!(self, array => array.nbytes())
    }

    /// Whether the backing memory was allocated by this crate.
    pub fn is_owned(&self) -> bool {
        dispatch_plex!(self, array => array.is_owned())
    }

    /// The elements as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        dispatch_plex!(self, array => array.as_bytes())
    }

    /// Set every element from a loosely-typed value.
    ///
    /// Fails with [`BufferError::TypeMismatch`], leaving the array
    /// untouched, if the value's kind does not match the dtype family.
    pub fn fill(&mut self, value: impl Into<FillValue>) -> Result<(), BufferError> {
        let value = value.into();
        dispatch_plex!(self, array => array.fill_value(value))
    }

    /// A fresh, owning copy of the array as `TypedArray<T>`.
    ///
    /// The copy never shares storage with the plex. Fails with
    /// [`BufferError::DtypeMismatch`] if `T` is not the plex's element type.
    pub fn typed<T: Element>(&self) -> Result<TypedArray<T>, BufferError> {
        self.as_typed::<T>()
            .ok_or(BufferError::DtypeMismatch {
                actual: self.data_type(),
                requested: T::DATA_TYPE,
            })?
            .try_clone()
    }

    /// Borrow the owned array as `TypedArray<T>`, if `T` matches.
    pub fn as_typed<T: Element>(&self) -> Option<&TypedArray<T>> {
        T::from_plex(self)
    }

    /// Mutably borrow the owned array as `TypedArray<T>`, if `T` matches.
    pub fn as_typed_mut<T: Element>(&mut self) -> Option<&mut TypedArray<T>> {
        T::from_plex_mut(self)
    }

    /// Take the owned array out as `TypedArray<T>`, or get `self` back.
    pub fn into_typed<T: Element>(self) -> Result<TypedArray<T>, Self> {
        T::unwrap_plex(self)
    }

    /// Deep copy into a fresh owning plex of the same dtype.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        dispatch_plex!(self, array => array.try_clone().map(ArrayPlex::from))
    }
}

impl<T: Element> From<TypedArray<T>> for ArrayPlex {
    fn from(array: TypedArray<T>) -> Self {
        T::into_plex(array)
    }
}
