//! Typed, shaped views over a [`RawBuffer`].
//!
//! A [`TypedArray<T>`] interprets its buffer as a row-major array of `T`
//! with a fixed shape. The invariant `buffer.len() == product(shape) *
//! size_of::<T>()` is established by every constructor and never changes:
//! arrays can be filled and written element-wise, but not resized.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use bytemuck::checked::CheckedCastError;
use bytemuck::PodCastError;
use plexmesh_core::{element_count, row_major_strides, BufferError, DataType, FillValue, Shape};

use crate::buffer::RawBuffer;
use crate::element::Element;
use crate::raw;

/// A strided array of `T` backed by exactly one [`RawBuffer`].
pub struct TypedArray<T: Element> {
    shape: Shape,
    strides: Shape,
    len: usize,
    buffer: RawBuffer,
    _marker: PhantomData<T>,
}

fn byte_len<T: Element>(shape: &[usize]) -> Result<(usize, usize), BufferError> {
    let len = element_count(shape).ok_or(BufferError::AllocationFailed { requested: None })?;
    let bytes = len
        .checked_mul(std::mem::size_of::<T>())
        .ok_or(BufferError::AllocationFailed { requested: None })?;
    Ok((len, bytes))
}

impl<T: Element> TypedArray<T> {
    /// Allocate an owning array of the given shape.
    ///
    /// The content is zeroed (`false`, `0`, or `0.0`).
    pub fn new(shape: &[usize]) -> Result<Self, BufferError> {
        let shape = Shape::from_slice(shape);
        let (len, bytes) = byte_len::<T>(&shape)?;
        let buffer = RawBuffer::allocate(bytes)?;
        Ok(Self {
            strides: row_major_strides(&shape),
            shape,
            len,
            buffer,
            _marker: PhantomData,
        })
    }

    /// Allocate an owning array with every element set to `value`.
    pub fn filled(shape: &[usize], value: T) -> Result<Self, BufferError> {
        let mut array = Self::new(shape)?;
        array.fill(value);
        Ok(array)
    }

    /// Copy `data` into a new owning array of the given shape.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self, BufferError> {
        let shape = Shape::from_slice(shape);
        let (len, bytes) = byte_len::<T>(&shape)?;
        if data.len() != len {
            return Err(BufferError::BufferSizeMismatch {
                expected: bytes,
                actual: data.len() * std::mem::size_of::<T>(),
            });
        }
        let mut array = Self::new(&shape)?;
        array.as_mut_slice().copy_from_slice(&data);
        Ok(array)
    }

    /// Interpret an existing buffer as an array of the given shape.
    ///
    /// Checks that the byte length matches the shape, that the memory is
    /// aligned for `T`, and that every element is a valid `T` (only `bool`
    /// can fail this last check). On failure the buffer is dropped, which
    /// runs its release exactly once.
    pub fn from_buffer(shape: &[usize], buffer: RawBuffer) -> Result<Self, BufferError> {
        let shape = Shape::from_slice(shape);
        let (len, bytes) = byte_len::<T>(&shape).map_err(|_| BufferError::InvalidShape {
            reason: format!("shape {:?} overflows usize", shape.as_slice()),
        })?;
        if buffer.len() != bytes {
            return Err(BufferError::BufferSizeMismatch {
                expected: bytes,
                actual: buffer.len(),
            });
        }
        bytemuck::checked::try_cast_slice::<u8, T>(buffer.as_bytes()).map_err(|e| match e {
            CheckedCastError::InvalidBitPattern => BufferError::InvalidBitPattern {
                dtype: T::DATA_TYPE,
            },
            CheckedCastError::PodCastError(PodCastError::TargetAlignmentGreaterAndInputNotAligned)
            | CheckedCastError::PodCastError(PodCastError::AlignmentMismatch) => {
                BufferError::Misaligned {
                    align: std::mem::align_of::<T>(),
                }
            }
            CheckedCastError::PodCastError(_) => BufferError::BufferSizeMismatch {
                expected: bytes,
                actual: buffer.len(),
            },
        })?;
        Ok(Self {
            strides: row_major_strides(&shape),
            shape,
            len,
            buffer,
            _marker: PhantomData,
        })
    }

    /// Wrap foreign memory without copying.
    ///
    /// `release` runs exactly once: when the array is dropped, or right
    /// away if validation fails.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawBuffer::wrap`]: until `release` runs, `ptr`
    /// must be valid for reads and writes of `nbytes` initialised bytes and
    /// nothing else may access them.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw_parts(
        shape: &[usize],
        ptr: NonNull<u8>,
        nbytes: usize,
        release: impl FnOnce() + Send + 'static,
    ) -> Result<Self, BufferError> {
        // SAFETY: forwarded to the caller.
        let buffer = unsafe { RawBuffer::wrap(nbytes, ptr, release) };
        Self::from_buffer(shape, buffer)
    }

    /// Shape of the array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major strides, in elements.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Rank.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of one element in bytes.
    pub fn itemsize(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Size of the whole array in bytes.
    pub fn nbytes(&self) -> usize {
        self.buffer.len()
    }

    /// Runtime dtype tag of `T`.
    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    /// Whether the backing memory was allocated by this crate.
    pub fn is_owned(&self) -> bool {
        self.buffer.is_owned()
    }

    /// The backing buffer.
    pub fn buffer(&self) -> &RawBuffer {
        &self.buffer
    }

    /// All elements in row-major order.
    #[allow(unsafe_code)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: every constructor checked length, alignment, and bit
        // validity; writes only ever store valid `T` values.
        unsafe { raw::elements(self.buffer.non_null(), self.len) }
    }

    /// All elements in row-major order, mutably.
    #[allow(unsafe_code)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { raw::elements_mut(self.buffer.non_null(), self.len) }
    }

    /// The elements as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Set every element from a loosely-typed value.
    ///
    /// The value's kind is checked before anything is written, so a
    /// mismatch leaves the array untouched.
    pub fn fill_value(&mut self, value: FillValue) -> Result<(), BufferError> {
        let converted = T::from_fill(value).ok_or(BufferError::TypeMismatch {
            expected: T::DATA_TYPE.kind(),
            found: value.kind(),
        })?;
        self.fill(converted);
        Ok(())
    }

    /// Flat element offset of a coordinate.
    pub fn offset(&self, index: &[usize]) -> Result<usize, BufferError> {
        if index.len() != self.shape.len() {
            return Err(BufferError::RankMismatch {
                expected: self.shape.len(),
                actual: index.len(),
            });
        }
        let mut offset = 0;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return Err(BufferError::OutOfRange {
                    index: Shape::from_slice(index),
                    shape: self.shape.clone(),
                });
            }
            offset += i * stride;
        }
        Ok(offset)
    }

    /// Read the element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<T, BufferError> {
        let offset = self.offset(index)?;
        Ok(self.as_slice()[offset])
    }

    /// Write the element at `index`.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<(), BufferError> {
        let offset = self.offset(index)?;
        self.as_mut_slice()[offset] = value;
        Ok(())
    }

    fn row_range(&self, i: usize) -> Result<std::ops::Range<usize>, BufferError> {
        let Some(&rows) = self.shape.first() else {
            return Err(BufferError::RankMismatch {
                expected: 0,
                actual: 1,
            });
        };
        if i >= rows {
            let mut index = Shape::new();
            index.push(i);
            return Err(BufferError::OutOfRange {
                index,
                shape: self.shape.clone(),
            });
        }
        let width = self.strides[0];
        Ok(i * width..(i + 1) * width)
    }

    /// Elements of row `i` along the leading axis.
    ///
    /// For a `[n × k]` table this is the `k` entries of entity `i`.
    pub fn row(&self, i: usize) -> Result<&[T], BufferError> {
        let range = self.row_range(i)?;
        Ok(&self.as_slice()[range])
    }

    /// Mutable elements of row `i` along the leading axis.
    pub fn row_mut(&mut self, i: usize) -> Result<&mut [T], BufferError> {
        let range = self.row_range(i)?;
        Ok(&mut self.as_mut_slice()[range])
    }

    /// Deep copy into a fresh owning array.
    ///
    /// The copy never shares memory with `self`, even when `self` wraps
    /// foreign memory.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        Ok(Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            len: self.len,
            buffer: self.buffer.try_clone()?,
            _marker: PhantomData,
        })
    }
}

impl<T: Element> PartialEq for TypedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}

impl<T: Element> fmt::Debug for TypedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArray")
            .field("dtype", &T::DATA_TYPE)
            .field("shape", &self.shape.as_slice())
            .field("owned", &self.is_owned())
            .field("data", &self.as_slice())
            .finish()
    }
}
