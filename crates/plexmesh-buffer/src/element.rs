//! The sealed set of element types a [`TypedArray`] may hold.
//!
//! [`Element`] ties each Rust scalar type to its [`DataType`] tag and to
//! the matching [`ArrayPlex`] variant. It is the static half of the dtype
//! dispatch table; the dynamic half is the exhaustive `match` in
//! [`crate::plex`].

use std::fmt;

use plexmesh_core::{DataType, FillValue};

use crate::array::TypedArray;
use crate::plex::ArrayPlex;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type storable in a [`TypedArray`].
///
/// Implemented for `bool`, the eight fixed-width integers, `f32`, and `f64`,
/// and sealed against further implementations. The `bytemuck` bounds let
/// foreign bytes be validated (`CheckedBitPattern`) and typed data be viewed
/// as bytes (`NoUninit`) without unsafe code at the call sites.
pub trait Element:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Send
    + Sync
    + bytemuck::NoUninit
    + bytemuck::CheckedBitPattern
    + sealed::Sealed
    + 'static
{
    /// Runtime tag of this element type.
    const DATA_TYPE: DataType;

    /// Convert a fill value of the matching kind, narrowing as `as` does.
    ///
    /// Returns `None` if the value's kind does not match this type's family.
    fn from_fill(value: FillValue) -> Option<Self>;

    /// Move a typed array into the matching plex variant.
    fn into_plex(array: TypedArray<Self>) -> ArrayPlex;

    /// Borrow the typed array if `plex` holds this element type.
    fn from_plex(plex: &ArrayPlex) -> Option<&TypedArray<Self>>;

    /// Mutably borrow the typed array if `plex` holds this element type.
    fn from_plex_mut(plex: &mut ArrayPlex) -> Option<&mut TypedArray<Self>>;

    /// Take the typed array out of `plex`, or hand `plex` back unchanged.
    fn unwrap_plex(plex: ArrayPlex) -> Result<TypedArray<Self>, ArrayPlex>;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident, |$v:ident| $convert:expr) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn from_fill(value: FillValue) -> Option<Self> {
                let $v = value;
                $convert
            }

            fn into_plex(array: TypedArray<Self>) -> ArrayPlex {
                ArrayPlex::$variant(array)
            }

            fn from_plex(plex: &ArrayPlex) -> Option<&TypedArray<Self>> {
                match plex {
                    ArrayPlex::$variant(array) => Some(array),
                    _ => None,
                }
            }

            fn from_plex_mut(plex: &mut ArrayPlex) -> Option<&mut TypedArray<Self>> {
                match plex {
                    ArrayPlex::$variant(array) => Some(array),
                    _ => None,
                }
            }

            fn unwrap_plex(plex: ArrayPlex) -> Result<TypedArray<Self>, ArrayPlex> {
                match plex {
                    ArrayPlex::$variant(array) => Ok(array),
                    other => Err(other),
                }
            }
        }
    };
}

macro_rules! impl_int_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl_element!($ty, $variant, |v| match v {
                FillValue::Int(i) => Some(i as $ty),
                _ => None,
            });
        )*
    };
}

impl_element!(bool, Bool, |v| match v {
    FillValue::Bool(b) => Some(b),
    _ => None,
});

impl_int_element!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
);

impl_element!(f32, Float32, |v| match v {
    FillValue::Float(x) => Some(x as f32),
    _ => None,
});

impl_element!(f64, Float64, |v| match v {
    FillValue::Float(x) => Some(x),
    _ => None,
});
