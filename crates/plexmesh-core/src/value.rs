//! Fill values supplied by loosely-typed callers.

use crate::dtype::{DataKind, DataType};
use crate::error::BufferError;

/// A scalar in its source representation, before conversion to a dtype.
///
/// Integers travel as `i64` and floats as `f64`; conversion into the
/// destination element type happens only after [`FillValue::check`] has
/// confirmed the kind matches the dtype family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillValue {
    /// A boolean. Accepted only by [`DataType::Bool`].
    Bool(bool),
    /// An integer. Accepted only by integer dtypes.
    Int(i64),
    /// A floating-point number. Accepted only by float dtypes.
    Float(f64),
}

impl FillValue {
    /// Kind of this value.
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Bool(_) => DataKind::Bool,
            Self::Int(_) => DataKind::Integer,
            Self::Float(_) => DataKind::Float,
        }
    }

    /// Verify this value may fill an array of `dtype`.
    pub fn check(&self, dtype: DataType) -> Result<(), BufferError> {
        let expected = dtype.kind();
        let found = self.kind();
        if expected == found {
            Ok(())
        } else {
            Err(BufferError::TypeMismatch { expected, found })
        }
    }
}

impl From<bool> for FillValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FillValue {
                fn from(v: $ty) -> Self {
                    Self::Int(v as i64)
                }
            }
        )*
    };
}

// u64 reinterprets its bits, so u64::MAX travels as -1 and narrows back to
// u64::MAX.
impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f32> for FillValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for FillValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}
