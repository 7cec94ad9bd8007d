//! Array shapes and shape parsing for loosely-typed callers.

use smallvec::SmallVec;

use crate::error::BufferError;

/// Ordered dimension sizes of an array.
///
/// Uses `SmallVec<[usize; 4]>` so shapes up to rank 4 (every mesh table is
/// rank 1 or 2) never touch the heap.
pub type Shape = SmallVec<[usize; 4]>;

/// A shape argument as received from a dynamically-typed caller.
///
/// Host runtimes hand over either a bare count or a sequence of counts, and
/// their integers may be negative. [`parse_shape`] turns either form into a
/// validated [`Shape`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeArg {
    /// A single count, meaning a rank-1 shape of that length.
    Scalar(i64),
    /// An ordered sequence of dimension sizes.
    Sequence(Vec<i64>),
}

impl From<i64> for ShapeArg {
    fn from(n: i64) -> Self {
        Self::Scalar(n)
    }
}

impl From<Vec<i64>> for ShapeArg {
    fn from(dims: Vec<i64>) -> Self {
        Self::Sequence(dims)
    }
}

impl From<&[i64]> for ShapeArg {
    fn from(dims: &[i64]) -> Self {
        Self::Sequence(dims.to_vec())
    }
}

fn checked_dim(value: i64, axis: usize) -> Result<usize, BufferError> {
    usize::try_from(value).map_err(|_| BufferError::InvalidShape {
        reason: format!("dimension {axis} is {value}, must be non-negative"),
    })
}

/// Parse a loosely-typed shape argument.
///
/// The scalar interpretation is tried first, so the common rank-1 case can
/// be written as a bare count; otherwise the argument is read as a sequence
/// of dimension sizes. `parse_shape(&5.into())` and
/// `parse_shape(&vec![5].into())` produce the same shape.
pub fn parse_shape(arg: &ShapeArg) -> Result<Shape, BufferError> {
    match arg {
        ShapeArg::Scalar(n) => {
            let mut shape = Shape::new();
            shape.push(checked_dim(*n, 0)?);
            Ok(shape)
        }
        ShapeArg::Sequence(dims) => dims
            .iter()
            .enumerate()
            .map(|(axis, &d)| checked_dim(d, axis))
            .collect(),
    }
}

/// Number of elements described by `shape`, or `None` on overflow.
///
/// A rank-0 shape holds exactly one element.
pub fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Row-major (C order) strides in elements.
pub fn row_major_strides(shape: &[usize]) -> Shape {
    let mut strides: Shape = smallvec::smallvec![0; shape.len()];
    let mut acc = 1usize;
    for axis in (0..shape.len()).rev() {
        strides[axis] = acc;
        acc = acc.saturating_mul(shape[axis]);
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smallvec::smallvec;

    #[test]
    fn scalar_is_rank_one() {
        let shape = parse_shape(&ShapeArg::Scalar(7)).unwrap();
        assert_eq!(shape.as_slice(), &[7]);
    }

    #[test]
    fn sequence_keeps_order() {
        let shape = parse_shape(&ShapeArg::Sequence(vec![2, 3, 4])).unwrap();
        assert_eq!(shape.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn empty_sequence_is_rank_zero() {
        let shape = parse_shape(&ShapeArg::Sequence(vec![])).unwrap();
        assert!(shape.is_empty());
        assert_eq!(element_count(&shape), Some(1));
    }

    #[test]
    fn negative_dimension_rejected() {
        assert!(matches!(
            parse_shape(&ShapeArg::Scalar(-1)),
            Err(BufferError::InvalidShape { .. })
        ));
        assert!(matches!(
            parse_shape(&ShapeArg::Sequence(vec![3, -2])),
            Err(BufferError::InvalidShape { .. })
        ));
    }

    #[test]
    fn strides_are_row_major() {
        let strides = row_major_strides(&[2, 3, 4]);
        assert_eq!(strides, Shape::from_slice(&[12, 4, 1]));
        let strides = row_major_strides(&[5]);
        assert_eq!(strides, Shape::from_slice(&[1]));
    }

    #[test]
    fn element_count_overflow() {
        assert_eq!(element_count(&[usize::MAX, 2]), None);
        assert_eq!(element_count(&[4, 0, 9]), Some(0));
        let shape: Shape = smallvec![3, 3];
        assert_eq!(element_count(&shape), Some(9));
    }

    proptest! {
        #[test]
        fn scalar_and_single_sequence_agree(n in 0i64..1_000_000) {
            let a = parse_shape(&ShapeArg::Scalar(n)).unwrap();
            let b = parse_shape(&ShapeArg::Sequence(vec![n])).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn sequence_round_trips(dims in prop::collection::vec(0i64..64, 0..5)) {
            let shape = parse_shape(&ShapeArg::Sequence(dims.clone())).unwrap();
            let back: Vec<i64> = shape.iter().map(|&d| d as i64).collect();
            prop_assert_eq!(back, dims);
        }
    }
}
