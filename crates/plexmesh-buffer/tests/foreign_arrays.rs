//! Wrapping foreign arrays: zero-copy views and exactly-once release.

use std::sync::atomic::Ordering;

use plexmesh_buffer::ArrayPlex;
use plexmesh_core::{BufferError, DataType};
use plexmesh_test_utils::MockForeignArray;

#[test]
fn wraps_without_copying() {
    let foreign = MockForeignArray::from_slice(&[2, 2], "float64", &[1.0f64, 2.0, 3.0, 4.0]);
    let released = foreign.release_counter();

    let mut plex = ArrayPlex::from_foreign(foreign).unwrap();
    assert_eq!(plex.data_type(), DataType::Float64);
    assert_eq!(plex.shape(), &[2, 2]);
    assert!(!plex.is_owned());
    assert_eq!(
        plex.as_typed::<f64>().unwrap().as_slice(),
        &[1.0, 2.0, 3.0, 4.0]
    );

    plex.as_typed_mut::<f64>()
        .unwrap()
        .set(&[1, 0], -3.0)
        .unwrap();
    assert_eq!(plex.as_typed::<f64>().unwrap().get(&[1, 0]).unwrap(), -3.0);

    assert_eq!(released.load(Ordering::SeqCst), 0);
    drop(plex);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn typed_copy_outlives_foreign_handle() {
    let foreign = MockForeignArray::from_slice(&[3], "int32", &[5i32, 6, 7]);
    let released = foreign.release_counter();
    let plex = ArrayPlex::from_foreign(foreign).unwrap();
    let copy = plex.typed::<i32>().unwrap();
    drop(plex);
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert!(copy.is_owned());
    assert_eq!(copy.as_slice(), &[5, 6, 7]);
}

#[test]
fn size_mismatch_is_rejected_and_released() {
    let foreign = MockForeignArray::from_slice(&[4], "float32", &[0.0f32; 4]).with_reported_nbytes(12);
    let released = foreign.release_counter();
    let err = ArrayPlex::from_foreign(foreign).unwrap_err();
    assert_eq!(
        err,
        BufferError::BufferSizeMismatch {
            expected: 16,
            actual: 12,
        }
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn null_data_is_measured_against_the_shape() {
    let foreign = MockForeignArray::from_slice(&[2, 3], "int16", &[0i16; 6]).with_null_data();
    let released = foreign.release_counter();
    assert_eq!(
        ArrayPlex::from_foreign(foreign).unwrap_err(),
        BufferError::BufferSizeMismatch {
            expected: 12,
            actual: 0,
        }
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn null_data_with_empty_shape_is_accepted() {
    let foreign = MockForeignArray::new(&[0, 4], "float64", &[]).with_null_data();
    let released = foreign.release_counter();
    let plex = ArrayPlex::from_foreign(foreign).unwrap();
    assert!(plex.is_empty());
    assert_eq!(plex.shape(), &[0, 4]);
    drop(plex);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn shape_larger_than_data_is_rejected() {
    let foreign = MockForeignArray::from_slice(&[10], "uint8", &[1u8, 2, 3]);
    let released = foreign.release_counter();
    assert!(matches!(
        ArrayPlex::from_foreign(foreign),
        Err(BufferError::BufferSizeMismatch { expected: 10, actual: 3 })
    ));
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn unsupported_dtype_is_released() {
    let foreign = MockForeignArray::new(&[2], "complex128", &[0u8; 32]);
    let released = foreign.release_counter();
    assert!(matches!(
        ArrayPlex::from_foreign(foreign),
        Err(BufferError::UnsupportedDatatype { .. })
    ));
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn misaligned_data_is_rejected() {
    let foreign = MockForeignArray::from_slice(&[2], "float64", &[1.0f64, 2.0]).misaligned();
    let released = foreign.release_counter();
    assert_eq!(
        ArrayPlex::from_foreign(foreign).unwrap_err(),
        BufferError::Misaligned { align: 8 }
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn misaligned_bytes_are_fine() {
    let foreign = MockForeignArray::from_slice(&[3], "int8", &[-1i8, 0, 1]).misaligned();
    let plex = ArrayPlex::from_foreign(foreign).unwrap();
    assert_eq!(plex.as_typed::<i8>().unwrap().as_slice(), &[-1, 0, 1]);
}

#[test]
fn invalid_bool_bytes_are_rejected() {
    let foreign = MockForeignArray::new(&[3], "bool", &[0, 1, 2]);
    let released = foreign.release_counter();
    assert_eq!(
        ArrayPlex::from_foreign(foreign).unwrap_err(),
        BufferError::InvalidBitPattern {
            dtype: DataType::Bool
        }
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_foreign_array() {
    let foreign = MockForeignArray::new(&[0, 3], "int16", &[]);
    let released = foreign.release_counter();
    let plex = ArrayPlex::from_foreign(foreign).unwrap();
    assert!(plex.is_empty());
    assert_eq!(plex.shape(), &[0, 3]);
    drop(plex);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn refill_writes_through_to_foreign_memory() {
    let foreign = MockForeignArray::from_slice(&[2], "uint16", &[1u16, 2]);
    let released = foreign.release_counter();
    let mut plex = ArrayPlex::from_foreign(foreign).unwrap();
    plex.fill(70_000i64).unwrap();
    assert_eq!(plex.as_typed::<u16>().unwrap().as_slice(), &[4464, 4464]);
    assert!(matches!(
        plex.fill(1.0),
        Err(BufferError::TypeMismatch { .. })
    ));
    drop(plex);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
