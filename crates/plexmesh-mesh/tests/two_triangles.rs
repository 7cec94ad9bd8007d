//! Topology queries against the two-triangle fixture.

use plexmesh_mesh::{CellType, MeshArray, MeshError, TableRef, INVALID_INDEX};
use plexmesh_test_utils::two_triangle_mesh;

#[test]
fn counts_and_tags() {
    let mesh = two_triangle_mesh();
    assert_eq!(
        (mesh.ndim(), mesh.nnode(), mesh.nface(), mesh.ncell(), mesh.nbound()),
        (2, 4, 5, 2, 4)
    );
    assert!(mesh.validate_type_tags().is_ok());
    for icl in 0..mesh.ncell() {
        assert_eq!(mesh.cell_type(icl).unwrap(), CellType::TRIANGLE);
    }
}

#[test]
fn cells_list_their_nodes_and_faces() {
    let mesh = two_triangle_mesh();
    assert_eq!(mesh.cell_nodes(0).unwrap(), &[0, 1, 2]);
    assert_eq!(mesh.cell_nodes(1).unwrap(), &[0, 2, 3]);
    assert_eq!(mesh.cell_faces(1).unwrap(), &[2, 3, 4]);
    assert_eq!(&mesh.clnds().row(0).unwrap()[3..], &[INVALID_INDEX; 5]);
}

#[test]
fn only_the_diagonal_is_interior() {
    let mesh = two_triangle_mesh();
    let interior: Vec<usize> = (0..mesh.nface())
        .filter(|&ifc| mesh.face_cells(ifc).unwrap().len() == 2)
        .collect();
    assert_eq!(interior, vec![2]);
    assert_eq!(mesh.face_nodes(2).unwrap(), &[2, 0]);
    assert_eq!(mesh.face_cells(2).unwrap().as_slice(), &[0, 1]);
}

#[test]
fn every_cell_face_lists_the_cell() {
    let mesh = two_triangle_mesh();
    for icl in 0..mesh.ncell() {
        for &ifc in mesh.cell_faces(icl).unwrap() {
            let cells = mesh.face_cells(ifc as usize).unwrap();
            assert!(cells.contains(&(icl as i32)));
        }
    }
}

#[test]
fn coordinates_by_name() {
    let mesh = two_triangle_mesh();
    let TableRef::Real(ndcrd) = mesh.table_by_name("ndcrd").unwrap() else {
        panic!("ndcrd must be a geometry table");
    };
    assert_eq!(ndcrd.row(2).unwrap(), &[1.0, 1.0]);
    assert!(mesh.table(MeshArray::Clvol).as_real().is_some());
}

#[test]
fn retagging_a_cell_as_a_solid_is_caught() {
    let mut mesh = two_triangle_mesh();
    mesh.cltpn_mut()
        .set(&[1], CellType::PYRAMID.id())
        .unwrap();
    assert_eq!(
        mesh.validate_type_tags().unwrap_err(),
        MeshError::IllegalCellType {
            table: "cltpn",
            index: 1,
            id: CellType::PYRAMID.id(),
            ndim: 2,
        }
    );
}
