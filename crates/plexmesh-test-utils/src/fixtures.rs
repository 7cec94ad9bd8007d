//! Small hand-built meshes with known topology.

use plexmesh_mesh::{CellType, StaticMesh};

/// The unit square split along its diagonal into two triangles.
///
/// ```text
/// 3 ---f3--- 2
/// |        / |
/// f4  c1  f2 f1
/// |  /   c0  |
/// 0 ---f0--- 1
/// ```
///
/// Nodes `0..4` sit at `(0,0) (1,0) (1,1) (0,1)`. Cell 0 is `[0,1,2]`, cell 1
/// is `[0,2,3]`. Face 2 (the diagonal) is interior; the other four faces are
/// boundary faces, so `nbound` is 4. Derived geometry tables are left zero.
pub fn two_triangle_mesh() -> StaticMesh {
    let mut mesh = StaticMesh::new(2, 4, 5, 2, 4).expect("fixture mesh allocates");

    mesh.ndcrd_mut()
        .as_mut_slice()
        .copy_from_slice(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);

    mesh.cltpn_mut().fill(CellType::TRIANGLE.id());
    mesh.fctpn_mut().fill(CellType::LINE.id());

    let cells: [([i32; 3], [i32; 3]); 2] = [([0, 1, 2], [0, 1, 2]), ([0, 2, 3], [2, 3, 4])];
    for (icl, (nodes, faces)) in cells.iter().enumerate() {
        mesh.clnds_mut().row_mut(icl).expect("cell row")[..3].copy_from_slice(nodes);
        mesh.clfcs_mut().row_mut(icl).expect("cell row")[..3].copy_from_slice(faces);
    }

    let faces: [([i32; 2], [i32; 2]); 5] = [
        ([0, 1], [0, -1]),
        ([1, 2], [0, -1]),
        ([2, 0], [0, 1]),
        ([2, 3], [1, -1]),
        ([3, 0], [1, -1]),
    ];
    for (ifc, (nodes, cells)) in faces.iter().enumerate() {
        mesh.fcnds_mut().row_mut(ifc).expect("face row")[..2].copy_from_slice(nodes);
        mesh.fccls_mut().row_mut(ifc).expect("face row").copy_from_slice(cells);
    }

    mesh
}
