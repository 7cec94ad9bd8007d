//! Benchmark profiles for the plexmesh containers.
//!
//! - [`structured_quad_mesh`]: an `nx` by `ny` grid of quadrilaterals with
//!   complete node, face, and cell connectivity
//! - [`reference_mesh`]: the 100x100 grid (10K cells) used by the mesh benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plexmesh_mesh::{CellType, MeshError, StaticMesh, INVALID_INDEX};

/// Build the reference benchmark mesh: a 100x100 quad grid (10K cells).
pub fn reference_mesh() -> Result<StaticMesh, MeshError> {
    structured_quad_mesh(100, 100)
}

/// Build a planar mesh of `nx * ny` unit quadrilaterals.
///
/// Nodes are numbered row by row, cells likewise. Horizontal faces come
/// first (`nx * (ny + 1)` of them), then vertical faces. Each cell lists its
/// nodes and faces counter-clockwise starting from the lower-left corner.
/// Boundary faces carry one cell in `fccls` and [`INVALID_INDEX`] in the
/// second slot.
pub fn structured_quad_mesh(nx: usize, ny: usize) -> Result<StaticMesh, MeshError> {
    let nnode = (nx + 1) * (ny + 1);
    let nhface = nx * (ny + 1);
    let nface = nhface + (nx + 1) * ny;
    let ncell = nx * ny;
    let nbound = 2 * (nx + ny);
    let mut mesh = StaticMesh::new(2, nnode, nface, ncell, nbound)?;

    // Every index below is smaller than a count the mesh accepted, and
    // accepted counts fit in i32.
    let node = |i: usize, j: usize| (j * (nx + 1) + i) as i32;
    let cell = |i: usize, j: usize| (j * nx + i) as i32;
    let hface = |i: usize, j: usize| j * nx + i;
    let vface = |i: usize, j: usize| nhface + j * (nx + 1) + i;

    let ndcrd = mesh.ndcrd_mut().as_mut_slice();
    for j in 0..=ny {
        for i in 0..=nx {
            let n = node(i, j) as usize;
            ndcrd[2 * n] = i as f64;
            ndcrd[2 * n + 1] = j as f64;
        }
    }

    mesh.cltpn_mut().fill(CellType::QUADRILATERAL.id());
    mesh.fctpn_mut().fill(CellType::LINE.id());

    for j in 0..ny {
        for i in 0..nx {
            let icl = j * nx + i;
            mesh.clnds_mut().row_mut(icl)?[..4].copy_from_slice(&[
                node(i, j),
                node(i + 1, j),
                node(i + 1, j + 1),
                node(i, j + 1),
            ]);
            mesh.clfcs_mut().row_mut(icl)?[..4].copy_from_slice(&[
                hface(i, j) as i32,
                vface(i + 1, j) as i32,
                hface(i, j + 1) as i32,
                vface(i, j) as i32,
            ]);
        }
    }

    for j in 0..=ny {
        for i in 0..nx {
            let below = (j > 0).then(|| cell(i, j - 1));
            let above = (j < ny).then(|| cell(i, j));
            let ifc = hface(i, j);
            mesh.fcnds_mut().row_mut(ifc)?[..2].copy_from_slice(&[node(i, j), node(i + 1, j)]);
            mesh.fccls_mut()
                .row_mut(ifc)?
                .copy_from_slice(&adjacent(below, above));
        }
    }
    for j in 0..ny {
        for i in 0..=nx {
            let left = (i > 0).then(|| cell(i - 1, j));
            let right = (i < nx).then(|| cell(i, j));
            let ifc = vface(i, j);
            mesh.fcnds_mut().row_mut(ifc)?[..2].copy_from_slice(&[node(i, j), node(i, j + 1)]);
            mesh.fccls_mut()
                .row_mut(ifc)?
                .copy_from_slice(&adjacent(left, right));
        }
    }

    Ok(mesh)
}

fn adjacent(a: Option<i32>, b: Option<i32>) -> [i32; 2] {
    match (a, b) {
        (Some(a), Some(b)) => [a, b],
        (Some(c), None) | (None, Some(c)) => [c, INVALID_INDEX],
        (None, None) => [INVALID_INDEX, INVALID_INDEX],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mesh = structured_quad_mesh(3, 2).unwrap();
        assert_eq!(mesh.nnode(), 12);
        assert_eq!(mesh.nface(), 3 * 3 + 4 * 2);
        assert_eq!(mesh.ncell(), 6);
        assert_eq!(mesh.nbound(), 10);
        assert!(mesh.validate_type_tags().is_ok());
    }

    #[test]
    fn boundary_faces_have_one_cell() {
        let mesh = structured_quad_mesh(3, 2).unwrap();
        let boundary = (0..mesh.nface())
            .filter(|&ifc| mesh.face_cells(ifc).unwrap().len() == 1)
            .count();
        assert_eq!(boundary, mesh.nbound());
    }

    #[test]
    fn cell_faces_point_back() {
        let mesh = structured_quad_mesh(4, 3).unwrap();
        for icl in 0..mesh.ncell() {
            for &ifc in mesh.cell_faces(icl).unwrap() {
                let cells = mesh.face_cells(ifc as usize).unwrap();
                assert!(cells.contains(&(icl as i32)), "cell {icl} face {ifc}");
            }
        }
    }

    #[test]
    fn node_coordinates_follow_grid() {
        let mesh = structured_quad_mesh(2, 1).unwrap();
        assert_eq!(mesh.ndcrd().row(4).unwrap(), &[1.0, 1.0]);
        assert_eq!(mesh.cell_nodes(1).unwrap(), &[1, 2, 5, 4]);
    }
}
