//! The fixed catalog of cell shapes.
//!
//! A mesh stores shapes as integer ids in its `fctpn`/`cltpn` tables; the
//! catalog maps each id to its name, its own dimensionality, and the node,
//! edge, and surface counts that say how many slots of a fixed-width
//! connectivity row are meaningful.

use std::fmt;

/// Number of real shapes in the catalog (excluding [`CellType::NONCELLTYPE`]).
pub const NTYPE: usize = 8;

/// Maximum number of nodes of a face; width of `fcnds`.
pub const FCNND_MAX: usize = 4;

/// Maximum number of cells adjacent to a face; width of `fccls`.
pub const FCNCL_MAX: usize = 2;

/// Maximum number of nodes of a cell; width of `clnds`.
pub const CLNND_MAX: usize = 8;

/// Maximum number of faces of a cell; width of `clfcs`.
pub const CLNFC_MAX: usize = 6;

/// One entry of the cell-shape catalog.
///
/// Entries are immutable constants; obtain them through the associated
/// constants or [`CellType::by_id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellType {
    id: i32,
    name: &'static str,
    ndim: usize,
    nnode: usize,
    nedge: usize,
    nsurface: usize,
}

impl CellType {
    /// Placeholder for "no shape assigned". Zero counts everywhere.
    pub const NONCELLTYPE: Self = Self::entry(0, "noncelltype", 0, 0, 0, 0);
    /// A single node.
    pub const POINT: Self = Self::entry(1, "point", 0, 1, 0, 0);
    /// A two-node segment.
    pub const LINE: Self = Self::entry(2, "line", 1, 2, 0, 0);
    /// A four-node quadrilateral.
    pub const QUADRILATERAL: Self = Self::entry(3, "quadrilateral", 2, 4, 4, 0);
    /// A three-node triangle.
    pub const TRIANGLE: Self = Self::entry(4, "triangle", 2, 3, 3, 0);
    /// An eight-node hexahedron.
    pub const HEXAHEDRON: Self = Self::entry(5, "hexahedron", 3, 8, 12, 6);
    /// A four-node tetrahedron.
    pub const TETRAHEDRON: Self = Self::entry(6, "tetrahedron", 3, 4, 6, 4);
    /// A six-node triangular prism.
    pub const PRISM: Self = Self::entry(7, "prism", 3, 6, 9, 5);
    /// A five-node square pyramid.
    pub const PYRAMID: Self = Self::entry(8, "pyramid", 3, 5, 8, 5);

    /// The real shapes, ordered by id.
    pub const ALL: [Self; NTYPE] = [
        Self::POINT,
        Self::LINE,
        Self::QUADRILATERAL,
        Self::TRIANGLE,
        Self::HEXAHEDRON,
        Self::TETRAHEDRON,
        Self::PRISM,
        Self::PYRAMID,
    ];

    const fn entry(
        id: i32,
        name: &'static str,
        ndim: usize,
        nnode: usize,
        nedge: usize,
        nsurface: usize,
    ) -> Self {
        Self {
            id,
            name,
            ndim,
            nnode,
            nedge,
            nsurface,
        }
    }

    /// Look up an id, or `None` if it names no catalog entry.
    pub fn try_from_id(id: i32) -> Option<Self> {
        if id == Self::NONCELLTYPE.id {
            return Some(Self::NONCELLTYPE);
        }
        Self::ALL.into_iter().find(|t| t.id == id)
    }

    /// Look up an id; unknown ids map to [`CellType::NONCELLTYPE`].
    pub fn by_id(id: i32) -> Self {
        Self::try_from_id(id).unwrap_or(Self::NONCELLTYPE)
    }

    /// Catalog id, as stored in the type tables.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Lower-case name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The shape's own dimensionality.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of nodes.
    pub fn nnode(&self) -> usize {
        self.nnode
    }

    /// Number of edges.
    pub fn nedge(&self) -> usize {
        self.nedge
    }

    /// Number of surfaces.
    pub fn nsurface(&self) -> usize {
        self.nsurface
    }

    /// Number of faces, judged by the shape's own dimensionality.
    ///
    /// Faces of a planar shape are its edges; faces of a solid are its
    /// surfaces. Points, lines, and the placeholder have none.
    pub fn nface(&self) -> usize {
        self.face_count_for(self.ndim)
    }

    /// Number of faces when the shape is viewed in a `ndim`-dimensional mesh.
    pub fn face_count_for(&self, ndim: usize) -> usize {
        match ndim {
            2 => self.nedge,
            3 => self.nsurface,
            _ => 0,
        }
    }

    /// Whether a mesh of dimensionality `mesh_ndim` may hold this shape.
    ///
    /// The placeholder is always accepted.
    pub fn is_legal_in(&self, mesh_ndim: usize) -> bool {
        self.ndim <= mesh_ndim
    }

    /// Whether this shape may tag a face of a `mesh_ndim`-dimensional mesh.
    ///
    /// Faces sit one dimension below the mesh, so only lower-dimensional
    /// shapes qualify. The placeholder is always accepted.
    pub fn is_legal_face_in(&self, mesh_ndim: usize) -> bool {
        self.ndim < mesh_ndim
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
