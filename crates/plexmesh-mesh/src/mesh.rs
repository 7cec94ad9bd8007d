//! Fixed-size unstructured mesh tables.
//!
//! A [`StaticMesh`] is a bundle of thirteen typed tables sized from the
//! mesh counts at construction. Geometry tables hold `f64` coordinates and
//! measures, meta tables hold `i32` shape tags and groups, and connectivity
//! tables hold `i32` indices padded with [`INVALID_INDEX`] to the catalog's
//! fixed row widths.
//!
//! The mesh does not check consistency between tables. Callers fill them
//! and may ask [`StaticMesh::validate_type_tags`] for a shape-tag check.

use plexmesh_buffer::TypedArray;
use smallvec::SmallVec;

use crate::celltype::{CellType, CLNFC_MAX, CLNND_MAX, FCNCL_MAX, FCNND_MAX};
use crate::config::MeshConfig;
use crate::error::MeshError;

/// Sentinel stored in unused connectivity slots.
pub const INVALID_INDEX: i32 = -1;

/// Which family a mesh table belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableGroup {
    /// `f64` coordinates and measures.
    Geometry,
    /// `i32` shape tags and groups.
    Meta,
    /// `i32` indices into other tables.
    Connectivity,
}

/// Names of the mesh tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshArray {
    /// Node coordinates, `[nnode, ndim]`.
    Ndcrd,
    /// Face centroids, `[nface, ndim]`.
    Fccnd,
    /// Face unit normals, `[nface, ndim]`.
    Fcnml,
    /// Face areas, `[nface]`.
    Fcara,
    /// Cell centers, `[ncell, ndim]`.
    Clcnd,
    /// Cell volumes, `[ncell]`.
    Clvol,
    /// Face shape ids, `[nface]`.
    Fctpn,
    /// Cell shape ids, `[ncell]`.
    Cltpn,
    /// Cell group ids, `[ncell]`.
    Clgrp,
    /// Face to node, `[nface, FCNND_MAX]`.
    Fcnds,
    /// Face to cell, `[nface, FCNCL_MAX]`.
    Fccls,
    /// Cell to node, `[ncell, CLNND_MAX]`.
    Clnds,
    /// Cell to face, `[ncell, CLNFC_MAX]`.
    Clfcs,
}

impl MeshArray {
    /// Every table, geometry first.
    pub const ALL: [Self; 13] = [
        Self::Ndcrd,
        Self::Fccnd,
        Self::Fcnml,
        Self::Fcara,
        Self::Clcnd,
        Self::Clvol,
        Self::Fctpn,
        Self::Cltpn,
        Self::Clgrp,
        Self::Fcnds,
        Self::Fccls,
        Self::Clnds,
        Self::Clfcs,
    ];

    /// Lower-case table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ndcrd => "ndcrd",
            Self::Fccnd => "fccnd",
            Self::Fcnml => "fcnml",
            Self::Fcara => "fcara",
            Self::Clcnd => "clcnd",
            Self::Clvol => "clvol",
            Self::Fctpn => "fctpn",
            Self::Cltpn => "cltpn",
            Self::Clgrp => "clgrp",
            Self::Fcnds => "fcnds",
            Self::Fccls => "fccls",
            Self::Clnds => "clnds",
            Self::Clfcs => "clfcs",
        }
    }

    /// Parse a table name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The table's family.
    pub fn group(self) -> TableGroup {
        match self {
            Self::Ndcrd | Self::Fccnd | Self::Fcnml | Self::Fcara | Self::Clcnd | Self::Clvol => {
                TableGroup::Geometry
            }
            Self::Fctpn | Self::Cltpn | Self::Clgrp => TableGroup::Meta,
            Self::Fcnds | Self::Fccls | Self::Clnds | Self::Clfcs => TableGroup::Connectivity,
        }
    }
}

/// Shared access to one table, tagged by element type.
#[derive(Clone, Copy, Debug)]
pub enum TableRef<'a> {
    /// A geometry table.
    Real(&'a TypedArray<f64>),
    /// A meta or connectivity table.
    Int(&'a TypedArray<i32>),
}

impl<'a> TableRef<'a> {
    /// Shape of the table.
    pub fn shape(&self) -> &'a [usize] {
        match *self {
            Self::Real(t) => t.shape(),
            Self::Int(t) => t.shape(),
        }
    }

    /// The table, if it holds `f64`.
    pub fn as_real(&self) -> Option<&'a TypedArray<f64>> {
        match *self {
            Self::Real(t) => Some(t),
            Self::Int(_) => None,
        }
    }

    /// The table, if it holds `i32`.
    pub fn as_int(&self) -> Option<&'a TypedArray<i32>> {
        match *self {
            Self::Int(t) => Some(t),
            Self::Real(_) => None,
        }
    }
}

/// Exclusive access to one table, tagged by element type.
#[derive(Debug)]
pub enum TableMut<'a> {
    /// A geometry table.
    Real(&'a mut TypedArray<f64>),
    /// A meta or connectivity table.
    Int(&'a mut TypedArray<i32>),
}

impl<'a> TableMut<'a> {
    /// Shape of the table.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real(t) => t.shape(),
            Self::Int(t) => t.shape(),
        }
    }

    /// The table, if it holds `f64`.
    pub fn into_real(self) -> Option<&'a mut TypedArray<f64>> {
        match self {
            Self::Real(t) => Some(t),
            Self::Int(_) => None,
        }
    }

    /// The table, if it holds `i32`.
    pub fn into_int(self) -> Option<&'a mut TypedArray<i32>> {
        match self {
            Self::Int(t) => Some(t),
            Self::Real(_) => None,
        }
    }
}

/// An unstructured mesh whose counts are fixed at construction.
///
/// Interior counts come from the constructor; ghost counts are always zero
/// in this form of the mesh. Every table is allocated up front and keeps its
/// shape for the life of the mesh.
///
/// # Examples
///
/// ```
/// use plexmesh_mesh::{StaticMesh, INVALID_INDEX};
///
/// let mesh = StaticMesh::new(2, 4, 5, 2, 3).unwrap();
/// assert_eq!(mesh.ndcrd().shape(), &[4, 2]);
/// assert_eq!(mesh.clfcs().shape(), &[2, 6]);
/// assert!(mesh.fcnds().as_slice().iter().all(|&i| i == INVALID_INDEX));
/// ```
#[derive(Debug)]
pub struct StaticMesh {
    ndim: usize,
    nnode: usize,
    nface: usize,
    ncell: usize,
    nbound: usize,
    ngstnode: usize,
    ngstface: usize,
    ngstcell: usize,
    use_incenter: bool,

    ndcrd: TypedArray<f64>,
    fccnd: TypedArray<f64>,
    fcnml: TypedArray<f64>,
    fcara: TypedArray<f64>,
    clcnd: TypedArray<f64>,
    clvol: TypedArray<f64>,

    fctpn: TypedArray<i32>,
    cltpn: TypedArray<i32>,
    clgrp: TypedArray<i32>,

    fcnds: TypedArray<i32>,
    fccls: TypedArray<i32>,
    clnds: TypedArray<i32>,
    clfcs: TypedArray<i32>,
}

macro_rules! table_accessors {
    ($($name:ident, $name_mut:ident: $ty:ty;)*) => {
        $(
            #[doc = concat!("The `", stringify!($name), "` table.")]
            pub fn $name(&self) -> &TypedArray<$ty> {
                &self.$name
            }

            #[doc = concat!("Mutable access to the `", stringify!($name), "` table.")]
            pub fn $name_mut(&mut self) -> &mut TypedArray<$ty> {
                &mut self.$name
            }
        )*
    };
}

impl StaticMesh {
    /// Allocate a mesh with the given dimensionality and interior counts.
    ///
    /// Geometry and meta tables start zeroed; connectivity tables start
    /// filled with [`INVALID_INDEX`].
    pub fn new(
        ndim: usize,
        nnode: usize,
        nface: usize,
        ncell: usize,
        nbound: usize,
    ) -> Result<Self, MeshError> {
        Self::from_config(MeshConfig::new(ndim, nnode, nface, ncell, nbound))
    }

    /// Allocate a mesh from a validated config.
    pub fn from_config(config: MeshConfig) -> Result<Self, MeshError> {
        config.validate()?;
        let MeshConfig {
            ndim,
            nnode,
            nface,
            ncell,
            nbound,
            use_incenter,
        } = config;

        let mesh = Self {
            ndim,
            nnode,
            nface,
            ncell,
            nbound,
            ngstnode: 0,
            ngstface: 0,
            ngstcell: 0,
            use_incenter,

            ndcrd: TypedArray::new(&[nnode, ndim])?,
            fccnd: TypedArray::new(&[nface, ndim])?,
            fcnml: TypedArray::new(&[nface, ndim])?,
            fcara: TypedArray::new(&[nface])?,
            clcnd: TypedArray::new(&[ncell, ndim])?,
            clvol: TypedArray::new(&[ncell])?,

            fctpn: TypedArray::new(&[nface])?,
            cltpn: TypedArray::new(&[ncell])?,
            clgrp: TypedArray::new(&[ncell])?,

            fcnds: TypedArray::filled(&[nface, FCNND_MAX], INVALID_INDEX)?,
            fccls: TypedArray::filled(&[nface, FCNCL_MAX], INVALID_INDEX)?,
            clnds: TypedArray::filled(&[ncell, CLNND_MAX], INVALID_INDEX)?,
            clfcs: TypedArray::filled(&[ncell, CLNFC_MAX], INVALID_INDEX)?,
        };
        tracing::debug!(ndim, nnode, nface, ncell, nbound, "allocated static mesh");
        Ok(mesh)
    }

    /// Spatial dimensionality, 2 or 3.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of interior nodes.
    pub fn nnode(&self) -> usize {
        self.nnode
    }

    /// Number of interior faces.
    pub fn nface(&self) -> usize {
        self.nface
    }

    /// Number of interior cells.
    pub fn ncell(&self) -> usize {
        self.ncell
    }

    /// Number of boundary faces.
    pub fn nbound(&self) -> usize {
        self.nbound
    }

    /// Number of ghost nodes. Always zero.
    pub fn ngstnode(&self) -> usize {
        self.ngstnode
    }

    /// Number of ghost faces. Always zero.
    pub fn ngstface(&self) -> usize {
        self.ngstface
    }

    /// Number of ghost cells. Always zero.
    pub fn ngstcell(&self) -> usize {
        self.ngstcell
    }

    /// Whether cell centers are incenters rather than centroids.
    pub fn use_incenter(&self) -> bool {
        self.use_incenter
    }

    /// Set the incenter flag.
    pub fn set_use_incenter(&mut self, use_incenter: bool) {
        self.use_incenter = use_incenter;
    }

    table_accessors! {
        ndcrd, ndcrd_mut: f64;
        fccnd, fccnd_mut: f64;
        fcnml, fcnml_mut: f64;
        fcara, fcara_mut: f64;
        clcnd, clcnd_mut: f64;
        clvol, clvol_mut: f64;
        fctpn, fctpn_mut: i32;
        cltpn, cltpn_mut: i32;
        clgrp, clgrp_mut: i32;
        fcnds, fcnds_mut: i32;
        fccls, fccls_mut: i32;
        clnds, clnds_mut: i32;
        clfcs, clfcs_mut: i32;
    }

    /// Shared access to a table by name.
    pub fn table(&self, which: MeshArray) -> TableRef<'_> {
        match which {
            MeshArray::Ndcrd => TableRef::Real(&self.ndcrd),
            MeshArray::Fccnd => TableRef::Real(&self.fccnd),
            MeshArray::Fcnml => TableRef::Real(&self.fcnml),
            MeshArray::Fcara => TableRef::Real(&self.fcara),
            MeshArray::Clcnd => TableRef::Real(&self.clcnd),
            MeshArray::Clvol => TableRef::Real(&self.clvol),
            MeshArray::Fctpn => TableRef::Int(&self.fctpn),
            MeshArray::Cltpn => TableRef::Int(&self.cltpn),
            MeshArray::Clgrp => TableRef::Int(&self.clgrp),
            MeshArray::Fcnds => TableRef::Int(&self.fcnds),
            MeshArray::Fccls => TableRef::Int(&self.fccls),
            MeshArray::Clnds => TableRef::Int(&self.clnds),
            MeshArray::Clfcs => TableRef::Int(&self.clfcs),
        }
    }

    /// Exclusive access to a table by name.
    pub fn table_mut(&mut self, which: MeshArray) -> TableMut<'_> {
        match which {
            MeshArray::Ndcrd => TableMut::Real(&mut self.ndcrd),
            MeshArray::Fccnd => TableMut::Real(&mut self.fccnd),
            MeshArray::Fcnml => TableMut::Real(&mut self.fcnml),
            MeshArray::Fcara => TableMut::Real(&mut self.fcara),
            MeshArray::Clcnd => TableMut::Real(&mut self.clcnd),
            MeshArray::Clvol => TableMut::Real(&mut self.clvol),
            MeshArray::Fctpn => TableMut::Int(&mut self.fctpn),
            MeshArray::Cltpn => TableMut::Int(&mut self.cltpn),
            MeshArray::Clgrp => TableMut::Int(&mut self.clgrp),
            MeshArray::Fcnds => TableMut::Int(&mut self.fcnds),
            MeshArray::Fccls => TableMut::Int(&mut self.fccls),
            MeshArray::Clnds => TableMut::Int(&mut self.clnds),
            MeshArray::Clfcs => TableMut::Int(&mut self.clfcs),
        }
    }

    /// Shared access to a table by its string name.
    pub fn table_by_name(&self, name: &str) -> Result<TableRef<'_>, MeshError> {
        MeshArray::from_name(name)
            .map(|which| self.table(which))
            .ok_or_else(|| MeshError::UnknownTable { name: name.into() })
    }

    /// Exclusive access to a table by its string name.
    pub fn table_by_name_mut(&mut self, name: &str) -> Result<TableMut<'_>, MeshError> {
        match MeshArray::from_name(name) {
            Some(which) => Ok(self.table_mut(which)),
            None => Err(MeshError::UnknownTable { name: name.into() }),
        }
    }

    /// Shape of cell `icl`, from `cltpn`.
    pub fn cell_type(&self, icl: usize) -> Result<CellType, MeshError> {
        let id = tag(&self.cltpn, "cell", icl)?;
        Ok(CellType::by_id(id))
    }

    /// Shape of face `ifc`, from `fctpn`.
    pub fn face_type(&self, ifc: usize) -> Result<CellType, MeshError> {
        let id = tag(&self.fctpn, "face", ifc)?;
        Ok(CellType::by_id(id))
    }

    /// Node indices of cell `icl`, trimmed to its shape's node count.
    pub fn cell_nodes(&self, icl: usize) -> Result<&[i32], MeshError> {
        let shape = self.cell_type(icl)?;
        trimmed(&self.clnds, "cltpn", icl, shape, shape.nnode(), self.ndim)
    }

    /// Face indices of cell `icl`, trimmed to its shape's face count.
    pub fn cell_faces(&self, icl: usize) -> Result<&[i32], MeshError> {
        let shape = self.cell_type(icl)?;
        trimmed(&self.clfcs, "cltpn", icl, shape, shape.nface(), self.ndim)
    }

    /// Node indices of face `ifc`, trimmed to its shape's node count.
    pub fn face_nodes(&self, ifc: usize) -> Result<&[i32], MeshError> {
        let shape = self.face_type(ifc)?;
        trimmed(&self.fcnds, "fctpn", ifc, shape, shape.nnode(), self.ndim)
    }

    /// Cells adjacent to face `ifc`, without sentinel slots.
    ///
    /// Boundary faces yield one cell; interior faces yield two.
    pub fn face_cells(&self, ifc: usize) -> Result<SmallVec<[i32; FCNCL_MAX]>, MeshError> {
        if ifc >= self.nface {
            return Err(MeshError::IndexOutOfRange {
                what: "face",
                index: ifc,
                len: self.nface,
            });
        }
        let row = self.fccls.row(ifc)?;
        Ok(row.iter().copied().filter(|&c| c != INVALID_INDEX).collect())
    }

    /// Check that every `fctpn` and `cltpn` entry is a catalog id legal for
    /// this mesh's dimensionality.
    ///
    /// Cell tags may be any shape up to the mesh dimension. Face tags must
    /// be strictly lower-dimensional. Nothing else in the mesh performs this
    /// check; it is opt-in.
    pub fn validate_type_tags(&self) -> Result<(), MeshError> {
        let ndim = self.ndim;
        let checks: [(&'static str, &TypedArray<i32>, fn(&CellType, usize) -> bool); 2] = [
            ("fctpn", &self.fctpn, CellType::is_legal_face_in),
            ("cltpn", &self.cltpn, CellType::is_legal_in),
        ];
        for (table, tags, is_legal) in checks {
            for (index, &id) in tags.as_slice().iter().enumerate() {
                let legal = CellType::try_from_id(id).is_some_and(|t| is_legal(&t, ndim));
                if !legal {
                    return Err(MeshError::IllegalCellType {
                        table,
                        index,
                        id,
                        ndim: self.ndim,
                    });
                }
            }
        }
        Ok(())
    }
}

fn tag(tags: &TypedArray<i32>, what: &'static str, index: usize) -> Result<i32, MeshError> {
    tags.as_slice()
        .get(index)
        .copied()
        .ok_or(MeshError::IndexOutOfRange {
            what,
            index,
            len: tags.len(),
        })
}

fn trimmed<'a>(
    table: &'a TypedArray<i32>,
    tag_table: &'static str,
    index: usize,
    shape: CellType,
    count: usize,
    ndim: usize,
) -> Result<&'a [i32], MeshError> {
    let row = table.row(index)?;
    row.get(..count).ok_or(MeshError::IllegalCellType {
        table: tag_table,
        index,
        id: shape.id(),
        ndim,
    })
}
