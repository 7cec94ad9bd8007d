//! Mesh construction parameters.

use crate::error::MeshError;

/// Sizes and flags fixed at mesh construction.
///
/// Validated once by [`StaticMesh::from_config`](crate::StaticMesh::from_config);
/// a mesh never changes its counts afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshConfig {
    /// Spatial dimensionality, 2 or 3.
    pub ndim: usize,
    /// Number of interior nodes.
    pub nnode: usize,
    /// Number of interior faces.
    pub nface: usize,
    /// Number of interior cells.
    pub ncell: usize,
    /// Number of boundary faces.
    pub nbound: usize,
    /// Whether cell centers are incenters rather than centroids.
    ///
    /// Stored for geometry routines; the mesh itself never reads it.
    pub use_incenter: bool,
}

impl MeshConfig {
    /// Largest accepted count: connectivity tables store `i32` indices.
    pub const MAX_COUNT: usize = i32::MAX as usize;

    /// Dimensionality used by [`MeshConfig::default`].
    pub const DEFAULT_NDIM: usize = 2;

    /// Create a config with the given sizes and `use_incenter` off.
    pub fn new(ndim: usize, nnode: usize, nface: usize, ncell: usize, nbound: usize) -> Self {
        Self {
            ndim,
            nnode,
            nface,
            ncell,
            nbound,
            use_incenter: false,
        }
    }

    /// Set the incenter flag.
    pub fn with_incenter(mut self, use_incenter: bool) -> Self {
        self.use_incenter = use_incenter;
        self
    }

    /// Check dimensionality and count ranges.
    pub fn validate(&self) -> Result<(), MeshError> {
        if !matches!(self.ndim, 2 | 3) {
            return Err(MeshError::InvalidDimension { ndim: self.ndim });
        }
        for (name, value) in [
            ("nnode", self.nnode),
            ("nface", self.nface),
            ("ncell", self.ncell),
            ("nbound", self.nbound),
        ] {
            if value > Self::MAX_COUNT {
                return Err(MeshError::CountOverflow {
                    name,
                    value,
                    max: Self::MAX_COUNT,
                });
            }
        }
        Ok(())
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NDIM, 0, 0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_planar() {
        let config = MeshConfig::default();
        assert_eq!(config.ndim, 2);
        assert_eq!(config.ncell, 0);
        assert!(!config.use_incenter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dimensionality_must_be_two_or_three() {
        for ndim in [0, 1, 4] {
            assert_eq!(
                MeshConfig::new(ndim, 1, 1, 1, 0).validate(),
                Err(MeshError::InvalidDimension { ndim })
            );
        }
        assert!(MeshConfig::new(3, 1, 1, 1, 0).validate().is_ok());
    }

    #[test]
    fn counts_must_fit_i32() {
        let config = MeshConfig::new(2, 1, MeshConfig::MAX_COUNT + 1, 1, 0);
        assert_eq!(
            config.validate(),
            Err(MeshError::CountOverflow {
                name: "nface",
                value: MeshConfig::MAX_COUNT + 1,
                max: MeshConfig::MAX_COUNT,
            })
        );
    }

    #[test]
    fn incenter_flag() {
        assert!(MeshConfig::new(2, 0, 0, 0, 0).with_incenter(true).use_incenter);
    }
}
