use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;
use crate::interfaces::Dimension;

/// Number of unit cells along each lattice-vector direction.
///
/// Every direction is named explicitly; directions a geometry does not span keep an extent of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeExtent {
    pub l1: usize,
    #[serde(default = "unit_extent")]
    pub l2: usize,
    #[serde(default = "unit_extent")]
    pub l3: usize,
}

fn unit_extent() -> usize {
    1
}

impl LatticeExtent {
    pub fn new(l1: usize, l2: usize, l3: usize) -> Result<Self, LatticeError> {
        let extent = LatticeExtent { l1, l2, l3 };
        extent.validate()?;
        Ok(extent)
    }

    /// `l1` cells along the first direction only.
    pub fn chain(l1: usize) -> Result<Self, LatticeError> {
        Self::new(l1, 1, 1)
    }

    /// `l x l` cells in the plane of the first two directions.
    pub fn square(l: usize) -> Result<Self, LatticeError> {
        Self::new(l, l, 1)
    }

    /// `l x l x l` cells.
    pub fn cubic(l: usize) -> Result<Self, LatticeError> {
        Self::new(l, l, l)
    }

    /// `l` cells along each of the directions spanned by `dimension`, 1 along the rest.
    pub fn uniform(dimension: Dimension, l: usize) -> Result<Self, LatticeError> {
        match dimension {
            Dimension::_1D => Self::chain(l),
            Dimension::_2D => Self::square(l),
            Dimension::_3D => Self::cubic(l),
        }
    }

    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.l1 == 0 || self.l2 == 0 || self.l3 == 0 {
            return Err(LatticeError::invalid(format!(
                "lattice extents must be at least 1, got ({}, {}, {})",
                self.l1, self.l2, self.l3
            )));
        }
        Ok(())
    }

    /// `[L1, L2, L3]`
    pub fn dims(&self) -> [usize; 3] {
        [self.l1, self.l2, self.l3]
    }

    pub fn ncells(&self) -> usize {
        self.l1 * self.l2 * self.l3
    }
}
