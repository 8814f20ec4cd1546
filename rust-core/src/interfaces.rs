// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;

// Enumeration for dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    _1D,
    _2D,
    _3D,
}

impl Dimension {
    pub fn from_ndim(ndim: usize) -> Result<Self, LatticeError> {
        match ndim {
            1 => Ok(Dimension::_1D),
            2 => Ok(Dimension::_2D),
            3 => Ok(Dimension::_3D),
            _ => Err(LatticeError::invalid(format!(
                "number of lattice dimensions must be 1, 2 or 3, got {ndim}"
            ))),
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Dimension::_1D => 1,
            Dimension::_2D => 2,
            Dimension::_3D => 3,
        }
    }
}
