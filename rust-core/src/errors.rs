//! Error taxonomy for geometry and lattice operations.
//!
//! Every failure is a precondition violation on a pure function, raised before any output is
//! produced. Callers are expected to treat them as fatal configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid argument: lattice vectors are singular (determinant {determinant:.3e})")]
    SingularBasis { determinant: f64 },
}

impl LatticeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LatticeError::InvalidArgument(msg.into())
    }

    /// All lattice errors belong to the invalid-argument class.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LatticeError::InvalidArgument(_) | LatticeError::SingularBasis { .. }
        )
    }
}
