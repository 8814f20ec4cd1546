use std::f64::consts::PI;

use log::debug;
use nalgebra::{DMatrix, Matrix3, Vector3};
use serde::Serialize;

use crate::config::{BASE_VECTOR_TOLERANCE, MAX_DIMENSION};
use crate::errors::LatticeError;
use crate::interfaces::Dimension;

/// An infinite crystal: lattice vectors plus the positions of the orbitals in one unit cell.
///
/// Only the physically meaningful `ndim x ndim` block of the lattice (and reciprocal) vectors is
/// stored. Accessors with a `_3d` suffix extend it to three components at the boundary; directions
/// beyond `ndim` are padded with the cartesian unit vectors so the padded matrix stays invertible.
/// Basis vectors always keep three components, so orbitals may sit out of the lattice plane
/// (bilayers, buckled bases).
#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    dimension: Dimension,
    norbits: usize,
    /// Lattice vectors (columns).
    lattice_vectors: DMatrix<f64>,
    /// Reciprocal lattice vectors (columns), `a_i . b_j = 2π δ_ij`.
    reciprocal_vectors: DMatrix<f64>,
    /// Basis (orbital) positions within the unit cell (columns, `3 x norbits`).
    basis_vectors: DMatrix<f64>,
}

impl Geometry {
    /// Build a geometry from ordered collections of vectors.
    ///
    /// The number of lattice vectors fixes `ndim`. Each lattice vector holds either `ndim`
    /// components or three components whose entries beyond `ndim` vanish. Basis vectors hold
    /// `ndim` or three components; shorter ones are zero-extended.
    pub fn from_vectors<V: AsRef<[f64]>, W: AsRef<[f64]>>(
        lattice_vectors: &[V],
        basis_vectors: &[W],
    ) -> Result<Self, LatticeError> {
        let dimension = Dimension::from_ndim(lattice_vectors.len())?;
        let ndim = dimension.ndim();

        let lattice_columns = lattice_vectors
            .iter()
            .enumerate()
            .map(|(i, v)| truncate_to_ndim(v.as_ref(), ndim, i))
            .collect::<Result<Vec<_>, _>>()?;
        let basis_columns = basis_vectors
            .iter()
            .enumerate()
            .map(|(i, v)| extend_to_3d(v.as_ref(), ndim, i))
            .collect::<Result<Vec<_>, _>>()?;

        let lattice = DMatrix::from_fn(ndim, ndim, |r, c| lattice_columns[c][r]);
        let basis = DMatrix::from_fn(MAX_DIMENSION, basis_columns.len(), |r, c| basis_columns[c][r]);

        Self::from_matrices(lattice, basis)
    }

    /// Build a geometry from an `ndim x ndim` lattice matrix and an `ndim x norbits` or
    /// `3 x norbits` basis matrix (vectors stored as columns).
    pub fn from_matrices(
        lattice_vectors: DMatrix<f64>,
        basis_vectors: DMatrix<f64>,
    ) -> Result<Self, LatticeError> {
        if !lattice_vectors.is_square() {
            return Err(LatticeError::invalid(format!(
                "lattice vector matrix must be square, got {}x{}",
                lattice_vectors.nrows(),
                lattice_vectors.ncols()
            )));
        }
        let dimension = Dimension::from_ndim(lattice_vectors.nrows())?;
        let ndim = dimension.ndim();

        if basis_vectors.nrows() != ndim && basis_vectors.nrows() != MAX_DIMENSION {
            return Err(LatticeError::invalid(format!(
                "basis vectors must have {ndim} or {MAX_DIMENSION} components, got {}",
                basis_vectors.nrows()
            )));
        }
        let norbits = basis_vectors.ncols();
        let basis_vectors = basis_vectors.resize_vertically(MAX_DIMENSION, 0.0);
        if norbits == 0 {
            return Err(LatticeError::invalid("a geometry needs at least one orbital"));
        }

        // Linearly non-dependent (also catches zero vectors)
        let determinant = lattice_vectors.determinant();
        if determinant.abs() < BASE_VECTOR_TOLERANCE {
            return Err(LatticeError::SingularBasis { determinant });
        }
        let inverse = lattice_vectors
            .clone()
            .try_inverse()
            .ok_or(LatticeError::SingularBasis { determinant })?;
        let reciprocal_vectors = inverse.transpose() * (2.0 * PI);

        debug!(
            "Constructed {:?} geometry with {} orbital(s), cell volume {:.6}",
            dimension,
            norbits,
            determinant.abs()
        );

        Ok(Geometry {
            dimension,
            norbits,
            lattice_vectors,
            reciprocal_vectors,
            basis_vectors,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn ndim(&self) -> usize {
        self.dimension.ndim()
    }

    pub fn norbits(&self) -> usize {
        self.norbits
    }

    pub fn lattice_vectors(&self) -> &DMatrix<f64> {
        &self.lattice_vectors
    }

    pub fn reciprocal_vectors(&self) -> &DMatrix<f64> {
        &self.reciprocal_vectors
    }

    pub fn basis_vectors(&self) -> &DMatrix<f64> {
        &self.basis_vectors
    }

    /// Lattice vectors placed into the top-left block of the 3x3 identity.
    pub fn padded_lattice_vectors(&self) -> Matrix3<f64> {
        pad_block(&self.lattice_vectors, 1.0)
    }

    /// Reciprocal vectors of [`Self::padded_lattice_vectors`]; the padded directions carry `2π`.
    ///
    /// Vectors are the columns, i.e. `2π (A^-1)^T`. This is the transpose of the row convention
    /// `2π A^-1`, where the reciprocal vectors are the rows.
    pub fn padded_reciprocal_vectors(&self) -> Matrix3<f64> {
        pad_block(&self.reciprocal_vectors, 2.0 * PI)
    }

    /// The three (padded) lattice vectors.
    pub fn lattice_vectors_3d(&self) -> [Vector3<f64>; 3] {
        let padded = self.padded_lattice_vectors();
        [
            padded.column(0).into(),
            padded.column(1).into(),
            padded.column(2).into(),
        ]
    }

    /// The three (padded) reciprocal lattice vectors.
    pub fn reciprocal_vectors_3d(&self) -> [Vector3<f64>; 3] {
        let padded = self.padded_reciprocal_vectors();
        [
            padded.column(0).into(),
            padded.column(1).into(),
            padded.column(2).into(),
        ]
    }

    /// Basis vector of `orbit`.
    pub fn basis_vector(&self, orbit: usize) -> Result<Vector3<f64>, LatticeError> {
        if orbit >= self.norbits {
            return Err(LatticeError::invalid(format!(
                "orbital {orbit} out of range for geometry with {} orbital(s)",
                self.norbits
            )));
        }
        Ok(self.basis_vectors.fixed_view::<3, 1>(0, orbit).into_owned())
    }

    /// All basis vectors.
    pub fn basis_vectors_3d(&self) -> Vec<Vector3<f64>> {
        (0..self.norbits)
            .map(|orbit| self.basis_vectors.fixed_view::<3, 1>(0, orbit).into_owned())
            .collect()
    }

    /// Length, area or volume of the unit cell depending on `ndim`.
    pub fn cell_volume(&self) -> f64 {
        self.lattice_vectors.determinant().abs()
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: Vector3<f64>) -> Vector3<f64> {
        self.padded_lattice_vectors() * v_frac
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: Vector3<f64>) -> Vector3<f64> {
        // B^T A = 2π 1, so A^-1 = B^T / 2π
        self.padded_reciprocal_vectors().transpose() * v_cart / (2.0 * PI)
    }
}

fn truncate_to_ndim(
    vector: &[f64],
    ndim: usize,
    index: usize,
) -> Result<Vec<f64>, LatticeError> {
    let len = vector.len();
    if len != ndim && len != MAX_DIMENSION {
        return Err(LatticeError::invalid(format!(
            "lattice vector {index} must have {ndim} or {MAX_DIMENSION} components, got {len}"
        )));
    }
    if vector[ndim..].iter().any(|x| x.abs() > BASE_VECTOR_TOLERANCE) {
        return Err(LatticeError::invalid(format!(
            "lattice vector {index} has non-zero components beyond dimension {ndim}"
        )));
    }
    Ok(vector[..ndim].to_vec())
}

fn pad_block(block: &DMatrix<f64>, diagonal: f64) -> Matrix3<f64> {
    let mut padded = Matrix3::identity() * diagonal;
    let n = block.nrows();
    padded.view_mut((0, 0), (n, n)).copy_from(block);
    padded
}

fn extend_to_3d(vector: &[f64], ndim: usize, index: usize) -> Result<Vec<f64>, LatticeError> {
    let len = vector.len();
    if len != ndim && len != MAX_DIMENSION {
        return Err(LatticeError::invalid(format!(
            "basis vector {index} must have {ndim} or {MAX_DIMENSION} components, got {len}"
        )));
    }
    let mut out = vector.to_vec();
    out.resize(MAX_DIMENSION, 0.0);
    Ok(out)
}
