//! Standard geometry construction utilities for common crystals

use crate::errors::LatticeError;
use crate::lattice::Geometry;

/// Create a one-dimensional chain with lattice spacing `a`
pub fn chain(a: f64) -> Result<Geometry, LatticeError> {
    Geometry::from_vectors(&[[a]], &[[0.0]])
}

/// Create a square geometry with given lattice parameter
pub fn square(a: f64) -> Result<Geometry, LatticeError> {
    rectangular(a, a)
}

/// Create a rectangular geometry with given lattice parameters
pub fn rectangular(a: f64, b: f64) -> Result<Geometry, LatticeError> {
    Geometry::from_vectors(&[[a, 0.0], [0.0, b]], &[[0.0, 0.0]])
}

/// Create a triangular (hexagonal Bravais) geometry with one orbital per cell
pub fn triangular(a: f64) -> Result<Geometry, LatticeError> {
    let [a1, a2] = hexagonal_vectors(a);
    Geometry::from_vectors(&[a1, a2], &[[0.0, 0.0]])
}

/// Create a honeycomb geometry: hexagonal Bravais lattice with a two-orbital basis
pub fn honeycomb(a: f64) -> Result<Geometry, LatticeError> {
    let [a1, a2] = hexagonal_vectors(a);
    let b = [(a1[0] + a2[0]) / 3.0, (a1[1] + a2[1]) / 3.0];
    Geometry::from_vectors(&[a1, a2], &[[0.0, 0.0], b])
}

/// Create a kagome geometry: hexagonal Bravais lattice with a three-orbital basis
pub fn kagome(a: f64) -> Result<Geometry, LatticeError> {
    let [a1, a2] = hexagonal_vectors(a);
    Geometry::from_vectors(
        &[a1, a2],
        &[
            [0.0, 0.0],
            [a1[0] / 2.0, a1[1] / 2.0],
            [a2[0] / 2.0, a2[1] / 2.0],
        ],
    )
}

/// Create a simple cubic geometry with given lattice parameter
pub fn cubic(a: f64) -> Result<Geometry, LatticeError> {
    Geometry::from_vectors(
        &[[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]],
        &[[0.0, 0.0, 0.0]],
    )
}

// a1 = (a, 0), a2 = (a/2, a√3/2), enclosing 60°
fn hexagonal_vectors(a: f64) -> [[f64; 2]; 2] {
    [[a, 0.0], [a / 2.0, a * 3.0_f64.sqrt() / 2.0]]
}
