//! Monkhorst–Pack sampling of the first Brillouin zone.
//!
//! The mesh is enumerated in the same order as the cells of a [`crate::lattice::Lattice`]
//! (`l3` outermost, `l1` innermost), so k-point `i` pairs with cell `i` when Fourier transforming
//! between site positions and momenta.

use nalgebra::Vector3;

use crate::errors::LatticeError;
use crate::lattice::{Geometry, LatticeExtent};

/// All `L1*L2*L3` points `(l1/L1) b1 + (l2/L2) b2 + (l3/L3) b3` with `0 <= li < Li`.
pub fn monkhorst_pack_mesh(
    geometry: &Geometry,
    extent: &LatticeExtent,
) -> Result<Vec<Vector3<f64>>, LatticeError> {
    extent.validate()?;
    let reciprocal = geometry.padded_reciprocal_vectors();
    let [n1, n2, n3] = extent.dims();

    let mut kpoints = Vec::with_capacity(extent.ncells());
    for l3 in 0..n3 {
        for l2 in 0..n2 {
            for l1 in 0..n1 {
                let frac = Vector3::new(
                    l1 as f64 / n1 as f64,
                    l2 as f64 / n2 as f64,
                    l3 as f64 / n3 as f64,
                );
                kpoints.push(reciprocal * frac);
            }
        }
    }
    Ok(kpoints)
}

/// Fractional coordinates `(l1/L1, l2/L2, l3/L3)` of the `index`-th mesh point.
pub fn kpoint_fractional(index: usize, extent: &LatticeExtent) -> Result<Vector3<f64>, LatticeError> {
    extent.validate()?;
    if index >= extent.ncells() {
        return Err(LatticeError::invalid(format!(
            "k-point {index} out of range for a mesh of {} points",
            extent.ncells()
        )));
    }
    let [n1, n2, _] = extent.dims();
    let l1 = index % n1;
    let l2 = (index / n1) % n2;
    let l3 = index / (n1 * n2);
    let [n1, n2, n3] = extent.dims().map(|n| n as f64);
    Ok(Vector3::new(l1 as f64 / n1, l2 as f64 / n2, l3 as f64 / n3))
}
