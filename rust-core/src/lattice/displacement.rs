use nalgebra::Vector3;

use crate::errors::LatticeError;
use crate::lattice::Lattice;

/// Map an integer cell offset along a periodic direction of `extent` cells into `(-L/2, L/2]`.
/// Fails for an `extent` of zero.
pub fn minimum_image(delta: i64, extent: usize) -> Result<i64, LatticeError> {
    if extent == 0 {
        return Err(LatticeError::invalid("minimum image needs an extent of at least 1"));
    }
    let l = extent as i64;
    let wrapped = delta.rem_euclid(l);
    Ok(if wrapped > l - wrapped { wrapped - l } else { wrapped })
}

impl Lattice {
    /// Shortest real-space vector pointing from `site2` to `site1` under periodic boundary
    /// conditions (minimum-image convention).
    pub fn site_to_site_vec(&self, site1: usize, site2: usize) -> Result<Vector3<f64>, LatticeError> {
        let mut r = Vector3::zeros();
        self.site_to_site_vec_into(&mut r, site1, site2)?;
        Ok(r)
    }

    /// [`Self::site_to_site_vec`] writing into a caller-owned buffer.
    pub fn site_to_site_vec_into(
        &self,
        r: &mut Vector3<f64>,
        site1: usize,
        site2: usize,
    ) -> Result<(), LatticeError> {
        let loc1 = self.site_to_loc(site1)?;
        let loc2 = self.site_to_loc(site2)?;
        let orbit1 = self.site_orbits()[site1];
        let orbit2 = self.site_orbits()[site2];

        let dims = self.dims();
        let lattice_vectors = self.geometry().lattice_vectors_3d();
        r.fill(0.0);
        for d in 0..3 {
            let delta = minimum_image(loc1[d] as i64 - loc2[d] as i64, dims[d])?;
            *r += lattice_vectors[d] * delta as f64;
        }
        *r += self.geometry().basis_vector(orbit1)? - self.geometry().basis_vector(orbit2)?;
        Ok(())
    }

    /// Minimum-image vectors from `site` to every site of the lattice, indexed by target site.
    pub fn displacements_from(&self, site: usize) -> Result<Vec<Vector3<f64>>, LatticeError> {
        self.check_site(site)?;
        let mut out = vec![Vector3::zeros(); self.nsites()];
        for (target, r) in out.iter_mut().enumerate() {
            self.site_to_site_vec_into(r, target, site)?;
        }
        Ok(out)
    }
}
