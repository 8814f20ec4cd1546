use log::{debug, warn};
use nalgebra::Vector3;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::LatticeError;
use crate::lattice::kpoint_mesh::monkhorst_pack_mesh;
use crate::lattice::{Geometry, LatticeExtent};

/// A [`Geometry`] realized at finite extent with periodic boundary conditions.
///
/// Cells are enumerated with `l3` outermost and `l1` innermost, so the cell at `(l1, l2, l3)` has
/// index `l1 + l2*L1 + l3*L1*L2`. Sites are numbered orbital by orbital inside each cell, so the
/// site of orbital `orbit` in cell `cell` has index `norbits*cell + orbit`. All indices are
/// 0-based.
#[derive(Debug, Clone, Serialize)]
pub struct Lattice {
    geometry: Geometry,
    extent: LatticeExtent,
    ncells: usize,
    nsites: usize,
    /// `(l1, l2, l3)` of every cell.
    cell_loc: Vec<[usize; 3]>,
    /// Real-space position of every site.
    positions: Vec<Vector3<f64>>,
    /// Monkhorst–Pack mesh, index-matched to the cells.
    kpoints: Vec<Vector3<f64>>,
    site_to_orbit: Vec<usize>,
    site_to_cell: Vec<usize>,
}

impl Lattice {
    /// Construct a new finite lattice from a geometry and its extents.
    pub fn new(geometry: Geometry, extent: LatticeExtent) -> Result<Self, LatticeError> {
        extent.validate()?;

        let dims = extent.dims();
        for (direction, &l) in dims.iter().enumerate().skip(geometry.ndim()) {
            if l > 1 {
                warn!(
                    "Extent {} along direction {} lies beyond the {:?} geometry; cells are stacked along the padded unit vector",
                    l,
                    direction + 1,
                    geometry.dimension()
                );
            }
        }

        let norbits = geometry.norbits();
        let ncells = extent.ncells();
        let nsites = ncells * norbits;

        // 1) Enumerate cells and sites in canonical order
        let mut cell_loc = Vec::with_capacity(ncells);
        let mut site_to_cell = Vec::with_capacity(nsites);
        let mut site_to_orbit = Vec::with_capacity(nsites);
        for l3 in 0..dims[2] {
            for l2 in 0..dims[1] {
                for l1 in 0..dims[0] {
                    let cell = cell_loc.len();
                    cell_loc.push([l1, l2, l3]);
                    for orbit in 0..norbits {
                        site_to_cell.push(cell);
                        site_to_orbit.push(orbit);
                    }
                }
            }
        }

        // 2) Real-space positions: cell origin + basis vector of the orbital
        let lattice_vectors = geometry.lattice_vectors_3d();
        let basis_vectors = geometry.basis_vectors_3d();
        let position_of = |site: usize| {
            let loc = cell_loc[site / norbits];
            cell_origin(&lattice_vectors, loc.map(|l| l as f64)) + basis_vectors[site % norbits]
        };
        #[cfg(feature = "parallel")]
        let positions: Vec<Vector3<f64>> = (0..nsites).into_par_iter().map(position_of).collect();
        #[cfg(not(feature = "parallel"))]
        let positions: Vec<Vector3<f64>> = (0..nsites).map(position_of).collect();

        // 3) Reciprocal-space mesh, index-matched to the cells
        let kpoints = monkhorst_pack_mesh(&geometry, &extent)?;

        let lattice = Lattice {
            geometry,
            extent,
            ncells,
            nsites,
            cell_loc,
            positions,
            kpoints,
            site_to_orbit,
            site_to_cell,
        };
        lattice.check_orbital_balance()?;

        debug!(
            "Constructed lattice with extent {:?}: {} cells, {} sites",
            dims, ncells, nsites
        );
        Ok(lattice)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn extent(&self) -> &LatticeExtent {
        &self.extent
    }

    /// `[L1, L2, L3]`
    pub fn dims(&self) -> [usize; 3] {
        self.extent.dims()
    }

    pub fn ndim(&self) -> usize {
        self.geometry.ndim()
    }

    pub fn norbits(&self) -> usize {
        self.geometry.norbits()
    }

    pub fn ncells(&self) -> usize {
        self.ncells
    }

    pub fn nsites(&self) -> usize {
        self.nsites
    }

    pub fn cell_locations(&self) -> &[[usize; 3]] {
        &self.cell_loc
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn kpoints(&self) -> &[Vector3<f64>] {
        &self.kpoints
    }

    /// Orbital of every site.
    pub fn site_orbits(&self) -> &[usize] {
        &self.site_to_orbit
    }

    /// Owning cell of every site.
    pub fn site_cells(&self) -> &[usize] {
        &self.site_to_cell
    }

    pub fn site_to_orbit(&self, site: usize) -> Result<usize, LatticeError> {
        self.check_site(site)?;
        Ok(self.site_to_orbit[site])
    }

    pub fn site_to_cell(&self, site: usize) -> Result<usize, LatticeError> {
        self.check_site(site)?;
        Ok(self.site_to_cell[site])
    }

    pub fn site_to_loc(&self, site: usize) -> Result<[usize; 3], LatticeError> {
        self.check_site(site)?;
        Ok(self.cell_loc[self.site_to_cell[site]])
    }

    pub fn cell_to_loc(&self, cell: usize) -> Result<[usize; 3], LatticeError> {
        self.check_cell(cell)?;
        Ok(self.cell_loc[cell])
    }

    pub fn site_position(&self, site: usize) -> Result<Vector3<f64>, LatticeError> {
        self.check_site(site)?;
        Ok(self.positions[site])
    }

    /// Real-space position of the origin of the cell at `loc`. The location is not wrapped.
    pub fn cell_position(&self, loc: [i64; 3]) -> Vector3<f64> {
        cell_origin(&self.geometry.lattice_vectors_3d(), loc.map(|l| l as f64))
    }

    /// Reduce a cell location into `[0, L)` along every direction.
    pub fn wrap_loc(&self, loc: [i64; 3]) -> [usize; 3] {
        let dims = self.dims();
        [0, 1, 2].map(|d| loc[d].rem_euclid(dims[d] as i64) as usize)
    }

    /// Index of the cell at `loc`, applying periodic boundary conditions.
    pub fn loc_to_cell(&self, loc: [i64; 3]) -> usize {
        let [l1, l2, l3] = self.wrap_loc(loc);
        let dims = self.dims();
        l1 + l2 * dims[0] + l3 * dims[0] * dims[1]
    }

    /// Index of the site of `orbit` in the cell at `loc`, applying periodic boundary conditions.
    pub fn loc_to_site(&self, loc: [i64; 3], orbit: usize) -> Result<usize, LatticeError> {
        self.check_orbit(orbit)?;
        Ok(self.norbits() * self.loc_to_cell(loc) + orbit)
    }

    /// Site of `orbit` in the cell reached by moving `displacement` unit cells from the cell of
    /// `site`. The orbital of `site` itself plays no role.
    pub fn site_to_site(
        &self,
        site: usize,
        displacement: [i64; 3],
        orbit: usize,
    ) -> Result<usize, LatticeError> {
        let loc = self.site_to_loc(site)?;
        let dims = self.dims();
        // Reduce first so extreme displacements cannot overflow.
        let target = [0, 1, 2].map(|d| loc[d] as i64 + displacement[d].rem_euclid(dims[d] as i64));
        self.loc_to_site(target, orbit)
    }

    /// Sites of `orbit` in ascending order.
    pub fn sites_of_orbit(
        &self,
        orbit: usize,
    ) -> Result<impl Iterator<Item = usize> + '_, LatticeError> {
        self.check_orbit(orbit)?;
        Ok((orbit..self.nsites).step_by(self.norbits()))
    }

    /// Every orbital must own exactly `ncells` sites; neighbor tables and translational classes
    /// rely on this.
    pub fn check_orbital_balance(&self) -> Result<(), LatticeError> {
        let mut counts = vec![0usize; self.norbits()];
        for &orbit in &self.site_to_orbit {
            counts[orbit] += 1;
        }
        match counts.iter().position(|&count| count != self.ncells) {
            Some(orbit) => Err(LatticeError::invalid(format!(
                "orbital {orbit} owns {} sites, expected {}",
                counts[orbit], self.ncells
            ))),
            None => Ok(()),
        }
    }

    pub(crate) fn check_site(&self, site: usize) -> Result<(), LatticeError> {
        if site >= self.nsites {
            return Err(LatticeError::invalid(format!(
                "site {site} out of range for lattice with {} sites",
                self.nsites
            )));
        }
        Ok(())
    }

    pub(crate) fn check_cell(&self, cell: usize) -> Result<(), LatticeError> {
        if cell >= self.ncells {
            return Err(LatticeError::invalid(format!(
                "cell {cell} out of range for lattice with {} cells",
                self.ncells
            )));
        }
        Ok(())
    }

    pub(crate) fn check_orbit(&self, orbit: usize) -> Result<(), LatticeError> {
        if orbit >= self.norbits() {
            return Err(LatticeError::invalid(format!(
                "orbital {orbit} out of range for lattice with {} orbital(s)",
                self.norbits()
            )));
        }
        Ok(())
    }
}

fn cell_origin(lattice_vectors: &[Vector3<f64>; 3], loc: [f64; 3]) -> Vector3<f64> {
    lattice_vectors[0] * loc[0] + lattice_vectors[1] * loc[1] + lattice_vectors[2] * loc[2]
}
