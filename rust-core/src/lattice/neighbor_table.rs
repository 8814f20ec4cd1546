use log::trace;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;
use crate::lattice::Lattice;

/// One displacement/orbital relation: from every site of `orbit1` to the site of `orbit2`
/// located `displacement` unit cells away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub orbit1: usize,
    pub orbit2: usize,
    pub displacement: [i64; 3],
}

impl Bond {
    pub fn new(orbit1: usize, orbit2: usize, displacement: [i64; 3]) -> Self {
        Bond {
            orbit1,
            orbit2,
            displacement,
        }
    }
}

/// An ordered list of `(initial_site, final_site)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NeighborTable {
    pairs: Vec<[usize; 2]>,
}

impl NeighborTable {
    pub fn new(pairs: Vec<[usize; 2]>) -> Self {
        NeighborTable { pairs }
    }

    /// Read a `2 x N` matrix, one pair per column.
    pub fn from_matrix(matrix: &DMatrix<usize>) -> Result<Self, LatticeError> {
        check_two_rows(matrix)?;
        let pairs = matrix
            .column_iter()
            .map(|column| [column[0], column[1]])
            .collect();
        Ok(NeighborTable { pairs })
    }

    /// The table as a `2 x N` matrix, one pair per column.
    pub fn to_matrix(&self) -> DMatrix<usize> {
        DMatrix::from_fn(2, self.pairs.len(), |r, c| self.pairs[c][r])
    }

    pub fn pairs(&self) -> &[[usize; 2]] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<[usize; 2]> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize; 2]> {
        self.pairs.iter()
    }

    pub fn extend(&mut self, other: NeighborTable) {
        self.pairs.extend(other.pairs);
    }

    /// Rearrange the pairs so that row `i` of the result is row `permutation[i]` of `self`, e.g.
    /// to bring data collected in the original order in line with a sorted table.
    pub fn reorder(&self, permutation: &[usize]) -> Result<NeighborTable, LatticeError> {
        check_permutation(permutation, self.pairs.len())?;
        Ok(NeighborTable {
            pairs: permutation.iter().map(|&i| self.pairs[i]).collect(),
        })
    }
}

impl Lattice {
    /// For every site of `orbit1` (ascending), pair it with the site of `orbit2` located
    /// `displacement` unit cells away. The table has one row per cell.
    pub fn calc_neighbor_table(
        &self,
        orbit1: usize,
        orbit2: usize,
        displacement: &[i64],
    ) -> Result<NeighborTable, LatticeError> {
        let displacement: [i64; 3] = displacement.try_into().map_err(|_| {
            LatticeError::invalid(format!(
                "displacement must have exactly 3 components, got {}",
                displacement.len()
            ))
        })?;
        self.check_orbit(orbit1)?;
        self.check_orbit(orbit2)?;

        let pairs = self
            .sites_of_orbit(orbit1)?
            .map(|site| -> Result<[usize; 2], LatticeError> {
                Ok([site, self.site_to_site(site, displacement, orbit2)?])
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug_assert_eq!(pairs.len(), self.ncells());

        trace!(
            "Neighbor table for orbitals ({}, {}) at displacement {:?}: {} pairs",
            orbit1,
            orbit2,
            displacement,
            pairs.len()
        );
        Ok(NeighborTable { pairs })
    }

    /// Neighbor tables of all `bonds`, concatenated in bond order.
    pub fn calc_bond_neighbor_table(&self, bonds: &[Bond]) -> Result<NeighborTable, LatticeError> {
        let mut table = NeighborTable::default();
        for bond in bonds {
            table.extend(self.calc_neighbor_table(bond.orbit1, bond.orbit2, &bond.displacement)?);
        }
        Ok(table)
    }
}

/// Canonicalize and sort a neighbor table in place.
///
/// Each pair is first ordered so that `first <= second`, then the pairs are stably sorted
/// lexicographically. The returned permutation maps sorted positions back to original ones:
/// sorted pair `i` was pair `permutation[i]` before sorting.
pub fn sort_neighbor_table(table: &mut NeighborTable) -> Vec<usize> {
    for pair in table.pairs.iter_mut() {
        if pair[0] > pair[1] {
            pair.swap(0, 1);
        }
    }
    let mut permutation: Vec<usize> = (0..table.pairs.len()).collect();
    permutation.sort_by_key(|&i| table.pairs[i]);
    table.pairs = permutation.iter().map(|&i| table.pairs[i]).collect();
    permutation
}

/// [`sort_neighbor_table`] for a `2 x N` matrix holding one pair per column.
pub fn sort_neighbor_matrix(matrix: &mut DMatrix<usize>) -> Result<Vec<usize>, LatticeError> {
    let mut table = NeighborTable::from_matrix(matrix)?;
    let permutation = sort_neighbor_table(&mut table);
    *matrix = table.to_matrix();
    Ok(permutation)
}

fn check_two_rows(matrix: &DMatrix<usize>) -> Result<(), LatticeError> {
    if matrix.nrows() != 2 {
        return Err(LatticeError::invalid(format!(
            "neighbor table must have exactly 2 rows, got {}",
            matrix.nrows()
        )));
    }
    Ok(())
}

fn check_permutation(permutation: &[usize], len: usize) -> Result<(), LatticeError> {
    if permutation.len() != len {
        return Err(LatticeError::invalid(format!(
            "permutation has {} entries, table has {len} pairs",
            permutation.len()
        )));
    }
    let mut seen = vec![false; len];
    for &i in permutation {
        if i >= len || std::mem::replace(&mut seen[i], true) {
            return Err(LatticeError::invalid(format!(
                "invalid permutation entry {i} for a table of {len} pairs"
            )));
        }
    }
    Ok(())
}
