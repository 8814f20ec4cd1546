//! Translational-equivalence classes of site pairs.
//!
//! For every ordered orbital pair `(orbit1, orbit2)` and every unit-cell displacement inside the
//! lattice extent, the class holds the `ncells` site pairs related to one another by a lattice
//! translation. Real-space correlations are averaged over a class before transforming to
//! momentum space.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::LatticeError;
use crate::lattice::{Lattice, NeighborTable};

/// Identifies one translational class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TranslationKey {
    pub orbit1: usize,
    pub orbit2: usize,
    /// Unit-cell displacement `(l1, l2, l3)` with `0 <= li < Li`.
    pub displacement: [usize; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationClass {
    pub key: TranslationKey,
    pub pairs: NeighborTable,
}

/// All translational classes of a lattice.
///
/// Classes are stored with `orbit1` varying slowest, then `orbit2`, then `l3`, `l2` and `l1`.
#[derive(Debug, Clone)]
pub struct TranslationalSets {
    classes: Vec<TranslationClass>,
    lookup: HashMap<TranslationKey, usize>,
}

impl TranslationalSets {
    pub fn get(
        &self,
        orbit1: usize,
        orbit2: usize,
        displacement: [usize; 3],
    ) -> Option<&NeighborTable> {
        let key = TranslationKey {
            orbit1,
            orbit2,
            displacement,
        };
        self.lookup.get(&key).map(|&i| &self.classes[i].pairs)
    }

    pub fn classes(&self) -> &[TranslationClass] {
        &self.classes
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationClass> {
        self.classes.iter()
    }

    /// Number of classes, `norbits^2 * ncells`.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Lattice {
    pub fn translationally_equivalent_sets(&self) -> Result<TranslationalSets, LatticeError> {
        self.check_orbital_balance()?;

        let norbits = self.norbits();
        let dims = self.dims();
        let mut keys = Vec::with_capacity(norbits * norbits * self.ncells());
        for orbit1 in 0..norbits {
            for orbit2 in 0..norbits {
                for l3 in 0..dims[2] {
                    for l2 in 0..dims[1] {
                        for l1 in 0..dims[0] {
                            keys.push(TranslationKey {
                                orbit1,
                                orbit2,
                                displacement: [l1, l2, l3],
                            });
                        }
                    }
                }
            }
        }

        let build = |key: &TranslationKey| -> Result<TranslationClass, LatticeError> {
            let displacement = key.displacement.map(|l| l as i64);
            let pairs = self.calc_neighbor_table(key.orbit1, key.orbit2, &displacement)?;
            Ok(TranslationClass { key: *key, pairs })
        };
        #[cfg(feature = "parallel")]
        let classes = keys
            .par_iter()
            .map(build)
            .collect::<Result<Vec<_>, LatticeError>>()?;
        #[cfg(not(feature = "parallel"))]
        let classes = keys
            .iter()
            .map(build)
            .collect::<Result<Vec<_>, LatticeError>>()?;

        let lookup = classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.key, i))
            .collect();

        debug!(
            "Built {} translational classes of {} pairs each",
            classes.len(),
            self.ncells()
        );
        Ok(TranslationalSets { classes, lookup })
    }
}
