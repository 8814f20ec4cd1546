//! Lattice module: crystal geometries, finite periodic lattices and the index structures built on them.
//!
//! Quick reference
//! - Types: [`Geometry`], [`LatticeExtent`], [`Lattice`], [`NeighborTable`], [`Bond`], [`TranslationalSets`]
//! - Geometries: [`chain`], [`square`], [`rectangular`], [`triangular`], [`honeycomb`], [`kagome`], [`cubic`]
//! - Indexing: [`Lattice::loc_to_cell`], [`Lattice::loc_to_site`], [`Lattice::site_to_site`]
//! - Neighbors: [`Lattice::calc_neighbor_table`], [`Lattice::calc_bond_neighbor_table`], [`sort_neighbor_table`]
//! - Symmetry: [`Lattice::translationally_equivalent_sets`]
//! - Reciprocal space: [`monkhorst_pack_mesh`], [`kpoint_fractional`]
//! - Displacements: [`Lattice::site_to_site_vec`], [`minimum_image`]

// ======================== MODULE DECLARATIONS ========================
pub mod displacement;
pub mod finite_lattice;
pub mod geometry;
pub mod geometry_construction;
pub mod kpoint_mesh;
pub mod lattice_extent;
pub mod neighbor_table;
pub mod translational_symmetry;

// Test modules
mod _tests_displacement;
mod _tests_neighbor_table;

// ======================== CORE TYPES ========================
#[doc(inline)]
pub use geometry::Geometry;

#[doc(inline)]
pub use lattice_extent::LatticeExtent;

#[doc(inline)]
pub use finite_lattice::Lattice;

// ======================== GEOMETRY CONSTRUCTION ========================
pub use geometry_construction::{chain, cubic, honeycomb, kagome, rectangular, square, triangular};

// ======================== NEIGHBOR TABLES ========================
pub use neighbor_table::{Bond, NeighborTable, sort_neighbor_matrix, sort_neighbor_table};

// ======================== TRANSLATIONAL SYMMETRY ========================
pub use translational_symmetry::{TranslationClass, TranslationKey, TranslationalSets};

// ======================== RECIPROCAL SPACE & DISPLACEMENTS ========================
pub use displacement::minimum_image;
pub use kpoint_mesh::{kpoint_fractional, monkhorst_pack_mesh};

/// A convenience prelude for importing common lattice items.
pub mod prelude {
    #[doc(no_inline)]
    pub use super::{Bond, Geometry, Lattice, LatticeExtent, NeighborTable, sort_neighbor_table};
}
