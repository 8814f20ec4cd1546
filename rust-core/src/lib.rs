
//! Finite periodic lattice library
//!
//! This library realizes crystal geometries (lattice vectors plus orbital basis) as finite
//! lattices with periodic boundary conditions and derives the index-level structures that
//! lattice simulations need: site/cell mappings, neighbor tables, translational-equivalence
//! classes, minimum-image displacement vectors and the Monkhorst–Pack k-point mesh.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod lattice;
pub mod lattice_config;

pub use errors::LatticeError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
