//! TOML job configuration for the command-line front end.
//!
//! ```toml
//! [geometry]
//! lattice_vectors = [[1.0, 0.0], [0.5, 0.8660254037844386]]
//! basis_vectors = [[0.0, 0.0], [0.5, 0.28867513459481287]]
//!
//! [extent]
//! l1 = 4
//! l2 = 4
//!
//! [[bonds]]
//! orbit1 = 0
//! orbit2 = 1
//! displacement = [0, 0, 0]
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::errors::LatticeError;
use crate::lattice::{Bond, Geometry, Lattice, LatticeExtent};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub geometry: GeometryConfig,
    pub extent: LatticeExtent,
    #[serde(default)]
    pub bonds: Vec<Bond>,
}

/// Lattice and basis vectors, one inner list per vector.
#[derive(Debug, Deserialize)]
pub struct GeometryConfig {
    pub lattice_vectors: Vec<Vec<f64>>,
    pub basis_vectors: Vec<Vec<f64>>,
}

impl JobConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: JobConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn build_geometry(&self) -> Result<Geometry, LatticeError> {
        Geometry::from_vectors(&self.geometry.lattice_vectors, &self.geometry.basis_vectors)
    }

    pub fn build_lattice(&self) -> Result<Lattice, LatticeError> {
        Lattice::new(self.build_geometry()?, self.extent)
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    JobConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse configuration {}", path.display()))
}
