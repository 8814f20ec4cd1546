// Constants

// Tolerances
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // For construction of geometries (singularity, padding checks)

// Physical dimensions a geometry can span
pub const MAX_DIMENSION: usize = 3;
