//! Mesh generation for the particle renderer.

/// Particle mesh with reference, base and target UV attributes.
pub mod particle_mesh;
