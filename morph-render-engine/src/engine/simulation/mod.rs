//! Particle state for the morph simulation.
//!
//! Encodes model geometry into square float textures and holds the session
//! resource shared between the controller, the UI and the render world.

/// Texture encoding of particle positions, flow seeds and per-particle lookup UVs.
pub mod encoder;

/// Session resource: active model, progress, flow parameters and uniforms.
pub mod session;
