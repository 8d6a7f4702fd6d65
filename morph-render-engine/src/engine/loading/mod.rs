//! Startup pipeline: manifest, scene file, simulation textures, particle entity.
//!
//! Each stage sets its flag on [`progress::LoadingProgress`] and the next one
//! waits for it.

/// Reads the morph manifest and seeds the session from it.
pub mod manifest_loader;

/// Loads the two-mesh scene file and extracts geometry and colour maps.
pub mod model_loader;

/// Spawns the particle mesh with its material and fits the camera.
pub mod particle_creator;

pub mod progress;

/// Encodes model positions into the ping-pong simulation textures.
pub mod texture_config;
