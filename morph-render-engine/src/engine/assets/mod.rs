//! Asset definitions for the morph scene.
//!
//! Covers the JSON manifest that configures a session and the geometry
//! extracted from the two-mesh scene file.

/// Manifest asset, its validation and the resulting session options.
pub mod morph_manifest;

/// De-indexed model geometry, colour maps and shared model dimensions.
pub mod model_assets;
