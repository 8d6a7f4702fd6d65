//! Particle drawing.
//!
//! The compute passes live in [`crate::engine::compute`]; this module only
//! holds the material that reads their output.

/// Material sampling the live position texture and blending both colour maps.
pub mod morph_material;
