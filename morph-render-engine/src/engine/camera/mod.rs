//! Camera placement for the morph scene.
//!
//! The camera sits on the +Z axis at the distance that fits both models
//! inside the frustum, and is refitted whenever the window changes size.

/// Frustum fit distance for an axis-aligned box.
pub mod camera_fit;

/// Morph camera component, viewport fit and the resize system.
pub mod viewport_camera;
