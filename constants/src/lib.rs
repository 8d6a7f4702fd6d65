//! Shared constant tables for the particle morph renderer.
//!
//! Keeps preset parameters, flow-field defaults, simulation texture layout
//! and render settings in one place so the engine and its tests agree on them.

/// Flow-field parameter defaults and the ranges exposed by the debug panel.
pub mod flow_field;

/// The fixed, ordered list of morph presets.
pub mod presets;

/// Camera, colour and asset path defaults.
pub mod render_settings;

/// Simulation texture format and compute dispatch layout.
pub mod texture;
