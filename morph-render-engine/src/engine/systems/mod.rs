//! Runtime UI: the parameter panel, the FPS overlay and the key that toggles both.

/// egui panel editing session parameters and emitting morph triggers.
pub mod debug_panel;

/// FPS text overlay fed by frame time diagnostics.
pub mod fps_tracking;

pub mod overlay_toggle;
