/// Manifest loaded at startup, relative to the asset folder.
pub const MANIFEST_PATH: &str = "morph_manifest.json";

/// Scene file holding exactly two meshes.
pub const DEFAULT_MODEL_PATH: &str = "models/models.glb";

pub const DEFAULT_CLEAR_COLOUR: &str = "#160920";

/// Index of the model shown first. The other model is the first morph target.
pub const DEFAULT_INITIAL_ACTIVE_MODEL: u8 = 1;

pub const DEFAULT_ANIMATION_DURATION: f32 = 2.3;

/// Vertical field of view.
pub const DEFAULT_CAMERA_FOV_DEGREES: f32 = 35.0;

/// Keyboard toggle for the debug panel and the performance overlay.
pub const DEBUG_TOGGLE_KEY: bevy::input::keyboard::KeyCode = bevy::input::keyboard::KeyCode::KeyH;

pub const ANIMATION_DURATION_RANGE: std::ops::RangeInclusive<f32> = 0.0..=10.0;
pub const ANIMATION_DURATION_STEP: f64 = 0.1;

pub const DEBUG_PANEL_WIDTH: f32 = 280.0;
