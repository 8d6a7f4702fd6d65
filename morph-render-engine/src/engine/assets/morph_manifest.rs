use bevy::color::{HexColorError, Srgba};
use bevy::prelude::*;
use constants::flow_field::{DEFAULT_FREQUENCY, DEFAULT_INFLUENCE, DEFAULT_STRENGTH};
use constants::presets::FlowType;
use constants::render_settings::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_CAMERA_FOV_DEGREES, DEFAULT_CLEAR_COLOUR,
    DEFAULT_INITIAL_ACTIVE_MODEL, DEFAULT_MODEL_PATH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::simulation::session::{ActiveModel, FlowFieldParams};

/// Flow-field section of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowFieldSettings {
    pub influence: f32,
    pub strength: f32,
    pub frequency: f32,
}

impl Default for FlowFieldSettings {
    fn default() -> Self {
        Self {
            influence: DEFAULT_INFLUENCE,
            strength: DEFAULT_STRENGTH,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

/// Startup configuration loaded from `morph_manifest.json`. Mirrors the JSON structure;
/// missing fields take the shared defaults.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphManifest {
    pub model_path: String,
    pub clear_color: String,
    pub animation_duration: f32,
    pub initial_active_model: u8,
    pub free_flow: bool,
    pub flow_type: FlowType,
    pub camera_fov_degrees: f32,
    pub flow_field: FlowFieldSettings,
}

impl Default for MorphManifest {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            clear_color: DEFAULT_CLEAR_COLOUR.to_string(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            initial_active_model: DEFAULT_INITIAL_ACTIVE_MODEL,
            free_flow: false,
            flow_type: FlowType::default(),
            camera_fov_degrees: DEFAULT_CAMERA_FOV_DEGREES,
            flow_field: FlowFieldSettings::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("clear colour `{value}` is not a hex colour: {source}")]
    ClearColour {
        value: String,
        source: HexColorError,
    },
    #[error("initial active model must be 0 or 1, got {0}")]
    InitialModel(u8),
}

/// Validated manifest values used to seed the session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MorphOptions {
    pub model_path: String,
    pub clear_colour: Srgba,
    pub animation_duration: f32,
    pub initial_model: ActiveModel,
    pub free_flow: bool,
    pub flow_type: FlowType,
    pub camera_fov_degrees: f32,
    pub flow_field: FlowFieldParams,
}

impl TryFrom<&MorphManifest> for MorphOptions {
    type Error = ManifestError;

    fn try_from(manifest: &MorphManifest) -> Result<Self, Self::Error> {
        let clear_colour =
            Srgba::hex(&manifest.clear_color).map_err(|source| ManifestError::ClearColour {
                value: manifest.clear_color.clone(),
                source,
            })?;
        let initial_model = ActiveModel::from_index(manifest.initial_active_model)
            .ok_or(ManifestError::InitialModel(manifest.initial_active_model))?;

        Ok(Self {
            model_path: manifest.model_path.clone(),
            clear_colour,
            animation_duration: manifest.animation_duration.max(0.0),
            initial_model,
            free_flow: manifest.free_flow,
            flow_type: manifest.flow_type,
            camera_fov_degrees: manifest.camera_fov_degrees,
            flow_field: FlowFieldParams {
                influence: manifest.flow_field.influence,
                strength: manifest.flow_field.strength,
                frequency: manifest.flow_field.frequency,
            },
        })
    }
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            clear_colour: Srgba::rgb_u8(0x16, 0x09, 0x20),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            initial_model: ActiveModel::Second,
            free_flow: false,
            flow_type: FlowType::default(),
            camera_fov_degrees: DEFAULT_CAMERA_FOV_DEGREES,
            flow_field: FlowFieldParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_uses_defaults() {
        let manifest: MorphManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest, MorphManifest::default());

        let options = MorphOptions::try_from(&manifest).unwrap();
        assert_eq!(options, MorphOptions::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let manifest: MorphManifest = serde_json::from_str(
            r##"{
                "clear_color": "#ffffff",
                "initial_active_model": 0,
                "flow_type": "TypeB",
                "flow_field": { "strength": 4.0 }
            }"##,
        )
        .unwrap();
        let options = MorphOptions::try_from(&manifest).unwrap();

        assert_eq!(options.clear_colour, Srgba::WHITE);
        assert_eq!(options.initial_model, ActiveModel::First);
        assert_eq!(options.flow_type, FlowType::TypeB);
        assert_eq!(options.flow_field.strength, 4.0);
        assert_eq!(options.flow_field.influence, DEFAULT_INFLUENCE);
    }

    #[test]
    fn rejects_bad_clear_colour() {
        let manifest = MorphManifest {
            clear_color: "purple".to_string(),
            ..MorphManifest::default()
        };
        assert!(matches!(
            MorphOptions::try_from(&manifest),
            Err(ManifestError::ClearColour { .. })
        ));
    }

    #[test]
    fn rejects_third_model_index() {
        let manifest = MorphManifest {
            initial_active_model: 2,
            ..MorphManifest::default()
        };
        assert_eq!(
            MorphOptions::try_from(&manifest),
            Err(ManifestError::InitialModel(2))
        );
    }
}
