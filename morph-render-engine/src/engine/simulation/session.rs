use bevy::color::Srgba;
use bevy::prelude::*;
use bevy::render::extract_resource::ExtractResource;
use constants::presets::FlowType;

use crate::engine::assets::morph_manifest::MorphOptions;

/// One of the two loaded models.
///
/// Replaces index arithmetic (`index` / `abs(index - 1)`) with an explicit toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActiveModel {
    #[default]
    First,
    Second,
}

impl ActiveModel {
    pub fn toggle(self) -> Self {
        match self {
            ActiveModel::First => ActiveModel::Second,
            ActiveModel::Second => ActiveModel::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ActiveModel::First => 0,
            ActiveModel::Second => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ActiveModel::First),
            1 => Some(ActiveModel::Second),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowFieldParams {
    pub influence: f32,
    pub strength: f32,
    pub frequency: f32,
}

impl Default for FlowFieldParams {
    fn default() -> Self {
        Self {
            influence: constants::flow_field::DEFAULT_INFLUENCE,
            strength: constants::flow_field::DEFAULT_STRENGTH,
            frequency: constants::flow_field::DEFAULT_FREQUENCY,
        }
    }
}

/// Wall-clock time and frame delta fed to the compute passes, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    pub time: f32,
    pub delta: f32,
}

/// Camera values the flow-direction pass reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUniforms {
    pub fov_degrees: f32,
    pub camera_z: f32,
}

/// Pending request to copy a model's encoded positions into the live position buffer.
///
/// `generation` increases with every request so the render world applies each one once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionReset {
    pub generation: u32,
    pub source: ActiveModel,
}

/// Shared simulation and display state for one session.
///
/// Owned by the main world, mutated by the morph controller, the debug panel,
/// the render loop and the resize handler; extracted into the render world each frame.
#[derive(Resource, Debug, Clone, ExtractResource)]
pub struct MorphSession {
    pub initial_model: ActiveModel,
    pub active_model: ActiveModel,
    /// Model whose positions, colour map and UVs are the interpolation start.
    pub base_model: ActiveModel,
    pub progress: f32,
    pub animation_duration: f32,
    pub free_flow: bool,
    pub flow_type: FlowType,
    pub flow_field: FlowFieldParams,
    pub clock: SimulationClock,
    pub camera: CameraUniforms,
    /// Physical pixel size of the viewport.
    pub resolution: Vec2,
    pub clear_colour: Srgba,
    pub position_reset: Option<PositionReset>,
}

impl MorphSession {
    pub fn new(options: &MorphOptions) -> Self {
        Self {
            initial_model: options.initial_model,
            active_model: options.initial_model,
            base_model: options.initial_model,
            progress: 0.0,
            animation_duration: options.animation_duration,
            free_flow: options.free_flow,
            flow_type: options.flow_type,
            flow_field: options.flow_field,
            clock: SimulationClock::default(),
            camera: CameraUniforms {
                fov_degrees: options.camera_fov_degrees,
                camera_z: 0.0,
            },
            resolution: Vec2::ZERO,
            clear_colour: options.clear_colour,
            position_reset: None,
        }
    }

    pub fn target_model(&self) -> ActiveModel {
        self.base_model.toggle()
    }

    pub fn request_position_reset(&mut self, source: ActiveModel) {
        let generation = self
            .position_reset
            .map_or(1, |reset| reset.generation.wrapping_add(1));
        self.position_reset = Some(PositionReset { generation, source });
    }
}

impl Default for MorphSession {
    fn default() -> Self {
        Self::new(&MorphOptions::default())
    }
}
