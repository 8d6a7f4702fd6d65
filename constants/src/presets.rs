use bevy::math::curve::EaseFunction;
use serde::{Deserialize, Serialize};

/// Selects one of the two flow-field formulas in the flow-field compute pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowType {
    #[default]
    TypeA,
    TypeB,
}

impl FlowType {
    /// Value written into the flow-field uniform (`1` = Type A, `0` = Type B).
    pub fn shader_value(self) -> u32 {
        match self {
            FlowType::TypeA => 1,
            FlowType::TypeB => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowType::TypeA => "Type A",
            FlowType::TypeB => "Type B",
        }
    }
}

/// What a preset does once its parameters are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetAction {
    /// Swap base and target and animate progress from 0 to 1.
    Morph,
    /// Snap the live positions back onto the shown model, no tween.
    Reset,
}

/// Immutable bundle of simulation parameters applied atomically on trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphPreset {
    pub name: &'static str,
    pub duration: f32,
    pub influence: f32,
    pub strength: f32,
    pub frequency: f32,
    pub flow_type: FlowType,
    pub free_flow: bool,
    pub easing: EaseFunction,
    pub action: PresetAction,
}

/// Index of the preset that resets positions instead of morphing.
pub const RESET_PRESET_INDEX: usize = 4;

pub const PRESETS: [MorphPreset; 5] = [
    MorphPreset {
        name: "preset1",
        duration: 2.3,
        influence: 0.6,
        strength: 0.95,
        frequency: 0.9,
        flow_type: FlowType::TypeA,
        free_flow: false,
        easing: EaseFunction::Linear,
        action: PresetAction::Morph,
    },
    MorphPreset {
        name: "preset2",
        duration: 2.5,
        influence: 1.0,
        strength: 0.55,
        frequency: 1.0,
        flow_type: FlowType::TypeB,
        free_flow: false,
        easing: EaseFunction::Linear,
        action: PresetAction::Morph,
    },
    MorphPreset {
        name: "preset3",
        duration: 2.0,
        influence: 0.7,
        strength: 8.3,
        frequency: 0.672,
        flow_type: FlowType::TypeB,
        free_flow: false,
        easing: EaseFunction::Linear,
        action: PresetAction::Morph,
    },
    MorphPreset {
        name: "preset4",
        duration: 4.0,
        influence: 0.563,
        strength: 10.0,
        frequency: 0.9,
        flow_type: FlowType::TypeB,
        free_flow: false,
        easing: EaseFunction::Linear,
        action: PresetAction::Morph,
    },
    MorphPreset {
        name: "preset5",
        duration: 4.0,
        influence: 0.45,
        strength: 10.0,
        frequency: 0.9,
        flow_type: FlowType::TypeB,
        free_flow: true,
        easing: EaseFunction::Linear,
        action: PresetAction::Reset,
    },
];

pub fn preset(index: usize) -> Option<&'static MorphPreset> {
    PRESETS.get(index)
}
