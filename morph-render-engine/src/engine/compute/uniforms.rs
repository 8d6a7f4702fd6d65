use bytemuck::{Pod, Zeroable};

use crate::engine::simulation::session::MorphSession;

/// Matches `FlowFieldParams` in `shaders/flow_field.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlowFieldUniform {
    pub time: f32,      // 0
    pub influence: f32, // 4
    pub strength: f32,  // 8
    pub frequency: f32, // 12
    /// 1 = Type A, 0 = Type B.
    pub flow_type: u32, // 16
    pub _padding: [u32; 3], // 20 (→ 32)
}

/// Matches `FlowDirectionParams` in `shaders/flow_direction.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlowDirectionUniform {
    pub fov: f32,
    pub camera_z: f32,
    pub _padding: [f32; 2],
}

/// Matches `PositionParams` in `shaders/position.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionUniform {
    pub time: f32,
    pub delta_time: f32,
    pub progress: f32,
    pub free_flow: u32,
}

impl FlowFieldUniform {
    pub fn from_session(session: &MorphSession) -> Self {
        Self {
            time: session.clock.time,
            influence: session.flow_field.influence,
            strength: session.flow_field.strength,
            frequency: session.flow_field.frequency,
            flow_type: session.flow_type.shader_value(),
            _padding: [0; 3],
        }
    }
}

impl FlowDirectionUniform {
    pub fn from_session(session: &MorphSession) -> Self {
        Self {
            fov: session.camera.fov_degrees,
            camera_z: session.camera.camera_z,
            _padding: [0.0; 2],
        }
    }
}

impl PositionUniform {
    pub fn from_session(session: &MorphSession) -> Self {
        Self {
            time: session.clock.time,
            delta_time: session.clock.delta,
            progress: session.progress,
            free_flow: u32::from(session.free_flow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::presets::FlowType;
    use pretty_assertions::assert_eq;

    #[test]
    fn uniform_sizes_are_sixteen_byte_aligned() {
        assert_eq!(size_of::<FlowFieldUniform>(), 32);
        assert_eq!(size_of::<FlowDirectionUniform>(), 16);
        assert_eq!(size_of::<PositionUniform>(), 16);
    }

    #[test]
    fn session_values_are_packed() {
        let mut session = MorphSession::default();
        session.clock.time = 3.5;
        session.clock.delta = 0.016;
        session.progress = 0.25;
        session.free_flow = true;
        session.flow_type = FlowType::TypeB;

        let position = PositionUniform::from_session(&session);
        assert_eq!(
            position,
            PositionUniform {
                time: 3.5,
                delta_time: 0.016,
                progress: 0.25,
                free_flow: 1,
            }
        );

        let field = FlowFieldUniform::from_session(&session);
        assert_eq!(field.time, 3.5);
        assert_eq!(field.flow_type, 0);
        assert_eq!(bytemuck::bytes_of(&field).len(), 32);
    }
}
