use bevy::render::render_resource::TextureFormat;

/// Format of every simulation texture: one particle per texel, xyz + spare w.
pub const SIMULATION_TEXTURE_FORMAT: TextureFormat = TextureFormat::Rgba32Float;

/// Compute shader workgroup edge, must match `@workgroup_size` in the flow shaders.
pub const WORKGROUP_SIZE: u32 = 8;

/// Seed value for live particle slots in the flow-direction texture.
pub const INITIAL_FLOW_DIRECTION: [f32; 4] = [1.0, 1.0, 1.0, 0.0];
