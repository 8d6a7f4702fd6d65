use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};

use crate::engine::mesh::particle_mesh::{
    ATTRIBUTE_BASE_UV, ATTRIBUTE_REFERENCE_UV, ATTRIBUTE_TARGET_UV,
};

const SHADER_PATH: &str = "shaders/morph_particles.wgsl";

#[derive(Debug, Clone, Copy, Default, PartialEq, ShaderType)]
pub struct MorphMaterialParams {
    /// Physical viewport size.
    pub resolution: Vec2,
    pub progress: f32,
}

/// Particle material: positions come from the simulated texture, colour blends
/// the base and target maps by progress.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct MorphMaterial {
    #[uniform(0)]
    pub params: MorphMaterialParams,

    #[texture(1, sample_type = "float", filterable = false, visibility(vertex))]
    pub position_texture: Handle<Image>,

    #[texture(2)]
    #[sampler(3)]
    pub base_map: Handle<Image>,

    #[texture(4)]
    #[sampler(5)]
    pub target_map: Handle<Image>,
}

impl Material for MorphMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_REFERENCE_UV.at_shader_location(1),
            ATTRIBUTE_BASE_UV.at_shader_location(2),
            ATTRIBUTE_TARGET_UV.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Particles fly through each other; draw both faces.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
