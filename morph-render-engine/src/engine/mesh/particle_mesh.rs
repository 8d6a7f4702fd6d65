use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_resource::VertexFormat;

use crate::engine::assets::model_assets::MorphModels;
use crate::engine::simulation::encoder::reference_uvs;
use crate::engine::simulation::session::ActiveModel;

/// Texel-centre UV of the particle's slot in the simulation textures.
pub const ATTRIBUTE_REFERENCE_UV: MeshVertexAttribute =
    MeshVertexAttribute::new("Morph_ReferenceUv", 988_540_917, VertexFormat::Float32x2);

/// Colour map UV on the model the morph starts from.
pub const ATTRIBUTE_BASE_UV: MeshVertexAttribute =
    MeshVertexAttribute::new("Morph_BaseUv", 988_540_918, VertexFormat::Float32x2);

/// Colour map UV on the model the morph ends on.
pub const ATTRIBUTE_TARGET_UV: MeshVertexAttribute =
    MeshVertexAttribute::new("Morph_TargetUv", 988_540_919, VertexFormat::Float32x2);

#[derive(Component)]
pub struct MorphParticles;

/// One vertex per particle, three per triangle, padded to the larger model.
///
/// Positions come from `base` and only feed bounds; the vertex shader reads
/// the simulated position texture instead.
pub fn create_particle_mesh(models: &MorphModels, base: ActiveModel, size: u32) -> Mesh {
    let count = models.max_count();
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );

    mesh.insert_attribute(
        Mesh::ATTRIBUTE_POSITION,
        models.geometry(base).padded_positions(count),
    );
    mesh.insert_attribute(ATTRIBUTE_REFERENCE_UV, reference_uvs(count, size));
    bind_morph_uvs(&mut mesh, models, base);
    mesh
}

/// Points the base/target UV attributes at `base` and the other model.
pub fn bind_morph_uvs(mesh: &mut Mesh, models: &MorphModels, base: ActiveModel) {
    let count = models.max_count();
    mesh.insert_attribute(ATTRIBUTE_BASE_UV, models.geometry(base).padded_uvs(count));
    mesh.insert_attribute(
        ATTRIBUTE_TARGET_UV,
        models.geometry(base.toggle()).padded_uvs(count),
    );
}

/// Reads a two-component float attribute back, mainly for checks.
pub fn float2_attribute(mesh: &Mesh, attribute: MeshVertexAttribute) -> Option<&[[f32; 2]]> {
    match mesh.attribute(attribute)? {
        VertexAttributeValues::Float32x2(values) => Some(values),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::model_assets::ModelGeometry;
    use pretty_assertions::assert_eq;

    fn models() -> MorphModels {
        let first = ModelGeometry {
            positions: vec![[1.0, 0.0, 0.0]; 3],
            uvs: vec![[0.1, 0.1]; 3],
        };
        let second = ModelGeometry {
            positions: vec![[0.0, 2.0, 0.0]; 6],
            uvs: vec![[0.9, 0.9]; 6],
        };
        MorphModels::new([first, second], [Handle::default(), Handle::default()])
    }

    #[test]
    fn mesh_is_padded_to_the_larger_model() {
        let models = models();
        let mesh = create_particle_mesh(&models, ActiveModel::First, 3);

        assert_eq!(mesh.count_vertices(), 6);
        let base = float2_attribute(&mesh, ATTRIBUTE_BASE_UV).unwrap();
        assert_eq!(base[2], [0.1, 0.1]);
        assert_eq!(base[3], [0.0, 0.0]);
        let target = float2_attribute(&mesh, ATTRIBUTE_TARGET_UV).unwrap();
        assert_eq!(target[5], [0.9, 0.9]);
    }

    #[test]
    fn rebinding_swaps_base_and_target_uvs() {
        let models = models();
        let mut mesh = create_particle_mesh(&models, ActiveModel::First, 3);

        bind_morph_uvs(&mut mesh, &models, ActiveModel::Second);

        assert_eq!(
            float2_attribute(&mesh, ATTRIBUTE_BASE_UV).unwrap()[0],
            [0.9, 0.9]
        );
        assert_eq!(
            float2_attribute(&mesh, ATTRIBUTE_TARGET_UV).unwrap()[0],
            [0.1, 0.1]
        );
    }
}
