use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;

use crate::engine::assets::model_assets::{ModelGeometry, ModelLoadError, MorphModels};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::simulation::session::ActiveModel;

/// Scene file handle and the path it was requested from.
#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Gltf>>,
    path: String,
}

impl ModelLoader {
    pub fn start(&mut self, asset_server: &AssetServer, path: &str) {
        self.path = path.to_string();
        self.handle = Some(asset_server.load(path.to_string()));
    }
}

/// Waits for the scene file and its dependencies, then extracts both models.
/// Any failure here is fatal.
pub fn load_models_system(
    mut loading_progress: ResMut<LoadingProgress>,
    model_loader: Res<ModelLoader>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    materials: Res<Assets<StandardMaterial>>,
    mut commands: Commands,
    mut exit: EventWriter<AppExit>,
) {
    if loading_progress.models_loaded || !loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = &model_loader.handle else {
        return;
    };

    let result = if let Some(reason) = load_failure(&asset_server, handle) {
        Err(ModelLoadError::LoadFailed {
            path: model_loader.path.clone(),
            reason,
        })
    } else if !asset_server.is_loaded_with_dependencies(handle) {
        return;
    } else if let Some(gltf) = gltfs.get(handle) {
        extract_models(gltf, &gltf_meshes, &meshes, &materials)
    } else {
        return;
    };

    match result {
        Ok(models) => {
            info!(
                "✓ Models loaded: {} and {} vertices",
                models.geometry(ActiveModel::First).vertex_count(),
                models.geometry(ActiveModel::Second).vertex_count(),
            );
            commands.insert_resource(models);
            loading_progress.models_loaded = true;
        }
        Err(err) => {
            error!("Failed to load models: {err}");
            exit.write(AppExit::error());
            // No retry; the app is shutting down.
            loading_progress.models_loaded = true;
        }
    }
}

fn load_failure(asset_server: &AssetServer, handle: &Handle<Gltf>) -> Option<String> {
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        return Some(err.to_string());
    }
    if let Some(RecursiveDependencyLoadState::Failed(err)) =
        asset_server.get_recursive_dependency_load_state(handle)
    {
        return Some(err.to_string());
    }
    None
}

/// Both models from a scene holding exactly two meshes, in file order.
pub fn extract_models(
    gltf: &Gltf,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
    materials: &Assets<StandardMaterial>,
) -> Result<MorphModels, ModelLoadError> {
    let [first, second] = gltf.meshes.as_slice() else {
        return Err(ModelLoadError::MeshCount(gltf.meshes.len()));
    };
    let (first_geometry, first_map) = extract_model(0, first, gltf_meshes, meshes, materials)?;
    let (second_geometry, second_map) =
        extract_model(1, second, gltf_meshes, meshes, materials)?;

    Ok(MorphModels::new(
        [first_geometry, second_geometry],
        [first_map, second_map],
    ))
}

fn extract_model(
    index: usize,
    handle: &Handle<GltfMesh>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
    materials: &Assets<StandardMaterial>,
) -> Result<(ModelGeometry, Handle<Image>), ModelLoadError> {
    let gltf_mesh = gltf_meshes
        .get(handle)
        .ok_or(ModelLoadError::MissingMesh(index))?;
    let primitive = gltf_mesh
        .primitives
        .first()
        .ok_or(ModelLoadError::MissingPrimitive(index))?;
    let mesh = meshes
        .get(&primitive.mesh)
        .ok_or(ModelLoadError::MissingMesh(index))?;
    let geometry = ModelGeometry::from_mesh(mesh)?;

    let colour_map = primitive
        .material
        .as_ref()
        .and_then(|material| materials.get(material))
        .and_then(|material| material.base_color_texture.clone())
        .ok_or(ModelLoadError::MissingColourTexture(index))?;

    Ok((geometry, colour_map))
}
