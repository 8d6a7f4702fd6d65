use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::render_settings::MANIFEST_PATH;

use crate::engine::assets::morph_manifest::{MorphManifest, MorphOptions};
use crate::engine::loading::model_loader::ModelLoader;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::simulation::session::MorphSession;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<MorphManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Seeds the session from the manifest, then starts loading the scene file it names.
///
/// A missing or unreadable manifest falls back to defaults; one that parses but
/// fails validation is fatal.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut model_loader: ResMut<ModelLoader>,
    manifests: Res<Assets<MorphManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut exit: EventWriter<AppExit>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let options = if let Some(manifest) = manifests.get(handle) {
        match MorphOptions::try_from(manifest) {
            Ok(options) => options,
            Err(err) => {
                error!("Invalid manifest `{MANIFEST_PATH}`: {err}");
                exit.write(AppExit::error());
                return;
            }
        }
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Manifest `{MANIFEST_PATH}` unavailable ({err}), using defaults");
        MorphOptions::default()
    } else {
        return;
    };

    info!("✓ Manifest loaded, scene file `{}`", options.model_path);
    commands.insert_resource(ClearColor(options.clear_colour.into()));
    commands.insert_resource(MorphSession::new(&options));
    model_loader.start(&asset_server, &options.model_path);
    commands.insert_resource(options);
    loading_progress.manifest_loaded = true;
}
