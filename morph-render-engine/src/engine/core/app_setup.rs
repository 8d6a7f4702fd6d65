use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use constants::render_settings::DEFAULT_CAMERA_FOV_DEGREES;

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::camera::viewport_camera::{fit_camera_on_resize, spawn_morph_camera};
use crate::engine::compute::flow_simulation::FlowSimulationPlugin;
use crate::engine::core::app_state::{
    extract_app_state, transition_to_assets_loaded, transition_to_running, AppState,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{load_manifest_system, start_loading, ManifestLoader};
use crate::engine::loading::model_loader::{load_models_system, ModelLoader};
use crate::engine::loading::particle_creator::create_particles_when_ready;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_config::configure_simulation_textures;
use crate::engine::morph::controller::MorphController;
use crate::engine::morph::systems::{
    advance_morph, apply_morph_triggers, publish_material_params, update_simulation_clock,
    MorphTriggered,
};
use crate::engine::render::morph_material::MorphMaterial;
use crate::engine::systems::debug_panel::debug_panel_system;
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};
use crate::engine::systems::overlay_toggle::{toggle_debug_overlay, DebugOverlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers MorphManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MorphManifest>::new(&["json"]))
        .add_plugins(MaterialPlugin::<MorphMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        // Extracts the session and simulation textures, runs the compute passes.
        .add_plugins(FlowSimulationPlugin)
        .add_plugins(EguiPlugin::default());

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ModelLoader>()
        .init_resource::<MorphController>()
        .init_resource::<DebugOverlay>()
        .add_event::<MorphTriggered>();

    if let Some(render_app) = app.get_sub_app_mut(bevy::render::RenderApp) {
        render_app
            .init_resource::<State<AppState>>()
            .add_systems(bevy::render::ExtractSchedule, extract_app_state);
    }

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                load_manifest_system,
                load_models_system,
                configure_simulation_textures,
                create_particles_when_ready,
                transition_to_assets_loaded,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            transition_to_running.run_if(in_state(AppState::AssetsLoaded)),
        );

    // The tween advances before new triggers, so a fresh morph publishes progress 0 first.
    let runtime_systems = (
        advance_morph,
        apply_morph_triggers,
        update_simulation_clock,
        fit_camera_on_resize,
        publish_material_params,
        toggle_debug_overlay,
        fps_text_update_system,
    );

    app.add_systems(
        Update,
        runtime_systems.chain().run_if(in_state(AppState::Running)),
    )
    .add_systems(
        EguiPrimaryContextPass,
        debug_panel_system.run_if(in_state(AppState::Running)),
    );

    app
}

// The manifest may change the field of view; the camera is refitted once particles exist.
fn setup(mut commands: Commands) {
    spawn_morph_camera(&mut commands, DEFAULT_CAMERA_FOV_DEGREES);
    spawn_fps_overlay(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
