use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy::window::PrimaryWindow;

use crate::engine::assets::model_assets::MorphModels;
use crate::engine::camera::viewport_camera::{apply_viewport_fit, fit_for_window, MorphCamera};
use crate::engine::compute::flow_simulation::SimulationTextures;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::particle_mesh::{create_particle_mesh, MorphParticles};
use crate::engine::render::morph_material::{MorphMaterial, MorphMaterialParams};
use crate::engine::simulation::session::MorphSession;

/// Spawns the particle entity and fits the camera once the simulation textures exist.
pub fn create_particles_when_ready(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    models: Option<Res<MorphModels>>,
    textures: Option<Res<SimulationTextures>>,
    session: Option<ResMut<MorphSession>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: Query<(&mut Transform, &mut Projection), With<MorphCamera>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<MorphMaterial>>,
) {
    if loading_progress.particles_created || !loading_progress.textures_configured {
        return;
    }
    let (Some(models), Some(textures), Some(mut session)) = (models, textures, session) else {
        return;
    };

    if let Ok((mut transform, mut projection)) = camera.single_mut() {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = session.camera.fov_degrees.to_radians();
        }
        let fov = session.camera.fov_degrees;
        if let Some(fit) = windows
            .single()
            .ok()
            .and_then(|window| fit_for_window(window, &models, fov))
        {
            apply_viewport_fit(fit, &mut session, &mut transform);
        }
    } else {
        warn!("No morph camera found, particles will render unfitted");
    }

    let base = session.base_model;
    let mesh = meshes.add(create_particle_mesh(&models, base, textures.size));
    let material = materials.add(MorphMaterial {
        params: MorphMaterialParams {
            resolution: session.resolution,
            progress: session.progress,
        },
        position_texture: textures.live_position.clone(),
        base_map: models.colour_map(base).clone(),
        target_map: models.colour_map(base.toggle()).clone(),
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        MorphParticles,
        NoFrustumCulling,
    ));

    info!(
        "✓ Particle mesh created: {} particles, camera at z={:.3}",
        models.max_count(),
        session.camera.camera_z
    );
    loading_progress.particles_created = true;
}
