use bevy::prelude::*;

use crate::engine::assets::model_assets::MorphModels;
use crate::engine::mesh::particle_mesh::{bind_morph_uvs, MorphParticles};
use crate::engine::morph::controller::{MorphController, TriggerOutcome};
use crate::engine::render::morph_material::MorphMaterial;
use crate::engine::simulation::session::MorphSession;

/// Request to morph, optionally through one of the presets.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphTriggered {
    pub preset: Option<usize>,
}

/// Applies trigger events, then rebinds the particle mesh UVs and colour maps
/// to the new base/target pair.
pub fn apply_morph_triggers(
    mut events: EventReader<MorphTriggered>,
    mut controller: ResMut<MorphController>,
    mut session: ResMut<MorphSession>,
    models: Res<MorphModels>,
    particles: Query<(&Mesh3d, &MeshMaterial3d<MorphMaterial>), With<MorphParticles>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<MorphMaterial>>,
) {
    for event in events.read() {
        let outcome = match controller.trigger(&mut session, event.preset) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Ignoring morph trigger: {err}");
                continue;
            }
        };

        match outcome {
            TriggerOutcome::Reset { source } => {
                info!("→ Resetting particles onto model {}", source.index());
            }
            TriggerOutcome::Morph { base, target } => {
                info!("→ Morphing model {} into {}", base.index(), target.index());
                for (mesh, material) in &particles {
                    if let Some(mesh) = meshes.get_mut(&mesh.0) {
                        bind_morph_uvs(mesh, &models, base);
                    }
                    if let Some(material) = materials.get_mut(&material.0) {
                        material.base_map = models.colour_map(base).clone();
                        material.target_map = models.colour_map(target).clone();
                    }
                }
            }
        }
    }
}

pub fn advance_morph(
    time: Res<Time>,
    mut controller: ResMut<MorphController>,
    mut session: ResMut<MorphSession>,
) {
    if controller.is_animating() {
        controller.advance(&mut session, time.delta_secs());
    }
}

pub fn update_simulation_clock(time: Res<Time>, mut session: ResMut<MorphSession>) {
    session.clock.time = time.elapsed_secs();
    session.clock.delta = time.delta_secs();
}

// Only touch the material when something changed, so it is not re-prepared every frame
pub fn publish_material_params(
    session: Res<MorphSession>,
    particles: Query<&MeshMaterial3d<MorphMaterial>, With<MorphParticles>>,
    mut materials: ResMut<Assets<MorphMaterial>>,
) {
    for handle in &particles {
        let Some(material) = materials.get(&handle.0) else {
            continue;
        };
        if material.params.progress == session.progress
            && material.params.resolution == session.resolution
        {
            continue;
        }
        if let Some(material) = materials.get_mut(&handle.0) {
            material.params.progress = session.progress;
            material.params.resolution = session.resolution;
        }
    }
}
