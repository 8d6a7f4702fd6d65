use bevy::prelude::*;

use crate::engine::assets::model_assets::MorphModels;
use crate::engine::compute::flow_simulation::SimulationTextures;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::simulation::encoder::{
    encode_positions, initial_flow_direction, simulation_image, texture_side,
};
use crate::engine::simulation::session::{ActiveModel, MorphSession};

// Create compute-ready simulation textures once both models are extracted
pub fn configure_simulation_textures(
    mut loading_progress: ResMut<LoadingProgress>,
    models: Option<Res<MorphModels>>,
    session: Option<Res<MorphSession>>,
    mut images: ResMut<Assets<Image>>,
    mut commands: Commands,
) {
    if loading_progress.textures_configured || !loading_progress.models_loaded {
        return;
    }
    let (Some(models), Some(session)) = (models, session) else {
        return;
    };

    let textures = create_simulation_textures(&models, session.initial_model, &mut images);
    info!(
        "✓ Simulation textures created: {0}x{0} texels for {1} particles",
        textures.size,
        models.max_count()
    );
    commands.insert_resource(textures);
    loading_progress.textures_configured = true;
}

/// Encodes both models and seeds every ping-pong buffer.
///
/// Positions start on `initial`, the flow field at zero and the flow direction
/// at its seed value.
pub fn create_simulation_textures(
    models: &MorphModels,
    initial: ActiveModel,
    images: &mut Assets<Image>,
) -> SimulationTextures {
    let size = texture_side(models.max_count());
    let mut add = |texels: &[[f32; 4]]| images.add(simulation_image(texels, size));

    let first = encode_positions(&models.geometry(ActiveModel::First).positions, size);
    let second = encode_positions(&models.geometry(ActiveModel::Second).positions, size);
    let start = match initial {
        ActiveModel::First => &first,
        ActiveModel::Second => &second,
    };
    let field = vec![[0.0; 4]; (size * size) as usize];
    let direction = initial_flow_direction(models.max_count(), size);

    let flow_field = [add(&field), add(&field)];
    let flow_direction = [add(&direction), add(&direction)];
    let position = [add(start), add(start)];
    let live_position = add(start);

    SimulationTextures {
        size,
        model_positions: [add(&first), add(&second)],
        buffers: [flow_field, flow_direction, position],
        live_position,
    }
}
