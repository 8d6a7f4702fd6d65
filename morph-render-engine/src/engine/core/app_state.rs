use bevy::prelude::*;
use bevy::render::Extract;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    #[default]
    Loading,
    AssetsLoaded,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Transition to AssetsLoaded once every loading stage has finished
pub fn transition_to_assets_loaded(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        info!("→ Transitioning to AssetsLoaded state");
        next_state.set(AppState::AssetsLoaded);
    }
}

// Final transition to running state
pub fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("→ All systems ready, transitioning to Running state");
    next_state.set(AppState::Running);
}

/// Mirrors the main-world state into the render world so compute systems can gate on it.
pub fn extract_app_state(main_world: Extract<Res<State<AppState>>>, mut commands: Commands) {
    commands.insert_resource(State::new(*main_world.get()));
}
