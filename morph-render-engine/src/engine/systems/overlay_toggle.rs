use bevy::prelude::*;
use constants::render_settings::DEBUG_TOGGLE_KEY;

/// Visibility of the debug panel and the FPS overlay.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugOverlay {
    pub visible: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self { visible: true }
    }
}

pub fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut overlay: ResMut<DebugOverlay>,
) {
    if keyboard.just_pressed(DEBUG_TOGGLE_KEY) {
        overlay.visible = !overlay.visible;
        debug!("Debug overlay visible: {}", overlay.visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_toggle(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(DEBUG_TOGGLE_KEY);
        app.update();
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(DEBUG_TOGGLE_KEY);
        keyboard.clear();
    }

    #[test]
    fn toggle_key_flips_visibility() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DebugOverlay>()
            .add_systems(Update, toggle_debug_overlay);

        press_toggle(&mut app);
        assert!(!app.world().resource::<DebugOverlay>().visible);

        // Pressing again restores it; holding does not repeat the toggle
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(DEBUG_TOGGLE_KEY);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();
        assert!(app.world().resource::<DebugOverlay>().visible);
    }
}
