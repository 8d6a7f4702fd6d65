use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::engine::assets::model_assets::MorphModels;
use crate::engine::camera::camera_fit::distance_to_fit_box;
use crate::engine::simulation::session::MorphSession;

/// Camera looking down -Z at the morphing models.
#[derive(Component)]
pub struct MorphCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub camera_distance: f32,
    /// Physical pixels.
    pub resolution: Vec2,
}

/// Camera distance and shader resolution for a viewport of `width` x `height` logical pixels.
///
/// The fitted box spans twice the models' extent in x and y and once in z.
pub fn fit_viewport(
    extent: Vec3,
    fov_degrees: f32,
    width: f32,
    height: f32,
    scale_factor: f32,
) -> ViewportFit {
    let camera_distance = distance_to_fit_box(
        extent.x * 2.0,
        extent.y * 2.0,
        extent.z,
        fov_degrees,
        width / height,
        false,
    );
    ViewportFit {
        camera_distance,
        resolution: Vec2::new(width * scale_factor, height * scale_factor),
    }
}

pub fn spawn_morph_camera(commands: &mut Commands, fov_degrees: f32) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 1.0),
        MorphCamera,
    ));
}

/// Writes a fit into the camera transform and the session uniforms.
pub fn apply_viewport_fit(
    fit: ViewportFit,
    session: &mut MorphSession,
    camera_transform: &mut Transform,
) {
    camera_transform.translation = Vec3::new(0.0, 0.0, fit.camera_distance);
    session.resolution = fit.resolution;
    session.camera.camera_z = fit.camera_distance;
}

/// Fit for the current window, or `None` while it has no area.
pub fn fit_for_window(window: &Window, models: &MorphModels, fov_degrees: f32) -> Option<ViewportFit> {
    let (width, height) = (window.width(), window.height());
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(fit_viewport(
        models.max_extent(),
        fov_degrees,
        width,
        height,
        window.scale_factor(),
    ))
}

pub fn fit_camera_on_resize(
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    models: Res<MorphModels>,
    mut session: ResMut<MorphSession>,
    mut camera: Query<&mut Transform, With<MorphCamera>>,
) {
    if resize_events.read().last().is_none() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let Some(fit) = fit_for_window(window, &models, session.camera.fov_degrees) else {
        return;
    };

    apply_viewport_fit(fit, &mut session, &mut transform);
    debug!(
        "Viewport fit: distance {:.3}, resolution {}x{}",
        fit.camera_distance, fit.resolution.x, fit.resolution.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matches_direct_camera_fit() {
        let extent = Vec3::new(1.5, 2.0, 0.75);
        let fit = fit_viewport(extent, 35.0, 1280.0, 720.0, 2.0);

        let expected = distance_to_fit_box(3.0, 4.0, 0.75, 35.0, 1280.0 / 720.0, false);
        assert_eq!(fit.camera_distance, expected);
        assert_eq!(fit.resolution, Vec2::new(2560.0, 1440.0));
    }

    #[test]
    fn repeated_resizes_are_idempotent() {
        let extent = Vec3::new(1.0, 1.0, 1.0);
        let first = fit_viewport(extent, 35.0, 800.0, 600.0, 1.0);
        let second = fit_viewport(extent, 35.0, 800.0, 600.0, 1.0);
        assert_eq!(first, second);

        let mut session = MorphSession::default();
        let mut transform = Transform::default();
        apply_viewport_fit(first, &mut session, &mut transform);
        let after_first = (session.resolution, session.camera.camera_z, transform);
        apply_viewport_fit(second, &mut session, &mut transform);

        assert_eq!(
            (session.resolution, session.camera.camera_z, transform),
            after_first
        );
        assert_eq!(transform.translation.z, first.camera_distance);
    }
}
