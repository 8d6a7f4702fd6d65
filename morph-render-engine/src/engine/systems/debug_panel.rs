use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use constants::flow_field::{FREQUENCY_RANGE, INFLUENCE_RANGE, PARAMETER_STEP, STRENGTH_RANGE};
use constants::presets::{FlowType, PRESETS};
use constants::render_settings::{
    ANIMATION_DURATION_RANGE, ANIMATION_DURATION_STEP, DEBUG_PANEL_WIDTH,
};

use crate::engine::morph::systems::MorphTriggered;
use crate::engine::simulation::session::MorphSession;
use crate::engine::systems::overlay_toggle::DebugOverlay;

/// Live parameter panel. Edits go straight into the session; buttons emit triggers.
pub fn debug_panel_system(
    mut contexts: EguiContexts,
    overlay: Res<DebugOverlay>,
    mut session: ResMut<MorphSession>,
    mut clear_colour: ResMut<ClearColor>,
    mut triggers: EventWriter<MorphTriggered>,
) {
    if !overlay.visible {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Morph")
        .default_width(DEBUG_PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            let mut rgb = session.clear_colour.to_u8_array_no_alpha();
            ui.horizontal(|ui| {
                ui.label("Clear colour");
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    let [r, g, b] = rgb;
                    session.clear_colour = Srgba::rgb_u8(r, g, b);
                    clear_colour.0 = session.clear_colour.into();
                }
            });

            ui.add(
                egui::Slider::new(&mut session.animation_duration, ANIMATION_DURATION_RANGE)
                    .step_by(ANIMATION_DURATION_STEP)
                    .text("Duration"),
            );
            ui.add(egui::ProgressBar::new(session.progress).text(format!(
                "Progress {:.2}",
                session.progress
            )));

            if ui.button("Morph").clicked() {
                triggers.write(MorphTriggered { preset: None });
            }
            ui.horizontal_wrapped(|ui| {
                for (index, preset) in PRESETS.iter().enumerate() {
                    if ui.button(preset.name).clicked() {
                        triggers.write(MorphTriggered {
                            preset: Some(index),
                        });
                    }
                }
            });

            egui::CollapsingHeader::new("Shader")
                .default_open(true)
                .show(ui, |ui| shader_controls(ui, &mut session));
        });
}

fn shader_controls(ui: &mut egui::Ui, session: &mut MorphSession) {
    let flow_field = &mut session.flow_field;
    ui.add(
        egui::Slider::new(&mut flow_field.influence, INFLUENCE_RANGE)
            .step_by(PARAMETER_STEP)
            .text("Influence"),
    );
    ui.add(
        egui::Slider::new(&mut flow_field.strength, STRENGTH_RANGE)
            .step_by(PARAMETER_STEP)
            .text("Strength"),
    );
    ui.add(
        egui::Slider::new(&mut flow_field.frequency, FREQUENCY_RANGE)
            .step_by(PARAMETER_STEP)
            .text("Frequency"),
    );

    egui::ComboBox::from_label("Flow type")
        .selected_text(session.flow_type.label())
        .show_ui(ui, |ui| {
            for flow_type in [FlowType::TypeA, FlowType::TypeB] {
                ui.selectable_value(&mut session.flow_type, flow_type, flow_type.label());
            }
        });
    ui.checkbox(&mut session.free_flow, "Free flow");
}
