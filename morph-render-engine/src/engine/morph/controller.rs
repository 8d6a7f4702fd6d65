use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use constants::presets::{self, MorphPreset, PresetAction};
use thiserror::Error;

use crate::engine::morph::tween::Tween;
use crate::engine::simulation::session::{ActiveModel, MorphSession};

#[derive(Debug, Clone, Default)]
pub enum MorphState {
    #[default]
    Idle,
    Animating(Tween),
}

/// What a trigger changed, so callers can rebind textures and UV attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Live positions were snapped back onto `source`; bindings unchanged.
    Reset { source: ActiveModel },
    /// Interpolation now runs from `base` to `target`.
    Morph {
        base: ActiveModel,
        target: ActiveModel,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MorphError {
    #[error("no morph preset at index {0}")]
    UnknownPreset(usize),
}

/// Owns the progress tween and applies triggers to the session.
#[derive(Resource, Debug, Default)]
pub struct MorphController {
    state: MorphState,
}

impl MorphController {
    pub fn is_animating(&self) -> bool {
        matches!(self.state, MorphState::Animating(_))
    }

    pub fn trigger(
        &mut self,
        session: &mut MorphSession,
        preset_index: Option<usize>,
    ) -> Result<TriggerOutcome, MorphError> {
        let preset = preset_index
            .map(|index| presets::preset(index).ok_or(MorphError::UnknownPreset(index)))
            .transpose()?;

        if let Some(preset) = preset {
            apply_preset(session, preset);
            if preset.action == PresetAction::Reset {
                // Snaps onto the model currently shown and freezes progress where it is.
                let source = if session.active_model == session.initial_model {
                    session.initial_model
                } else {
                    session.initial_model.toggle()
                };
                session.request_position_reset(source);
                self.state = MorphState::Idle;
                return Ok(TriggerOutcome::Reset { source });
            }
        }

        let base = session.active_model;
        let target = base.toggle();
        session.base_model = base;
        session.free_flow = false;
        session.progress = 0.0;

        let easing = preset.map_or(EaseFunction::Linear, |preset| preset.easing);
        self.state = MorphState::Animating(Tween::new(easing, session.animation_duration));
        session.active_model = target;

        Ok(TriggerOutcome::Morph { base, target })
    }

    /// Moves the running tween forward by `delta` seconds and publishes progress.
    pub fn advance(&mut self, session: &mut MorphSession, delta: f32) {
        let MorphState::Animating(tween) = &mut self.state else {
            return;
        };
        tween.advance(delta);
        session.progress = tween.value();
        if tween.is_finished() {
            session.progress = 1.0;
            self.state = MorphState::Idle;
        }
    }
}

fn apply_preset(session: &mut MorphSession, preset: &MorphPreset) {
    session.animation_duration = preset.duration;
    session.flow_field.influence = preset.influence;
    session.flow_field.strength = preset.strength;
    session.flow_field.frequency = preset.frequency;
    session.flow_type = preset.flow_type;
    session.free_flow = preset.free_flow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::morph_manifest::MorphOptions;
    use constants::presets::{FlowType, RESET_PRESET_INDEX};
    use pretty_assertions::assert_eq;

    fn session_starting_on(model: ActiveModel) -> MorphSession {
        MorphSession::new(&MorphOptions {
            initial_model: model,
            ..MorphOptions::default()
        })
    }

    #[test]
    fn morph_toggles_once_and_reaches_one() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();

        let outcome = controller.trigger(&mut session, None).unwrap();
        assert_eq!(
            outcome,
            TriggerOutcome::Morph {
                base: ActiveModel::First,
                target: ActiveModel::Second,
            }
        );
        assert_eq!(session.active_model, ActiveModel::Second);
        assert_eq!(session.progress, 0.0);
        assert!(controller.is_animating());

        controller.advance(&mut session, 1.0);
        assert!(session.progress > 0.0 && session.progress < 1.0);

        let duration = session.animation_duration;
        controller.advance(&mut session, duration);
        assert_eq!(session.progress, 1.0);
        assert!(!controller.is_animating());
        assert_eq!(session.active_model, ActiveModel::Second);
    }

    #[test]
    fn second_morph_returns_to_the_starting_model() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();

        controller.trigger(&mut session, None).unwrap();
        controller.advance(&mut session, 100.0);
        let outcome = controller.trigger(&mut session, None).unwrap();

        assert_eq!(
            outcome,
            TriggerOutcome::Morph {
                base: ActiveModel::Second,
                target: ActiveModel::First,
            }
        );
        assert_eq!(session.active_model, ActiveModel::First);
        assert_eq!(session.base_model, ActiveModel::Second);
    }

    #[test]
    fn reset_preset_keeps_model_and_progress() {
        let mut session = session_starting_on(ActiveModel::Second);
        let mut controller = MorphController::default();
        session.progress = 1.0;

        let outcome = controller
            .trigger(&mut session, Some(RESET_PRESET_INDEX))
            .unwrap();

        assert_eq!(
            outcome,
            TriggerOutcome::Reset {
                source: ActiveModel::Second
            }
        );
        assert_eq!(session.active_model, ActiveModel::Second);
        assert_eq!(session.progress, 1.0);
        assert!(!controller.is_animating());
        assert!(session.free_flow);
        assert_eq!(session.position_reset.map(|r| r.source), Some(ActiveModel::Second));
    }

    #[test]
    fn reset_after_a_morph_snaps_to_the_shown_model() {
        let mut session = session_starting_on(ActiveModel::Second);
        let mut controller = MorphController::default();

        controller.trigger(&mut session, None).unwrap();
        controller.advance(&mut session, 100.0);
        let outcome = controller
            .trigger(&mut session, Some(RESET_PRESET_INDEX))
            .unwrap();

        assert_eq!(
            outcome,
            TriggerOutcome::Reset {
                source: ActiveModel::First
            }
        );
    }

    #[test]
    fn reset_mid_morph_freezes_progress() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();

        controller.trigger(&mut session, None).unwrap();
        controller.advance(&mut session, 0.5);
        let frozen = session.progress;
        assert!(frozen > 0.0 && frozen < 1.0);

        controller
            .trigger(&mut session, Some(RESET_PRESET_INDEX))
            .unwrap();
        controller.advance(&mut session, 1.0);

        assert!(!controller.is_animating());
        assert_eq!(session.progress, frozen);
        assert_eq!(session.active_model, ActiveModel::Second);
    }

    #[test]
    fn first_preset_from_second_model() {
        let mut session = session_starting_on(ActiveModel::Second);
        let mut controller = MorphController::default();
        session.free_flow = true;
        session.flow_type = FlowType::TypeB;

        controller.trigger(&mut session, Some(0)).unwrap();

        assert_eq!(session.animation_duration, 2.3);
        assert_eq!(session.flow_type.shader_value(), 1);
        assert!(!session.free_flow);
        assert_eq!(session.base_model, ActiveModel::Second);
        assert_eq!(session.active_model.index(), 0);

        controller.advance(&mut session, 1.15);
        assert!((session.progress - 0.5).abs() < 1e-4);
        controller.advance(&mut session, 1.2);
        assert_eq!(session.progress, 1.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn retrigger_restarts_the_tween() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();

        controller.trigger(&mut session, None).unwrap();
        controller.advance(&mut session, 1.0);
        controller.trigger(&mut session, None).unwrap();

        assert_eq!(session.progress, 0.0);
        assert_eq!(session.active_model, ActiveModel::First);
        assert!(controller.is_animating());
    }

    #[test]
    fn unknown_preset_is_rejected_without_side_effects() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();

        let result = controller.trigger(&mut session, Some(9));

        assert_eq!(result, Err(MorphError::UnknownPreset(9)));
        assert_eq!(session.active_model, ActiveModel::First);
        assert!(!controller.is_animating());
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let mut session = session_starting_on(ActiveModel::First);
        let mut controller = MorphController::default();
        session.animation_duration = 0.0;

        controller.trigger(&mut session, None).unwrap();
        controller.advance(&mut session, 0.0);

        assert_eq!(session.progress, 1.0);
        assert!(!controller.is_animating());
    }
}
