//! Morph control: triggers, presets and the progress tween.
//!
//! A trigger either snaps the live particles back onto the shown model or
//! swaps base and target and animates progress from 0 to 1.

/// Idle/animating state machine applying presets and triggers to the session.
pub mod controller;

/// Bevy systems: trigger events, tween advance and binding swaps.
pub mod systems;

/// Eased 0 to 1 tween over a fixed duration.
pub mod tween;
