//! GPU compute modules for the particle flow simulation.
//!
//! Every frame three compute passes advance per-particle state stored in
//! square `Rgba32Float` textures, one particle per texel.
//!
//! ## Pipeline Architecture
//!
//! ### Flow direction (`flow_direction.wgsl`)
//! Derives a unit direction per particle from the previous position, flow field
//! and direction, modulated by the camera field of view and distance.
//!
//! ### Flow field (`flow_field.wgsl`)
//! Evaluates one of two noise-driven vector fields (Type A / Type B) at each
//! particle using time, influence, strength and frequency.
//!
//! ### Position (`position.wgsl`)
//! Interpolates between the base and target model positions by `progress`,
//! perturbed by this tick's flow field and direction. Free flow ignores
//! `progress` and lets the field drive the particles.
//!
//! ## Buffering
//!
//! Each variable owns two textures. A pass reads the previous tick's slot (or
//! the slot written earlier this tick for same-tick edges) and writes the other
//! slot; the slots swap once the tick is submitted.

/// Render-world execution of the pass graph and the live position copy.
pub mod flow_simulation;

/// Pass declarations, validation and Kahn scheduling with ping-pong slot planning.
pub mod graph;

/// `#[repr(C)]` uniform blocks for the three passes.
pub mod uniforms;
