use std::ops::RangeInclusive;

pub const DEFAULT_INFLUENCE: f32 = 0.6;
pub const DEFAULT_STRENGTH: f32 = 0.95;
pub const DEFAULT_FREQUENCY: f32 = 0.9;

pub const INFLUENCE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const STRENGTH_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const FREQUENCY_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Slider granularity for the three flow-field parameters.
pub const PARAMETER_STEP: f64 = 0.001;
