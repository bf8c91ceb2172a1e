//! Radius adjustment policy applied by callers of the local feed.
//!
//! The feed filter takes any radius; these bounds only constrain what a user
//! can set interactively.

use serde::{Deserialize, Serialize};

pub const MIN_RADIUS_MILES: f64 = 5.0;
pub const MAX_RADIUS_MILES: f64 = 300.0;
pub const RADIUS_STEP_MILES: f64 = 10.0;
pub const DEFAULT_RADIUS_MILES: f64 = 50.0;

/// Direction of one interactive radius adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusStep {
    Increase,
    Decrease,
}

/// Clamp a radius into the allowed range. Non-finite input falls back to the default.
pub fn clamp_radius(miles: f64) -> f64 {
    if miles.is_nan() {
        return DEFAULT_RADIUS_MILES;
    }
    miles.clamp(MIN_RADIUS_MILES, MAX_RADIUS_MILES)
}

/// Move the radius one step and clamp the result.
pub fn step_radius(current: f64, step: RadiusStep) -> f64 {
    let next = match step {
        RadiusStep::Increase => current + RADIUS_STEP_MILES,
        RadiusStep::Decrease => current - RADIUS_STEP_MILES,
    };
    clamp_radius(next)
}
