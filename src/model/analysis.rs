//! Calibration helpers for retuning throw speeds.
//!
//! The game used to compute throw speeds with the uniform-friction formula
//! `sqrt(2 * F * d * k)` and an empirical compensation factor `k`. These
//! helpers measure how far that formula lands from its target under the real
//! two-phase law, and what `k` would have been needed.

use super::{FrictionModel, FrictionParams};

/// Compensation factor the old throw code shipped with.
pub const LEGACY_COMPENSATION: f32 = 1.16;

/// Throw speed cap of the stock thrower (px/s).
pub const DEFAULT_MAX_THROW_SPEED: f32 = 850.0;

/// Stopping distance under constant deceleration, `v² / (2F)`.
pub fn continuous_uniform_distance(speed: f32, friction: f32) -> f32 {
    speed * speed / (2.0 * friction)
}

/// The old throw formula, `sqrt(2 * F * d * k)`.
pub fn legacy_throw_speed(target_distance: f32, ground_friction: f32, compensation: f32) -> f32 {
    (2.0 * ground_friction * target_distance.max(0.0) * compensation).sqrt()
}

/// The `k` that would make [`legacy_throw_speed`] agree with the model.
///
/// Returns 0 for non-positive targets.
pub fn compensation_factor(model: &FrictionModel, target_distance: f32) -> f32 {
    if !(target_distance > 0.0) {
        return 0.0;
    }
    let speed = model.required_speed(target_distance);
    speed * speed / (2.0 * model.params().ground_friction() * target_distance)
}

/// Cheap estimate of the ramp-phase distance.
///
/// Treats the ramp phase as constant deceleration at the multiplier's mean
/// over `[0, ramp]`, which is `m + 2(1 - m)/3`. Underestimates the stepped
/// value by roughly 10% at stock tuning.
pub fn average_phase2_distance(params: &FrictionParams) -> f32 {
    let min_mult = params.min_friction_multiplier();
    let ramp_velocity = params.friction_ramp_velocity();
    let average_friction = params.ground_friction() * (min_mult + 2.0 * (1.0 - min_mult) / 3.0);
    ramp_velocity * ramp_velocity / (2.0 * average_friction)
}

/// One line of a calibration report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationRow {
    /// Distance the player aimed at (px)
    pub target: f32,
    /// Speed from the legacy formula, after the throw cap (px/s)
    pub legacy_speed: f32,
    /// Where that speed really lands (px)
    pub legacy_distance: f32,
    /// `(legacy_distance - target) / target`
    pub legacy_error: f32,
    /// Speed from the two-phase inverse, after the throw cap (px/s)
    pub speed: f32,
    /// Where that speed lands (px)
    pub distance: f32,
    /// Compensation factor the legacy formula would need
    pub compensation: f32,
}

impl CalibrationRow {
    /// Measures one target.
    pub fn measure(
        model: &FrictionModel,
        target: f32,
        legacy_compensation: f32,
        max_speed: f32,
    ) -> Self {
        let ground_friction = model.params().ground_friction();
        let legacy_speed =
            legacy_throw_speed(target, ground_friction, legacy_compensation).min(max_speed);
        let legacy_distance = model.simulate(legacy_speed);
        let (speed, _) = model.required_speed_clamped(target, max_speed);

        Self {
            target,
            legacy_speed,
            legacy_distance,
            legacy_error: if target > 0.0 {
                (legacy_distance - target) / target
            } else {
                0.0
            },
            speed,
            distance: model.simulate(speed),
            compensation: compensation_factor(model, target),
        }
    }

    /// Relative error of the two-phase speed.
    pub fn error(&self) -> f32 {
        if self.target > 0.0 {
            (self.distance - self.target) / self.target
        } else {
            0.0
        }
    }
}

/// Measures every target.
pub fn calibration_table(
    model: &FrictionModel,
    targets: &[f32],
    legacy_compensation: f32,
    max_speed: f32,
) -> Vec<CalibrationRow> {
    targets
        .iter()
        .map(|&target| CalibrationRow::measure(model, target, legacy_compensation, max_speed))
        .collect()
}
