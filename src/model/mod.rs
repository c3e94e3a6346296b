//! Two-phase ground friction model: launch speed to sliding distance and back.
//!
//! Above the ramp velocity a sliding body decelerates at a constant, reduced
//! rate. Below it the friction multiplier eases back up to 1.0 along a
//! quadratic curve, so the body brakes hard just before it stops. The forward
//! map steps that law at a fixed rate; the inverse splits the slide into the
//! constant phase (closed form) and the ramp phase (simulated once, cached).

pub mod analysis;
mod params;
mod settings;

pub use params::{presets, FrictionParams, FrictionParamsError};
pub use settings::{
    SettingsError, SimulationSettings, DEFAULT_MAX_STEPS, DEFAULT_STOP_EPSILON, DEFAULT_TIMESTEP,
};

use bevy::log::warn;
use bevy::prelude::*;

use crate::types::{IntegrationOrder, StopReason};

/// Upper bound for the speed bracket in [`FrictionModel::search_speed`] (px/s).
pub const SEARCH_SPEED_LIMIT: f32 = 100_000.0;

const BISECTION_ITERATIONS: u32 = 64;

/// Friction multiplier at the given speed.
///
/// Constant `min_friction_multiplier` at and above the ramp velocity, then a
/// quadratic ease-in that reaches 1.0 at rest.
///
/// # Example
/// ```
/// use bevy_throw_friction::model::{friction_multiplier, FrictionParams};
///
/// let params = FrictionParams::default();
/// assert_eq!(friction_multiplier(400.0, &params), 0.5);
/// assert_eq!(friction_multiplier(0.0, &params), 1.0);
/// ```
pub fn friction_multiplier(speed: f32, params: &FrictionParams) -> f32 {
    let min_mult = params.min_friction_multiplier();
    let ramp_velocity = params.friction_ramp_velocity();
    if speed >= ramp_velocity {
        return min_mult;
    }

    let t = speed / ramp_velocity;
    min_mult + (1.0 - min_mult) * (1.0 - t * t)
}

/// Deceleration at the given speed (px/s²), including any extra uniform friction.
pub fn deceleration(speed: f32, params: &FrictionParams, settings: &SimulationSettings) -> f32 {
    params.ground_friction() * friction_multiplier(speed, params) + settings.uniform_friction
}

/// Advances one fixed step.
///
/// Damping is applied first, then friction, clamped so speed never goes
/// negative.
///
/// # Returns
/// `(new_speed, travel_speed)` where `travel_speed` is the speed that moves
/// the body this step: the new speed for symplectic order, the pre-friction
/// speed for forward Euler.
pub fn step_speed(speed: f32, params: &FrictionParams, settings: &SimulationSettings) -> (f32, f32) {
    let damped = speed * settings.damp_factor();
    let decel = deceleration(damped, params, settings) * settings.timestep;
    let next = if decel >= damped { 0.0 } else { damped - decel };

    let travel = match settings.integration {
        IntegrationOrder::Symplectic => next,
        IntegrationOrder::ForwardEuler => damped,
    };
    (next, travel)
}

/// Outcome of one simulated slide.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct Trajectory {
    /// Distance covered (px)
    pub distance: f32,
    /// Fixed steps taken
    pub steps: u32,
    /// Simulated time (s)
    pub elapsed: f32,
    /// Speed when the run ended (0 unless cut short)
    pub final_speed: f32,
    pub stop_reason: StopReason,
}

impl Trajectory {
    fn at_rest() -> Self {
        Self {
            distance: 0.0,
            steps: 0,
            elapsed: 0.0,
            final_speed: 0.0,
            stop_reason: StopReason::Stopped,
        }
    }
}

/// Steps a slide from `initial_speed` until it stops, times out or hits the step cap.
///
/// Non-positive (and NaN) speeds return an empty trajectory without entering
/// the loop. An infinite speed returns an infinite distance.
pub fn simulate_trajectory(
    initial_speed: f32,
    params: &FrictionParams,
    settings: &SimulationSettings,
) -> Trajectory {
    if !(initial_speed > 0.0) {
        return Trajectory::at_rest();
    }
    if initial_speed.is_infinite() {
        return Trajectory {
            distance: f32::INFINITY,
            final_speed: f32::INFINITY,
            stop_reason: StopReason::StepLimit,
            ..Trajectory::at_rest()
        };
    }

    let dt = settings.timestep;
    let mut speed = initial_speed;
    let mut distance = 0.0;
    let mut steps = 0u32;

    let stop_reason = loop {
        if speed <= settings.stop_epsilon {
            break StopReason::Stopped;
        }
        if let Some(max_time) = settings.max_time {
            if steps as f32 * dt >= max_time {
                break StopReason::TimeLimit;
            }
        }
        if steps >= settings.max_steps {
            warn!(
                "friction simulation hit the {} step cap at {:.3} px/s",
                settings.max_steps, speed
            );
            break StopReason::StepLimit;
        }

        let (next, travel) = step_speed(speed, params, settings);
        distance += travel * dt;
        speed = next;
        steps += 1;
    };

    Trajectory {
        distance,
        steps,
        elapsed: steps as f32 * dt,
        final_speed: speed,
        stop_reason,
    }
}

/// Total sliding distance for a launch speed at the reference settings.
///
/// # Example
/// ```
/// use bevy_throw_friction::model::{simulate, FrictionParams};
///
/// let params = FrictionParams::default();
/// assert_eq!(simulate(0.0, &params), 0.0);
/// assert!(simulate(400.0, &params) > simulate(300.0, &params));
/// ```
pub fn simulate(initial_speed: f32, params: &FrictionParams) -> f32 {
    simulate_trajectory(initial_speed, params, &SimulationSettings::default()).distance
}

/// Launch speed that slides `target_distance` at the reference settings.
///
/// Builds a [`FrictionModel`] per call; keep one around when asking repeatedly
/// with the same parameters.
pub fn required_speed(target_distance: f32, params: &FrictionParams) -> f32 {
    FrictionModel::new(*params).required_speed(target_distance)
}

/// A parameter set bound to its settings, with the ramp-phase distance precomputed.
///
/// # Example
/// ```
/// use bevy_throw_friction::model::{FrictionModel, FrictionParams};
///
/// let model = FrictionModel::new(FrictionParams::default());
/// let speed = model.required_speed(500.0);
/// let landed = model.simulate(speed);
/// assert!((landed - 500.0).abs() < speed / 60.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FrictionModel {
    params: FrictionParams,
    settings: SimulationSettings,
    phase2_distance: f32,
}

impl FrictionModel {
    /// Model at the reference settings.
    pub fn new(params: FrictionParams) -> Self {
        Self::build(params, SimulationSettings::default())
    }

    /// Model at custom settings, validated first.
    pub fn with_settings(
        params: FrictionParams,
        settings: SimulationSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(params, settings))
    }

    fn build(params: FrictionParams, settings: SimulationSettings) -> Self {
        let phase2_distance =
            simulate_trajectory(params.friction_ramp_velocity(), &params, &settings).distance;
        Self {
            params,
            settings,
            phase2_distance,
        }
    }

    pub fn params(&self) -> &FrictionParams {
        &self.params
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Distance slid from the ramp velocity down to rest (px).
    pub fn phase2_distance(&self) -> f32 {
        self.phase2_distance
    }

    /// Constant deceleration above the ramp velocity (px/s²).
    pub fn phase1_deceleration(&self) -> f32 {
        self.params.phase1_deceleration() + self.settings.uniform_friction
    }

    /// Full step-by-step run.
    pub fn trajectory(&self, initial_speed: f32) -> Trajectory {
        simulate_trajectory(initial_speed, &self.params, &self.settings)
    }

    /// Distance by direct simulation.
    pub fn simulate(&self, initial_speed: f32) -> f32 {
        self.trajectory(initial_speed).distance
    }

    /// Distance using the two-phase decomposition where it applies.
    ///
    /// Above the ramp velocity this is the closed-form phase 1 distance plus
    /// the cached phase 2 distance, so the cost does not grow with speed. It
    /// differs from [`Self::simulate`] by less than one step of travel.
    pub fn distance(&self, initial_speed: f32) -> f32 {
        let ramp_velocity = self.params.friction_ramp_velocity();
        if self.settings.has_closed_form()
            && initial_speed > ramp_velocity
            && initial_speed.is_finite()
        {
            let phase1 = (initial_speed * initial_speed - ramp_velocity * ramp_velocity)
                / (2.0 * self.phase1_deceleration());
            return phase1 + self.phase2_distance;
        }

        self.simulate(initial_speed)
    }

    /// Launch speed that slides `target_distance`.
    ///
    /// Targets inside the ramp phase are found by bisection below the ramp
    /// velocity; longer targets use
    /// `sqrt(ramp² + 2 * a₁ * (target - phase2_distance))`. Settings without
    /// a closed form fall back to [`Self::search_speed`].
    pub fn required_speed(&self, target_distance: f32) -> f32 {
        if !(target_distance > 0.0) {
            return 0.0;
        }

        if !self.settings.has_closed_form() {
            return self.search_speed(target_distance).unwrap_or_else(|| {
                warn!(
                    "no launch speed up to {} px/s reaches {:.1} px",
                    SEARCH_SPEED_LIMIT, target_distance
                );
                SEARCH_SPEED_LIMIT
            });
        }

        let ramp_velocity = self.params.friction_ramp_velocity();
        if target_distance <= self.phase2_distance {
            return self.bisect(target_distance, 0.0, ramp_velocity);
        }

        let phase1_distance = target_distance - self.phase2_distance;
        (ramp_velocity * ramp_velocity + 2.0 * self.phase1_deceleration() * phase1_distance).sqrt()
    }

    /// [`Self::required_speed`] limited to `max_speed`.
    ///
    /// # Returns
    /// The speed and whether it had to be clamped
    pub fn required_speed_clamped(&self, target_distance: f32, max_speed: f32) -> (f32, bool) {
        let speed = self.required_speed(target_distance);
        if speed > max_speed {
            (max_speed, true)
        } else {
            (speed, false)
        }
    }

    /// Bisection over the full simulation, with an expanding upper bracket.
    ///
    /// Exact to the simulation at any settings. Returns `None` when even
    /// [`SEARCH_SPEED_LIMIT`] falls short, e.g. a zero-length time limit.
    pub fn search_speed(&self, target_distance: f32) -> Option<f32> {
        if !(target_distance > 0.0) {
            return Some(0.0);
        }

        let mut hi = self.params.friction_ramp_velocity();
        while self.simulate(hi) < target_distance {
            if hi >= SEARCH_SPEED_LIMIT {
                return None;
            }
            hi = (hi * 2.0).min(SEARCH_SPEED_LIMIT);
        }

        Some(self.bisect(target_distance, 0.0, hi))
    }

    fn bisect(&self, target_distance: f32, mut lo: f32, mut hi: f32) -> f32 {
        for _ in 0..BISECTION_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            if self.simulate(mid) < target_distance {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}
