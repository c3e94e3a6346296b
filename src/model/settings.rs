//! Integration settings for the friction simulation.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::IntegrationOrder;

/// Physics tick the reference tuning was done at (seconds).
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Speed at or below which a body counts as stopped (px/s).
pub const DEFAULT_STOP_EPSILON: f32 = 0.001;

/// Hard cap on steps per run.
pub const DEFAULT_MAX_STEPS: u32 = 1_000_000;

/// How a slide is stepped.
///
/// The defaults reproduce the reference behavior: 60 Hz, symplectic order, no
/// engine damping, no extra friction, no time limit. The other knobs exist to
/// match what a given engine build really does.
///
/// # Fields
/// * `timestep` - Fixed step length in seconds
/// * `stop_epsilon` - Speed at or below which the slide ends (px/s)
/// * `integration` - Friction-then-move or move-then-friction
/// * `linear_damp` - Engine damping per second, applied as `v *= 1 - damp * dt`
/// * `uniform_friction` - Extra constant deceleration on top of the ramped law (px/s²)
/// * `max_time` - Flight-time limit in seconds, e.g. a fuse
/// * `max_steps` - Step cap
///
/// # Example
/// ```
/// use bevy_throw_friction::model::SimulationSettings;
/// use bevy_throw_friction::types::IntegrationOrder;
///
/// let settings = SimulationSettings::with_timestep(1.0 / 64.0)
///     .with_integration(IntegrationOrder::ForwardEuler);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub timestep: f32,
    pub stop_epsilon: f32,
    pub integration: IntegrationOrder,
    pub linear_damp: f32,
    pub uniform_friction: f32,
    pub max_time: Option<f32>,
    pub max_steps: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            stop_epsilon: DEFAULT_STOP_EPSILON,
            integration: IntegrationOrder::Symplectic,
            linear_damp: 0.0,
            uniform_friction: 0.0,
            max_time: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimulationSettings {
    /// Reference settings at a different fixed rate.
    pub fn with_timestep(timestep: f32) -> Self {
        Self {
            timestep,
            ..Default::default()
        }
    }

    pub fn with_integration(mut self, integration: IntegrationOrder) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_linear_damp(mut self, linear_damp: f32) -> Self {
        self.linear_damp = linear_damp;
        self
    }

    pub fn with_uniform_friction(mut self, uniform_friction: f32) -> Self {
        self.uniform_friction = uniform_friction;
        self
    }

    pub fn with_max_time(mut self, max_time: f32) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Whether phase 1 has constant deceleration, so the closed form applies.
    pub fn has_closed_form(&self) -> bool {
        self.linear_damp == 0.0 && self.max_time.is_none()
    }

    /// Per-step velocity factor from engine damping.
    pub fn damp_factor(&self) -> f32 {
        (1.0 - self.linear_damp * self.timestep).max(0.0)
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(SettingsError::Timestep(self.timestep));
        }
        if !self.stop_epsilon.is_finite() || self.stop_epsilon < 0.0 {
            return Err(SettingsError::StopEpsilon(self.stop_epsilon));
        }
        if !self.linear_damp.is_finite() || self.linear_damp < 0.0 {
            return Err(SettingsError::LinearDamp(self.linear_damp));
        }
        if !self.uniform_friction.is_finite() || self.uniform_friction < 0.0 {
            return Err(SettingsError::UniformFriction(self.uniform_friction));
        }
        if let Some(max_time) = self.max_time {
            if max_time.is_nan() || max_time < 0.0 {
                return Err(SettingsError::MaxTime(max_time));
            }
        }
        if self.max_steps == 0 {
            return Err(SettingsError::MaxSteps);
        }
        Ok(())
    }
}

/// Rejected simulation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingsError {
    Timestep(f32),
    StopEpsilon(f32),
    LinearDamp(f32),
    UniformFriction(f32),
    MaxTime(f32),
    MaxSteps,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestep(value) => write!(f, "timestep must be positive and finite, got {value}"),
            Self::StopEpsilon(value) => write!(f, "stop epsilon must be non-negative, got {value}"),
            Self::LinearDamp(value) => write!(f, "linear damp must be non-negative, got {value}"),
            Self::UniformFriction(value) => {
                write!(f, "uniform friction must be non-negative, got {value}")
            }
            Self::MaxTime(value) => write!(f, "max time must be non-negative, got {value}"),
            Self::MaxSteps => write!(f, "max steps must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.timestep, 1.0 / 60.0);
        assert_eq!(settings.stop_epsilon, 0.001);
        assert_eq!(settings.integration, IntegrationOrder::Symplectic);
        assert!(settings.has_closed_form());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_damping_or_time_limit_disable_closed_form() {
        assert!(!SimulationSettings::default().with_linear_damp(0.1).has_closed_form());
        assert!(!SimulationSettings::default().with_max_time(3.0).has_closed_form());
        // Extra uniform friction keeps phase 1 constant.
        assert!(SimulationSettings::default().with_uniform_friction(300.0).has_closed_form());
    }

    #[test]
    fn test_damp_factor_never_negative() {
        let settings = SimulationSettings::default().with_linear_damp(1000.0);
        assert_eq!(settings.damp_factor(), 0.0);
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            SimulationSettings::with_timestep(0.0).validate(),
            Err(SettingsError::Timestep(0.0))
        );
        assert!(SimulationSettings::default().with_linear_damp(-1.0).validate().is_err());
        assert!(SimulationSettings::default().with_uniform_friction(f32::NAN).validate().is_err());
        assert!(SimulationSettings::default().with_max_time(-1.0).validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let settings: SimulationSettings =
            serde_json::from_str(r#"{"integration":"ForwardEuler","linear_damp":0.1}"#).unwrap();
        assert_eq!(settings.integration, IntegrationOrder::ForwardEuler);
        assert_eq!(settings.linear_damp, 0.1);
        assert_eq!(settings.timestep, DEFAULT_TIMESTEP);
        assert_eq!(settings.max_time, None);
    }
}
