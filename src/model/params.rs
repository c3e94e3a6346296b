//! Friction law parameters and their validation.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters of the two-phase ground friction law.
///
/// Immutable once built: every constructor validates, so the simulation can
/// assume finite, positive values and never divides by zero.
///
/// # Fields
/// * `ground_friction` - Baseline deceleration (px/s²)
/// * `min_friction_multiplier` - Multiplier applied at and above the ramp velocity (0 < m ≤ 1)
/// * `friction_ramp_velocity` - Speed below which friction ramps back up to full (px/s)
///
/// # Example
/// ```
/// use bevy_throw_friction::model::FrictionParams;
///
/// let params = FrictionParams::new(300.0, 0.5, 200.0).unwrap();
/// assert_eq!(params.ground_friction(), 300.0);
///
/// assert!(FrictionParams::new(300.0, 0.0, 200.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(try_from = "RawFrictionParams", into = "RawFrictionParams")]
pub struct FrictionParams {
    ground_friction: f32,
    min_friction_multiplier: f32,
    friction_ramp_velocity: f32,
}

impl Default for FrictionParams {
    /// Stock grenade tuning: 300 px/s² friction, half friction while fast,
    /// full friction ramping in below 200 px/s.
    fn default() -> Self {
        Self {
            ground_friction: 300.0,
            min_friction_multiplier: 0.5,
            friction_ramp_velocity: 200.0,
        }
    }
}

impl FrictionParams {
    /// Builds a validated parameter set.
    ///
    /// # Arguments
    /// * `ground_friction` - Baseline deceleration in px/s², must be positive
    /// * `min_friction_multiplier` - Must lie in `(0, 1]`
    /// * `friction_ramp_velocity` - Ramp threshold in px/s, must be positive
    ///
    /// # Returns
    /// The parameters, or the first rule they break
    pub fn new(
        ground_friction: f32,
        min_friction_multiplier: f32,
        friction_ramp_velocity: f32,
    ) -> Result<Self, FrictionParamsError> {
        if !ground_friction.is_finite() || ground_friction <= 0.0 {
            return Err(FrictionParamsError::GroundFriction(ground_friction));
        }
        if !min_friction_multiplier.is_finite()
            || min_friction_multiplier <= 0.0
            || min_friction_multiplier > 1.0
        {
            return Err(FrictionParamsError::MinMultiplier(min_friction_multiplier));
        }
        if !friction_ramp_velocity.is_finite() || friction_ramp_velocity <= 0.0 {
            return Err(FrictionParamsError::RampVelocity(friction_ramp_velocity));
        }

        Ok(Self {
            ground_friction,
            min_friction_multiplier,
            friction_ramp_velocity,
        })
    }

    /// Returns a copy with a different ground friction, revalidated.
    pub fn with_ground_friction(self, ground_friction: f32) -> Result<Self, FrictionParamsError> {
        Self::new(
            ground_friction,
            self.min_friction_multiplier,
            self.friction_ramp_velocity,
        )
    }

    /// Baseline deceleration (px/s²).
    pub fn ground_friction(&self) -> f32 {
        self.ground_friction
    }

    /// Multiplier used at and above the ramp velocity.
    pub fn min_friction_multiplier(&self) -> f32 {
        self.min_friction_multiplier
    }

    /// Speed below which friction ramps up to full (px/s).
    pub fn friction_ramp_velocity(&self) -> f32 {
        self.friction_ramp_velocity
    }

    /// Constant deceleration of phase 1, before any extra uniform friction.
    pub fn phase1_deceleration(&self) -> f32 {
        self.ground_friction * self.min_friction_multiplier
    }

    /// Bit-exact key for caching per-parameter results.
    pub fn cache_key(&self) -> [u32; 3] {
        [
            self.ground_friction.to_bits(),
            self.min_friction_multiplier.to_bits(),
            self.friction_ramp_velocity.to_bits(),
        ]
    }
}

/// Rejected friction configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrictionParamsError {
    /// Ground friction was zero, negative or not finite
    GroundFriction(f32),
    /// Minimum multiplier was outside `(0, 1]` or not finite
    MinMultiplier(f32),
    /// Ramp velocity was zero, negative or not finite
    RampVelocity(f32),
}

impl fmt::Display for FrictionParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroundFriction(value) => {
                write!(f, "ground friction must be positive and finite, got {value}")
            }
            Self::MinMultiplier(value) => {
                write!(f, "min friction multiplier must be in (0, 1], got {value}")
            }
            Self::RampVelocity(value) => {
                write!(f, "friction ramp velocity must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for FrictionParamsError {}

/// Unvalidated mirror used for (de)serialization.
#[derive(Serialize, Deserialize)]
struct RawFrictionParams {
    ground_friction: f32,
    min_friction_multiplier: f32,
    friction_ramp_velocity: f32,
}

impl TryFrom<RawFrictionParams> for FrictionParams {
    type Error = FrictionParamsError;

    fn try_from(raw: RawFrictionParams) -> Result<Self, Self::Error> {
        Self::new(
            raw.ground_friction,
            raw.min_friction_multiplier,
            raw.friction_ramp_velocity,
        )
    }
}

impl From<FrictionParams> for RawFrictionParams {
    fn from(params: FrictionParams) -> Self {
        Self {
            ground_friction: params.ground_friction,
            min_friction_multiplier: params.min_friction_multiplier,
            friction_ramp_velocity: params.friction_ramp_velocity,
        }
    }
}

/// Friction presets for the stock throwables.
pub mod presets {
    use super::FrictionParams;

    /// Frag grenade: slightly lower friction so it rolls a bit farther.
    pub fn frag() -> FrictionParams {
        FrictionParams {
            ground_friction: 280.0,
            ..FrictionParams::default()
        }
    }

    /// Flashbang: stock tuning.
    pub fn flashbang() -> FrictionParams {
        FrictionParams::default()
    }

    /// Smoke canister: heavier, stops quickly once slow.
    pub fn smoke() -> FrictionParams {
        FrictionParams {
            ground_friction: 360.0,
            min_friction_multiplier: 0.6,
            friction_ramp_velocity: 180.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = FrictionParams::new(300.0, 0.5, 200.0).unwrap();
        assert_eq!(params, FrictionParams::default());
        assert_eq!(params.phase1_deceleration(), 150.0);
    }

    #[test]
    fn test_multiplier_of_one_is_allowed() {
        assert!(FrictionParams::new(300.0, 1.0, 200.0).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            FrictionParams::new(0.0, 0.5, 200.0),
            Err(FrictionParamsError::GroundFriction(0.0))
        );
        assert_eq!(
            FrictionParams::new(300.0, -0.1, 200.0),
            Err(FrictionParamsError::MinMultiplier(-0.1))
        );
        assert_eq!(
            FrictionParams::new(300.0, 1.5, 200.0),
            Err(FrictionParamsError::MinMultiplier(1.5))
        );
        assert_eq!(
            FrictionParams::new(300.0, 0.5, 0.0),
            Err(FrictionParamsError::RampVelocity(0.0))
        );
        assert!(FrictionParams::new(f32::NAN, 0.5, 200.0).is_err());
        assert!(FrictionParams::new(300.0, 0.5, f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_the_field() {
        let err = FrictionParams::new(300.0, 0.0, 200.0).unwrap_err();
        assert!(err.to_string().contains("min friction multiplier"));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: FrictionParams = serde_json::from_str(
            r#"{"ground_friction":280.0,"min_friction_multiplier":0.5,"friction_ramp_velocity":200.0}"#,
        )
        .unwrap();
        assert_eq!(ok, presets::frag());

        let bad = serde_json::from_str::<FrictionParams>(
            r#"{"ground_friction":280.0,"min_friction_multiplier":0.0,"friction_ramp_velocity":200.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_roundtrip_through_json() {
        let json = serde_json::to_string(&presets::smoke()).unwrap();
        let back: FrictionParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, presets::smoke());
    }

    #[test]
    fn test_presets_are_valid() {
        for params in [presets::frag(), presets::flashbang(), presets::smoke()] {
            let rebuilt = FrictionParams::new(
                params.ground_friction(),
                params.min_friction_multiplier(),
                params.friction_ramp_velocity(),
            );
            assert_eq!(rebuilt, Ok(params));
        }
    }
}
