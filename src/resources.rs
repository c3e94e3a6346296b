//! Global resources for throwing and sliding.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{
    analysis::DEFAULT_MAX_THROW_SPEED, FrictionModel, FrictionParams, SettingsError,
    SimulationSettings, DEFAULT_STOP_EPSILON,
};
use crate::types::IntegrationOrder;

/// Global configuration for thrown objects.
///
/// The fixed timestep is not stored here: systems read it from
/// `Time<Fixed>` so the model always steps at the rate the app really runs.
///
/// # Fields
/// * `max_throw_speed` - Fastest launch a thrower can manage (px/s)
/// * `default_params` - Friction for objects without a `GroundFriction` override
/// * `integration` - Step order used by the sliding system and the inverse
/// * `linear_damp` - Engine damping per second on top of friction
/// * `uniform_friction` - Extra constant deceleration (px/s²)
/// * `stop_epsilon` - Speed at which a slide counts as finished (px/s)
/// * `debug_draw` - Draw predicted landing points
///
/// # Example
/// ```
/// use bevy_throw_friction::resources::ThrowConfig;
///
/// let config = ThrowConfig {
///     max_throw_speed: 1000.0,
///     debug_draw: true,
///     ..Default::default()
/// };
/// let settings = config.settings(1.0 / 60.0).unwrap();
/// assert_eq!(settings.timestep, 1.0 / 60.0);
/// ```
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct ThrowConfig {
    pub max_throw_speed: f32,
    pub default_params: FrictionParams,
    pub integration: IntegrationOrder,
    pub linear_damp: f32,
    pub uniform_friction: f32,
    pub stop_epsilon: f32,
    pub debug_draw: bool,
}

impl Default for ThrowConfig {
    /// Stock thrower: 850 px/s cap, stock friction, reference stepping, no debug draw.
    fn default() -> Self {
        Self {
            max_throw_speed: DEFAULT_MAX_THROW_SPEED,
            default_params: FrictionParams::default(),
            integration: IntegrationOrder::Symplectic,
            linear_damp: 0.0,
            uniform_friction: 0.0,
            stop_epsilon: DEFAULT_STOP_EPSILON,
            debug_draw: false,
        }
    }
}

impl ThrowConfig {
    /// Simulation settings for the given fixed timestep, validated.
    pub fn settings(&self, timestep: f32) -> Result<SimulationSettings, SettingsError> {
        let settings = SimulationSettings {
            timestep,
            stop_epsilon: self.stop_epsilon,
            integration: self.integration,
            linear_damp: self.linear_damp,
            uniform_friction: self.uniform_friction,
            ..Default::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

type ModelKey = ([u32; 3], [u32; 7]);

fn settings_key(settings: &SimulationSettings) -> [u32; 7] {
    [
        settings.timestep.to_bits(),
        settings.stop_epsilon.to_bits(),
        settings.integration as u32,
        settings.linear_damp.to_bits(),
        settings.uniform_friction.to_bits(),
        settings.max_time.map_or(u32::MAX, f32::to_bits),
        settings.max_steps,
    ]
}

/// Built friction models, one per parameter set and settings.
///
/// Building a model simulates the whole ramp phase once; every throw with the
/// same friction reuses it.
///
/// # Example
/// ```
/// use bevy_throw_friction::model::{FrictionParams, SimulationSettings};
/// use bevy_throw_friction::resources::FrictionModelCache;
///
/// let mut cache = FrictionModelCache::default();
/// let params = FrictionParams::default();
/// let settings = SimulationSettings::default();
/// cache.get_or_build(params, settings).unwrap();
/// cache.get_or_build(params, settings).unwrap();
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Resource, Default)]
pub struct FrictionModelCache {
    models: HashMap<ModelKey, FrictionModel>,
}

impl FrictionModelCache {
    /// Returns the cached model, building it on first use.
    pub fn get_or_build(
        &mut self,
        params: FrictionParams,
        settings: SimulationSettings,
    ) -> Result<&FrictionModel, SettingsError> {
        let key = (params.cache_key(), settings_key(&settings));
        if !self.models.contains_key(&key) {
            let model = FrictionModel::with_settings(params, settings)?;
            debug!(
                "built friction model: friction {} mult {} ramp {} -> phase 2 distance {:.2} px",
                params.ground_friction(),
                params.min_friction_multiplier(),
                params.friction_ramp_velocity(),
                model.phase2_distance()
            );
            self.models.insert(key, model);
        }
        Ok(&self.models[&key])
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Drops every model, e.g. after retuning friction at runtime.
    pub fn clear(&mut self) {
        self.models.clear();
    }
}
