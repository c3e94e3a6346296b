//! Throwing system - turns aimed throws into sliding bodies.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::components::{GroundFriction, Sliding};
use crate::events::ThrowEvent;
use crate::resources::{FrictionModelCache, ThrowConfig};

/// Spawn a sliding body for every throw request.
///
/// The launch speed comes from the friction model's inverse at the app's
/// fixed timestep, clamped to `ThrowConfig::max_throw_speed`. Throws with no
/// direction are dropped.
///
/// # Arguments
/// * `commands` - Bevy Commands for spawning
/// * `time` - Fixed time, for the timestep the model must match
/// * `config` - Throw configuration
/// * `cache` - Built friction models
/// * `throws` - Incoming throw requests
pub fn handle_throw_events(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    config: Res<ThrowConfig>,
    mut cache: ResMut<FrictionModelCache>,
    mut throws: MessageReader<ThrowEvent>,
) {
    let settings = match config.settings(time.timestep().as_secs_f32()) {
        Ok(settings) => settings,
        Err(err) => {
            // Drain so the same requests are not retried next tick.
            let dropped = throws.read().count();
            if dropped > 0 {
                error!("dropping {dropped} throws, invalid throw config: {err}");
            }
            return;
        }
    };

    for throw in throws.read() {
        let direction = throw.direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            warn!("ignoring throw from {} with no direction", throw.origin);
            continue;
        }

        let params = throw.params.unwrap_or(config.default_params);
        let model = match cache.get_or_build(params, settings) {
            Ok(model) => *model,
            Err(err) => {
                error!("ignoring throw: {err}");
                continue;
            }
        };

        let (speed, clamped) =
            model.required_speed_clamped(throw.target_distance, config.max_throw_speed);
        if clamped {
            debug!(
                "throw of {:.1} px needs more than {:.1} px/s, clamped",
                throw.target_distance, config.max_throw_speed
            );
        }

        let mut sliding =
            Sliding::new(throw.origin, direction * speed).with_target(throw.target_distance);
        if let Some(thrower) = throw.thrower {
            sliding = sliding.with_thrower(thrower);
        }

        let entity = commands
            .spawn((
                Transform::from_translation(throw.origin.extend(0.0)),
                sliding,
                GroundFriction(params),
                Name::new("Thrown"),
            ))
            .id();

        debug!(
            "{entity} thrown at {:.1} px/s toward {:.1} px (expected landing {:.1} px)",
            speed,
            throw.target_distance,
            model.distance(speed)
        );
    }
}
