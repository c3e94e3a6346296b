use bevy::prelude::*;

use crate::components::{GroundFriction, Sliding};
use crate::resources::{FrictionModelCache, ThrowConfig};

/// Draw debug gizmos for sliding bodies.
///
/// Draws the remaining path to the predicted rest point and, when the throw
/// had a target, the aimed-at point.
pub fn draw_landing_prediction(
    mut gizmos: Gizmos,
    time: Res<Time<Fixed>>,
    config: Res<ThrowConfig>,
    mut cache: ResMut<FrictionModelCache>,
    query: Query<(&Transform, &Sliding, Option<&GroundFriction>)>,
) {
    if !config.debug_draw {
        return;
    }
    let Ok(settings) = config.settings(time.timestep().as_secs_f32()) else {
        return;
    };

    for (transform, sliding, friction) in query.iter() {
        let params = friction.map_or(config.default_params, |friction| friction.0);
        let Ok(model) = cache.get_or_build(params, settings) else {
            continue;
        };

        let position = transform.translation.truncate();
        let speed = sliding.speed();
        let direction = sliding.velocity.normalize_or_zero();

        // Sliding is memoryless: what is left is the distance from the current speed.
        let rest_point = position + direction * model.distance(speed);
        gizmos.line_2d(position, rest_point, Color::srgb(0.0, 1.0, 0.0));
        gizmos.circle_2d(rest_point, 6.0, Color::srgb(0.0, 1.0, 0.0));

        if let Some(target) = sliding.target_distance {
            let aim_point = sliding.origin + direction * target;
            gizmos.circle_2d(aim_point, 4.0, Color::srgb(1.0, 0.0, 0.0));
        }
    }
}
