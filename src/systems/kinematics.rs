//! Kinematics system - steps sliding bodies with the ground friction law.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::components::{GroundFriction, Landed, Sliding};
use crate::events::LandedEvent;
use crate::model::step_speed;
use crate::resources::ThrowConfig;

/// Decelerate and move every sliding body by one fixed step.
///
/// Runs in FixedUpdate and uses the same step function as the model, so a
/// body thrown with the model's launch speed lands where the model predicts.
/// Bodies that come to rest lose [`Sliding`], gain [`Landed`], and produce a
/// [`LandedEvent`].
///
/// # Arguments
/// * `commands` - Bevy Commands for swapping components
/// * `time` - Fixed time, for the step length
/// * `config` - Throw configuration
/// * `landed_events` - Message writer for landings
/// * `bodies` - Sliding bodies and their optional friction override
pub fn update_sliding_bodies(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    config: Res<ThrowConfig>,
    mut landed_events: MessageWriter<LandedEvent>,
    mut bodies: Query<(Entity, &mut Transform, &mut Sliding, Option<&GroundFriction>)>,
) {
    let Ok(settings) = config.settings(time.timestep().as_secs_f32()) else {
        return;
    };
    let dt = settings.timestep;

    for (entity, mut transform, mut sliding, friction) in bodies.iter_mut() {
        let params = friction.map_or(config.default_params, |friction| friction.0);
        let speed = sliding.speed();

        if speed > settings.stop_epsilon {
            let direction = sliding.velocity / speed;
            let (next, travel) = step_speed(speed, &params, &settings);

            transform.translation += (direction * travel * dt).extend(0.0);
            sliding.velocity = direction * next;
            sliding.traveled += travel * dt;
            sliding.elapsed += dt;

            if next > settings.stop_epsilon {
                continue;
            }
        }

        let position = transform.translation.truncate();
        commands
            .entity(entity)
            .remove::<Sliding>()
            .insert(Landed {
                traveled: sliding.traveled,
                elapsed: sliding.elapsed,
            });

        let event = LandedEvent {
            entity,
            position,
            traveled: sliding.traveled,
            elapsed: sliding.elapsed,
            target_distance: sliding.target_distance,
        };
        match event.miss() {
            Some(miss) => info!(
                "{entity} landed after {:.1} px in {:.2}s ({:+.1} px from target)",
                event.traveled, event.elapsed, miss
            ),
            None => info!(
                "{entity} landed after {:.1} px in {:.2}s",
                event.traveled, event.elapsed
            ),
        }
        landed_events.write(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FrictionModel, FrictionParams};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<ThrowConfig>()
            .add_message::<LandedEvent>()
            .add_systems(FixedUpdate, update_sliding_bodies);
        app
    }

    #[test]
    fn test_body_slides_model_distance() {
        let mut app = test_app();
        let body = app
            .world_mut()
            .spawn((Transform::default(), Sliding::new(Vec2::ZERO, Vec2::new(0.0, 568.5))))
            .id();

        for _ in 0..400 {
            app.world_mut().run_schedule(FixedUpdate);
        }

        let world = app.world();
        let landed = world.get::<Landed>(body).expect("body should have landed");
        assert!(world.get::<Sliding>(body).is_none());

        let expected = FrictionModel::new(FrictionParams::default()).simulate(568.5);
        assert!((landed.traveled - expected).abs() < 0.01);
        assert!(landed.elapsed > 3.0);

        let position = world.get::<Transform>(body).unwrap().translation;
        assert!(position.x.abs() < 1e-3);
        assert!((position.y - expected).abs() < 0.01);
    }

    #[test]
    fn test_friction_override_is_used() {
        let mut app = test_app();
        let slippery = FrictionParams::new(100.0, 0.5, 200.0).unwrap();
        let stock = app
            .world_mut()
            .spawn((Transform::default(), Sliding::new(Vec2::ZERO, Vec2::X * 400.0)))
            .id();
        let override_body = app
            .world_mut()
            .spawn((
                Transform::default(),
                Sliding::new(Vec2::ZERO, Vec2::X * 400.0),
                GroundFriction(slippery),
            ))
            .id();

        for _ in 0..1000 {
            app.world_mut().run_schedule(FixedUpdate);
        }

        let world = app.world();
        let stock_landed = world.get::<Landed>(stock).unwrap();
        let override_landed = world.get::<Landed>(override_body).unwrap();
        assert!(override_landed.traveled > 2.5 * stock_landed.traveled);
    }

    #[test]
    fn test_resting_body_lands_immediately() {
        let mut app = test_app();
        let body = app
            .world_mut()
            .spawn((Transform::default(), Sliding::new(Vec2::ZERO, Vec2::ZERO)))
            .id();

        app.world_mut().run_schedule(FixedUpdate);

        let landed = app.world().get::<Landed>(body).unwrap();
        assert_eq!(landed.traveled, 0.0);
    }
}
