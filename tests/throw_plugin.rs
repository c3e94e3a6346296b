use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy_throw_friction::prelude::*;

fn throw_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(ThrowFrictionPlugin)
        .insert_resource(Time::<Fixed>::from_hz(60.0));
    app
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn landed_bodies(app: &mut App) -> Vec<(Entity, Vec2, Landed)> {
    let mut query = app.world_mut().query::<(Entity, &Transform, &Landed)>();
    query
        .iter(app.world())
        .map(|(entity, transform, landed)| (entity, transform.translation.truncate(), *landed))
        .collect()
}

#[test]
fn test_throw_lands_on_aim_point() {
    let mut app = throw_app();
    let origin = Vec2::new(10.0, 20.0);
    let aim_point = Vec2::new(250.0, 340.0);
    app.world_mut().write_message(ThrowEvent::at(origin, aim_point));

    run_ticks(&mut app, 600);

    let landed = landed_bodies(&mut app);
    assert_eq!(landed.len(), 1);
    let (_, position, landed) = landed[0];

    let speed = FrictionModel::new(FrictionParams::default()).required_speed(400.0);
    assert!(position.distance(aim_point) < speed / 60.0);
    assert!((landed.traveled - 400.0).abs() < speed / 60.0);
    assert!(landed.elapsed > 1.0);
}

#[test]
fn test_landed_message_reports_miss() {
    let mut app = throw_app();
    app.world_mut()
        .write_message(ThrowEvent::new(Vec2::ZERO, Vec2::Y, 300.0));

    run_ticks(&mut app, 600);

    let messages = app.world().resource::<Messages<LandedEvent>>();
    let mut cursor = messages.get_cursor();
    let landed: Vec<&LandedEvent> = cursor.read(messages).collect();
    assert_eq!(landed.len(), 1);

    let event = landed[0];
    assert_eq!(event.target_distance, Some(300.0));
    let miss = event.miss().unwrap();
    assert!(miss.abs() < 300.0 / 60.0);
    assert!(event.position.x.abs() < 1e-3);
}

#[test]
fn test_friction_override_still_hits_target() {
    let mut app = throw_app();
    let thrower = app.world_mut().spawn(Name::new("Thrower")).id();
    app.world_mut().write_message(
        ThrowEvent::new(Vec2::ZERO, Vec2::X, 500.0)
            .with_params(presets::frag())
            .with_thrower(thrower),
    );

    run_ticks(&mut app, 800);

    let landed = landed_bodies(&mut app);
    assert_eq!(landed.len(), 1);
    let (entity, position, _) = landed[0];

    let friction = app.world().get::<GroundFriction>(entity).unwrap();
    assert_eq!(friction.0, presets::frag());

    let speed = FrictionModel::new(presets::frag()).required_speed(500.0);
    assert!((position.x - 500.0).abs() < speed / 60.0);
}

#[test]
fn test_long_throw_is_clamped() {
    let mut app = throw_app();
    app.world_mut()
        .write_message(ThrowEvent::new(Vec2::ZERO, Vec2::X, 5000.0));

    run_ticks(&mut app, 1200);

    let landed = landed_bodies(&mut app);
    assert_eq!(landed.len(), 1);
    let (_, position, landed) = landed[0];

    let config = ThrowConfig::default();
    let reach = FrictionModel::new(FrictionParams::default()).simulate(config.max_throw_speed);
    assert!((landed.traveled - reach).abs() < 0.1);
    assert!(position.x < 5000.0 * 0.5);
}

#[test]
fn test_zero_direction_throw_is_ignored() {
    let mut app = throw_app();
    app.world_mut()
        .write_message(ThrowEvent::new(Vec2::ZERO, Vec2::ZERO, 300.0));

    run_ticks(&mut app, 10);

    let mut query = app.world_mut().query::<&Sliding>();
    assert_eq!(query.iter(app.world()).count(), 0);
    assert!(landed_bodies(&mut app).is_empty());
}

#[test]
fn test_damped_config_uses_search() {
    let mut app = throw_app();
    app.world_mut().resource_mut::<ThrowConfig>().linear_damp = 0.1;
    app.world_mut()
        .write_message(ThrowEvent::new(Vec2::ZERO, Vec2::X, 450.0));

    run_ticks(&mut app, 800);

    let landed = landed_bodies(&mut app);
    assert_eq!(landed.len(), 1);
    // Bisection over the simulation lands within float noise of the target.
    assert!((landed[0].2.traveled - 450.0).abs() < 1.0);
    assert_eq!(app.world().resource::<FrictionModelCache>().len(), 1);
}
