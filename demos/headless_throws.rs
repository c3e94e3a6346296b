use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_throw_friction::prelude::*;
use std::time::Duration;

const THROWS: usize = 4;

fn main() {
    println!("Starting headless throw simulation...");
    println!("Throwing {THROWS} objects and waiting for them to come to rest.");

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))))
        .add_plugins(LogPlugin::default())
        .add_plugins(ThrowFrictionPlugin)
        // Skip the debug plugin (headless, no gizmos)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_systems(Startup, throw_objects)
        .add_systems(FixedUpdate, report_landings)
        .run();
}

fn throw_objects(mut commands: Commands, mut throws: MessageWriter<ThrowEvent>) {
    println!("\n[SETUP] Throwing...");
    let thrower = commands.spawn(Name::new("Thrower")).id();

    // Short roll that never leaves the ramp phase
    throws.write(ThrowEvent::at(Vec2::ZERO, Vec2::new(60.0, 0.0)).with_thrower(thrower));
    // Mid-range flashbang
    throws.write(ThrowEvent::at(Vec2::ZERO, Vec2::new(300.0, 400.0)).with_thrower(thrower));
    // Frag with its own friction
    throws.write(
        ThrowEvent::at(Vec2::ZERO, Vec2::new(0.0, -900.0))
            .with_params(presets::frag())
            .with_thrower(thrower),
    );
    // Past the throw cap: lands short
    throws.write(ThrowEvent::at(Vec2::ZERO, Vec2::new(-4000.0, 0.0)).with_thrower(thrower));
}

fn report_landings(
    mut landed: MessageReader<LandedEvent>,
    mut exit: MessageWriter<AppExit>,
    mut count: Local<usize>,
) {
    for event in landed.read() {
        *count += 1;
        let target = event.target_distance.unwrap_or_default();
        let miss = event.miss().unwrap_or_default();
        let verdict = if miss.abs() <= target.max(1.0) * 0.02 {
            "PASS"
        } else {
            "SHORT"
        };
        println!(
            "[LANDED] {} at ({:.1}, {:.1}): slid {:.1} px of {:.1} in {:.2}s ({:+.1} px) {}",
            event.entity,
            event.position.x,
            event.position.y,
            event.traveled,
            target,
            event.elapsed,
            miss,
            verdict
        );
    }

    if *count >= THROWS {
        println!("[FINISHED] All throws at rest.");
        exit.write(AppExit::Success);
    }
}
