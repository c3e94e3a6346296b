//! Prints how far the old throw formula misses under the two-phase friction law.
//!
//! Usage: `cargo run --example calibration -- [friction] [min_multiplier] [ramp_velocity]`

use anyhow::{Context, Result};
use bevy_throw_friction::model::analysis::{
    average_phase2_distance, calibration_table, DEFAULT_MAX_THROW_SPEED, LEGACY_COMPENSATION,
};
use bevy_throw_friction::model::{FrictionModel, FrictionParams, SimulationSettings};
use bevy_throw_friction::types::IntegrationOrder;

const TARGETS: [f32; 8] = [50.0, 100.0, 200.0, 300.0, 500.0, 800.0, 1200.0, 2000.0];

fn parse_arg(args: &[String], index: usize, default: f32) -> Result<f32> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("argument {} is not a number: {raw:?}", index + 1)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = FrictionParams::default();
    let params = FrictionParams::new(
        parse_arg(&args, 0, defaults.ground_friction())?,
        parse_arg(&args, 1, defaults.min_friction_multiplier())?,
        parse_arg(&args, 2, defaults.friction_ramp_velocity())?,
    )?;

    let model = FrictionModel::new(params);
    println!(
        "friction {:.1}, min multiplier {:.2}, ramp {:.1} px/s",
        params.ground_friction(),
        params.min_friction_multiplier(),
        params.friction_ramp_velocity()
    );
    println!(
        "phase 2 distance: {:.2} px stepped, {:.2} px averaged",
        model.phase2_distance(),
        average_phase2_distance(&params)
    );

    println!(
        "\n{:>8} {:>10} {:>10} {:>8} {:>10} {:>10} {:>8} {:>6}",
        "target", "old v", "old d", "old err", "new v", "new d", "new err", "k"
    );
    for row in calibration_table(&model, &TARGETS, LEGACY_COMPENSATION, DEFAULT_MAX_THROW_SPEED) {
        println!(
            "{:>8.1} {:>10.1} {:>10.1} {:>7.1}% {:>10.1} {:>10.1} {:>7.2}% {:>6.3}",
            row.target,
            row.legacy_speed,
            row.legacy_distance,
            row.legacy_error * 100.0,
            row.speed,
            row.distance,
            row.error() * 100.0,
            row.compensation
        );
    }

    let forward = FrictionModel::with_settings(
        params,
        SimulationSettings::default().with_integration(IntegrationOrder::ForwardEuler),
    )?;
    println!("\n{:>8} {:>12} {:>12} {:>8}", "speed", "symplectic", "forward", "gap");
    for speed in [150.0, 400.0, 568.5, 850.0] {
        let symplectic = model.simulate(speed);
        let forward = forward.simulate(speed);
        println!(
            "{:>8.1} {:>12.2} {:>12.2} {:>8.2}",
            speed,
            symplectic,
            forward,
            forward - symplectic
        );
    }

    Ok(())
}
