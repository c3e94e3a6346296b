//! # Bevy Throw Friction
//!
//! Ground friction for thrown objects in a top-down Bevy 0.18 game.
//!
//! ## Features
//! - Two-phase friction law: reduced friction while fast, quadratic ramp to full friction near rest
//! - Forward map (launch speed to sliding distance) and its inverse
//! - Cached ramp-phase distance with a closed-form fast path
//! - Symplectic or forward Euler stepping, engine damping, extra uniform friction, flight-time limits
//! - Calibration helpers for retuning old throw formulas
//! - Plugin that lands throws where they were aimed
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_throw_friction::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ThrowFrictionPluginGroup)
//!         .insert_resource(Time::<Fixed>::from_hz(60.0))
//!         .run();
//! }
//! ```
//!
//! The model works without an app:
//! ```
//! use bevy_throw_friction::model::{required_speed, simulate, FrictionParams};
//!
//! let params = FrictionParams::new(300.0, 0.5, 200.0).unwrap();
//! let speed = required_speed(400.0, &params);
//! assert!((simulate(speed, &params) - 400.0).abs() < speed / 60.0);
//! ```

pub mod components;
pub mod events;
pub mod model;
pub mod resources;
pub mod systems;
pub mod types;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::model::{
        presets, required_speed, simulate, FrictionModel, FrictionParams, FrictionParamsError,
        SimulationSettings, Trajectory,
    };
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::ThrowFrictionPluginGroup;
    pub use crate::{ThrowFrictionDebugPlugin, ThrowFrictionPlugin};
}

use bevy::prelude::*;

/// Main plugin group: throwing, sliding and landing-point gizmos.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_throw_friction::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ThrowFrictionPluginGroup)
///     .run();
/// ```
#[derive(Default)]
pub struct ThrowFrictionPluginGroup;

impl PluginGroup for ThrowFrictionPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(ThrowFrictionPlugin)
            .add(ThrowFrictionDebugPlugin)
    }
}

/// Core plugin: throw requests and sliding.
///
/// # Systems
/// - `handle_throw_events` - Spawns a sliding body per `ThrowEvent`
/// - `update_sliding_bodies` - Steps friction, moves bodies, reports landings
///
/// Both run chained in FixedUpdate, so a throw starts sliding on the tick it
/// was read. Set `Time::<Fixed>` to the rate your friction was tuned for.
pub struct ThrowFrictionPlugin;

impl Plugin for ThrowFrictionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::Sliding>()
            .register_type::<components::GroundFriction>()
            .register_type::<components::Landed>()
            .register_type::<resources::ThrowConfig>()
            .init_resource::<resources::ThrowConfig>()
            .init_resource::<resources::FrictionModelCache>()
            .add_message::<events::ThrowEvent>()
            .add_message::<events::LandedEvent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::throwing::handle_throw_events,
                    systems::kinematics::update_sliding_bodies,
                )
                    .chain(),
            );
    }
}

/// Debug plugin drawing predicted rest points. Needs gizmos (`DefaultPlugins`).
pub struct ThrowFrictionDebugPlugin;

impl Plugin for ThrowFrictionDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::debug::draw_landing_prediction);
    }
}
