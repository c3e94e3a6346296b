//! Components for thrown objects sliding along the ground.

use bevy::prelude::*;

use crate::model::FrictionParams;

/// A thrown object still sliding along the ground.
///
/// Moved every fixed tick by the sliding system, which removes it and inserts
/// [`Landed`] once the object comes to rest.
///
/// # Fields
/// * `velocity` - Current planar velocity (px/s)
/// * `origin` - Where the slide started
/// * `traveled` - Distance covered so far (px)
/// * `elapsed` - Time spent sliding (s)
/// * `target_distance` - Distance the thrower aimed for, if any
/// * `thrower` - Entity that threw it
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_throw_friction::components::Sliding;
///
/// let sliding = Sliding::new(Vec2::ZERO, Vec2::new(400.0, 0.0)).with_target(500.0);
/// assert_eq!(sliding.speed(), 400.0);
/// ```
#[derive(Component, Reflect, Clone, Default)]
#[reflect(Component)]
pub struct Sliding {
    pub velocity: Vec2,
    pub origin: Vec2,
    pub traveled: f32,
    pub elapsed: f32,
    pub target_distance: Option<f32>,
    pub thrower: Option<Entity>,
}

impl Sliding {
    pub fn new(origin: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity,
            origin,
            ..Default::default()
        }
    }

    /// Builder pattern: set the aimed distance
    pub fn with_target(mut self, target_distance: f32) -> Self {
        self.target_distance = Some(target_distance);
        self
    }

    /// Builder pattern: set the thrower
    pub fn with_thrower(mut self, thrower: Entity) -> Self {
        self.thrower = Some(thrower);
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Per-entity friction override. Without it the configured default applies.
#[derive(Component, Reflect, Clone, Copy)]
#[reflect(Component)]
pub struct GroundFriction(pub FrictionParams);

/// Marker left on an object after it stopped sliding.
#[derive(Component, Reflect, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Landed {
    /// Total distance slid (px)
    pub traveled: f32,
    /// Total sliding time (s)
    pub elapsed: f32,
}
