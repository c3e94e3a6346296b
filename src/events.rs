//! Messages for throwing and landing.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::model::FrictionParams;

/// Request to throw an object so it slides to rest `target_distance` away.
///
/// The throwing system turns the distance into a launch speed with the
/// friction model, clamps it to the thrower's maximum, and spawns a
/// [`Sliding`](crate::components::Sliding) entity.
///
/// # Fields
/// * `origin` - Release point
/// * `direction` - Throw direction (normalized by the receiver)
/// * `target_distance` - How far the object should slide (px)
/// * `thrower` - Entity that threw it
/// * `params` - Friction override for this object
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_throw_friction::events::ThrowEvent;
///
/// let throw = ThrowEvent::at(Vec2::ZERO, Vec2::new(300.0, 400.0));
/// assert_eq!(throw.target_distance, 500.0);
/// assert!(throw.direction.distance(Vec2::new(0.6, 0.8)) < 1e-6);
/// ```
#[derive(Message, Clone)]
pub struct ThrowEvent {
    pub origin: Vec2,
    pub direction: Vec2,
    pub target_distance: f32,
    pub thrower: Option<Entity>,
    pub params: Option<FrictionParams>,
}

impl ThrowEvent {
    /// Throw along `direction` for `target_distance` pixels.
    pub fn new(origin: Vec2, direction: Vec2, target_distance: f32) -> Self {
        Self {
            origin,
            direction,
            target_distance,
            thrower: None,
            params: None,
        }
    }

    /// Throw so the object comes to rest on `aim_point`.
    pub fn at(origin: Vec2, aim_point: Vec2) -> Self {
        let offset = aim_point - origin;
        Self::new(origin, offset.normalize_or_zero(), offset.length())
    }

    /// Builder pattern: set the thrower
    pub fn with_thrower(mut self, thrower: Entity) -> Self {
        self.thrower = Some(thrower);
        self
    }

    /// Builder pattern: override friction for this object
    pub fn with_params(mut self, params: FrictionParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// Sent once when a sliding object comes to rest.
#[derive(Message, Clone)]
pub struct LandedEvent {
    pub entity: Entity,
    pub position: Vec2,
    pub traveled: f32,
    pub elapsed: f32,
    pub target_distance: Option<f32>,
}

impl LandedEvent {
    /// Signed landing error, positive when the object went too far.
    pub fn miss(&self) -> Option<f32> {
        self.target_distance.map(|target| self.traveled - target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throw_at_aim_point() {
        let throw = ThrowEvent::at(Vec2::new(10.0, 10.0), Vec2::new(10.0, -90.0));
        assert_eq!(throw.target_distance, 100.0);
        assert!(throw.direction.distance(Vec2::NEG_Y) < 1e-6);
    }

    #[test]
    fn test_throw_at_own_position_has_no_direction() {
        let throw = ThrowEvent::at(Vec2::ONE, Vec2::ONE);
        assert_eq!(throw.direction, Vec2::ZERO);
        assert_eq!(throw.target_distance, 0.0);
    }

    #[test]
    fn test_miss() {
        let landed = LandedEvent {
            entity: Entity::PLACEHOLDER,
            position: Vec2::ZERO,
            traveled: 297.0,
            elapsed: 1.5,
            target_distance: Some(300.0),
        };
        assert_eq!(landed.miss(), Some(-3.0));
    }
}
