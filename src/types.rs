//! Common types and enums for the friction model.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Order in which a fixed step applies friction and moves the body.
///
/// The two orders differ by roughly one step of travel per phase, which is
/// enough to make a thrown grenade miss its mark by a few pixels.
///
/// # Variants
/// * `Symplectic` - Decelerate first, then advance with the new speed
/// * `ForwardEuler` - Advance with the old speed, then decelerate
///
/// # Example
/// ```
/// use bevy_throw_friction::types::IntegrationOrder;
///
/// let order = IntegrationOrder::default();
/// assert_eq!(order, IntegrationOrder::Symplectic);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum IntegrationOrder {
    /// Friction-then-move (semi-implicit Euler)
    #[default]
    Symplectic,
    /// Move-then-friction (explicit Euler)
    ForwardEuler,
}

/// Why a simulated slide ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum StopReason {
    /// Speed dropped to the stop epsilon or below
    Stopped,
    /// The flight-time limit ran out while still moving (fuse went off)
    TimeLimit,
    /// The step cap was hit; the result is truncated
    StepLimit,
}
