//! Systems module - all ECS systems for throwing and sliding.

pub mod debug;
pub mod kinematics;
pub mod throwing;
