#![warn(missing_docs)]
//! Core primitives shared across the workspace.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Simulation rate of the flight physics.
pub const TICKS_PER_SECOND: u32 = 60;

/// Seconds advanced by a single simulation tick.
pub const TICK_SECONDS: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Fixed tick type (60 TPS => ~16.7 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Position + orientation snapshot for one entity.
///
/// Passed by value between systems: the owning entity is the single
/// writer, readers get a copy taken at a known point in the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// Unit orientation quaternion.
    pub orientation: Quat,
}

impl Pose {
    /// Pose at the world origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a pose, normalizing the orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotation reconciling the plane mesh's forward axis with world forward.
///
/// The model is authored nose-down (-90° about X); composing with this
/// +90° pitch maps its local axes back onto the direction it visibly flies.
pub fn forward_axis_correction() -> Quat {
    Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_tick_advances() {
        let tick = SimTick::ZERO.advance(3);
        assert_eq!(tick, SimTick(3));
    }

    #[test]
    fn pose_new_normalizes_orientation() {
        let skewed = Quat::from_xyzw(0.0, 2.0, 0.0, 2.0);
        let pose = Pose::new(Vec3::ZERO, skewed);
        assert!((pose.orientation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn forward_correction_rotates_about_x() {
        // +90° about X sends (0,0,-1) to (0,1,0).
        let v = forward_axis_correction() * Vec3::new(0.0, 0.0, -1.0);
        assert!((v - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }
}
