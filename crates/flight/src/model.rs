//! The flight model state machine.

use crate::FlightControls;
use glam::{EulerRot, Quat, Vec3};
use terraflight_core::{forward_axis_correction, Pose};
use terraflight_terrain::TerrainIndex;
use tracing::{debug, info, warn};

/// Speed angle at level max-thrust flight, degrees.
const LEVEL_ANGLE: f32 = 0.0;
/// Speed angle when fully stalled, degrees.
const STALL_ANGLE: f32 = -90.0;
/// Speed-angle gain per second of held throttle, degrees.
const ACCELERATION: f32 = 45.0;
/// Passive speed-angle decay toward the stall, degrees per second.
const RESISTANCE: f32 = 6.0;
/// Forward displacement per second at level flight.
const MAX_SPEED: f32 = 18.0;
/// Strafe and vertical displacement per second.
const STRAFE_SPEED: f32 = 6.0;
/// Pitch/yaw rate at full authority, radians per second.
const TURN_RATE: f32 = 1.2;
/// Sink rate at full stall, world units per second.
const GRAVITY: f32 = 9.8;
/// Ground contact steeper than this speed angle destroys the plane.
const CRASH_LIMIT_ANGLE: f32 = -60.0;
/// Clearance kept between the hull and the terrain surface.
const GROUND_CLEARANCE: f32 = 2.0;
/// Chase distance at a full stall.
const BASE_CAMERA_DISTANCE: f32 = 4.0;
/// Extra chase distance gained as the plane levels out.
const EXTRA_CAMERA_DISTANCE: f32 = 2.0;

/// Where the plane is relative to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    /// Flying above the terrain.
    Airborne,
    /// Resting on the terrain after a survivable touchdown.
    Grounded,
    /// Destroyed by a steep impact; inert until `respawn`.
    Crashed,
}

impl FlightStatus {
    /// Stable label for logs and test records.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Airborne => "airborne",
            FlightStatus::Grounded => "grounded",
            FlightStatus::Crashed => "crashed",
        }
    }
}

/// The player plane: pose, speed state, and per-tick pending offsets.
///
/// `apply_controls` accumulates input into the pending offsets;
/// `update` consumes them against an explicit `dt`. Wall-clock sampling
/// lives entirely in the outer game loop, so the same control script at
/// the same tick rate always replays the same trajectory.
#[derive(Debug, Clone)]
pub struct FlightModel {
    pose: Pose,
    spawn: Pose,
    speed_angle: f32,
    status: FlightStatus,
    pending_position: Vec3,
    pending_rotation: Vec3,
    throttle_up: bool,
    throttle_down: bool,
    sensitivity: f32,
}

impl FlightModel {
    /// Plane spawned at `position` in the canonical level attitude,
    /// fully stalled.
    pub fn new(position: Vec3) -> Self {
        let spawn = Pose::new(position, level_orientation());
        Self {
            pose: spawn,
            spawn,
            speed_angle: STALL_ANGLE,
            status: FlightStatus::Airborne,
            pending_position: Vec3::ZERO,
            pending_rotation: Vec3::ZERO,
            throttle_up: false,
            throttle_down: false,
            sensitivity: 1.0,
        }
    }

    /// Override the offset sensitivity (from user config).
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Snapshot of the plane's pose at this point in the tick.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Current ground-contact status.
    pub fn status(&self) -> FlightStatus {
        self.status
    }

    /// Current speed angle in degrees, always within `[-90, 0]`.
    pub fn speed_angle(&self) -> f32 {
        self.speed_angle
    }

    /// Whether the plane is flying.
    pub fn is_in_air(&self) -> bool {
        self.status == FlightStatus::Airborne
    }

    /// Chase distance for the camera: pulls back as the plane levels out.
    pub fn camera_distance(&self) -> f32 {
        BASE_CAMERA_DISTANCE + EXTRA_CAMERA_DISTANCE * self.speed_angle.to_radians().cos()
    }

    /// Fold one tick's held controls into the pending accumulators.
    ///
    /// Does not touch the pose; `update` consumes what accumulates here.
    pub fn apply_controls(&mut self, controls: &FlightControls) {
        if self.status == FlightStatus::Crashed {
            return;
        }

        self.throttle_up = controls.throttle_up;
        self.throttle_down = controls.throttle_down;

        if controls.strafe_left {
            self.pending_position.x -= 1.0;
        } else if controls.strafe_right {
            self.pending_position.x += 1.0;
        }
        if controls.descend {
            self.pending_position.y -= 1.0;
        } else if controls.ascend {
            self.pending_position.y += 1.0;
        }

        if controls.pitch_up {
            self.pending_rotation.x += 1.0;
        } else if controls.pitch_down {
            self.pending_rotation.x -= 1.0;
        }
        if controls.yaw_left {
            self.pending_rotation.y -= 1.0;
        } else if controls.yaw_right {
            self.pending_rotation.y += 1.0;
        }
    }

    /// Advance the model by `dt` seconds against the given terrain.
    ///
    /// All increments scale by `dt`, so `dt = 0` leaves the model
    /// unchanged rather than stalling the decay terms.
    pub fn update(&mut self, terrain: &TerrainIndex, dt: f32) {
        if self.status == FlightStatus::Crashed {
            self.clear_pending();
            return;
        }

        self.integrate_throttle(dt);

        // Forward thrust couples to attitude: level flight flies fastest,
        // a stalled plane barely moves forward at all.
        let attitude = self.speed_angle.to_radians();
        let offset = Vec3::new(
            self.pending_position.x * STRAFE_SPEED * dt,
            self.pending_position.y * STRAFE_SPEED * dt,
            -attitude.cos() * MAX_SPEED * dt,
        ) * self.sensitivity;

        // Rotate the local offset into world space through the model
        // forward correction, then integrate.
        let world_rotation = self.pose.orientation * forward_axis_correction();
        self.pose.position += world_rotation * offset;

        // Gravity term: zero sink in level flight, full sink at the stall.
        self.pose.position.y += GRAVITY * dt * attitude.sin();

        self.resolve_ground_contact(terrain);

        // Attitude-change authority decays toward the stall; recovery
        // from a full stall is by throttle, not elevator.
        let authority = self.speed_angle.to_radians().cos() * TURN_RATE * dt;
        let increments = self.pending_rotation * authority;
        if increments != Vec3::ZERO {
            let delta = Quat::from_euler(EulerRot::XYZ, increments.x, increments.y, increments.z);
            self.pose.orientation = (self.pose.orientation * delta).normalize();
        }

        self.clear_pending();
    }

    /// Restore the spawn pose after a crash (or at any time).
    pub fn respawn(&mut self) {
        info!(position = ?self.spawn.position, "respawning");
        self.pose = self.spawn;
        self.speed_angle = STALL_ANGLE;
        self.status = FlightStatus::Airborne;
        self.throttle_up = false;
        self.throttle_down = false;
        self.clear_pending();
    }

    fn integrate_throttle(&mut self, dt: f32) {
        if self.throttle_up {
            self.speed_angle = (self.speed_angle + ACCELERATION * dt).min(LEVEL_ANGLE);
        }
        if self.throttle_down {
            self.speed_angle = (self.speed_angle - ACCELERATION * dt).max(STALL_ANGLE);
        }
        // Speed always bleeds toward the stall unless the throttle holds it.
        self.speed_angle = (self.speed_angle - RESISTANCE * dt).max(STALL_ANGLE);
    }

    fn resolve_ground_contact(&mut self, terrain: &TerrainIndex) {
        let Some(height) = terrain.height_at(self.pose.position.x, self.pose.position.z) else {
            // Off the edge of the terrain: nothing to clamp against.
            return;
        };

        let ground = height + GROUND_CLEARANCE;
        if self.pose.position.y > ground {
            if self.status == FlightStatus::Grounded {
                debug!(altitude = self.pose.position.y - ground, "airborne");
                self.status = FlightStatus::Airborne;
            }
            return;
        }

        self.pose.position.y = ground;
        if self.status == FlightStatus::Grounded || self.speed_angle > CRASH_LIMIT_ANGLE {
            if self.status != FlightStatus::Grounded {
                info!(
                    x = self.pose.position.x,
                    z = self.pose.position.z,
                    speed_angle = self.speed_angle,
                    "touched down"
                );
                self.pose.orientation = level_orientation();
                self.speed_angle = STALL_ANGLE;
            }
            self.status = FlightStatus::Grounded;
        } else {
            warn!(
                x = self.pose.position.x,
                z = self.pose.position.z,
                speed_angle = self.speed_angle,
                "impact too steep, plane destroyed"
            );
            self.status = FlightStatus::Crashed;
        }
    }

    fn clear_pending(&mut self) {
        self.pending_position = Vec3::ZERO;
        self.pending_rotation = Vec3::ZERO;
    }
}

/// Canonical level attitude: only the mesh's -90° forward correction.
fn level_orientation() -> Quat {
    Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}
