#![warn(missing_docs)]
//! Chase camera: a deterministic follow transform plus projection state.

use glam::{Mat4, Quat, Vec3};
use terraflight_core::{forward_axis_correction, Pose};

/// Default upward tilt of the trailing offset.
const DEFAULT_TILT_DEGREES: f32 = 20.0;

/// Third-person chase camera.
///
/// `follow` derives the full camera pose from the tracked entity's pose
/// every call; there is no smoothing state, so identical inputs always
/// produce identical output.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    /// Camera position in world space.
    pub position: Vec3,
    /// View rotation: world space into camera space.
    pub orientation: Quat,
    /// Upward tilt of the trailing offset, radians.
    pub tilt: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl ChaseCamera {
    /// Create a camera with the given aspect ratio and default tilt.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            tilt: DEFAULT_TILT_DEGREES.to_radians(),
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Recompute the camera pose from the tracked plane's pose.
    ///
    /// The trailing offset `(0, sin(tilt)·d, cos(tilt)·d)` lives in the
    /// plane's own (corrected) frame: the camera sits a fixed distance
    /// behind and above the plane and looks back along its forward axis.
    pub fn follow(&mut self, target: &Pose, distance: f32) {
        let corrected = (target.orientation * forward_axis_correction()).normalize();
        self.orientation = corrected.conjugate();
        let trail = Vec3::new(0.0, self.tilt.sin() * distance, self.tilt.cos() * distance);
        self.position = target.position + corrected * trail;
    }

    /// Snapshot of the camera's pose.
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            orientation: self.orientation,
        }
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation) * Mat4::from_translation(-self.position)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio (call when the window resizes).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_pose(position: Vec3) -> Pose {
        // The plane model's canonical level attitude.
        Pose::new(position, Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
    }

    #[test]
    fn follow_is_deterministic() {
        let pose = Pose::new(
            Vec3::new(12.0, 34.0, -5.0),
            Quat::from_euler(glam::EulerRot::XYZ, 0.3, 1.1, -0.4),
        );
        let mut a = ChaseCamera::new(16.0 / 9.0);
        let mut b = ChaseCamera::new(16.0 / 9.0);
        a.follow(&pose, 5.0);
        b.follow(&pose, 5.0);
        assert_eq!(a.position, b.position);
        assert_eq!(a.orientation, b.orientation);

        // Calling again with the same inputs does not drift.
        a.follow(&pose, 5.0);
        assert_eq!(a.position, b.position);
        assert_eq!(a.orientation, b.orientation);
    }

    #[test]
    fn camera_trails_behind_and_above_a_level_plane() {
        let plane = level_pose(Vec3::new(0.0, 10.0, 0.0));
        let mut camera = ChaseCamera::new(16.0 / 9.0);
        camera.follow(&plane, 4.0);

        // Level plane flies toward -Z: the camera sits at +Z and above.
        assert!(camera.position.z > plane.position.z + 1.0);
        assert!(camera.position.y > plane.position.y + 0.5);
        assert!(camera.position.x.abs() < 1e-4);
    }

    #[test]
    fn camera_looks_at_the_plane() {
        let plane = level_pose(Vec3::new(3.0, 25.0, -14.0));
        let mut camera = ChaseCamera::new(16.0 / 9.0);
        camera.follow(&plane, 6.0);

        // The plane lands in front of the camera (negative view-space z).
        let in_view = camera.view_matrix().transform_point3(plane.position);
        assert!(in_view.z < 0.0, "plane behind camera: {in_view}");
    }

    #[test]
    fn follow_distance_is_respected() {
        let plane = level_pose(Vec3::new(0.0, 50.0, 0.0));
        let mut camera = ChaseCamera::new(16.0 / 9.0);
        for distance in [2.0, 4.0, 8.0] {
            camera.follow(&plane, distance);
            let actual = (camera.position - plane.position).length();
            assert!(
                (actual - distance).abs() < 1e-4,
                "distance {distance} gave {actual}"
            );
        }
    }

    #[test]
    fn offset_turns_with_the_plane() {
        // Yaw the plane 90° left; the camera offset follows it around.
        let yawed = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)
            * Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        let plane = Pose::new(Vec3::new(0.0, 10.0, 0.0), yawed);
        let mut camera = ChaseCamera::new(16.0 / 9.0);
        camera.follow(&plane, 4.0);
        // Forward is now -X, so the camera trails at +X.
        assert!(camera.position.x > 1.0, "camera at {}", camera.position);
        assert!(camera.position.z.abs() < 1e-3);
    }

    #[test]
    fn matrices_are_finite_and_invertible() {
        let plane = level_pose(Vec3::new(8.0, 40.0, 3.0));
        let mut camera = ChaseCamera::new(16.0 / 9.0);
        camera.follow(&plane, 5.0);

        let vp = camera.view_projection_matrix();
        assert!(vp.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(camera.view_matrix().determinant().abs() > 1e-6);
    }
}
