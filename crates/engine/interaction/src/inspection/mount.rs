//! Inspection mount: the pivot a held object is attached to
//!
//! The mount lives in camera-local space, so it travels with the view. Its
//! rest position is remembered for zoom clamping.

use glam::{Quat, Vec2, Vec3};

use crate::camera::{Camera, Pose};

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionMount {
    local: Pose,
    rest_position: Vec3,
}

impl InspectionMount {
    /// Create a mount resting at `rest_offset` in camera-local space
    pub fn new(rest_offset: Vec3) -> Self {
        Self {
            local: Pose::from_position(rest_offset),
            rest_position: rest_offset,
        }
    }

    pub fn local_pose(&self) -> Pose {
        self.local
    }

    /// Current offset from the rest position (grows with zoom)
    pub fn zoom_displacement(&self) -> Vec3 {
        self.local.position - self.rest_position
    }

    pub fn world_pose(&self, camera: &Camera) -> Pose {
        camera.pose().mul_pose(self.local)
    }

    /// Orbit-style rotation about view-relative axes
    ///
    /// `delta_degrees.x` spins about the view's up axis and `delta_degrees.y`
    /// about its right axis, so dragging moves the face nearest the camera
    /// along with the pointer regardless of the world axes.
    pub fn rotate(&mut self, camera: &Camera, delta_degrees: Vec2) {
        let world = self.world_pose(camera);

        let mut view_direction = world.position - camera.position;
        if view_direction.length_squared() < 1e-8 {
            view_direction = camera.forward();
        }

        let view_right = view_direction.cross(camera.up()).normalize_or_zero();
        let view_up = view_right.cross(view_direction).normalize_or_zero();
        if view_right == Vec3::ZERO || view_up == Vec3::ZERO {
            return;
        }

        let horizontal = Quat::from_axis_angle(view_up, delta_degrees.x.to_radians());
        let vertical = Quat::from_axis_angle(view_right, -delta_degrees.y.to_radians());
        let rotation = (horizontal * vertical * world.rotation).normalize();

        self.local.rotation = (camera.rotation.inverse() * rotation).normalize();
    }

    /// Move along the camera forward axis, clamping the offset from rest
    ///
    /// Positive `amount` moves away from the camera. The displacement is
    /// clamped by vector magnitude, so the mount slides along the sphere of
    /// radius `max_radius` rather than stopping dead.
    pub fn zoom(&mut self, amount: f32, max_radius: f32) {
        let moved = self.local.position + Vec3::NEG_Z * amount;
        let displacement = (moved - self.rest_position).clamp_length_max(max_radius.max(0.0));
        self.local.position = self.rest_position + displacement;
    }

    /// Drop accumulated rotation, keeping any zoom offset
    pub fn reset_rotation(&mut self) {
        self.local.rotation = Quat::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 1.7, 0.0))
    }

    #[test]
    fn test_world_pose_follows_camera() {
        let mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        let camera = Camera::from_yaw_pitch(Vec3::new(0.0, 1.7, 0.0), 90.0, 0.0);
        let world = mount.world_pose(&camera);
        assert!((world.position - Vec3::new(1.0, 1.7, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_zoom_moves_along_forward() {
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.zoom(0.5, 10.0);
        assert!((mount.local_pose().position - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-6);
        mount.zoom(-1.0, 10.0);
        assert!((mount.local_pose().position - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_zoom_never_exceeds_radius() {
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        let steps = [3.0, 3.0, 3.0, -20.0, 0.1, 7.5, -0.3, 50.0, -50.0, 2.0];
        for amount in steps {
            mount.zoom(amount, 2.0);
            assert!(mount.zoom_displacement().length() <= 2.0 + 1e-5);
        }
    }

    #[test]
    fn test_zoom_clamps_to_radius() {
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.zoom(100.0, 2.0);
        assert!((mount.zoom_displacement().length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_drag_moves_near_face_right() {
        let camera = camera();
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.rotate(&camera, Vec2::new(90.0, 0.0));

        // The face pointing back at the camera (+Z) swings to +X
        let near_face = mount.world_pose(&camera).rotation * Vec3::Z;
        assert!((near_face - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_vertical_drag_moves_near_face_up() {
        let camera = camera();
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.rotate(&camera, Vec2::new(0.0, 90.0));

        let near_face = mount.world_pose(&camera).rotation * Vec3::Z;
        assert!((near_face - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_rotation_is_view_relative() {
        // Same drag with the camera turned: near face still follows the pointer
        let camera = Camera::from_yaw_pitch(Vec3::new(0.0, 1.7, 0.0), 90.0, 0.0);
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.rotate(&camera, Vec2::new(90.0, 0.0));

        let near_face = mount.world_pose(&camera).rotation * Vec3::Z;
        assert!((near_face - camera.right()).length() < 1e-5);
    }

    #[test]
    fn test_reset_rotation_keeps_zoom() {
        let camera = camera();
        let mut mount = InspectionMount::new(Vec3::new(0.0, 0.0, -1.0));
        mount.rotate(&camera, Vec2::new(30.0, 10.0));
        mount.zoom(0.4, 10.0);
        mount.reset_rotation();

        assert_eq!(mount.local_pose().rotation, Quat::IDENTITY);
        assert!((mount.zoom_displacement().length() - 0.4).abs() < 1e-6);
    }
}
