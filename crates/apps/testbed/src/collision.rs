//! Collision primitives for the reference scene
//!
//! Boxes are stored in object-local space and queried through the object's
//! pose, so rotated props still get exact ray hits.

use glam::{Quat, Vec3};

/// Axis-Aligned Bounding Box using glam types
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin
    pub fn from_half_extents(half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: -half,
            max: half,
        }
    }

    /// Transform local AABB to world space given position and rotation
    ///
    /// Computes a tight AABB around the rotated box (OBB → AABB), so the
    /// result may be larger than the original.
    pub fn to_world(&self, position: Vec3, rotation: Quat) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut world_min = Vec3::splat(f32::MAX);
        let mut world_max = Vec3::splat(f32::MIN);
        for corner in corners {
            let world_corner = position + rotation * corner;
            world_min = world_min.min(world_corner);
            world_max = world_max.max(world_corner);
        }

        Self {
            min: world_min,
            max: world_max,
        }
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Sphere overlap, touching counts
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    /// Slab test: distance along `direction` to the first surface hit
    ///
    /// `direction` need not be normalized; the returned distance is in units
    /// of `direction`. A ray starting inside the box hits at 0.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between the planes
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_to_world_translation() {
        let local = Aabb::from_half_extents(Vec3::splat(0.5));
        let world = local.to_world(Vec3::new(10.0, 20.0, 30.0), Quat::IDENTITY);

        assert_eq!(world.min, Vec3::new(9.5, 19.5, 29.5));
        assert_eq!(world.max, Vec3::new(10.5, 20.5, 30.5));
    }

    #[test]
    fn test_to_world_rotation_45_degrees() {
        let local = Aabb::from_half_extents(Vec3::splat(0.5));
        let world = local.to_world(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_4));

        assert!((world.max.y - 0.5).abs() < 0.001);
        assert!((world.max.x - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.001);
    }

    #[test]
    fn test_ray_hits_front_face() {
        let aabb = Aabb::from_half_extents(Vec3::splat(0.5));
        let t = aabb.ray_intersection(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z).unwrap();
        assert!((t - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_ray_misses() {
        let aabb = Aabb::from_half_extents(Vec3::splat(0.5));
        assert!(aabb.ray_intersection(Vec3::new(2.0, 0.0, 3.0), Vec3::NEG_Z).is_none());
        // Pointing away
        assert!(aabb.ray_intersection(Vec3::new(0.0, 0.0, 3.0), Vec3::Z).is_none());
    }

    #[test]
    fn test_ray_from_inside() {
        let aabb = Aabb::from_half_extents(Vec3::splat(0.5));
        assert_eq!(aabb.ray_intersection(Vec3::ZERO, Vec3::X), Some(0.0));
    }

    #[test]
    fn test_sphere_overlap() {
        let aabb = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        assert!(aabb.intersects_sphere(Vec3::new(0.0, 0.3, 0.0), 0.5));
        assert!(!aabb.intersects_sphere(Vec3::new(0.0, 0.6, 0.0), 0.5));
    }
}
