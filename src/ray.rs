//! Half-line rays for picking.

use glam::Vec3;

/// A ray starting at `origin` heading along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is normalized; a zero direction falls back to -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Squared distance from `point` to the closest point on the ray.
    ///
    /// Points behind the origin measure to the origin itself.
    pub fn distance_sq_to_point(&self, point: Vec3) -> f32 {
        let t = (point - self.origin).dot(self.direction);
        if t < 0.0 {
            return self.origin.distance_squared(point);
        }
        self.at(t).distance_squared(point)
    }

    /// Distance from `point` to the closest point on the ray.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.distance_sq_to_point(point).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(Ray::new(Vec3::ZERO, Vec3::ZERO).direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_perpendicular_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!((ray.distance_to_point(Vec3::new(5.0, 3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert!(ray.distance_to_point(Vec3::new(2.0, 0.0, 0.0)).abs() < 1e-6);
    }

    #[test]
    fn test_point_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let d = ray.distance_to_point(Vec3::new(-3.0, 4.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
