//! Perspective orbit camera with damped controls.
//!
//! Dragging accumulates pending rotation or pan; `update` applies a fraction
//! of it every frame so the view eases to a stop.

use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;
/// Fraction of pending rotation applied per update.
pub const DAMPING: f32 = 0.05;

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const ZOOM_BASE: f32 = 0.95;

/// Orbit camera for viewing the galaxy.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Viewport width / height.
    pub aspect: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
}

impl Camera {
    /// Camera at (3, 3, 3) looking at the origin.
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            target: Vec3::ZERO,
            aspect,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
        };
        camera.look_from(Vec3::splat(3.0));
        camera
    }

    /// Place the camera at `eye`, keeping the current target.
    pub fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = offset.x.atan2(offset.z);
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, NEAR, FAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio. Zero-sized viewports are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Queue rotation from a pointer drag of `(dx, dy)` pixels.
    ///
    /// A drag across the full viewport height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_yaw -= TAU * dx / h;
        self.pending_pitch += TAU * dy / h;
    }

    /// Queue a pan from a pointer drag of `(dx, dy)` pixels.
    ///
    /// The target follows the cursor: a drag moves the scene under it by the
    /// same amount at the target's depth.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let world_per_pixel = 2.0 * self.distance * (FOV_Y_DEGREES.to_radians() * 0.5).tan() / h;
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.pending_pan += (up * dy - right * dx) * world_per_pixel;
    }

    /// Zoom by wheel `scroll` lines. Positive moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * ZOOM_BASE.powf(scroll)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply part of the pending rotation and pan. Call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.pending_yaw *= 1.0 - DAMPING;
        self.pending_pitch *= 1.0 - DAMPING;
        self.target += self.pending_pan * DAMPING;
        self.pending_pan *= 1.0 - DAMPING;
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let far = inv * glam::Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.xyz() / far.w;
        let origin = self.position();
        Ray::new(origin, far - origin)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let camera = Camera::new(1.5);
        let p = camera.position();
        assert!((p - Vec3::splat(3.0)).length() < 1e-4, "{p:?}");
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = Camera::new(1.5);
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!(ray.distance_to_point(camera.target) < 1e-3);
        let expected = (camera.target - camera.position()).normalize();
        assert!(ray.direction.dot(expected) > 0.9999);
    }

    #[test]
    fn test_right_edge_ray_leans_right() {
        let camera = Camera::new(1.0);
        let center = camera.ray_from_ndc(Vec2::ZERO);
        let right = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
        let screen_right = center.direction.cross(Vec3::Y).normalize();
        assert!(right.direction.dot(screen_right) > 0.0);
    }

    #[test]
    fn test_set_aspect_ignores_zero() {
        let mut camera = Camera::new(2.0);
        camera.set_aspect(0, 100);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(400, 800);
        assert_eq!(camera.aspect, 0.5);
    }

    #[test]
    fn test_damping_converges() {
        let mut camera = Camera::new(1.0);
        let start = camera.yaw;
        camera.rotate(-100.0, 0.0, 1000.0);
        for _ in 0..500 {
            camera.update();
        }
        let turned = camera.yaw - start;
        assert!((turned - TAU * 0.1).abs() < 1e-3, "turned {turned}");
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(1.0);
        camera.rotate(0.0, 1e6, 100.0);
        for _ in 0..100 {
            camera.update();
        }
        assert!(camera.pitch <= PITCH_LIMIT);
    }

    #[test]
    fn test_pan_moves_target_sideways() {
        let mut camera = Camera::new(1.0);
        let start = camera.position();
        // Drag left: the scene follows the cursor, so the target moves right
        camera.pan(-100.0, 0.0, 720.0);
        for _ in 0..500 {
            camera.update();
        }
        let screen_right = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!(camera.target.dot(screen_right) > 0.1, "target {:?}", camera.target);
        assert!(camera.target.y.abs() < 1e-4);
        // Orbit shape is unchanged, only shifted
        let shift = camera.position() - start;
        assert!((shift - camera.target).length() < 1e-3);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::new(1.0);
        let before = camera.distance;
        camera.zoom(1.0);
        assert!(camera.distance < before);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }
}
