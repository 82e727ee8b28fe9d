//! Spiral galaxy generator.
//!
//! Each point gets a radius drawn linearly in `[0, radius)`, is assigned to an
//! arm by its index, is twisted by `radius * spin`, and is pushed off the arm
//! by a per-axis offset biased toward zero by `randomness_power`. The galaxy is
//! flat: Y only carries the offset.
//!
//! Radii are linear rather than area-uniform, which packs the core densely.
//! That density is the look of the galaxy and must be kept.
//!
//! Random draws per point, in order: radius, then for X, Y and Z a magnitude
//! followed by a sign.

use crate::params::GalaxyParameters;
use crate::point_cloud::PointCloud;
use crate::random::RandomSource;
use glam::Vec3;
use std::f32::consts::TAU;

/// Generate a galaxy point cloud.
///
/// Returns exactly `params.count` points. Colors are interpolated from
/// `inside_color` to `outside_color` by the pre-noise radius.
pub fn generate(params: &GalaxyParameters, rng: &mut impl RandomSource) -> PointCloud {
    let count = params.count as usize;
    let branches = params.branches.max(1);
    let mut cloud = PointCloud::with_capacity(count);

    for i in 0..count {
        let r = rng.next_f32() * params.radius;
        let spin_angle = r * params.spin;
        let branch_angle = (i as u32 % branches) as f32 / branches as f32 * TAU;

        let offset = Vec3::new(
            random_offset(params, rng),
            random_offset(params, rng),
            random_offset(params, rng),
        );

        let angle = branch_angle + spin_angle;
        let position = Vec3::new(angle.cos() * r, 0.0, angle.sin() * r) + offset;

        let t = if params.radius > 0.0 { r / params.radius } else { 0.0 };
        let color = params.inside_color.lerp(params.outside_color, t);

        cloud.push(position, color);
    }

    cloud
}

/// Signed offset along one axis: `u^power * randomness`, negated half the time.
#[inline]
fn random_offset(params: &GalaxyParameters, rng: &mut impl RandomSource) -> f32 {
    let magnitude = rng.next_f32().powf(params.randomness_power) * params.randomness;
    if rng.next_f32() < 0.5 {
        magnitude
    } else {
        -magnitude
    }
}
