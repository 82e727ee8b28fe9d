//! Nearest-neighbor highlighting.
//!
//! A click picks the point closest to the ray under the cursor (the anchor),
//! then the `k` points closest to the anchor, and paints them all one random
//! color. Recoloring is permanent; a later highlight simply overwrites shared
//! points.
//!
//! Both passes are linear scans over the cloud. The neighbor pass sorts every
//! other point by distance, so it costs O(n log n) and dominates at large
//! counts.

use crate::camera::Camera;
use crate::point_cloud::PointCloud;
use crate::random::RandomSource;
use crate::ray::Ray;
use glam::{Vec2, Vec3};

/// Cursor position in window pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Output surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Window scale factor reported by the platform.
    pub scale_factor: f32,
}

/// Largest pixel ratio the renderer will use.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Render pixel density, capped at [`MAX_PIXEL_RATIO`].
    pub fn pixel_ratio(&self) -> f32 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Convert a screen point to normalized device coordinates.
    ///
    /// Y flips so that up is positive. A zero-sized viewport maps to the center.
    pub fn to_ndc(&self, point: ScreenPoint) -> Vec2 {
        if self.width == 0 || self.height == 0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (point.x / self.width as f32) * 2.0 - 1.0,
            -(point.y / self.height as f32) * 2.0 + 1.0,
        )
    }
}

/// Everything a click needs to highlight points.
#[derive(Debug, Clone, Copy)]
pub struct HighlightRequest<'a> {
    pub point: ScreenPoint,
    pub viewport: Viewport,
    pub camera: &'a Camera,
    /// Number of neighbors to recolor besides the anchor.
    pub neighbors: usize,
}

impl HighlightRequest<'_> {
    /// Picking ray from the camera through the clicked point.
    pub fn ray(&self) -> Ray {
        self.camera.ray_from_ndc(self.viewport.to_ndc(self.point))
    }
}

/// Result of a highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Point closest to the click ray.
    pub anchor: usize,
    /// Neighbors of the anchor, nearest first.
    pub neighbors: Vec<usize>,
    /// Color applied to the anchor and all neighbors.
    pub color: Vec3,
}

impl Highlight {
    /// All recolored indices, anchor first.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.anchor).chain(self.neighbors.iter().copied())
    }
}

/// Index of the point closest to `ray`. First index wins ties.
pub fn find_anchor(cloud: &PointCloud, ray: &Ray) -> Option<usize> {
    let mut closest = None;
    let mut min_distance = f32::INFINITY;

    for (i, &position) in cloud.positions().iter().enumerate() {
        let distance = ray.distance_sq_to_point(position);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(i);
        }
    }

    closest
}

/// The `k` points nearest to `anchor`, nearest first, excluding the anchor.
///
/// Returns fewer when the cloud has fewer than `k + 1` points. Equal
/// distances keep index order.
pub fn nearest_neighbors(cloud: &PointCloud, anchor: usize, k: usize) -> Vec<usize> {
    let Some(center) = cloud.position(anchor) else {
        return Vec::new();
    };

    let mut distances: Vec<(usize, f32)> = cloud
        .positions()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != anchor)
        .map(|(i, p)| (i, p.distance(center)))
        .collect();

    distances.sort_by(|a, b| a.1.total_cmp(&b.1));
    distances.truncate(k);
    distances.into_iter().map(|(i, _)| i).collect()
}

/// Random color, each channel uniform in `[0, 1)`.
pub fn random_color(rng: &mut impl RandomSource) -> Vec3 {
    let r = rng.next_f32();
    let g = rng.next_f32();
    let b = rng.next_f32();
    Vec3::new(r, g, b)
}

/// Highlight around the point nearest `ray`.
///
/// Does nothing and returns `None` for an empty cloud.
pub fn highlight_along(
    ray: &Ray,
    neighbors: usize,
    cloud: &mut PointCloud,
    rng: &mut impl RandomSource,
) -> Option<Highlight> {
    let anchor = find_anchor(cloud, ray)?;
    let color = random_color(rng);
    let neighbors = nearest_neighbors(cloud, anchor, neighbors);

    cloud.set_color(anchor, color);
    for &i in &neighbors {
        cloud.set_color(i, color);
    }

    log::debug!(
        "highlighted anchor {} with {} neighbors, color {:?}",
        anchor,
        neighbors.len(),
        color
    );

    Some(Highlight {
        anchor,
        neighbors,
        color,
    })
}

/// Highlight around the point under a click.
pub fn highlight(
    request: &HighlightRequest<'_>,
    cloud: &mut PointCloud,
    rng: &mut impl RandomSource,
) -> Option<Highlight> {
    highlight_along(&request.ray(), request.neighbors, cloud, rng)
}

/// Parse the neighbor count typed into the "diameter" field.
///
/// Blank, non-numeric and negative input give 0. Fractions truncate and huge
/// values saturate, so the count never fails to parse.
pub fn parse_neighbor_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_nan() || value <= 0.0 => 0,
        // `as` saturates at usize::MAX
        Ok(value) => value.trunc() as usize,
        Err(_) => 0,
    }
}
