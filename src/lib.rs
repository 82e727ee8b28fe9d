//! # Galaxy
//!
//! Procedural spiral galaxy point clouds with click-to-highlight neighbors.
//!
//! The library half is plain CPU code and runs headless: generate a cloud,
//! cast a ray at it, recolor the nearest point and its neighbors. The viewer
//! half (wgpu renderer, egui panel, winit shell) is behind [`run`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! let params = GalaxyParameters::default();
//! let mut rng = RngSource::seeded(42);
//! let mut cloud = generate(&params, &mut rng);
//!
//! let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
//! if let Some(h) = highlight_along(&ray, 20, &mut cloud, &mut rng) {
//!     println!("anchor {} and {} neighbors", h.anchor, h.neighbors.len());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Generation
//!
//! [`generate`] places `count` points on `branches` spiral arms. Each point
//! takes seven draws from its [`RandomSource`], so a [`SequenceSource`]
//! reproduces a cloud exactly.
//!
//! ### Highlighting
//!
//! A click becomes a [`Ray`] through the camera. The point nearest the ray is
//! the anchor; it and its K nearest neighbors get one random color.
//!
//! ### Scene
//!
//! [`Scene`] owns the single live cloud and applies [`SceneCommand`]s one at
//! a time.

pub mod app;
pub mod camera;
pub mod error;
pub mod generator;
mod gpu;
pub mod highlight;
pub mod input;
pub mod params;
pub mod point_cloud;
pub mod random;
pub mod ray;
pub mod scene;
pub mod ui;

pub use app::run;
pub use camera::Camera;
pub use error::{AppError, ConfigError, GpuError};
pub use generator::generate;
pub use glam::{Vec2, Vec3};
pub use highlight::{
    highlight, highlight_along, parse_neighbor_count, Highlight, HighlightRequest, ScreenPoint,
    Viewport,
};
pub use params::GalaxyParameters;
pub use point_cloud::PointCloud;
pub use random::{RandomSource, RngSource, SequenceSource};
pub use ray::Ray;
pub use scene::{Scene, SceneCommand, SceneEvent};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::generator::generate;
    pub use crate::highlight::{
        highlight, highlight_along, parse_neighbor_count, Highlight, HighlightRequest,
        ScreenPoint, Viewport,
    };
    pub use crate::params::GalaxyParameters;
    pub use crate::point_cloud::PointCloud;
    pub use crate::random::{RandomSource, RngSource, SequenceSource};
    pub use crate::ray::Ray;
    pub use crate::scene::{Scene, SceneCommand, SceneEvent};
    pub use crate::{Vec2, Vec3};
}
