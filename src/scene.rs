//! The scene: the single live point cloud and the commands that change it.
//!
//! Commands are applied one at a time, to completion, in the order they
//! arrive. The renderer only ever reads the cloud between commands.

use crate::generator;
use crate::highlight::{self, Highlight};
use crate::params::GalaxyParameters;
use crate::point_cloud::PointCloud;
use crate::random::{RandomSource, RngSource};
use crate::ray::Ray;
use rand::rngs::SmallRng;
use std::time::Instant;

/// A change requested by the UI or by pointer input.
#[derive(Debug, Clone)]
pub enum SceneCommand {
    /// A control finished editing. Carries the full parameter snapshot.
    ParametersChanged(GalaxyParameters),
    /// A click cast `ray`; recolor the nearest point and `neighbors` more.
    Highlight { ray: Ray, neighbors: usize },
    /// Drop the current cloud.
    Clear,
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A new cloud replaced the old one.
    Regenerated { generation: u64, count: usize },
    /// Points were recolored.
    Highlighted(Highlight),
    /// The cloud was dropped.
    Cleared,
    /// Nothing changed (e.g. a click with no points).
    Unchanged,
}

/// Owner of the visible point cloud.
pub struct Scene<R: RandomSource = RngSource<SmallRng>> {
    cloud: Option<PointCloud>,
    generation: u64,
    rng: R,
}

impl Scene {
    /// Scene with an RNG seeded from the clock.
    pub fn with_entropy() -> Self {
        Self::new(RngSource::from_entropy())
    }
}

impl<R: RandomSource> Scene<R> {
    /// Empty scene drawing randomness from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            cloud: None,
            generation: 0,
            rng,
        }
    }

    /// Replace the cloud with a freshly generated one.
    ///
    /// The old cloud is dropped before the new one is allocated, so two full
    /// clouds never coexist.
    pub fn regenerate(&mut self, params: &GalaxyParameters) -> &PointCloud {
        self.cloud = None;

        let start = Instant::now();
        let cloud = generator::generate(params, &mut self.rng);
        self.generation += 1;
        log::debug!(
            "generation {}: {} points in {:.1} ms",
            self.generation,
            cloud.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        self.cloud.insert(cloud)
    }

    /// Apply one command to completion.
    pub fn apply(&mut self, command: SceneCommand) -> SceneEvent {
        match command {
            SceneCommand::ParametersChanged(params) => {
                let count = self.regenerate(&params).len();
                SceneEvent::Regenerated {
                    generation: self.generation,
                    count,
                }
            }
            SceneCommand::Highlight { ray, neighbors } => {
                let Some(cloud) = self.cloud.as_mut() else {
                    return SceneEvent::Unchanged;
                };
                match highlight::highlight_along(&ray, neighbors, cloud, &mut self.rng) {
                    Some(h) => SceneEvent::Highlighted(h),
                    None => SceneEvent::Unchanged,
                }
            }
            SceneCommand::Clear => {
                if self.cloud.take().is_some() {
                    SceneEvent::Cleared
                } else {
                    SceneEvent::Unchanged
                }
            }
        }
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn cloud_mut(&mut self) -> Option<&mut PointCloud> {
        self.cloud.as_mut()
    }

    /// Number of clouds generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;
    use glam::Vec3;

    fn params(count: u32) -> GalaxyParameters {
        GalaxyParameters {
            count,
            ..Default::default()
        }
    }

    #[test]
    fn test_regenerate_replaces_cloud() {
        let mut scene = Scene::new(RngSource::seeded(3));
        scene.regenerate(&params(200));
        scene.regenerate(&params(50));
        assert_eq!(scene.cloud().map(PointCloud::len), Some(50));
        assert_eq!(scene.generation(), 2);
    }

    #[test]
    fn test_parameters_changed_event() {
        let mut scene = Scene::new(RngSource::seeded(3));
        let event = scene.apply(SceneCommand::ParametersChanged(params(100)));
        assert_eq!(event, SceneEvent::Regenerated { generation: 1, count: 100 });
    }

    #[test]
    fn test_highlight_without_cloud() {
        let mut scene = Scene::new(SequenceSource::new(vec![0.5]));
        let event = scene.apply(SceneCommand::Highlight {
            ray: Ray::new(Vec3::ZERO, Vec3::X),
            neighbors: 4,
        });
        assert_eq!(event, SceneEvent::Unchanged);
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new(RngSource::seeded(3));
        scene.regenerate(&params(100));
        assert_eq!(scene.apply(SceneCommand::Clear), SceneEvent::Cleared);
        assert!(scene.cloud().is_none());
        assert_eq!(scene.apply(SceneCommand::Clear), SceneEvent::Unchanged);
    }

    #[test]
    fn test_highlight_marks_colors_dirty() {
        let mut scene = Scene::new(RngSource::seeded(9));
        scene.regenerate(&params(100));
        let event = scene.apply(SceneCommand::Highlight {
            ray: Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y),
            neighbors: 5,
        });
        match event {
            SceneEvent::Highlighted(h) => assert_eq!(h.neighbors.len(), 5),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(scene.cloud().is_some_and(PointCloud::colors_dirty));
    }
}
