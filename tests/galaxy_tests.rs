//! Integration tests for galaxy generation, the scene and parameter files.

use galaxy::params::{parse_hex_color, to_hex_color};
use galaxy::prelude::*;
use galaxy::ConfigError;

const EPS: f32 = 1e-5;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPS
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("galaxy-test-{}-{}.json", name, std::process::id()))
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generates_exact_count() {
    for count in [0, 1, 100, 12_345] {
        let params = GalaxyParameters {
            count,
            ..Default::default()
        };
        let cloud = generate(&params, &mut RngSource::seeded(7));
        assert_eq!(cloud.len(), count as usize);
        assert_eq!(cloud.colors().len(), count as usize);
    }
}

#[test]
fn test_colors_stay_in_unit_range() {
    let params = GalaxyParameters {
        count: 5_000,
        ..Default::default()
    };
    let cloud = generate(&params, &mut RngSource::seeded(11));
    for c in cloud.colors() {
        assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0, "color {c:?}");
    }
}

#[test]
fn test_points_stay_near_disc() {
    let params = GalaxyParameters {
        count: 5_000,
        radius: 3.0,
        randomness: 0.4,
        ..Default::default()
    };
    let cloud = generate(&params, &mut RngSource::seeded(5));
    let bound = params.radius + params.randomness * 3.0_f32.sqrt() + EPS;
    for p in cloud.positions() {
        assert!(p.length() <= bound, "point {p:?} outside {bound}");
        assert!(p.y.abs() <= params.randomness + EPS);
    }
}

#[test]
fn test_center_points_take_inside_color() {
    let params = GalaxyParameters {
        count: 10,
        ..Default::default()
    };
    // Every draw is zero: radius 0, zero offsets
    let cloud = generate(&params, &mut SequenceSource::new(vec![0.0]));
    for (p, c) in cloud.positions().iter().zip(cloud.colors()) {
        assert!(approx(*p, Vec3::ZERO));
        assert!(approx(*c, params.inside_color));
    }
}

#[test]
fn test_rim_points_approach_outside_color() {
    let params = GalaxyParameters {
        count: 10,
        ..Default::default()
    };
    let cloud = generate(&params, &mut SequenceSource::new(vec![0.999]));
    for c in cloud.colors() {
        assert!((*c - params.outside_color).abs().max_element() < 0.01);
    }
}

#[test]
fn test_golden_sequence() {
    let params = GalaxyParameters {
        count: 2,
        radius: 4.0,
        branches: 2,
        spin: 0.0,
        randomness: 1.0,
        randomness_power: 1.0,
        inside_color: Vec3::new(1.0, 0.0, 0.0),
        outside_color: Vec3::new(0.0, 0.0, 1.0),
        ..Default::default()
    };
    // r, then magnitude/sign for X, Y, Z
    let mut rng = SequenceSource::new(vec![0.5, 0.5, 0.25, 0.5, 0.75, 0.0, 0.9]);
    let cloud = generate(&params, &mut rng);
    assert_eq!(rng.draws(), 14);

    // First arm at angle 0, r = 2, offsets (+0.5, -0.5, 0)
    assert!(approx(cloud.positions()[0], Vec3::new(2.5, -0.5, 0.0)));
    // Second arm at angle π
    assert!(approx(cloud.positions()[1], Vec3::new(-1.5, -0.5, 0.0)));

    for c in cloud.colors() {
        assert!(approx(*c, Vec3::new(0.5, 0.0, 0.5)));
    }
}

#[test]
fn test_same_seed_same_cloud() {
    let params = GalaxyParameters {
        count: 1_000,
        ..Default::default()
    };
    let a = generate(&params, &mut RngSource::seeded(99));
    let b = generate(&params, &mut RngSource::seeded(99));
    assert_eq!(a, b);
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_regeneration_keeps_only_latest_cloud() {
    let mut scene = Scene::new(RngSource::seeded(1));
    let first = GalaxyParameters {
        count: 1_000,
        ..Default::default()
    };
    let second = GalaxyParameters {
        count: 10,
        radius: 1.0,
        ..Default::default()
    };

    scene.apply(SceneCommand::ParametersChanged(first));
    let event = scene.apply(SceneCommand::ParametersChanged(second));

    assert_eq!(event, SceneEvent::Regenerated { generation: 2, count: 10 });
    let cloud = scene.cloud().expect("cloud after regeneration");
    assert_eq!(cloud.len(), 10);
    assert!(!cloud.colors_dirty());
}

#[test]
fn test_highlight_then_regenerate_resets_colors() {
    let params = GalaxyParameters {
        count: 500,
        ..Default::default()
    };
    let mut scene = Scene::new(RngSource::seeded(4));
    scene.regenerate(&params);
    scene.apply(SceneCommand::Highlight {
        ray: Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y),
        neighbors: 499,
    });

    let fresh = scene.regenerate(&params);
    assert!(!fresh.colors_dirty());

    // Every fresh color lies on the inside-outside gradient
    let (inside, outside) = (params.inside_color, params.outside_color);
    for c in fresh.colors() {
        let t = (inside.x - c.x) / (inside.x - outside.x);
        assert!((*c - inside.lerp(outside, t)).abs().max_element() < 1e-4, "color {c:?}");
    }
}

// ============================================================================
// Parameter files
// ============================================================================

#[test]
fn test_params_file_round_trip() {
    let path = temp_path("round-trip");
    let params = GalaxyParameters {
        count: 4_200,
        size: 0.02,
        radius: 7.5,
        branches: 5,
        spin: -2.25,
        randomness: 0.5,
        randomness_power: 4.0,
        inside_color: parse_hex_color("#102030").unwrap(),
        outside_color: parse_hex_color("#abcdef").unwrap(),
    };

    params.save(&path).unwrap();
    let loaded = GalaxyParameters::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, params);
}

#[test]
fn test_params_file_missing_fields_default() {
    let path = temp_path("partial");
    std::fs::write(&path, r##"{ "count": 500, "inside_color": "#ff0000" }"##).unwrap();
    let loaded = GalaxyParameters::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.count, 500);
    assert_eq!(loaded.inside_color, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(loaded.radius, GalaxyParameters::default().radius);
    assert_eq!(to_hex_color(loaded.outside_color), "#1b3984");
}

#[test]
fn test_params_file_bad_color() {
    let path = temp_path("bad-color");
    std::fs::write(&path, r##"{ "outside_color": "blue" }"##).unwrap();
    let result = GalaxyParameters::load(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_params_file_missing() {
    let result = GalaxyParameters::load(temp_path("does-not-exist"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
