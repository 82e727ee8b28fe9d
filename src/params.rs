//! Galaxy parameters and their editable ranges.
//!
//! `GalaxyParameters` is a plain value. The control panel owns the mutable
//! copy and hands a snapshot to the scene whenever an edit finishes. The
//! struct serializes to JSON with colors written as `"#rrggbb"` strings.
//!
//! ```ignore
//! let params = GalaxyParameters::load("galaxy.json")?.clamped();
//! scene.apply(SceneCommand::ParametersChanged(params));
//! ```

use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inclusive range and step of an editable numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into the range and snap onto the multiples of `step`.
    ///
    /// Values already on the grid, up to float rounding, come back unchanged.
    pub fn constrain(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let step = self.step as f64;
        let snapped = ((clamped as f64 / step).round() * step) as f32;
        if (snapped - clamped).abs() <= self.step * GRID_TOLERANCE {
            return clamped;
        }
        snapped.clamp(self.min, self.max)
    }
}

/// Fraction of a step within which a value counts as on the grid.
const GRID_TOLERANCE: f32 = 1e-3;

pub const COUNT_RANGE: ParamRange = ParamRange::new(100.0, 100_000.0, 100.0);
pub const SIZE_RANGE: ParamRange = ParamRange::new(0.001, 0.1, 0.001);
pub const RADIUS_RANGE: ParamRange = ParamRange::new(0.001, 20.0, 0.01);
pub const BRANCHES_RANGE: ParamRange = ParamRange::new(2.0, 20.0, 1.0);
pub const SPIN_RANGE: ParamRange = ParamRange::new(-5.0, 5.0, 0.001);
pub const RANDOMNESS_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.001);
pub const RANDOMNESS_POWER_RANGE: ParamRange = ParamRange::new(1.0, 10.0, 0.001);

fn default_count() -> u32 {
    100_000
}
fn default_size() -> f32 {
    0.01
}
fn default_radius() -> f32 {
    5.0
}
fn default_branches() -> u32 {
    3
}
fn default_spin() -> f32 {
    1.0
}
fn default_randomness() -> f32 {
    0.2
}
fn default_randomness_power() -> f32 {
    3.0
}
fn default_inside_color() -> Vec3 {
    rgb8(0xff, 0x60, 0x30)
}
fn default_outside_color() -> Vec3 {
    rgb8(0x1b, 0x39, 0x84)
}

fn rgb8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Everything that shapes a generated galaxy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GalaxyParameters {
    /// Number of points.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Point size in world units (used by the renderer only).
    #[serde(default = "default_size")]
    pub size: f32,
    /// Maximum distance of a point from the center, before noise.
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Number of spiral arms.
    #[serde(default = "default_branches")]
    pub branches: u32,
    /// Angular twist per unit of radius.
    #[serde(default = "default_spin")]
    pub spin: f32,
    /// Maximum per-axis offset.
    #[serde(default = "default_randomness")]
    pub randomness: f32,
    /// Exponent that biases offsets toward zero.
    #[serde(default = "default_randomness_power")]
    pub randomness_power: f32,
    /// Color at the center.
    #[serde(default = "default_inside_color", with = "hex_color")]
    pub inside_color: Vec3,
    /// Color at `radius`.
    #[serde(default = "default_outside_color", with = "hex_color")]
    pub outside_color: Vec3,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: default_count(),
            size: default_size(),
            radius: default_radius(),
            branches: default_branches(),
            spin: default_spin(),
            randomness: default_randomness(),
            randomness_power: default_randomness_power(),
            inside_color: default_inside_color(),
            outside_color: default_outside_color(),
        }
    }
}

impl GalaxyParameters {
    /// Copy constrained to the control panel ranges and step grids.
    ///
    /// Colors are clamped to `[0, 1]` per channel.
    pub fn clamped(&self) -> Self {
        Self {
            count: COUNT_RANGE.constrain(self.count as f32) as u32,
            size: SIZE_RANGE.constrain(self.size),
            radius: RADIUS_RANGE.constrain(self.radius),
            branches: BRANCHES_RANGE.constrain(self.branches as f32) as u32,
            spin: SPIN_RANGE.constrain(self.spin),
            randomness: RANDOMNESS_RANGE.constrain(self.randomness),
            randomness_power: RANDOMNESS_POWER_RANGE.constrain(self.randomness_power),
            inside_color: self.inside_color.clamp(Vec3::ZERO, Vec3::ONE),
            outside_color: self.outside_color.clamp(Vec3::ZERO, Vec3::ONE),
        }
    }

    /// Save the parameters to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}

/// Parse a `#rrggbb` color (leading `#` optional) into linear `[0, 1]` channels.
pub fn parse_hex_color(s: &str) -> Result<Vec3, ConfigError> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    };
    Ok(rgb8(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a color as `#rrggbb`, clamping channels into `[0, 1]`.
pub fn to_hex_color(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}

mod hex_color {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}
