//! Configuration types for loading particle field scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]        – dimension, boundary policy, rotation axes
//! - [`ParametersConfig`]    – counts, damping, thresholds, projection constants
//! - [`SeedingConfig`]       – initial point distribution
//! - [`InteractionConfig`]   – optional pointer force field
//! - [`StyleConfig`]         – dot and line appearance
//! - [`ShootingStarsConfig`] – optional transient overlay
//! - [`WindowConfig`]        – viewer window
//! - [`ScenarioConfig`]      – top-level wrapper
//!
//! Every field has a default, so a scenario file only lists what it changes.
//!
//! # YAML format
//! A magnetic starfield:
//!
//! ```yaml
//! engine:
//!   dimension: flat         # flat -> 2D, volume -> 3D
//!   boundary: wrap          # wrap | bounce | elastic
//!
//! parameters:
//!   count: 150
//!   mobile_count: 75        # used below mobile_breakpoint px
//!   drift: 0.2
//!   damping: 0.98
//!   max_velocity: 2.0
//!   seed: 42
//!
//! interaction:
//!   polarity: attract
//!   strength: 0.02
//!   max_distance: 200.0
//!   falloff: magnetic
//!   min_distance: 30.0
//!   capture: 0.3
//!
//! style:
//!   node_radius: [0.5, 1.5]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// 2D screen field or projected 3D field
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DimensionConfig {
    #[default]
    Flat,
    Volume,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryConfig {
    #[default]
    Wrap,
    Bounce,
    Elastic,
}

/// How the 3D field turns
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RotationConfig {
    #[default]
    Y, // around Y only
    YTilt, // Y, plus an X tilt following the pointer
    YSpin, // Y and X both advance every frame
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub dimension: DimensionConfig,
    pub boundary: BoundaryConfig,
    pub restitution: f64, // elastic only: fraction of speed kept after recall
    pub rotation: RotationConfig,
    pub tilt: f64, // y_tilt: radians per unit of normalized pointer offset
    pub spin_ratio: f64, // y_spin: X speed relative to Y speed
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimension: DimensionConfig::Flat,
            boundary: BoundaryConfig::Wrap,
            restitution: 0.5,
            rotation: RotationConfig::Y,
            tilt: 0.3,
            spin_ratio: 0.7,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub count: usize,
    pub mobile_count: Option<usize>,
    pub mobile_breakpoint: f64,
    pub drift: f64,
    pub damping: f64,
    pub max_velocity: f64,
    pub connection_distance: f64, // 0 disables connection lines
    pub radius: f64,
    pub focal_length: f64,
    pub rotation_speed: f64,
    pub hover_rotation_speed: Option<f64>, // defaults to rotation_speed
    pub resize_debounce_ms: u64,
    pub seed: u64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            count: 150,
            mobile_count: None,
            mobile_breakpoint: 768.0,
            drift: 0.2,
            damping: 0.98,
            max_velocity: 2.0,
            connection_distance: 0.0,
            radius: 150.0,
            focal_length: 500.0,
            rotation_speed: 0.005,
            hover_rotation_speed: None,
            resize_debounce_ms: 150,
            seed: 42,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedingConfig {
    #[default]
    Viewport,
    FibonacciSphere,
    BallVolume,
    CubeEdges,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolarityConfig {
    #[default]
    Attract,
    Repel,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FalloffConfig {
    #[default]
    Linear,
    Magnetic,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct InteractionConfig {
    pub polarity: PolarityConfig,
    pub strength: f64,
    pub max_distance: f64,
    pub falloff: FalloffConfig,
    pub min_distance: f64, // magnetic only
    pub capture: f64, // magnetic only: near-field force multiplier
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            polarity: PolarityConfig::Attract,
            strength: 0.02,
            max_distance: 200.0,
            falloff: FalloffConfig::Linear,
            min_distance: 30.0,
            capture: 0.3,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StyleConfig {
    pub node_radius: (f64, f64), // 2D base radius range; 3D uses the lower bound as node size
    pub node_alpha: f64, // 2D fixed dot alpha; ignored when radius_alpha is set
    pub radius_alpha: Option<(f64, f64)>, // 2D alpha = a + b * radius
    pub line_alpha: f64,
    pub depth_floor: f64,
    pub glow_threshold: Option<f64>,
    pub center_offset: (f64, f64), // 3D projection center shift in px
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_radius: (1.5, 1.5),
            node_alpha: 0.8,
            radius_alpha: None,
            line_alpha: 0.1,
            depth_floor: 0.4,
            glow_threshold: None,
            center_offset: (0.0, 0.0),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ShootingStarsConfig {
    pub min_interval: f64,
    pub max_interval: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    pub delay: f64,
    pub initial_burst: usize,
}

impl Default for ShootingStarsConfig {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 5.0,
            min_duration: 1.0,
            max_duration: 3.0,
            delay: 0.0,
            initial_burst: 3,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fieldsim".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub seeding: SeedingConfig,
    pub interaction: Option<InteractionConfig>, // no pointer forces when absent
    pub style: StyleConfig,
    pub shooting_stars: Option<ShootingStarsConfig>, // no overlay when absent
    pub window: WindowConfig,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine cannot run with. Zero or negative sizes are
    /// allowed and simply render an empty frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        let s = &self.style;
        let e = &self.engine;

        for (field, value) in [
            ("parameters.mobile_breakpoint", p.mobile_breakpoint),
            ("parameters.drift", p.drift),
            ("parameters.damping", p.damping),
            ("parameters.max_velocity", p.max_velocity),
            ("parameters.connection_distance", p.connection_distance),
            ("parameters.radius", p.radius),
            ("parameters.focal_length", p.focal_length),
            ("parameters.rotation_speed", p.rotation_speed),
            ("engine.restitution", e.restitution),
            ("engine.tilt", e.tilt),
            ("engine.spin_ratio", e.spin_ratio),
            ("style.node_alpha", s.node_alpha),
            ("style.line_alpha", s.line_alpha),
            ("style.depth_floor", s.depth_floor),
        ] {
            finite(field, value)?;
        }

        if let Some(hover) = p.hover_rotation_speed {
            finite("parameters.hover_rotation_speed", hover)?;
        }
        if let Some((a, b)) = s.radius_alpha {
            finite("style.radius_alpha", a)?;
            finite("style.radius_alpha", b)?;
        }
        if let Some(glow) = s.glow_threshold {
            finite("style.glow_threshold", glow)?;
        }
        finite("style.center_offset", s.center_offset.0)?;
        finite("style.center_offset", s.center_offset.1)?;

        unit("parameters.damping", p.damping)?;
        unit("engine.restitution", e.restitution)?;
        unit("style.depth_floor", s.depth_floor)?;
        ordered("style.node_radius", s.node_radius)?;
        if s.node_radius.0 < 0.0 {
            return Err(invalid("style.node_radius", "radius must not be negative"));
        }

        if let Some(i) = &self.interaction {
            finite("interaction.strength", i.strength)?;
            finite("interaction.max_distance", i.max_distance)?;
            finite("interaction.min_distance", i.min_distance)?;
            finite("interaction.capture", i.capture)?;
        }

        if let Some(st) = &self.shooting_stars {
            ordered("shooting_stars.interval", (st.min_interval, st.max_interval))?;
            ordered("shooting_stars.duration", (st.min_duration, st.max_duration))?;
            if st.min_interval <= 0.0 {
                return Err(invalid("shooting_stars.min_interval", "must be positive"));
            }
            for (field, value) in [
                ("shooting_stars.min_interval", st.min_interval),
                ("shooting_stars.max_interval", st.max_interval),
                ("shooting_stars.min_duration", st.min_duration),
                ("shooting_stars.max_duration", st.max_duration),
                ("shooting_stars.delay", st.delay),
            ] {
                seconds(field, value)?;
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}

/// Longest interval, duration or delay a shooting star may be configured with
pub const MAX_TIMER_SECONDS: f64 = 3600.0;

fn seconds(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=MAX_TIMER_SECONDS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} s is outside [0, {MAX_TIMER_SECONDS}]"),
        })
    }
}

fn unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("{value} is outside [0, 1]") })
    }
}

fn ordered(field: &'static str, (lo, hi): (f64, f64)) -> Result<(), ConfigError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("range [{lo}, {hi}] is not ordered") })
    }
}
