//! Build fully-initialized particle field scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces runtime bundles
//! (`Scenario2D` for flat fields, `Scenario3D` for projected ones) containing:
//! - engine settings (`Engine`)
//! - numeric parameters (`Parameters`)
//! - the point store (`Field2`/`Field3`) seeded for the current viewport
//! - the active pointer interactions (`InteractionSet`, 2D only)
//!
//! These scenarios are inserted into Bevy as `Resource`s and consumed by
//! the frame systems in `visualization`

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::configuration::config::{
    BoundaryConfig, DimensionConfig, FalloffConfig, InteractionConfig, PolarityConfig,
    RotationConfig, ScenarioConfig, SeedingConfig, ShootingStarsConfig, StyleConfig,
};
use crate::simulation::boundary::BoundaryPolicy;
use crate::simulation::engine::{Dimension, Engine, RotationAxes};
use crate::simulation::forces::{Falloff, InteractionSet, Polarity, PointerField};
use crate::simulation::input::PointerSnapshot;
use crate::simulation::integrator::{drift_integrator, drift_integrator_3d};
use crate::simulation::params::Parameters;
use crate::simulation::projection::{DepthStyle, Projector, Rotation};
use crate::simulation::seeding::{seed_3d, viewport_points, SeedShape};
use crate::simulation::states::{Field2, Field3, NVec2};
use crate::simulation::transient::TransientSettings;

/// Appearance settings shared by both dimensions
#[derive(Debug, Clone)]
pub struct Style {
    pub node_radius: (f64, f64),
    pub node_alpha: f64,
    pub radius_alpha: Option<(f64, f64)>,
    pub line_alpha: f64,
    pub depth: DepthStyle,
    pub center_offset: NVec2,
}

impl Style {
    fn from_config(cfg: &StyleConfig) -> Self {
        Self {
            node_radius: cfg.node_radius,
            node_alpha: cfg.node_alpha,
            radius_alpha: cfg.radius_alpha,
            line_alpha: cfg.line_alpha,
            depth: DepthStyle {
                node_size: cfg.node_radius.0,
                floor: cfg.depth_floor,
                glow_threshold: cfg.glow_threshold,
            },
            center_offset: NVec2::new(cfg.center_offset.0, cfg.center_offset.1),
        }
    }

    /// Dot alpha for a 2D point of the given drawn radius
    pub fn dot_alpha(&self, radius: f64) -> f64 {
        match self.radius_alpha {
            Some((a, b)) => (a + b * radius).clamp(0.0, 1.0),
            None => self.node_alpha,
        }
    }
}

fn engine_from_config(cfg: &ScenarioConfig) -> Engine {
    let e = &cfg.engine;
    Engine {
        dimension: match e.dimension {
            DimensionConfig::Flat => Dimension::Flat,
            DimensionConfig::Volume => Dimension::Volume,
        },
        boundary: match e.boundary {
            BoundaryConfig::Wrap => BoundaryPolicy::Wrap,
            BoundaryConfig::Bounce => BoundaryPolicy::Bounce,
            BoundaryConfig::Elastic => BoundaryPolicy::Elastic { restitution: e.restitution },
        },
        rotation: match e.rotation {
            RotationConfig::Y => RotationAxes::Y,
            RotationConfig::YTilt => RotationAxes::YTiltX { tilt: e.tilt },
            RotationConfig::YSpin => RotationAxes::YSpinX { ratio: e.spin_ratio },
        },
    }
}

fn parameters_from_config(cfg: &ScenarioConfig) -> Parameters {
    let p = &cfg.parameters;
    Parameters {
        count: p.count,
        mobile_count: p.mobile_count,
        mobile_breakpoint: p.mobile_breakpoint,
        drift: p.drift,
        damping: p.damping,
        max_velocity: p.max_velocity,
        connection_distance: p.connection_distance,
        radius: p.radius,
        focal_length: p.focal_length,
        rotation_speed: p.rotation_speed,
        hover_rotation_speed: p.hover_rotation_speed.unwrap_or(p.rotation_speed),
        resize_debounce_ms: p.resize_debounce_ms,
        seed: p.seed,
    }
}

fn seed_shape(cfg: SeedingConfig) -> SeedShape {
    match cfg {
        SeedingConfig::Viewport => SeedShape::Viewport,
        SeedingConfig::FibonacciSphere => SeedShape::FibonacciSphere,
        SeedingConfig::BallVolume => SeedShape::BallVolume,
        SeedingConfig::CubeEdges => SeedShape::CubeEdges,
    }
}

/// Map the YAML interaction block onto a runtime pointer field
pub fn pointer_field(cfg: &InteractionConfig) -> PointerField {
    PointerField {
        strength: cfg.strength,
        max_distance: cfg.max_distance,
        polarity: match cfg.polarity {
            PolarityConfig::Attract => Polarity::Attract,
            PolarityConfig::Repel => Polarity::Repel,
        },
        falloff: match cfg.falloff {
            FalloffConfig::Linear => Falloff::Linear,
            FalloffConfig::Magnetic => Falloff::Magnetic {
                min_distance: cfg.min_distance,
                capture: cfg.capture,
            },
        },
    }
}

pub fn transient_settings(cfg: &ShootingStarsConfig) -> TransientSettings {
    TransientSettings {
        min_interval: cfg.min_interval,
        max_interval: cfg.max_interval,
        min_duration: cfg.min_duration,
        max_duration: cfg.max_duration,
        delay: cfg.delay,
        initial_burst: cfg.initial_burst,
    }
}

/// Bevy resource holding a fully-initialized 2D field
///
/// Built from a [`ScenarioConfig`] for a given viewport; rebuilt in place by
/// [`Scenario2D::reseed`] whenever the viewport changes
#[derive(Resource)]
pub struct Scenario2D {
    pub engine: Engine,
    pub parameters: Parameters,
    pub style: Style,
    pub field: Field2,
    pub forces: InteractionSet,
    rng: StdRng,
}

impl Scenario2D {
    pub fn build_scenario(cfg: &ScenarioConfig, width: f64, height: f64) -> Self {
        let engine = engine_from_config(cfg);
        let parameters = parameters_from_config(cfg);

        // Forces: register the pointer field if the scenario has one
        let mut forces = InteractionSet::new();
        if let Some(i) = &cfg.interaction {
            forces = forces.with(pointer_field(i));
        }

        let mut scenario = Self {
            engine,
            rng: StdRng::seed_from_u64(parameters.seed),
            parameters,
            style: Style::from_config(&cfg.style),
            field: Field2::empty(width, height),
            forces,
        };
        scenario.reseed(width, height);
        scenario
    }

    /// Discard every point and seed a fresh store for the new viewport
    pub fn reseed(&mut self, width: f64, height: f64) {
        let n = self.parameters.effective_count(width);
        let mut field = Field2::empty(width, height);
        field.points = viewport_points(
            &mut self.rng,
            n,
            width,
            height,
            self.parameters.drift,
            self.style.node_radius,
        );
        self.field = field;
        info!(points = n, width, height, "2d field seeded");
    }

    /// One frame of simulation
    pub fn step(&mut self, pointer: &PointerSnapshot) {
        drift_integrator(&mut self.field, &self.forces, pointer, &self.engine, &self.parameters);
    }
}

/// Bevy resource holding a fully-initialized 3D field and its rotation
#[derive(Resource)]
pub struct Scenario3D {
    pub engine: Engine,
    pub parameters: Parameters,
    pub style: Style,
    pub field: Field3,
    pub rotation: Rotation,
    pub viewport: NVec2,
    shape: SeedShape,
    rng: StdRng,
}

impl Scenario3D {
    pub fn build_scenario_3d(cfg: &ScenarioConfig, width: f64, height: f64) -> Self {
        let parameters = parameters_from_config(cfg);
        let mut scenario = Self {
            engine: engine_from_config(cfg),
            rng: StdRng::seed_from_u64(parameters.seed),
            field: Field3::empty(parameters.radius),
            parameters,
            style: Style::from_config(&cfg.style),
            rotation: Rotation::default(),
            viewport: NVec2::new(width, height),
            shape: seed_shape(cfg.seeding),
        };
        scenario.reseed(width, height);
        scenario
    }

    /// Discard every point and seed a fresh store. Rotation keeps going.
    pub fn reseed(&mut self, width: f64, height: f64) {
        let n = self.parameters.effective_count(width);
        let radius = self.parameters.radius;
        let mut field = Field3::empty(radius);
        field.points = seed_3d(&mut self.rng, self.shape, n, radius, self.parameters.drift);
        self.field = field;
        self.viewport = NVec2::new(width, height);
        info!(points = n, radius, "3d field seeded");
    }

    /// Advance rotation angles for this frame
    pub fn advance_rotation(&mut self, pointer: &PointerSnapshot) {
        let speed = if pointer.hovered {
            self.parameters.hover_rotation_speed
        } else {
            self.parameters.rotation_speed
        };
        self.rotation.angle_y += speed;
        match self.engine.rotation {
            RotationAxes::Y => {}
            RotationAxes::YTiltX { tilt } => {
                let n = pointer.normalized(self.viewport.x, self.viewport.y);
                self.rotation.angle_x = n.y * tilt;
            }
            RotationAxes::YSpinX { ratio } => {
                self.rotation.angle_x += speed * ratio;
            }
        }
    }

    /// One frame: rotation, then drift
    pub fn step(&mut self, pointer: &PointerSnapshot) {
        self.advance_rotation(pointer);
        drift_integrator_3d(&mut self.field, &self.engine, &self.parameters);
        if self.field.frame % 600 == 0 {
            debug!(angle_y = self.rotation.angle_y, "3d field rotation");
        }
    }

    pub fn projector(&self) -> Projector {
        Projector {
            focal_length: self.parameters.focal_length,
            center: self.viewport * 0.5 + self.style.center_offset,
        }
    }
}
