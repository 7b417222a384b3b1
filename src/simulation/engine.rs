//! High-level runtime engine settings
//!
//! Selects dimension (2D/3D), the boundary policy, and how the 3D field
//! is rotated. Built from `EngineConfig` when a `Scenario` is assembled

use crate::simulation::boundary::BoundaryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Flat,   // 2D screen-space field
    Volume, // 3D field projected onto the screen
}

/// Which axes the 3D field turns around, and what drives the second one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationAxes {
    Y,
    // X follows the pointer's normalized vertical offset times `tilt`
    YTiltX { tilt: f64 },
    // X advances every frame by `rotation_speed * ratio`
    YSpinX { ratio: f64 },
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub dimension: Dimension,
    pub boundary: BoundaryPolicy,
    pub rotation: RotationAxes,
}
