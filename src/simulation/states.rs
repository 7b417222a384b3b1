//! Core state types for the particle field.
//!
//! Defines 2D and 3D point/field structs:
//! - `Point2` / `Field2` using `NVec2` (screen space, top-left origin)
//! - `Point3` / `Field3` using `NVec3` (centered, unrotated space)
//!
//! A field owns a fixed number of points. It is only ever rebuilt wholesale
//! (on resize), never grown or shrunk point by point.

use nalgebra::{Vector2, Vector3};
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Point2 {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub base_radius: f64, // seeded dot radius
    pub radius: f64, // drawn radius, recomputed every frame
}

impl Point2 {
    pub fn new(x: NVec2, v: NVec2, base_radius: f64) -> Self {
        Self { x, v, base_radius, radius: base_radius }
    }
}

#[derive(Debug, Clone)]
pub struct Field2 {
    pub points: Vec<Point2>,
    pub width: f64, // simulated area, equal to the viewport
    pub height: f64,
    pub frame: u64, // ticks since the last reseed
}

impl Field2 {
    pub fn empty(width: f64, height: f64) -> Self {
        Self { points: Vec::new(), width, height, frame: 0 }
    }

    pub fn bounds(&self) -> NVec2 {
        NVec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct Point3 {
    pub x: NVec3, // unrotated position, drift-integrated
    pub v: NVec3, // velocity
    pub origin: NVec3, // seeded coordinate, never modified
}

impl Point3 {
    pub fn at_rest(origin: NVec3) -> Self {
        Self { x: origin, v: NVec3::zeros(), origin }
    }

    pub fn drifting(origin: NVec3, v: NVec3) -> Self {
        Self { x: origin, v, origin }
    }

    /// How far the point has drifted from where it was seeded
    pub fn displacement(&self) -> f64 {
        (self.x - self.origin).norm()
    }
}

#[derive(Debug, Clone)]
pub struct Field3 {
    pub points: Vec<Point3>,
    pub radius: f64, // sphere / volume radius used by seeding and elastic recall
    pub frame: u64,
}

impl Field3 {
    pub fn empty(radius: f64) -> Self {
        Self { points: Vec::new(), radius, frame: 0 }
    }
}
