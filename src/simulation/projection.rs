//! Rotation and perspective projection for the 3D field
//!
//! Points are rotated around Y, then optionally around X, and projected with
//! `scale = f / (f + z)`. Depth attributes (radius, opacity, glow) grow with
//! `scale` and are floored so far points never vanish.

use super::states::{NVec2, NVec3};

/// Smallest denominator allowed in the perspective divide
pub const MIN_DEPTH: f64 = 1e-6;

/// Largest radius magnification a node may get from being close
pub const MAX_MAGNIFICATION: f64 = 4.0;

/// Current absolute rotation of the field. Angles only ever grow (or, for a
/// pointer-driven tilt, are set outright); they are never wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub angle_y: f64,
    pub angle_x: f64,
}

impl Rotation {
    /// Rotate `p` around Y by `angle_y`, then around X by `angle_x`
    pub fn apply(&self, p: NVec3) -> NVec3 {
        let (sin_y, cos_y) = self.angle_y.sin_cos();
        let x = p.x * cos_y - p.z * sin_y;
        let z = p.x * sin_y + p.z * cos_y;

        if self.angle_x == 0.0 {
            return NVec3::new(x, p.y, z);
        }
        let (sin_x, cos_x) = self.angle_x.sin_cos();
        NVec3::new(x, p.y * cos_x - z * sin_x, p.y * sin_x + z * cos_x)
    }
}

/// A point after rotation and perspective division
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub rotated: NVec3,
    pub screen: NVec2,
    pub scale: f64,
}

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub focal_length: f64,
    pub center: NVec2,
}

impl Projector {
    /// Perspective scale for a rotated depth `z`.
    /// `None` when the focal length is unusable.
    pub fn scale(&self, z: f64) -> Option<f64> {
        if !(self.focal_length > 0.0) || !self.focal_length.is_finite() || !z.is_finite() {
            return None;
        }
        let denom = (self.focal_length + z).max(MIN_DEPTH);
        Some(self.focal_length / denom)
    }

    pub fn project(&self, rotation: &Rotation, p: NVec3) -> Option<Projected> {
        let rotated = rotation.apply(p);
        let scale = self.scale(rotated.z)?;
        Some(Projected {
            rotated,
            screen: NVec2::new(rotated.x, rotated.y) * scale + self.center,
            scale,
        })
    }
}

/// How depth maps to node appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStyle {
    pub node_size: f64,
    pub floor: f64, // minimum opacity / radius factor
    pub glow_threshold: Option<f64>,
}

impl DepthStyle {
    pub fn radius(&self, scale: f64) -> f64 {
        (self.node_size * scale)
            .min(self.node_size * MAX_MAGNIFICATION)
            .max(self.node_size * self.floor)
    }

    pub fn opacity(&self, scale: f64) -> f64 {
        scale.min(1.0).max(self.floor)
    }

    /// Halo alpha for near points, if glow is enabled and the point is close enough
    pub fn glow(&self, scale: f64) -> Option<f64> {
        let threshold = self.glow_threshold?;
        if scale > threshold {
            Some(((scale - threshold) * 0.1).min(1.0))
        } else {
            None
        }
    }
}
