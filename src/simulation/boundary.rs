//! Boundary policies applied right after a point drifts.
//!
//! 2D fields use `Wrap` or `Bounce` against the viewport rectangle,
//! 3D fields use `Elastic` against the field sphere.

use super::states::{NVec2, Point2, Point3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPolicy {
    /// Coordinates re-enter from the opposite edge (modulo the bound)
    Wrap,
    /// Velocity component flips when a coordinate leaves `[0, bound]`
    Bounce,
    /// Points beyond `radius` are put back on the sphere and their velocity
    /// is reversed and scaled by `restitution`
    Elastic { restitution: f64 },
}

impl BoundaryPolicy {
    /// Apply the policy to a 2D point inside a `bounds.x` by `bounds.y` rectangle
    pub fn apply_2d(&self, p: &mut Point2, bounds: NVec2) {
        match *self {
            BoundaryPolicy::Wrap => {
                p.x.x = wrap(p.x.x, bounds.x);
                p.x.y = wrap(p.x.y, bounds.y);
            }
            BoundaryPolicy::Bounce => {
                bounce(&mut p.x.x, &mut p.v.x, bounds.x);
                bounce(&mut p.x.y, &mut p.v.y, bounds.y);
            }
            // A rectangle has no sphere; use the inscribed circle around its center
            BoundaryPolicy::Elastic { restitution } => {
                let center = bounds * 0.5;
                let radius = center.x.min(center.y);
                let mut rel = p.x - center;
                if recall(&mut rel, &mut p.v, radius, restitution) {
                    p.x = center + rel;
                }
            }
        }
    }

    /// Apply the policy to a 3D point in a field of the given radius
    pub fn apply_3d(&self, p: &mut Point3, radius: f64) {
        match *self {
            BoundaryPolicy::Elastic { restitution } => {
                recall(&mut p.x, &mut p.v, radius, restitution);
            }
            BoundaryPolicy::Wrap => {
                // Wrap inside the cube [-radius, radius]^3
                let side = 2.0 * radius;
                p.x = p.x.map(|c| wrap(c + radius, side) - radius);
            }
            BoundaryPolicy::Bounce => {
                let side = 2.0 * radius;
                for axis in 0..3 {
                    let mut c = p.x[axis] + radius;
                    bounce(&mut c, &mut p.v[axis], side);
                    p.x[axis] = c - radius;
                }
            }
        }
    }
}

/// Reduce `c` into `[0, bound]`; a degenerate bound pins it to 0
pub fn wrap(c: f64, bound: f64) -> f64 {
    if !(bound > 0.0) || !c.is_finite() {
        return 0.0;
    }
    c.rem_euclid(bound)
}

fn bounce(c: &mut f64, v: &mut f64, bound: f64) {
    let bound = bound.max(0.0);
    if *c < 0.0 {
        *c = 0.0;
        *v = -*v;
    } else if *c > bound {
        *c = bound;
        *v = -*v;
    }
}

/// Rescale `x` onto the sphere of `radius` if it left it. Returns whether it did.
fn recall<const D: usize>(
    x: &mut nalgebra::SVector<f64, D>,
    v: &mut nalgebra::SVector<f64, D>,
    radius: f64,
    restitution: f64,
) -> bool {
    let distance = x.norm();
    if distance <= radius || distance == 0.0 {
        return false;
    }
    let radius = radius.max(0.0);
    *x *= radius / distance;
    *v *= -restitution;
    true
}
