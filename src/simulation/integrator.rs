//! Fixed-step integrators for the particle field
//!
//! One call advances the field by exactly one display frame. Both the 2D
//! and 3D steps run drift -> boundary -> (pointer forces) -> damping ->
//! speed clamp, mutating the owned field in place

use super::engine::Engine;
use super::forces::InteractionSet;
use super::input::PointerSnapshot;
use super::params::Parameters;
use super::states::{Field2, Field3, NVec2};

/// Advance the 2D field by one frame
/// Pointer deltas from `forces` are applied after the boundary step, so a
/// point that just wrapped is pulled from its new position
pub fn drift_integrator(
    field: &mut Field2,
    forces: &InteractionSet,
    pointer: &PointerSnapshot,
    engine: &Engine,
    params: &Parameters,
) {
    let n = field.points.len();
    if n == 0 { // no points, nothing to advance
        return;
    }
    let bounds = field.bounds();

    // Drift: x_n+1 = x_n + v_n, then keep the point inside the viewport
    for p in field.points.iter_mut() {
        p.x += p.v;
        engine.boundary.apply_2d(p, bounds);
    }

    // Pointer impulses, computed against post-boundary positions
    if !forces.is_empty() {
        let mut deltas = vec![NVec2::zeros(); n];
        forces.accumulate_deltas(pointer, &*field, &mut deltas);
        for (p, d) in field.points.iter_mut().zip(deltas.iter()) {
            p.v += *d;
        }
    }

    for p in field.points.iter_mut() {
        p.radius = p.base_radius * forces.radius_factor(pointer, p.x);
        p.v *= params.damping;
        clamp_speed(&mut p.v, params.max_velocity);
    }

    field.frame += 1;
}

/// Advance the 3D field by one frame
/// The field is never rotated here; rotation is applied at projection time
/// from the unrotated coordinates so it cannot accumulate drift
pub fn drift_integrator_3d(field: &mut Field3, engine: &Engine, params: &Parameters) {
    if field.points.is_empty() {
        return;
    }
    let radius = field.radius;

    for p in field.points.iter_mut() {
        p.x += p.v;
        engine.boundary.apply_3d(p, radius);
        p.v *= params.damping;
        clamp_speed(&mut p.v, params.max_velocity);
    }

    field.frame += 1;
}

/// Rescale `v` so that `|v| <= max`. A non-positive `max` stops the point.
pub fn clamp_speed<const D: usize>(v: &mut nalgebra::SVector<f64, D>, max: f64) {
    let speed = v.norm();
    if !speed.is_finite() || max <= 0.0 {
        v.fill(0.0);
    } else if speed > max {
        *v *= max / speed;
    }
}
