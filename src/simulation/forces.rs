//! Pointer interaction contributors for the 2D field
//!
//! Defines the `Interaction` trait and the pointer force field with
//! linear or magnetic falloff, attracting or repelling

use crate::simulation::input::PointerSnapshot;
use crate::simulation::states::{Field2, NVec2};

/// Collection of interaction terms
/// Each term implements [`Interaction`] and their velocity deltas are summed
/// into a single delta per point
pub struct InteractionSet {
    terms: Vec<Box<dyn Interaction + Send + Sync>>,
}

impl Default for InteractionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSet {
    /// Create an empty interaction set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an interaction term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Interaction + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total velocity deltas for all points in `field`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_deltas(&self, pointer: &PointerSnapshot, field: &Field2, out: &mut [NVec2]) {
        // Zero buffer
        for d in out.iter_mut() {
            *d = NVec2::zeros();
        }
        for term in &self.terms {
            term.velocity_deltas(pointer, field, out);
        }
    }

    /// Product of every term's radius multiplier for a point at `x`
    pub fn radius_factor(&self, pointer: &PointerSnapshot, x: NVec2) -> f64 {
        self.terms.iter().map(|t| t.radius_factor(pointer, x)).product()
    }
}

/// Trait for velocity perturbations driven by the pointer
/// Implementations add their contribution into `out[i]` for each point
pub trait Interaction {
    fn velocity_deltas(&self, pointer: &PointerSnapshot, field: &Field2, out: &mut [NVec2]);

    /// Multiplier applied to a point's base radius this frame
    fn radius_factor(&self, _pointer: &PointerSnapshot, _x: NVec2) -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Attract,
    Repel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Falloff {
    /// Force fades linearly to zero at `max_distance`
    Linear,
    /// Linear outside `min_distance`; inside it the force shrinks with
    /// distance (scaled by `capture`) so points settle near the pointer
    /// instead of shooting through it
    Magnetic { min_distance: f64, capture: f64 },
}

/// Force field centered on the pointer
#[derive(Debug, Clone)]
pub struct PointerField {
    pub strength: f64,
    pub max_distance: f64,
    pub polarity: Polarity,
    pub falloff: Falloff,
}

impl PointerField {
    /// Force magnitude at distance `d`, zero outside `(0, max_distance)`
    pub fn magnitude(&self, d: f64) -> f64 {
        if !(d > 0.0) || d >= self.max_distance {
            return 0.0;
        }
        match self.falloff {
            Falloff::Magnetic { min_distance, capture } if d < min_distance => {
                self.strength * (d / min_distance) * capture
            }
            _ => self.strength * (1.0 - d / self.max_distance),
        }
    }

    /// Velocity delta for a point at `x`
    pub fn delta(&self, pointer: &PointerSnapshot, x: NVec2) -> NVec2 {
        let Some(target) = pointer.position else {
            return NVec2::zeros();
        };
        let r = target - x; // points at the pointer
        let d = r.norm();
        let force = self.magnitude(d);
        if force == 0.0 {
            return NVec2::zeros();
        }
        let dir = r / d;
        match self.polarity {
            Polarity::Attract => dir * force,
            Polarity::Repel => -dir * force,
        }
    }

    /// Radius multiplier for a point at distance `d` from the pointer.
    /// Magnetic fields swell points within twice the capture distance.
    pub fn pulse(&self, d: f64) -> f64 {
        match self.falloff {
            Falloff::Magnetic { min_distance, .. }
                if d < self.max_distance && d < 2.0 * min_distance =>
            {
                1.0 + 0.3 * (1.0 - d / (2.0 * min_distance))
            }
            _ => 1.0,
        }
    }
}

impl Interaction for PointerField {
    fn velocity_deltas(&self, pointer: &PointerSnapshot, field: &Field2, out: &mut [NVec2]) {
        if pointer.position.is_none() {
            return;
        }
        for (p, d) in field.points.iter().zip(out.iter_mut()) {
            *d += self.delta(pointer, p.x);
        }
    }

    fn radius_factor(&self, pointer: &PointerSnapshot, x: NVec2) -> f64 {
        match pointer.position {
            Some(target) => self.pulse((target - x).norm()),
            None => 1.0,
        }
    }
}
