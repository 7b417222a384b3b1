//! Numerical parameters for the particle field
//!
//! `Parameters` holds runtime settings:
//! - seeding counts and drift range,
//! - damping and velocity clamp,
//! - connection threshold, focal length and rotation speeds,
//! - resize debounce and random seed

#[derive(Debug, Clone)]
pub struct Parameters {
    pub count: usize, // points seeded on a regular viewport
    pub mobile_count: Option<usize>, // override below `mobile_breakpoint`
    pub mobile_breakpoint: f64, // viewport width in px
    pub drift: f64, // seeded velocity components lie in [-drift/2, drift/2]
    pub damping: f64, // velocity decay per tick, 1.0 = none
    pub max_velocity: f64, // speed clamp applied every tick
    pub connection_distance: f64, // pairs closer than this get a line
    pub radius: f64, // 3D sphere / volume radius
    pub focal_length: f64, // perspective constant
    pub rotation_speed: f64, // radians per frame around Y
    pub hover_rotation_speed: f64, // radians per frame while hovered
    pub resize_debounce_ms: u64,
    pub seed: u64, // deterministic seed
}

impl Parameters {
    /// Point count to seed for a viewport of the given width
    pub fn effective_count(&self, viewport_width: f64) -> usize {
        match self.mobile_count {
            Some(n) if viewport_width < self.mobile_breakpoint => n,
            _ => self.count,
        }
    }
}
