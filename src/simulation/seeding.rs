//! Initial point distributions
//!
//! All randomness comes from the scenario's seeded `StdRng`, so two runs
//! with the same seed and viewport produce the same field.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::Rng;

use super::states::{NVec2, NVec3, Point2, Point3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedShape {
    /// Uniform over the viewport rectangle (2D fields)
    Viewport,
    /// Evenly spread over the sphere surface, at rest
    FibonacciSphere,
    /// Uniform inside the sphere volume, drifting
    BallVolume,
    /// Spread along the 12 edges of the cube inscribed in the sphere, at rest
    CubeEdges,
}

/// Velocity with each component uniform in `[-drift/2, drift/2]`
fn drift_velocity<const D: usize>(rng: &mut StdRng, drift: f64) -> nalgebra::SVector<f64, D> {
    nalgebra::SVector::<f64, D>::from_fn(|_, _| (rng.gen::<f64>() - 0.5) * drift)
}

/// `n` points uniformly over a `width` by `height` viewport, each with a
/// base radius drawn from `radius_range`
pub fn viewport_points(
    rng: &mut StdRng,
    n: usize,
    width: f64,
    height: f64,
    drift: f64,
    radius_range: (f64, f64),
) -> Vec<Point2> {
    let (r_min, r_max) = radius_range;
    (0..n)
        .map(|_| {
            let x = NVec2::new(rng.gen::<f64>() * width.max(0.0), rng.gen::<f64>() * height.max(0.0));
            let v = drift_velocity::<2>(rng, drift);
            let r = r_min + rng.gen::<f64>() * (r_max - r_min).max(0.0);
            Point2::new(x, v, r)
        })
        .collect()
}

/// Fibonacci sphere: `n` points on a sphere of `radius`, y running from
/// `+radius` down to `-radius`, successive points turned by the golden angle
pub fn fibonacci_sphere(n: usize, radius: f64) -> Vec<NVec3> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            // A single point sits at the north pole instead of dividing by zero
            let y = if n > 1 { 1.0 - (i as f64 / (n - 1) as f64) * 2.0 } else { 1.0 };
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f64;
            NVec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
        })
        .collect()
}

/// Uniform point inside a ball of `radius` (cube root keeps volume density even)
pub fn ball_point(rng: &mut StdRng, radius: f64) -> NVec3 {
    let theta = rng.gen::<f64>() * 2.0 * PI;
    let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
    let r = rng.gen::<f64>().cbrt() * radius;
    NVec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// `n` points spread evenly along the edges of the cube with half-side
/// `radius / sqrt(3)` (its corners touch the sphere)
pub fn cube_edges(n: usize, radius: f64) -> Vec<NVec3> {
    let h = radius / 3f64.sqrt();
    let corners = [
        NVec3::new(-h, -h, -h),
        NVec3::new(h, -h, -h),
        NVec3::new(h, h, -h),
        NVec3::new(-h, h, -h),
        NVec3::new(-h, -h, h),
        NVec3::new(h, -h, h),
        NVec3::new(h, h, h),
        NVec3::new(-h, h, h),
    ];
    let edges = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    (0..n)
        .map(|i| {
            let (a, b) = edges[i % edges.len()];
            // Walk each edge in equal steps, corners included on the first lap
            let laps = n.div_ceil(edges.len()).max(1);
            let t = (i / edges.len()) as f64 / laps as f64;
            corners[a] + (corners[b] - corners[a]) * t
        })
        .collect()
}

/// Seed a 3D field of `n` points
pub fn seed_3d(rng: &mut StdRng, shape: SeedShape, n: usize, radius: f64, drift: f64) -> Vec<Point3> {
    match shape {
        SeedShape::FibonacciSphere => fibonacci_sphere(n, radius).into_iter().map(Point3::at_rest).collect(),
        SeedShape::CubeEdges => cube_edges(n, radius).into_iter().map(Point3::at_rest).collect(),
        SeedShape::BallVolume | SeedShape::Viewport => (0..n)
            .map(|_| {
                let origin = ball_point(rng, radius);
                Point3::drifting(origin, drift_velocity::<3>(rng, drift))
            })
            .collect(),
    }
}
