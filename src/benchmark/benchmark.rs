use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::boundary::BoundaryPolicy;
use crate::simulation::connections::{connect_2d, connect_3d};
use crate::simulation::engine::{Dimension, Engine, RotationAxes};
use crate::simulation::forces::{Falloff, InteractionSet, Polarity, PointerField};
use crate::simulation::input::PointerSnapshot;
use crate::simulation::integrator::drift_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::projection::{Projector, Rotation};
use crate::simulation::seeding::{fibonacci_sphere, viewport_points};
use crate::simulation::states::{Field2, NVec2};

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 720.0;

/// Helper to build a seeded 2D field of size `n`
fn make_field(n: usize) -> Field2 {
    let mut rng = StdRng::seed_from_u64(42);
    let mut field = Field2::empty(WIDTH, HEIGHT);
    field.points = viewport_points(&mut rng, n, WIDTH, HEIGHT, 0.5, (0.5, 1.5));
    field
}

/// Helper parameters matching the magnetic starfield
fn make_params() -> Parameters {
    Parameters {
        count: 0,
        mobile_count: None,
        mobile_breakpoint: 768.0,
        drift: 0.2,
        damping: 0.98,
        max_velocity: 2.0,
        connection_distance: 100.0,
        radius: 150.0,
        focal_length: 500.0,
        rotation_speed: 0.005,
        hover_rotation_speed: 0.01,
        resize_debounce_ms: 150,
        seed: 42,
    }
}

/// Time the pairwise connection pass, 2D and 3D, for growing n
/// Paste output directly into a spreadsheet to graph
pub fn bench_connections() {
    println!("N,connect_2d_ms,connect_3d_ms,lines_2d,lines_3d");

    let params = make_params();
    let projector = Projector { focal_length: params.focal_length, center: NVec2::new(WIDTH / 2.0, HEIGHT / 2.0) };
    let rotation = Rotation { angle_y: 0.3, angle_x: 0.1 };

    for n in [50, 100, 200, 400, 800, 1600] {
        let field = make_field(n);
        let positions: Vec<NVec2> = field.points.iter().map(|p| p.x).collect();

        // Warm up
        connect_2d(&positions, params.connection_distance, 0.1);

        let t0 = Instant::now();
        let lines_2d = connect_2d(&positions, params.connection_distance, 0.1).len();
        let ms_2d = t0.elapsed().as_secs_f64() * 1000.0;

        let sphere = fibonacci_sphere(n, params.radius);
        let projected: Vec<_> = sphere.iter().map(|p| projector.project(&rotation, *p)).collect();

        let t1 = Instant::now();
        let lines_3d = connect_3d(&sphere, &projected, 80.0, 0.15, 0.4).len();
        let ms_3d = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6},{},{}", n, ms_2d, ms_3d, lines_2d, lines_3d);
    }
}

/// Time one integrator step with an active magnetic pointer field
pub fn bench_step() {
    println!("N,step_ms");

    let params = make_params();
    let engine = Engine { dimension: Dimension::Flat, boundary: BoundaryPolicy::Wrap, rotation: RotationAxes::Y };
    let forces = InteractionSet::new().with(PointerField {
        strength: 0.02,
        max_distance: 200.0,
        polarity: Polarity::Attract,
        falloff: Falloff::Magnetic { min_distance: 30.0, capture: 0.3 },
    });
    let pointer = PointerSnapshot::at(WIDTH / 2.0, HEIGHT / 2.0);
    let steps = 100;

    for n in (100..=3200).step_by(300) {
        let mut field = make_field(n);

        let t0 = Instant::now();
        for _ in 0..steps {
            drift_integrator(&mut field, &forces, &pointer, &engine, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
