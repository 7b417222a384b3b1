use std::path::PathBuf;
use std::time::Duration;

use fieldsim::configuration::config::{ConfigError, ScenarioConfig};
use fieldsim::simulation::boundary::{wrap, BoundaryPolicy};
use fieldsim::simulation::connections::{connect_2d, connect_3d, connection_opacity};
use fieldsim::simulation::engine::{Dimension, Engine, RotationAxes};
use fieldsim::simulation::forces::{Falloff, InteractionSet, Polarity, PointerField};
use fieldsim::simulation::input::{PointerSnapshot, PointerState};
use fieldsim::simulation::integrator::{drift_integrator, drift_integrator_3d};
use fieldsim::simulation::lifecycle::{AnimationHandle, ResizeDebounce};
use fieldsim::simulation::params::Parameters;
use fieldsim::simulation::projection::{DepthStyle, Projector, Rotation};
use fieldsim::simulation::scenario::{Scenario2D, Scenario3D};
use fieldsim::simulation::seeding::{cube_edges, fibonacci_sphere};
use fieldsim::simulation::states::{Field2, Field3, NVec2, NVec3, Point2, Point3};
use fieldsim::simulation::transient::{TransientGenerator, TransientSettings};
use fieldsim::visualization::draw_list::{frame_2d, frame_3d, frame_transients};
use fieldsim::visualization::surface::{install_frame_loop, Surface};

use bevy::app::{App, AppExit};
use bevy::ecs::entity::Entity;
use bevy::prelude::{IntoSystemConfigs, ResMut, Resource};
use bevy::input::keyboard::KeyCode;
use bevy::input::ButtonInput;
use bevy::window::WindowCloseRequested;

/// Default runtime parameters for tests: no damping, generous clamp
pub fn test_params() -> Parameters {
    Parameters {
        count: 10,
        mobile_count: None,
        mobile_breakpoint: 768.0,
        drift: 0.2,
        damping: 1.0,
        max_velocity: 10.0,
        connection_distance: 100.0,
        radius: 150.0,
        focal_length: 500.0,
        rotation_speed: 0.005,
        hover_rotation_speed: 0.01,
        resize_debounce_ms: 150,
        seed: 42,
    }
}

pub fn engine(boundary: BoundaryPolicy) -> Engine {
    Engine { dimension: Dimension::Flat, boundary, rotation: RotationAxes::Y }
}

/// Build a 2D field from (position, velocity) pairs
pub fn field_2d(width: f64, height: f64, points: &[([f64; 2], [f64; 2])]) -> Field2 {
    let mut field = Field2::empty(width, height);
    field.points = points
        .iter()
        .map(|(x, v)| Point2::new(NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), 1.0))
        .collect();
    field
}

pub fn magnetic() -> PointerField {
    PointerField {
        strength: 0.02,
        max_distance: 200.0,
        polarity: Polarity::Attract,
        falloff: Falloff::Magnetic { min_distance: 30.0, capture: 0.3 },
    }
}

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn wrap_scenario_eleven_ticks_lands_on_one() {
    let mut field = field_2d(10.0, 10.0, &[([0.0, 0.0], [1.0, 0.0])]);
    let p = test_params();
    let e = engine(BoundaryPolicy::Wrap);
    let forces = InteractionSet::new();

    for _ in 0..11 {
        drift_integrator(&mut field, &forces, &PointerSnapshot::inactive(), &e, &p);
    }

    let x = field.points[0].x;
    assert!((x.x - 1.0).abs() < 1e-9, "expected x = 1, got {}", x.x);
    assert!(x.y.abs() < 1e-9, "expected y = 0, got {}", x.y);
    assert_eq!(field.frame, 11);
}

#[test]
fn damping_never_increases_speed() {
    let mut field = field_2d(
        800.0,
        600.0,
        &[
            ([10.0, 10.0], [1.5, -0.7]),
            ([400.0, 300.0], [-0.2, 0.1]),
            ([790.0, 590.0], [1.9, 0.4]),
            ([0.0, 600.0], [0.0, 0.0]),
        ],
    );
    let mut p = test_params();
    p.damping = 0.98;
    p.max_velocity = 2.0;

    for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
        let e = engine(policy);
        let forces = InteractionSet::new();
        for _ in 0..300 {
            let before: Vec<f64> = field.points.iter().map(|pt| pt.v.norm()).collect();
            drift_integrator(&mut field, &forces, &PointerSnapshot::inactive(), &e, &p);
            for (pt, b) in field.points.iter().zip(before) {
                assert!(pt.v.norm() <= b + 1e-12, "speed grew from {} to {}", b, pt.v.norm());
            }
        }
    }
}

#[test]
fn speed_is_clamped_after_every_tick() {
    let mut field = field_2d(
        500.0,
        500.0,
        &[([240.0, 250.0], [100.0, 100.0]), ([260.0, 250.0], [0.0, 3.0])],
    );
    let mut p = test_params();
    p.max_velocity = 2.0;
    let e = engine(BoundaryPolicy::Wrap);
    let forces = InteractionSet::new().with(PointerField {
        strength: 50.0,
        max_distance: 1000.0,
        polarity: Polarity::Attract,
        falloff: Falloff::Linear,
    });
    let pointer = PointerSnapshot::at(250.0, 250.0);

    for _ in 0..50 {
        drift_integrator(&mut field, &forces, &pointer, &e, &p);
        for pt in &field.points {
            assert!(pt.v.norm() <= p.max_velocity + 1e-9, "speed {} above clamp", pt.v.norm());
        }
    }
}

#[test]
fn wrap_keeps_coordinates_in_bounds() {
    for c in [-1e6, -10.5, -1e-9, 0.0, 3.3, 10.0, 10.000001, 99.9, 1e9] {
        let w = wrap(c, 10.0);
        assert!((0.0..=10.0).contains(&w), "wrap({c}) = {w}");
    }
    // A collapsed viewport pins everything to the origin
    assert_eq!(wrap(5.0, 0.0), 0.0);
    assert_eq!(wrap(5.0, -3.0), 0.0);
}

#[test]
fn bounce_flips_velocity_at_edges() {
    let mut field = field_2d(100.0, 100.0, &[([99.5, 50.0], [1.0, 0.5])]);
    let e = engine(BoundaryPolicy::Bounce);
    drift_integrator(&mut field, &InteractionSet::new(), &PointerSnapshot::inactive(), &e, &test_params());

    let pt = &field.points[0];
    assert!(pt.x.x <= 100.0);
    assert_eq!(pt.v.x, -1.0);
    assert_eq!(pt.v.y, 0.5);
}

#[test]
fn elastic_recall_puts_point_back_on_sphere() {
    let mut field = Field3::empty(100.0);
    field.points.push(Point3::drifting(NVec3::new(99.0, 0.0, 0.0), NVec3::new(4.0, 0.0, 0.0)));
    let e = Engine {
        dimension: Dimension::Volume,
        boundary: BoundaryPolicy::Elastic { restitution: 0.5 },
        rotation: RotationAxes::Y,
    };

    drift_integrator_3d(&mut field, &e, &test_params());

    let pt = &field.points[0];
    assert!((pt.x.norm() - 100.0).abs() < 1e-9);
    assert!((pt.v.x + 2.0).abs() < 1e-12, "velocity should be reversed and halved");
    assert_eq!(pt.origin, NVec3::new(99.0, 0.0, 0.0));
}

// ==================================================================================
// Interaction field tests
// ==================================================================================

#[test]
fn pointer_on_top_of_point_applies_no_force() {
    let mut field = field_2d(200.0, 200.0, &[([100.0, 100.0], [0.25, -0.5])]);
    let forces = InteractionSet::new().with(magnetic());
    // where the point lands after this tick's drift
    let pointer = PointerSnapshot::at(100.25, 99.5);

    drift_integrator(&mut field, &forces, &pointer, &engine(BoundaryPolicy::Wrap), &test_params());

    let pt = &field.points[0];
    assert_eq!(pt.x, NVec2::new(100.25, 99.5));
    assert_eq!(pt.v, NVec2::new(0.25, -0.5));
    assert!(pt.x.x.is_finite() && pt.x.y.is_finite());
    assert_eq!(magnetic().delta(&pointer, NVec2::new(100.25, 99.5)), NVec2::zeros());
}

#[test]
fn inactive_or_distant_pointer_applies_no_force() {
    let field = magnetic();
    let x = NVec2::new(10.0, 10.0);
    assert_eq!(field.delta(&PointerSnapshot::inactive(), x), NVec2::zeros());
    assert_eq!(field.delta(&PointerSnapshot::at(210.0, 10.0), x), NVec2::zeros());
    assert_eq!(field.delta(&PointerSnapshot::at(500.0, 500.0), x), NVec2::zeros());
}

#[test]
fn attraction_and_repulsion_point_opposite_ways() {
    let x = NVec2::new(0.0, 0.0);
    let pointer = PointerSnapshot::at(100.0, 0.0);
    let mut field = magnetic();

    let pull = field.delta(&pointer, x);
    assert!(pull.x > 0.0 && pull.y.abs() < 1e-12, "attraction should point at the pointer");

    field.polarity = Polarity::Repel;
    let push = field.delta(&pointer, x);
    assert!(push.x < 0.0);
    assert!((push + pull).norm() < 1e-12);
}

#[test]
fn magnetic_falloff_attenuates_near_field() {
    let field = magnetic();
    let just_outside = field.magnitude(30.5);
    let just_inside = field.magnitude(29.5);
    let close = field.magnitude(5.0);

    assert!(just_inside < just_outside, "force should drop inside the capture radius");
    assert!(close < just_inside);
    assert!(close > 0.0);
    assert_eq!(field.magnitude(0.0), 0.0);
    assert_eq!(field.magnitude(200.0), 0.0);
}

#[test]
fn magnetic_field_swells_nearby_points() {
    let field = magnetic();
    assert!((field.pulse(0.0) - 1.3).abs() < 1e-12);
    assert!(field.pulse(30.0) > 1.0);
    assert_eq!(field.pulse(60.0), 1.0);

    let linear = PointerField { falloff: Falloff::Linear, ..magnetic() };
    assert_eq!(linear.pulse(0.0), 1.0);
}

#[test]
fn pointer_outside_surface_is_inactive() {
    let mut state = PointerState::default();
    state.entered();
    state.moved(50.0, 50.0, 100.0, 100.0);
    assert_eq!(state.snapshot().position, Some(NVec2::new(50.0, 50.0)));

    state.moved(150.0, 50.0, 100.0, 100.0);
    assert_eq!(state.snapshot().position, None);

    state.moved(20.0, 20.0, 100.0, 100.0);
    state.left();
    let snap = state.snapshot();
    assert_eq!(snap.position, None);
    assert!(!snap.hovered);
}

// ==================================================================================
// Projection tests
// ==================================================================================

#[test]
fn zero_depth_projects_at_unit_scale() {
    for f in [1.0, 250.0, 400.0, 500.0, 1e6] {
        let projector = Projector { focal_length: f, center: NVec2::new(320.0, 240.0) };
        let p = projector.project(&Rotation::default(), NVec3::new(10.0, -20.0, 0.0)).unwrap();
        assert!((p.scale - 1.0).abs() < 1e-12, "f = {f}, scale = {}", p.scale);
        assert!((p.screen - NVec2::new(330.0, 220.0)).norm() < 1e-9);
    }
}

#[test]
fn projection_guards_the_focal_plane() {
    let projector = Projector { focal_length: 400.0, center: NVec2::zeros() };
    let at_plane = projector.scale(-400.0).unwrap();
    assert!(at_plane.is_finite() && at_plane > 0.0);

    let behind = projector.scale(-1000.0).unwrap();
    assert!(behind.is_finite() && behind > 0.0);

    let broken = Projector { focal_length: 0.0, center: NVec2::zeros() };
    assert!(broken.scale(0.0).is_none());
}

#[test]
fn nearer_points_are_bigger_and_brighter_with_a_floor() {
    let projector = Projector { focal_length: 500.0, center: NVec2::zeros() };
    let near = projector.scale(-100.0).unwrap();
    let far = projector.scale(150.0).unwrap();
    assert!(near > 1.0 && far < 1.0);

    let style = DepthStyle { node_size: 1.5, floor: 0.4, glow_threshold: Some(0.8) };
    assert!(style.radius(near) > style.radius(far));
    assert!(style.opacity(near) >= style.opacity(far));
    assert_eq!(style.opacity(0.01), 0.4);
    assert!(style.radius(0.0) > 0.0);
    assert!(style.glow(near).is_some());
    assert!(style.glow(0.5).is_none());
}

#[test]
fn rotation_preserves_length_and_quarter_turn() {
    let r = Rotation { angle_y: std::f64::consts::FRAC_PI_2, angle_x: 0.0 };
    let p = r.apply(NVec3::new(1.0, 2.0, 0.0));
    assert!((p - NVec3::new(0.0, 2.0, 1.0)).norm() < 1e-12);

    let tilted = Rotation { angle_y: 1.3, angle_x: -0.4 };
    let q = NVec3::new(3.0, -4.0, 12.0);
    assert!((tilted.apply(q).norm() - 13.0).abs() < 1e-9);
}

#[test]
fn static_sphere_never_drifts_from_its_seed() {
    let cfg = ScenarioConfig::from_yaml(
        "engine: { dimension: volume, boundary: elastic }\n\
         parameters: { count: 60, drift: 0.0, radius: 100.0 }\n\
         seeding: fibonacci_sphere\n",
    )
    .unwrap();
    let mut scenario = Scenario3D::build_scenario_3d(&cfg, 800.0, 600.0);
    for _ in 0..1000 {
        scenario.step(&PointerSnapshot::inactive());
    }
    for pt in &scenario.field.points {
        assert!(pt.displacement() < 1e-9, "point drifted by {}", pt.displacement());
    }
    assert!((scenario.rotation.angle_y - 1000.0 * 0.005).abs() < 1e-9);
}

// ==================================================================================
// Connection tests
// ==================================================================================

#[test]
fn connection_opacity_falls_with_distance() {
    let threshold = 100.0;
    let mut previous = f64::INFINITY;
    for d in [0.0, 1.0, 25.0, 50.0, 75.0, 99.0, 99.999] {
        let o = connection_opacity(d, threshold, 0.15);
        assert!(o > 0.0, "d = {d}");
        assert!(o < previous, "opacity should strictly fall, d = {d}");
        previous = o;
    }
    assert_eq!(connection_opacity(100.0, threshold, 0.15), 0.0);
    assert_eq!(connection_opacity(150.0, threshold, 0.15), 0.0);
    assert_eq!(connection_opacity(10.0, 0.0, 0.15), 0.0);
}

#[test]
fn only_close_pairs_are_connected() {
    let points = [NVec2::new(0.0, 0.0), NVec2::new(50.0, 0.0), NVec2::new(200.0, 0.0)];
    let lines = connect_2d(&points, 100.0, 0.1);
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].a, lines[0].b), (0, 1));
    assert!((lines[0].opacity - 0.05).abs() < 1e-12);

    assert!(connect_2d(&points, 0.0, 0.1).is_empty());
}

#[test]
fn depth_fades_3d_connections() {
    let projector = Projector { focal_length: 500.0, center: NVec2::zeros() };
    let rotation = Rotation::default();
    let near = [NVec3::new(0.0, 0.0, -100.0), NVec3::new(40.0, 0.0, -100.0)];
    let far = [NVec3::new(0.0, 0.0, 300.0), NVec3::new(40.0, 0.0, 300.0)];

    let project = |pts: &[NVec3]| -> Vec<_> { pts.iter().map(|p| projector.project(&rotation, *p)).collect() };
    let near_lines = connect_3d(&near, &project(&near), 80.0, 0.2, 0.3);
    let far_lines = connect_3d(&far, &project(&far), 80.0, 0.2, 0.3);

    assert_eq!(near_lines.len(), 1);
    assert_eq!(far_lines.len(), 1);
    assert!(far_lines[0].opacity > 0.0);
    assert!(near_lines[0].opacity > far_lines[0].opacity);
}

// ==================================================================================
// Seeding tests
// ==================================================================================

#[test]
fn fibonacci_points_lie_on_the_sphere() {
    let pts = fibonacci_sphere(120, 150.0);
    assert_eq!(pts.len(), 120);
    for p in &pts {
        assert!((p.norm() - 150.0).abs() < 1e-9);
    }
    assert!((pts[0].y - 150.0).abs() < 1e-9);
    assert!((pts[119].y + 150.0).abs() < 1e-9);

    let single = fibonacci_sphere(1, 10.0);
    assert!(single[0].iter().all(|c| c.is_finite()));
    assert!(fibonacci_sphere(0, 10.0).is_empty());
}

#[test]
fn cube_edge_points_stay_inside_the_sphere() {
    let pts = cube_edges(96, 220.0);
    assert_eq!(pts.len(), 96);
    for p in &pts {
        assert!(p.norm() <= 220.0 + 1e-9);
    }
}

// ==================================================================================
// Shooting star tests
// ==================================================================================

fn quiet_generator() -> TransientGenerator {
    let mut generator = TransientGenerator::new(TransientSettings::default(), 9);
    generator.stop_spawning();
    generator
}

#[test]
fn every_spawn_is_removed_once_its_lifetime_elapses() {
    let mut generator = quiet_generator();
    let n = 25;
    for i in 0..n {
        generator.spawn(1_700_000_000_000 + i / 3);
        generator.tick(Duration::from_millis(40), 1_700_000_000_000);
    }
    assert_eq!(generator.spawned(), n);
    assert_eq!(generator.pending_removals() as u64 + generator.removed(), n);
    assert_eq!(generator.pending_removals(), generator.active().len());

    generator.tick(Duration::from_secs(4), 1_700_000_004_000);
    assert!(generator.active().is_empty());
    assert_eq!(generator.pending_removals(), 0);
    assert_eq!(generator.removed(), n);
}

#[test]
fn shooting_star_ids_are_unique_within_one_millisecond() {
    let mut generator = quiet_generator();
    let ids: Vec<u64> = (0..2000).map(|_| generator.spawn(42)).collect();
    for pair in ids.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn spawn_cadence_keeps_spawns_and_removals_matched() {
    let mut generator = TransientGenerator::new(TransientSettings::default(), 3);
    let frame = Duration::from_millis(16);
    for i in 0..(60 * 30) {
        generator.tick(frame, i * 16);
        assert_eq!(generator.pending_removals(), generator.active().len());
    }
    // initial burst alone accounts for three
    assert!(generator.spawned() >= 3);

    generator.stop_spawning();
    generator.tick(Duration::from_secs(5), 60_000);
    assert!(generator.active().is_empty());
    assert_eq!(generator.removed(), generator.spawned());
}

#[test]
fn oversized_timings_never_panic_the_generator() {
    let settings = TransientSettings {
        min_interval: 1.0e20,
        max_interval: 1.0e300,
        min_duration: -1.0e308,
        max_duration: 1.0e308,
        delay: 1.0e20,
        initial_burst: 2,
    };
    let mut generator = TransientGenerator::new(settings, 11);
    for i in 0..10 {
        generator.tick(Duration::from_millis(16), u64::MAX - 3 + i % 2);
    }
    generator.spawn(u64::MAX);
    // only the first burst timer is due within 160 ms
    assert_eq!(generator.spawned(), 2);
    assert_eq!(generator.pending_removals(), generator.active().len());

    let ids: Vec<u64> = generator.active().iter().map(|e| e.id).collect();
    assert!(ids.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn clearing_drops_entities_and_their_timers() {
    let mut generator = quiet_generator();
    generator.spawn(0);
    generator.spawn(0);
    generator.clear();
    assert!(generator.active().is_empty());
    assert_eq!(generator.pending_removals(), 0);
    assert!(!generator.is_spawning());
}

#[test]
fn shooting_star_fades_in_and_out() {
    let mut generator = quiet_generator();
    generator.spawn(0);
    assert!(frame_transients(generator.active(), 1000.0, 800.0).is_empty());

    generator.tick(Duration::from_millis(500), 0);
    let e = &generator.active()[0];
    assert!(e.opacity() > 0.0);
    assert!(e.position(1000.0, 800.0).x > e.start.x / 100.0 * 1000.0);
    assert!(!frame_transients(generator.active(), 1000.0, 800.0).is_empty());
}

// ==================================================================================
// Lifecycle tests
// ==================================================================================

#[test]
fn stopping_the_loop_is_idempotent() {
    let handle = AnimationHandle::start();
    let clone = handle.clone();
    assert_eq!(handle.run_frame(|| 7), Some(7));

    assert!(clone.stop());
    assert!(!handle.stop());
    assert!(!handle.is_live());
    assert_eq!(handle.run_frame(|| 7), None);
}

#[test]
fn resize_waits_for_a_quiet_period() {
    let mut debounce = ResizeDebounce::new(Duration::from_millis(150));
    assert_eq!(debounce.poll(Duration::from_millis(500)), None);

    debounce.note(800.0, 600.0);
    assert_eq!(debounce.poll(Duration::from_millis(100)), None);
    debounce.note(1024.0, 768.0);
    assert_eq!(debounce.poll(Duration::from_millis(100)), None);
    assert_eq!(debounce.poll(Duration::from_millis(60)), Some((1024.0, 768.0)));
    assert_eq!(debounce.poll(Duration::from_millis(500)), None);

    debounce.note(10.0, 10.0);
    debounce.cancel();
    assert!(!debounce.is_pending());
    assert_eq!(debounce.poll(Duration::from_secs(1)), None);
}

#[derive(Resource, Default)]
struct FramesRun(u32);

fn count_frame(mut frames: ResMut<FramesRun>) {
    frames.0 += 1;
}

/// Headless app with the frame loop installed around a frame counter
fn frame_loop_app() -> App {
    let mut app = App::new();
    app.add_event::<WindowCloseRequested>()
        .add_event::<AppExit>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<FramesRun>()
        .insert_resource(Surface::new(800.0, 600.0, 150))
        .insert_resource(AnimationHandle::start());
    install_frame_loop(&mut app, (count_frame, count_frame).chain());
    app
}

#[test]
fn escape_stops_the_frame_in_which_it_is_pressed() {
    let mut app = frame_loop_app();
    app.update();
    assert_eq!(app.world().resource::<FramesRun>().0, 2);

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Escape);
    app.update();
    assert_eq!(app.world().resource::<FramesRun>().0, 2, "no frame system may run after stop");
    assert!(!app.world().resource::<AnimationHandle>().is_live());

    app.update();
    assert_eq!(app.world().resource::<FramesRun>().0, 2);
}

#[test]
fn close_request_stops_the_loop_once() {
    let mut app = frame_loop_app();
    let handle = app.world().resource::<AnimationHandle>().clone();
    app.world_mut().send_event(WindowCloseRequested { window: Entity::PLACEHOLDER });
    app.update();

    assert_eq!(app.world().resource::<FramesRun>().0, 0);
    assert!(!handle.is_live());
    assert!(!handle.stop());
}

// ==================================================================================
// Scenario / configuration tests
// ==================================================================================

#[test]
fn bundled_scenarios_load_and_validate() {
    for name in [
        "magnetic_stars.yaml",
        "particle_network.yaml",
        "node_graph.yaml",
        "network_sphere.yaml",
        "neural_network.yaml",
        "globe.yaml",
        "cube.yaml",
    ] {
        let cfg = ScenarioConfig::load(&scenario_path(name));
        assert!(cfg.is_ok(), "{name}: {:?}", cfg.err());
    }
}

#[test]
fn invalid_scenarios_are_rejected() {
    let err = ScenarioConfig::from_yaml("parameters: { damping: 1.5 }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "parameters.damping", .. }));

    let err = ScenarioConfig::from_yaml("style: { node_radius: [2.0, 1.0] }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = ScenarioConfig::from_yaml("engine: { boundary: sideways }").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));

    let err = ScenarioConfig::load(&scenario_path("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn non_finite_optional_values_are_rejected() {
    for (text, expected) in [
        ("parameters: { hover_rotation_speed: .nan }", "parameters.hover_rotation_speed"),
        ("parameters: { hover_rotation_speed: .inf }", "parameters.hover_rotation_speed"),
        ("style: { radius_alpha: [.nan, 0.3] }", "style.radius_alpha"),
        ("style: { radius_alpha: [0.4, -.inf] }", "style.radius_alpha"),
        ("style: { glow_threshold: .nan }", "style.glow_threshold"),
        ("style: { center_offset: [.inf, 0.0] }", "style.center_offset"),
        ("style: { center_offset: [0.0, .nan] }", "style.center_offset"),
    ] {
        match ScenarioConfig::from_yaml(text) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{text}"),
            other => panic!("{text}: expected Invalid, got {other:?}"),
        }
    }
    assert!(ScenarioConfig::from_yaml("parameters: { hover_rotation_speed: 0.02 }").is_ok());
}

#[test]
fn shooting_star_timings_must_be_reasonable() {
    for text in [
        "shooting_stars: { min_duration: 1.0e20, max_duration: 2.0e20 }",
        "shooting_stars: { min_duration: -1.0e300, max_duration: 1.0e300 }",
        "shooting_stars: { min_duration: -1.0 }",
        "shooting_stars: { delay: -0.5 }",
        "shooting_stars: { delay: .inf }",
        "shooting_stars: { max_interval: 1.0e9 }",
    ] {
        let err = ScenarioConfig::from_yaml(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{text}: {err}");
    }
    assert!(ScenarioConfig::from_yaml("shooting_stars: { max_duration: 3600.0 }").is_ok());
}

#[test]
fn narrow_viewports_use_the_mobile_count() {
    let cfg = ScenarioConfig::load(&scenario_path("magnetic_stars.yaml")).unwrap();
    let mut scenario = Scenario2D::build_scenario(&cfg, 1280.0, 720.0);
    assert_eq!(scenario.field.points.len(), 150);

    scenario.reseed(500.0, 900.0);
    assert_eq!(scenario.field.points.len(), 75);
    assert_eq!(scenario.field.frame, 0);
    for pt in &scenario.field.points {
        assert!(pt.x.x <= 500.0 && pt.x.y <= 900.0);
    }
}

#[test]
fn same_seed_same_field() {
    let cfg = ScenarioConfig::load(&scenario_path("particle_network.yaml")).unwrap();
    let a = Scenario2D::build_scenario(&cfg, 640.0, 480.0);
    let b = Scenario2D::build_scenario(&cfg, 640.0, 480.0);
    for (pa, pb) in a.field.points.iter().zip(&b.field.points) {
        assert_eq!(pa.x, pb.x);
        assert_eq!(pa.v, pb.v);
    }
}

#[test]
fn collapsed_viewport_renders_without_nan() {
    let cfg = ScenarioConfig::load(&scenario_path("particle_network.yaml")).unwrap();
    let mut scenario = Scenario2D::build_scenario(&cfg, 0.0, 0.0);
    for _ in 0..10 {
        scenario.step(&PointerSnapshot::at(0.0, 0.0));
    }
    for pt in &scenario.field.points {
        assert!(pt.x.x.is_finite() && pt.v.x.is_finite());
    }
    assert!(frame_2d(&scenario).is_empty());

    scenario.reseed(640.0, 480.0);
    let frame = frame_2d(&scenario);
    assert_eq!(frame.dots.len(), scenario.field.points.len());
    assert!(!frame.lines.is_empty());
}

#[test]
fn hovering_spins_the_neural_cloud_faster() {
    let cfg = ScenarioConfig::load(&scenario_path("neural_network.yaml")).unwrap();
    let mut idle = Scenario3D::build_scenario_3d(&cfg, 1000.0, 800.0);
    let mut hovered = Scenario3D::build_scenario_3d(&cfg, 1000.0, 800.0);

    idle.step(&PointerSnapshot::inactive());
    hovered.step(&PointerSnapshot::at(500.0, 800.0));

    assert!((idle.rotation.angle_y - 0.005).abs() < 1e-12);
    assert!((hovered.rotation.angle_y - 0.01).abs() < 1e-12);
    // pointer at the bottom edge tilts by half the configured tilt
    assert!((hovered.rotation.angle_x - 0.15).abs() < 1e-12);
    assert_eq!(idle.rotation.angle_x, 0.0);

    for _ in 0..500 {
        hovered.step(&PointerSnapshot::inactive());
    }
    for pt in &hovered.field.points {
        assert!(pt.x.norm() <= 200.0 + 1e-9);
    }
    assert!(!frame_3d(&hovered).dots.is_empty());
}
