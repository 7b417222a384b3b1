use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::configuration::config::ScenarioConfig;
use crate::simulation::lifecycle::AnimationHandle;
use crate::simulation::scenario::{transient_settings, Scenario2D};
use crate::simulation::transient::TransientGenerator;
use crate::visualization::draw_list::{frame_2d, frame_transients};
use crate::visualization::surface::{
    draw, install_frame_loop, note_resize, now_ms, primary_size, settled_resize,
    track_pointer, ShootingStars, Surface,
};

pub fn run_2d(cfg: ScenarioConfig) {
    let width = cfg.window.width as f64;
    let height = cfg.window.height as f64;
    let scenario = Scenario2D::build_scenario(&cfg, width, height);
    info!("run_2d: starting 2D viewer with {} points", scenario.field.points.len());

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Surface::new(width, height, scenario.parameters.resize_debounce_ms))
        .insert_resource(AnimationHandle::start())
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: WindowResolution::new(cfg.window.width, cfg.window.height),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_2d);
    install_frame_loop(
        &mut app,
        (track_pointer, note_resize, reseed_2d, step_2d, draw_2d).chain(),
    );

    if let Some(stars) = &cfg.shooting_stars {
        let generator = TransientGenerator::new(transient_settings(stars), cfg.parameters.seed);
        app.insert_resource(ShootingStars(generator));
    }

    app.run();
}

fn setup_2d(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<Surface>,
    mut scenario: ResMut<Scenario2D>,
) {
    commands.spawn(Camera2dBundle::default());

    // The OS may hand us a different size than requested
    if let Some((width, height)) = primary_size(&windows) {
        if width != surface.width || height != surface.height {
            surface.width = width;
            surface.height = height;
            scenario.reseed(width, height);
        }
    }
}

/// Reseed once the debounced resize settles, before this frame's tick
fn reseed_2d(time: Res<Time>, mut surface: ResMut<Surface>, mut scenario: ResMut<Scenario2D>) {
    if let Some((width, height)) = settled_resize(&mut surface, time.delta()) {
        scenario.reseed(width, height);
    }
}

fn step_2d(
    time: Res<Time>,
    surface: Res<Surface>,
    mut scenario: ResMut<Scenario2D>,
    stars: Option<ResMut<ShootingStars>>,
) {
    let pointer = surface.pointer.snapshot();
    scenario.step(&pointer);

    if let Some(mut stars) = stars {
        stars.0.tick(time.delta(), now_ms());
    }
}

fn draw_2d(
    mut gizmos: Gizmos,
    surface: Res<Surface>,
    scenario: Res<Scenario2D>,
    stars: Option<Res<ShootingStars>>,
) {
    if let Some(stars) = stars {
        let overlay = frame_transients(stars.0.active(), surface.width, surface.height);
        draw(&mut gizmos, &surface, &overlay);
    }
    draw(&mut gizmos, &surface, &frame_2d(&scenario));
}
