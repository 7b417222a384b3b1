use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::configuration::config::ScenarioConfig;
use crate::simulation::lifecycle::AnimationHandle;
use crate::simulation::scenario::Scenario3D;
use crate::visualization::draw_list::frame_3d;
use crate::visualization::surface::{
    draw, install_frame_loop, note_resize, primary_size, settled_resize, track_pointer,
    Surface,
};

/// Entry point for projected fields (network sphere, neural cloud, globe, cube)
pub fn run_3d(cfg: ScenarioConfig) {
    let width = cfg.window.width as f64;
    let height = cfg.window.height as f64;
    let scenario = Scenario3D::build_scenario_3d(&cfg, width, height);
    info!("run_3d: starting 3D viewer with {} points", scenario.field.points.len());

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
        .add_systems(Startup, setup_3d);
    install_frame_loop(
        &mut app,
        (track_pointer, note_resize, reseed_3d, step_3d, draw_3d).chain(),
    );
    app.run();
}

/// The projection happens on the CPU, so a plain 2D camera is enough
fn setup_3d(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<Surface>,
    mut scenario: ResMut<Scenario3D>,
) {
    commands.spawn(Camera2dBundle::default());

    if let Some((width, height)) = primary_size(&windows) {
        if width != surface.width || height != surface.height {
            surface.width = width;
            surface.height = height;
            scenario.reseed(width, height);
        }
    }
}

fn reseed_3d(time: Res<Time>, mut surface: ResMut<Surface>, mut scenario: ResMut<Scenario3D>) {
    if let Some((width, height)) = settled_resize(&mut surface, time.delta()) {
        scenario.reseed(width, height);
    }
}

fn step_3d(surface: Res<Surface>, mut scenario: ResMut<Scenario3D>) {
    let pointer = surface.pointer.snapshot();
    scenario.step(&pointer);
}

fn draw_3d(mut gizmos: Gizmos, surface: Res<Surface>, scenario: Res<Scenario3D>) {
    draw(&mut gizmos, &surface, &frame_3d(&scenario));
}
