//! Systems shared by the 2D and 3D viewers: pointer and resize listeners,
//! teardown, and drawing a `DrawList` with gizmos.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::{CursorEntered, CursorLeft, CursorMoved, PrimaryWindow, WindowResized};

use crate::simulation::input::PointerState;
use crate::simulation::lifecycle::{AnimationHandle, ResizeDebounce};
use crate::simulation::states::NVec2;
use crate::simulation::transient::TransientGenerator;
use crate::visualization::draw_list::DrawList;

/// Listener-owned state of the drawing surface
#[derive(Resource)]
pub struct Surface {
    pub pointer: PointerState,
    pub debounce: ResizeDebounce,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64, debounce_ms: u64) -> Self {
        Self {
            pointer: PointerState::default(),
            debounce: ResizeDebounce::new(Duration::from_millis(debounce_ms)),
            width,
            height,
        }
    }

    /// Field coordinates (top-left origin, y down) to Bevy world space
    pub fn to_world(&self, p: NVec2) -> Vec2 {
        Vec2::new((p.x - self.width / 2.0) as f32, (self.height / 2.0 - p.y) as f32)
    }
}

/// Shooting-star overlay, present only when the scenario enables it
#[derive(Resource)]
pub struct ShootingStars(pub TransientGenerator);

/// `run_if` condition gating every frame and listener system
pub fn loop_is_live(handle: Res<AnimationHandle>) -> bool {
    handle.is_live()
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Schedule `frame` (the chained listener, tick and draw systems) behind the
/// liveness gate, with `teardown` ordered first so a stop requested this
/// frame is seen before the gate is evaluated
pub fn install_frame_loop<M>(app: &mut App, frame: impl IntoSystemConfigs<M>) -> &mut App {
    app.add_systems(Update, (teardown, frame.run_if(loop_is_live)).chain())
}

/// Pointer move / enter / leave listeners
pub fn track_pointer(
    mut surface: ResMut<Surface>,
    mut moved: EventReader<CursorMoved>,
    mut entered: EventReader<CursorEntered>,
    mut left: EventReader<CursorLeft>,
) {
    if entered.read().count() > 0 {
        surface.pointer.entered();
    }
    let (width, height) = (surface.width, surface.height);
    for ev in moved.read() {
        surface
            .pointer
            .moved(ev.position.x as f64, ev.position.y as f64, width, height);
    }
    if left.read().count() > 0 {
        surface.pointer.left();
    }
}

/// Resize listener: only records the size, the reseed waits for the debounce
pub fn note_resize(mut surface: ResMut<Surface>, mut resized: EventReader<WindowResized>) {
    if let Some(ev) = resized.read().last() {
        debug!(width = ev.width, height = ev.height, "viewport resized");
        surface.debounce.note(ev.width as f64, ev.height as f64);
    }
}

/// Polls the debounce; returns the new viewport size once it settles
pub fn settled_resize(surface: &mut Surface, dt: Duration) -> Option<(f64, f64)> {
    let (width, height) = surface.debounce.poll(dt)?;
    surface.width = width;
    surface.height = height;
    Some((width, height))
}

/// Escape or closing the window: stop the loop, drop pending work, exit.
/// Runs regardless of liveness so a second request is a no-op.
pub fn teardown(
    keys: Res<ButtonInput<KeyCode>>,
    mut close: EventReader<bevy::window::WindowCloseRequested>,
    handle: Res<AnimationHandle>,
    mut surface: ResMut<Surface>,
    stars: Option<ResMut<ShootingStars>>,
    mut exit: EventWriter<AppExit>,
) {
    let requested = keys.just_pressed(KeyCode::Escape) || close.read().count() > 0;
    if !requested {
        return;
    }
    if handle.stop() {
        surface.debounce.cancel();
        surface.pointer.left();
        if let Some(mut stars) = stars {
            stars.0.clear();
        }
        info!("animation loop torn down");
    }
    exit.send(AppExit::Success);
}

/// Draw everything in `list` for this frame
pub fn draw(gizmos: &mut Gizmos, surface: &Surface, list: &DrawList) {
    for line in &list.lines {
        gizmos.line_2d(
            surface.to_world(line.from),
            surface.to_world(line.to),
            Color::srgba(1.0, 1.0, 1.0, line.alpha as f32),
        );
    }
    for dot in &list.dots {
        gizmos.circle_2d(
            surface.to_world(dot.center),
            dot.radius.max(0.0) as f32,
            Color::srgba(1.0, 1.0, 1.0, dot.alpha as f32),
        );
    }
}

pub fn primary_size(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<(f64, f64)> {
    windows
        .get_single()
        .ok()
        .map(|w| (w.width() as f64, w.height() as f64))
}
