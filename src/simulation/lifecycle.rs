//! Frame loop control: cancellation handle and resize debouncing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::Resource;
use bevy::time::{Timer, TimerMode};
use tracing::debug;

/// Token returned when an animation loop starts.
///
/// Every frame and listener continuation checks `is_live` before touching
/// the field. `stop` may be called any number of times; after the first
/// call no further tick runs.
#[derive(Resource, Debug, Clone)]
pub struct AnimationHandle {
    live: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn start() -> Self {
        Self { live: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Returns true only for the call that actually stopped the loop
    pub fn stop(&self) -> bool {
        let was_live = self.live.swap(false, Ordering::AcqRel);
        if was_live {
            debug!("animation loop stopped");
        }
        was_live
    }

    /// Run `frame` only if the loop is still live
    pub fn run_frame<T>(&self, frame: impl FnOnce() -> T) -> Option<T> {
        if self.is_live() {
            Some(frame())
        } else {
            None
        }
    }
}

/// Collapses a burst of resize events into one reseed once the viewport
/// has been quiet for the debounce delay.
#[derive(Debug, Clone)]
pub struct ResizeDebounce {
    timer: Timer,
    pending: Option<(f64, f64)>,
}

impl ResizeDebounce {
    pub fn new(delay: Duration) -> Self {
        let mut timer = Timer::new(delay, TimerMode::Once);
        timer.pause();
        Self { timer, pending: None }
    }

    /// Record a new viewport size and restart the quiet period
    pub fn note(&mut self, width: f64, height: f64) {
        self.pending = Some((width, height));
        self.timer.reset();
        self.timer.unpause();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance by `dt`; yields the latest size once the quiet period elapsed
    pub fn poll(&mut self, dt: Duration) -> Option<(f64, f64)> {
        self.pending?;
        self.timer.tick(dt);
        if self.timer.finished() {
            self.timer.pause();
            return self.pending.take();
        }
        None
    }

    /// Drop any pending resize (used on teardown)
    pub fn cancel(&mut self) {
        self.pending = None;
        self.timer.pause();
    }
}
