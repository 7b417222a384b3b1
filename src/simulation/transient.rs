//! Shooting stars: short-lived entities on a randomized spawn cadence.
//!
//! Lifecycle per entity: spawned -> animating -> removed. Every spawn
//! schedules exactly one removal timer of `duration + delay`; the active
//! list only ever shrinks through those timers (or `clear` on teardown).

use std::time::Duration;

use bevy::time::{Timer, TimerMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::states::NVec2;

#[derive(Debug, Clone, PartialEq)]
pub struct TransientSettings {
    pub min_interval: f64, // seconds between spawns
    pub max_interval: f64,
    pub min_duration: f64, // seconds an entity animates
    pub max_duration: f64,
    pub delay: f64, // seconds before an entity starts moving
    pub initial_burst: usize, // spawns one second apart at startup
}

impl Default for TransientSettings {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 5.0,
            min_duration: 1.0,
            max_duration: 3.0,
            delay: 0.0,
            initial_burst: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransientEntity {
    pub id: u64,
    pub start: NVec2, // percent of the viewport: x in [0,100), y in [0,50)
    pub duration: f64,
    pub delay: f64,
    pub age: f64, // seconds since spawn
}

/// Path offset in px along the streak: (0,0) -> (100,50) -> (200,100)
const TRAVEL: NVec2 = NVec2::new(200.0, 100.0);

impl TransientEntity {
    pub fn lifetime(&self) -> f64 {
        self.duration + self.delay
    }

    /// Animation progress in `[0, 1]`, zero during the delay
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((self.age - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Ease-out progress
    fn eased(&self) -> f64 {
        let t = self.progress();
        1.0 - (1.0 - t) * (1.0 - t)
    }

    /// Position in px for a `width` by `height` viewport (top-left origin)
    pub fn position(&self, width: f64, height: f64) -> NVec2 {
        let origin = NVec2::new(self.start.x / 100.0 * width, self.start.y / 100.0 * height);
        origin + TRAVEL * self.eased()
    }

    /// Opacity envelope 0 -> 1 -> 1 -> 0 over the animation
    pub fn opacity(&self) -> f64 {
        let t = self.eased();
        let third = 1.0 / 3.0;
        if t < third {
            t / third
        } else if t < 2.0 * third {
            1.0
        } else {
            ((1.0 - t) / third).max(0.0)
        }
    }
}

pub struct TransientGenerator {
    settings: TransientSettings,
    rng: StdRng,
    spawn_timer: Timer,
    burst: Vec<Timer>, // one-shot timers for the initial burst
    removals: Vec<(u64, Timer)>,
    active: Vec<TransientEntity>,
    spawning: bool,
    counter: u64,
    last_id: u64,
    spawned: u64,
    removed: u64,
}

impl TransientGenerator {
    pub fn new(settings: TransientSettings, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = draw(&mut rng, settings.min_interval, settings.max_interval);
        let burst = (0..settings.initial_burst)
            .map(|i| Timer::new(Duration::from_secs(i as u64), TimerMode::Once))
            .collect();
        Self {
            settings,
            rng,
            spawn_timer: Timer::new(secs(first), TimerMode::Once),
            burst,
            removals: Vec::new(),
            active: Vec::new(),
            spawning: true,
            counter: 0,
            last_id: 0,
            spawned: 0,
            removed: 0,
        }
    }

    pub fn active(&self) -> &[TransientEntity] {
        &self.active
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn removed(&self) -> u64 {
        self.removed
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Stop the spawn cadence; already scheduled removals still run
    pub fn stop_spawning(&mut self) {
        self.spawning = false;
        self.burst.clear();
    }

    /// Teardown: drop every entity together with its removal timer
    pub fn clear(&mut self) {
        self.stop_spawning();
        self.removed += self.active.len() as u64;
        self.active.clear();
        self.removals.clear();
    }

    /// Create one entity now and schedule its removal
    pub fn spawn(&mut self, now_ms: u64) -> u64 {
        let id = now_ms
            .saturating_mul(1000)
            .saturating_add(self.counter)
            .max(self.last_id.saturating_add(1));
        self.counter = self.counter.wrapping_add(1);
        self.last_id = id;

        let s = &self.settings;
        let duration = draw(&mut self.rng, s.min_duration, s.max_duration);
        let entity = TransientEntity {
            id,
            start: NVec2::new(self.rng.gen::<f64>() * 100.0, self.rng.gen::<f64>() * 50.0),
            duration,
            delay: s.delay.max(0.0),
            age: 0.0,
        };
        trace!(id, lifetime = entity.lifetime(), "shooting star spawned");

        self.removals.push((id, Timer::new(secs(entity.lifetime()), TimerMode::Once)));
        self.active.push(entity);
        self.spawned += 1;
        id
    }

    /// Advance all timers by `dt`. Removals due in this step are applied
    /// before any new spawns, and new entities are not aged in the step
    /// that created them.
    pub fn tick(&mut self, dt: Duration, now_ms: u64) {
        let step = dt.as_secs_f64();
        for e in self.active.iter_mut() {
            e.age += step;
        }

        let mut expired = Vec::new();
        self.removals.retain_mut(|(id, timer)| {
            timer.tick(dt);
            if timer.finished() {
                expired.push(*id);
                false
            } else {
                true
            }
        });
        if !expired.is_empty() {
            let before = self.active.len();
            self.active.retain(|e| !expired.contains(&e.id));
            self.removed += (before - self.active.len()) as u64;
            debug!(count = expired.len(), "shooting stars removed");
        }

        if !self.spawning {
            return;
        }

        let mut due = 0;
        self.burst.retain_mut(|timer| {
            timer.tick(dt);
            if timer.finished() {
                due += 1;
                false
            } else {
                true
            }
        });

        self.spawn_timer.tick(dt);
        if self.spawn_timer.finished() {
            due += 1;
            let next = draw(&mut self.rng, self.settings.min_interval, self.settings.max_interval);
            self.spawn_timer = Timer::new(secs(next), TimerMode::Once);
        }

        for _ in 0..due {
            self.spawn(now_ms);
        }
    }
}

fn draw(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo && (hi - lo).is_finite() {
        lo + rng.gen::<f64>() * (hi - lo)
    } else {
        lo
    }
}

/// Seconds to a timer duration, saturating instead of panicking
fn secs(s: f64) -> Duration {
    if !(s > 0.0) {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(s).unwrap_or(Duration::MAX)
}
