//! Pointer tracking for a single drawing surface
//!
//! Listener systems write into `PointerState`; once per frame the tick
//! takes a `PointerSnapshot`, a small immutable value that the update
//! functions read. One stale frame of pointer position is acceptable.

use super::states::NVec2;

/// Pointer as seen by one tick. `position` is `None` when the pointer is
/// outside the surface or was never seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    pub position: Option<NVec2>,
    pub hovered: bool,
}

impl PointerSnapshot {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self { position: Some(NVec2::new(x, y)), hovered: true }
    }

    /// Pointer offset from the viewport center, divided by the viewport size.
    /// Lies in `[-0.5, 0.5]` on each axis while inside; zero when inactive.
    pub fn normalized(&self, width: f64, height: f64) -> NVec2 {
        match self.position {
            Some(p) if width > 0.0 && height > 0.0 => NVec2::new(
                (p.x - width / 2.0) / width,
                (p.y - height / 2.0) / height,
            ),
            _ => NVec2::zeros(),
        }
    }
}

/// Mutable pointer state owned by the surface's listeners
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<NVec2>,
    hovered: bool,
}

impl PointerState {
    /// Record a pointer move given relative to the surface's top-left corner.
    /// Positions outside `[0, width] x [0, height]` mark the pointer inactive.
    pub fn moved(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if x >= 0.0 && x <= width && y >= 0.0 && y <= height {
            self.position = Some(NVec2::new(x, y));
        } else {
            self.position = None;
        }
    }

    pub fn entered(&mut self) {
        self.hovered = true;
    }

    pub fn left(&mut self) {
        self.hovered = false;
        self.position = None;
    }

    pub fn snapshot(&self) -> PointerSnapshot {
        PointerSnapshot { position: self.position, hovered: self.hovered }
    }
}
