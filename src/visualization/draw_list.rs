//! Per-frame draw list.
//!
//! The viewer clears the surface and draws exactly what is in here every
//! frame. Coordinates are screen px with a top-left origin.

use crate::simulation::connections::{connect_2d, connect_3d};
use crate::simulation::scenario::{Scenario2D, Scenario3D};
use crate::simulation::states::NVec2;
use crate::simulation::transient::TransientEntity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: NVec2,
    pub radius: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: NVec2,
    pub to: NVec2,
    pub alpha: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub lines: Vec<Line>, // drawn first so dots sit on top
    pub dots: Vec<Dot>,
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.dots.is_empty()
    }
}

/// Dots and connection lines for a 2D field
pub fn frame_2d(scenario: &Scenario2D) -> DrawList {
    if !(scenario.field.width > 0.0 && scenario.field.height > 0.0) {
        return DrawList::default();
    }
    let points = &scenario.field.points;
    let style = &scenario.style;

    let positions: Vec<NVec2> = points.iter().map(|p| p.x).collect();
    let lines = connect_2d(&positions, scenario.parameters.connection_distance, style.line_alpha)
        .into_iter()
        .map(|c| Line { from: positions[c.a], to: positions[c.b], alpha: c.opacity })
        .collect();

    let dots = points
        .iter()
        .map(|p| Dot { center: p.x, radius: p.radius, alpha: style.dot_alpha(p.radius) })
        .collect();

    DrawList { lines, dots }
}

/// Dots (with optional glow halos) and depth-faded lines for a 3D field
pub fn frame_3d(scenario: &Scenario3D) -> DrawList {
    let projector = scenario.projector();
    let style = &scenario.style;
    let unrotated: Vec<_> = scenario.field.points.iter().map(|p| p.x).collect();
    let projected: Vec<_> = unrotated
        .iter()
        .map(|x| projector.project(&scenario.rotation, *x))
        .collect();

    let lines = connect_3d(
        &unrotated,
        &projected,
        scenario.parameters.connection_distance,
        style.line_alpha,
        style.depth.floor,
    )
    .into_iter()
    .filter_map(|c| {
        let a = projected[c.a]?;
        let b = projected[c.b]?;
        Some(Line { from: a.screen, to: b.screen, alpha: c.opacity })
    })
    .collect();

    let mut dots = Vec::with_capacity(projected.len());
    for p in projected.iter().flatten() {
        let radius = style.depth.radius(p.scale);
        dots.push(Dot { center: p.screen, radius, alpha: style.depth.opacity(p.scale) });
        if let Some(glow) = style.depth.glow(p.scale) {
            dots.push(Dot { center: p.screen, radius: radius * 2.0, alpha: glow });
        }
    }

    DrawList { lines, dots }
}

/// Shooting stars as a streak (line) plus head (dot)
pub fn frame_transients(entities: &[TransientEntity], width: f64, height: f64) -> DrawList {
    let mut out = DrawList::default();
    for e in entities {
        let alpha = e.opacity();
        if alpha <= 0.0 {
            continue;
        }
        let head = e.position(width, height);
        let tail = head - NVec2::new(80.0, 40.0) * e.progress().min(alpha);
        out.lines.push(Line { from: tail, to: head, alpha: alpha * 0.5 });
        out.dots.push(Dot { center: head, radius: 2.0, alpha });
    }
    out
}
