//! Pairwise connection pass ("plexus" lines).
//!
//! Every unordered pair closer than the threshold gets one line. This is a
//! plain O(n^2) scan; fields stay in the tens to low hundreds of points.

use super::projection::Projected;
use super::states::{NVec2, NVec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Line opacity for two points `d` apart; zero at or beyond `threshold`
pub fn connection_opacity(d: f64, threshold: f64, line_alpha: f64) -> f64 {
    if !(threshold > 0.0) || !(d < threshold) {
        return 0.0;
    }
    (1.0 - d / threshold) * line_alpha
}

/// Connections between 2D points
pub fn connect_2d(points: &[NVec2], threshold: f64, line_alpha: f64) -> Vec<Connection> {
    let mut out = Vec::new();
    if !(threshold > 0.0) {
        return out;
    }
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let distance = (points[i] - points[j]).norm();
            let opacity = connection_opacity(distance, threshold, line_alpha);
            if opacity > 0.0 {
                out.push(Connection { a: i, b: j, distance, opacity });
            }
        }
    }
    out
}

/// Connections between 3D points, faded by their mean perspective scale
///
/// `points` are unrotated coordinates (distance is rotation invariant);
/// `projected[i]` must belong to `points[i]`, `None` entries are skipped.
pub fn connect_3d(
    points: &[NVec3],
    projected: &[Option<Projected>],
    threshold: f64,
    line_alpha: f64,
    depth_floor: f64,
) -> Vec<Connection> {
    let mut out = Vec::new();
    if !(threshold > 0.0) {
        return out;
    }
    for i in 0..points.len() {
        let Some(pi) = projected.get(i).copied().flatten() else { continue };
        for j in (i + 1)..points.len() {
            let Some(pj) = projected.get(j).copied().flatten() else { continue };
            let distance = (points[i] - points[j]).norm();
            let base = connection_opacity(distance, threshold, line_alpha);
            if base <= 0.0 {
                continue;
            }
            let depth = (0.5 * (pi.scale + pj.scale)).min(1.0).max(depth_floor);
            out.push(Connection { a: i, b: j, distance, opacity: base * depth });
        }
    }
    out
}
