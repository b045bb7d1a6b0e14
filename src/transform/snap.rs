//! Snap resolution for move gestures.

/// Element box proposed by a move gesture, plus the canvas it lives on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapQuery {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

/// Alignment lines to display while moving. Offsets are canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SnapGuides {
    /// x of a vertical guide line.
    pub vertical: Option<f64>,
    /// y of a horizontal guide line.
    pub horizontal: Option<f64>,
}

impl SnapGuides {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    pub guides: SnapGuides,
}

impl SnapResult {
    pub fn passthrough(q: &SnapQuery) -> Self {
        Self {
            x: q.x,
            y: q.y,
            guides: SnapGuides::default(),
        }
    }
}

/// Consulted once per pointer move during a move gesture.
pub trait SnapResolver {
    fn resolve(&self, query: SnapQuery) -> SnapResult;
}

impl<F> SnapResolver for F
where
    F: Fn(SnapQuery) -> SnapResult,
{
    fn resolve(&self, query: SnapQuery) -> SnapResult {
        self(query)
    }
}

/// Never snaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSnap;

impl SnapResolver for NoSnap {
    fn resolve(&self, query: SnapQuery) -> SnapResult {
        SnapResult::passthrough(&query)
    }
}

/// Snaps the element's edges and center to the canvas edges and center lines.
///
/// Each axis is resolved independently; the closest candidate within `threshold_px` wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSnap {
    pub threshold_px: f64,
}

impl Default for CanvasSnap {
    fn default() -> Self {
        Self { threshold_px: 8.0 }
    }
}

impl CanvasSnap {
    /// Returns the snapped position and the canvas line it snapped to.
    fn snap_axis(&self, pos: f64, size: f64, extent: f64) -> (f64, Option<f64>) {
        let lines = [0.0, extent * 0.5, extent];
        let features = [0.0, size * 0.5, size];
        let mut best: Option<(f64, f64, f64)> = None;
        for line in lines {
            for feature in features {
                let dist = (pos + feature - line).abs();
                if dist <= self.threshold_px && best.is_none_or(|(d, _, _)| dist < d) {
                    best = Some((dist, line, feature));
                }
            }
        }
        match best {
            Some((_, line, feature)) => (line - feature, Some(line)),
            None => (pos, None),
        }
    }
}

impl SnapResolver for CanvasSnap {
    fn resolve(&self, q: SnapQuery) -> SnapResult {
        let (x, vertical) = self.snap_axis(q.x, q.width, q.canvas_width);
        let (y, horizontal) = self.snap_axis(q.y, q.height, q.canvas_height);
        SnapResult {
            x,
            y,
            guides: SnapGuides {
                vertical,
                horizontal,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/snap.rs"]
mod tests;
