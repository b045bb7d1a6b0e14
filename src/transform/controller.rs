//! Pointer-gesture geometry controller.
//!
//! A gesture is opened with one of the `begin_*` methods, which hand back a
//! [`GestureSession`] value. The caller threads that value through
//! [`TransformController::on_pointer_move`] and finally [`TransformController::on_pointer_up`].
//! The controller only remembers which session is open, so a stale or foreign session is
//! ignored instead of corrupting geometry.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    foundation::config::TransformOpts,
    foundation::core::{Canvas, Point, Vec2},
    foundation::error::{PostframeError, PostframeResult},
    foundation::math::{finite_vec, local_to_screen, normalize_deg, screen_to_local, snap_deg},
    scene::model::{ElementPatch, Geometry, GeometryPatch},
    transform::snap::{NoSnap, SnapGuides, SnapQuery, SnapResolver},
};

/// Session tokens are unique across controllers, so a session handed to the wrong
/// controller is recognized as foreign.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Named resize anchor. Corners scale uniformly, edges resize one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Nw | Self::Se | Self::Sw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl FromStr for ResizeHandle {
    type Err = PostframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" => Ok(Self::N),
            "s" => Ok(Self::S),
            "e" => Ok(Self::E),
            "w" => Ok(Self::W),
            "ne" => Ok(Self::Ne),
            "nw" => Ok(Self::Nw),
            "se" => Ok(Self::Se),
            "sw" => Ok(Self::Sw),
            other => Err(PostframeError::validation(format!(
                "unknown resize handle '{other}'"
            ))),
        }
    }
}

/// Keyboard state sampled with each pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Snap rotation to fixed steps (usually Shift).
    pub snap: bool,
}

/// Controller state, `Idle` when no session is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Moving,
    Resizing,
    Rotating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Move,
    ResizeEdge {
        handle: ResizeHandle,
    },
    ResizeCorner {
        handle: ResizeHandle,
        center: Point,
        start_distance: f64,
    },
    Rotate {
        center: Point,
        start_angle_deg: f64,
    },
}

impl Gesture {
    fn state(&self) -> GestureState {
        match self {
            Self::Move => GestureState::Moving,
            Self::ResizeEdge { .. } | Self::ResizeCorner { .. } => GestureState::Resizing,
            Self::Rotate { .. } => GestureState::Rotating,
        }
    }
}

/// One in-flight gesture, from press to release.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    token: u64,
    element_id: String,
    pointer_start: Point,
    initial: Geometry,
    current: Geometry,
    gesture: Gesture,
}

impl GestureSession {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Geometry snapshot taken when the gesture began.
    pub fn initial(&self) -> &Geometry {
        &self.initial
    }

    /// Geometry after the most recent pointer move.
    pub fn current(&self) -> &Geometry {
        &self.current
    }

    pub fn handle(&self) -> Option<ResizeHandle> {
        match self.gesture {
            Gesture::ResizeEdge { handle } | Gesture::ResizeCorner { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Patch carrying exactly the fields this gesture controls.
    fn patch(&self) -> ElementPatch {
        let g = &self.current;
        let geometry = match self.gesture {
            Gesture::Move => GeometryPatch {
                x: Some(g.x),
                y: Some(g.y),
                ..GeometryPatch::default()
            },
            Gesture::ResizeEdge { .. } => GeometryPatch {
                x: Some(g.x),
                y: Some(g.y),
                width: Some(g.width),
                height: Some(g.height),
                ..GeometryPatch::default()
            },
            Gesture::ResizeCorner { .. } => GeometryPatch {
                scale: Some(g.scale),
                ..GeometryPatch::default()
            },
            Gesture::Rotate { .. } => GeometryPatch {
                rotation: Some(g.rotation),
                ..GeometryPatch::default()
            },
        };
        ElementPatch {
            id: self.element_id.clone(),
            geometry,
        }
    }
}

/// Result of one pointer move: the patch to forward to the store and the guides to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureUpdate {
    pub patch: ElementPatch,
    pub guides: SnapGuides,
}

/// Converts pointer drags into move/resize/rotate geometry updates.
pub struct TransformController<S = NoSnap> {
    canvas: Canvas,
    opts: TransformOpts,
    snap: S,
    open: Option<(u64, GestureState)>,
    guides: SnapGuides,
}

impl TransformController<NoSnap> {
    pub fn without_snap(canvas: Canvas) -> Self {
        Self::new(canvas, NoSnap)
    }
}

impl<S: SnapResolver> TransformController<S> {
    pub fn new(canvas: Canvas, snap: S) -> Self {
        Self::with_opts(canvas, snap, TransformOpts::default())
    }

    pub fn with_opts(canvas: Canvas, snap: S, opts: TransformOpts) -> Self {
        Self {
            canvas,
            opts,
            snap,
            open: None,
            guides: SnapGuides::default(),
        }
    }

    pub fn opts(&self) -> &TransformOpts {
        &self.opts
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn state(&self) -> GestureState {
        self.open.map_or(GestureState::Idle, |(_, state)| state)
    }

    /// Guides for the move in progress; empty otherwise.
    pub fn snap_guides(&self) -> SnapGuides {
        self.guides
    }

    #[tracing::instrument(skip(self, geometry))]
    pub fn begin_move(
        &mut self,
        element_id: &str,
        geometry: Geometry,
        pointer: Point,
    ) -> PostframeResult<GestureSession> {
        self.open_session(element_id, geometry, pointer, Gesture::Move)
    }

    #[tracing::instrument(skip(self, geometry))]
    pub fn begin_resize(
        &mut self,
        element_id: &str,
        geometry: Geometry,
        pointer: Point,
        handle: ResizeHandle,
    ) -> PostframeResult<GestureSession> {
        let gesture = if handle.is_corner() {
            let center = geometry.center();
            Gesture::ResizeCorner {
                handle,
                center,
                start_distance: pointer.distance(center),
            }
        } else {
            Gesture::ResizeEdge { handle }
        };
        self.open_session(element_id, geometry, pointer, gesture)
    }

    #[tracing::instrument(skip(self, geometry))]
    pub fn begin_rotate(
        &mut self,
        element_id: &str,
        geometry: Geometry,
        pointer: Point,
    ) -> PostframeResult<GestureSession> {
        let center = geometry.center();
        let gesture = Gesture::Rotate {
            center,
            start_angle_deg: angle_deg(center, pointer),
        };
        self.open_session(element_id, geometry, pointer, gesture)
    }

    /// Apply one pointer move. Returns `None` (and changes nothing) for a session that is not
    /// the open one, or for a non-finite pointer.
    pub fn on_pointer_move(
        &mut self,
        session: &mut GestureSession,
        pointer: Point,
        modifiers: Modifiers,
    ) -> Option<GestureUpdate> {
        if !self.is_open(session) {
            tracing::debug!(
                element_id = %session.element_id,
                "pointer move for a session that is not open, ignoring"
            );
            return None;
        }
        if !finite_vec(pointer.to_vec2()) {
            return None;
        }

        let delta = pointer - session.pointer_start;
        let g0 = session.initial;
        let next = match session.gesture {
            Gesture::Move => {
                let moved = self.apply_move(&g0, delta);
                self.guides = moved.1;
                moved.0
            }
            Gesture::ResizeEdge { handle } => self.apply_edge_resize(&g0, handle, delta),
            Gesture::ResizeCorner {
                center,
                start_distance,
                ..
            } => self.apply_corner_resize(&g0, pointer.distance(center), start_distance),
            Gesture::Rotate {
                center,
                start_angle_deg,
            } => self.apply_rotate(&g0, angle_deg(center, pointer) - start_angle_deg, modifiers),
        };

        session.current = next;
        Some(GestureUpdate {
            patch: session.patch(),
            guides: self.guides,
        })
    }

    /// Close the session and clear guides. Returns the last applied patch, or `None` for a
    /// session that was not open. Geometry applied during the gesture is kept as is.
    pub fn on_pointer_up(&mut self, session: GestureSession) -> Option<ElementPatch> {
        if !self.is_open(&session) {
            tracing::debug!(
                element_id = %session.element_id,
                "pointer up for a session that is not open, ignoring"
            );
            return None;
        }
        self.open = None;
        self.guides = SnapGuides::default();
        tracing::debug!(element_id = %session.element_id, state = ?session.state(), "gesture committed");
        Some(session.patch())
    }

    /// Drop any open session without committing (e.g. the host lost pointer capture).
    pub fn cancel(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!("gesture cancelled");
        }
        self.guides = SnapGuides::default();
    }

    fn is_open(&self, session: &GestureSession) -> bool {
        self.open.is_some_and(|(token, _)| token == session.token)
    }

    fn open_session(
        &mut self,
        element_id: &str,
        geometry: Geometry,
        pointer: Point,
        gesture: Gesture,
    ) -> PostframeResult<GestureSession> {
        if let Some((_, state)) = self.open {
            tracing::warn!(?state, "gesture requested while another is in progress");
            return Err(PostframeError::gesture(format!(
                "cannot start a gesture while {state:?} is in progress"
            )));
        }
        if !finite_vec(pointer.to_vec2()) {
            return Err(PostframeError::validation("pointer position must be finite"));
        }

        let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        self.open = Some((token, gesture.state()));
        self.guides = SnapGuides::default();

        Ok(GestureSession {
            token,
            element_id: element_id.to_string(),
            pointer_start: pointer,
            initial: geometry,
            current: geometry,
            gesture,
        })
    }

    fn apply_move(&self, g0: &Geometry, delta: Vec2) -> (Geometry, SnapGuides) {
        let (canvas_width, canvas_height) = self.canvas.size();
        let snapped = self.snap.resolve(SnapQuery {
            x: g0.x + delta.x,
            y: g0.y + delta.y,
            width: g0.width,
            height: g0.height,
            canvas_width,
            canvas_height,
        });
        let mut g = *g0;
        g.x = snapped.x;
        g.y = snapped.y;
        (g, snapped.guides)
    }

    fn apply_rotate(&self, g0: &Geometry, swept_deg: f64, modifiers: Modifiers) -> Geometry {
        let raw = g0.rotation + swept_deg;
        let mut g = *g0;
        g.rotation = if modifiers.snap {
            snap_deg(raw, self.opts.rotation_snap_deg)
        } else {
            normalize_deg(raw)
        };
        g
    }

    fn apply_corner_resize(&self, g0: &Geometry, distance: f64, start_distance: f64) -> Geometry {
        let factor = if start_distance > f64::EPSILON && distance.is_finite() {
            distance / start_distance
        } else {
            1.0
        };
        let mut g = *g0;
        g.scale = (g0.scale * factor).max(self.opts.min_scale);
        g
    }

    fn apply_edge_resize(&self, g0: &Geometry, handle: ResizeHandle, delta: Vec2) -> Geometry {
        // width/height are pre-scale; convert the screen delta into those units
        let scale = if g0.scale.is_finite() && g0.scale > f64::EPSILON {
            g0.scale
        } else {
            1.0
        };
        let local = screen_to_local(delta, g0.rotation) / scale;
        let (dw, dh) = match handle {
            ResizeHandle::E => (local.x, 0.0),
            ResizeHandle::W => (-local.x, 0.0),
            ResizeHandle::S => (0.0, local.y),
            ResizeHandle::N => (0.0, -local.y),
            _ => (0.0, 0.0),
        };
        // clamp the delta itself so the origin shift below stays consistent
        let dw = dw.max(self.opts.min_size_px - g0.width);
        let dh = dh.max(self.opts.min_size_px - g0.height);

        let shift_local = match handle {
            ResizeHandle::W => Vec2::new(-dw, 0.0),
            ResizeHandle::N => Vec2::new(0.0, -dh),
            _ => Vec2::ZERO,
        };
        let shift = local_to_screen(shift_local * scale, g0.rotation);

        let mut g = *g0;
        g.width = g0.width + dw;
        g.height = g0.height + dh;
        g.x = g0.x + shift.x;
        g.y = g0.y + shift.y;
        g
    }
}

fn angle_deg(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/controller.rs"]
mod tests;
