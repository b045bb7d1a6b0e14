//! Postframe is the transform and timeline animation engine behind a 2D post/short-video editor.
//!
//! It turns editor input into style descriptions; it never paints pixels.
//!
//! # Pieces
//!
//! 1. **Gestures**: [`TransformController`] turns pointer drags into rotation-aware
//!    move/resize/rotate [`ElementPatch`]es, consulting a [`SnapResolver`] while moving.
//! 2. **Timeline**: [`evaluate`] maps `(element, playhead)` to a [`StyleDelta`] plus resolved
//!    text, from the element's enter/exit [`AnimationConfig`]s and an [`Ease`].
//! 3. **Effects**: [`compose_effects`] merges the legacy scalar filter, the ordered effect stack
//!    and the blend mode into one [`StyleFragment`].
//! 4. **Style**: [`resolve_style`] / [`resolve_scene`] merge all of the above with committed
//!    geometry into an [`ElementStyle`] for the rendering surface.
//!
//! Per-frame and mid-gesture entry points are infallible: anomalies degrade to "no visual
//! change". Only authoring-time APIs (validation, JSON loading, opening a gesture) return
//! [`PostframeResult`].
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod eval;
mod foundation;
mod scene;
mod style;
mod transform;

pub use animation::config::{AnimationConfig, AnimationKind, AnimationSet, SlideDirection};
pub use animation::ease::Ease;
pub use effects::blend::BlendMode;
pub use effects::compose::{
    FilterPrimitive, LegacyFilter, RenderHint, StyleFragment, compose_effects,
};
pub use effects::model::{Effect, EffectCategory, EffectKind, EffectRecord, EffectTag};
pub use eval::evaluator::{ClipInset, Evaluation, Evaluator, Phase, StyleDelta, evaluate};
pub use foundation::config::{AnimationOpts, EngineOpts, TransformOpts};
pub use foundation::core::{Affine, Canvas, Point, TimeWindow, Vec2};
pub use foundation::error::{PostframeError, PostframeResult};
pub use foundation::math::{local_to_screen, normalize_deg, screen_to_local, snap_deg};
pub use scene::dsl::ElementBuilder;
pub use scene::model::{
    Element, ElementKind, ElementPatch, Fill, Geometry, GeometryPatch, Scene, ShapeKind,
    TextStyle,
};
pub use style::resolve::{
    ElementStyle, StyleTransform, resolve_scene, resolve_style, resolve_style_with,
};
pub use transform::controller::{
    GestureSession, GestureState, GestureUpdate, Modifiers, ResizeHandle, TransformController,
};
pub use transform::snap::{
    CanvasSnap, NoSnap, SnapGuides, SnapQuery, SnapResolver, SnapResult,
};
