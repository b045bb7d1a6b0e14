use std::fmt;

use crate::{
    effects::{
        blend::BlendMode,
        compose::{FilterPrimitive, RenderHint, compose_effects, join_filters},
    },
    eval::evaluator::Evaluator,
    foundation::core::Vec2,
    scene::model::{Element, Scene},
};

/// Composed element transform, applied with a top-left transform origin.
///
/// Renders as `translate(position) rotate(..) translate(animation %) translate(animation px) scale(..)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleTransform {
    pub position_px: Vec2,
    pub rotation_deg: f64,
    pub translate_pct: Vec2,
    pub offset_px: Vec2,
    pub scale: f64,
}

impl fmt::Display for StyleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg)",
            self.position_px.x, self.position_px.y, self.rotation_deg
        )?;
        if self.translate_pct != Vec2::ZERO {
            write!(
                f,
                " translate({}%, {}%)",
                self.translate_pct.x, self.translate_pct.y
            )?;
        }
        if self.offset_px != Vec2::ZERO {
            write!(f, " translate({}px, {}px)", self.offset_px.x, self.offset_px.y)?;
        }
        write!(f, " scale({})", self.scale)
    }
}

/// Final style handed to the rendering surface for one element at one playhead time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementStyle {
    pub element_id: String,
    pub width: f64,
    pub height: f64,
    pub transform: StyleTransform,
    pub opacity: f64,
    /// Space-separated filter chain; empty when nothing contributes.
    pub filter: String,
    pub clip_path: Option<String>,
    pub blend_mode: BlendMode,
    pub background: Option<String>,
    pub text: Option<String>,
    pub hints: Vec<RenderHint>,
}

/// Merge committed geometry, the animation delta and the effect fragment for `element` at `t`.
///
/// Returns `None` when `t` lies outside the element's window.
pub fn resolve_style_with(evaluator: &Evaluator, element: &Element, t: f64) -> Option<ElementStyle> {
    if !element.is_visible_at(t) {
        return None;
    }
    let eval = evaluator.evaluate(element, t);
    let fragment = compose_effects(&element.legacy_filter, &element.effects, element.blend_mode);
    let delta = eval.delta;
    let g = &element.geometry;

    let mut filters = fragment.filters;
    if delta.blur_px > 0.0 {
        filters.push(FilterPrimitive::Blur(delta.blur_px));
    }

    Some(ElementStyle {
        element_id: element.id.clone(),
        width: g.width,
        height: g.height,
        transform: StyleTransform {
            position_px: Vec2::new(g.x, g.y),
            rotation_deg: g.rotation,
            translate_pct: delta.translate_pct,
            offset_px: delta.offset_px,
            scale: g.scale * delta.scale_mul,
        },
        opacity: (g.opacity * delta.opacity_mul).clamp(0.0, 1.0),
        filter: join_filters(&filters),
        clip_path: delta.clip_inset.map(|inset| inset.to_css()),
        blend_mode: fragment.blend_mode,
        background: element.fill.as_ref().map(|fill| fill.to_css()),
        text: eval.text,
        hints: fragment.hints,
    })
}

/// [`resolve_style_with`] using default animation options.
pub fn resolve_style(element: &Element, t: f64) -> Option<ElementStyle> {
    resolve_style_with(&Evaluator::default(), element, t)
}

/// Styles of every element visible at `t`, in painter's order.
#[tracing::instrument(skip(evaluator, scene), fields(elements = scene.elements.len()))]
pub fn resolve_scene(evaluator: &Evaluator, scene: &Scene, t: f64) -> Vec<ElementStyle> {
    scene
        .visible_at(t)
        .filter_map(|el| resolve_style_with(evaluator, el, t))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
