use std::fmt;

use crate::effects::{
    blend::BlendMode,
    model::{Effect, EffectKind},
};

/// Red/blue split used by chromatic aberration, in pixels.
const CHANNEL_SPLIT_PX: f64 = 2.0;

/// Scalar colour adjustments from the editor's original filter panel.
///
/// Percent fields are neutral at 100 (grayscale at 0); `blur` is in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LegacyFilter {
    pub brightness: f64,
    pub contrast: f64,
    pub saturate: f64,
    pub grayscale: f64,
    pub blur: f64,
}

impl Default for LegacyFilter {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturate: 100.0,
            grayscale: 0.0,
            blur: 0.0,
        }
    }
}

impl LegacyFilter {
    /// Non-neutral fields, in their fixed order.
    fn primitives(&self) -> Vec<FilterPrimitive> {
        let fields: [(f64, f64, fn(f64) -> FilterPrimitive); 5] = [
            (self.brightness, 100.0, FilterPrimitive::Brightness),
            (self.contrast, 100.0, FilterPrimitive::Contrast),
            (self.saturate, 100.0, FilterPrimitive::Saturate),
            (self.grayscale, 0.0, FilterPrimitive::Grayscale),
            (self.blur, 0.0, FilterPrimitive::Blur),
        ];
        fields
            .into_iter()
            .filter(|&(v, neutral, _)| v.is_finite() && v != neutral)
            .map(|(v, _, make)| make(v))
            .collect()
    }
}

/// One entry of the composed filter chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterPrimitive {
    /// Percent.
    Brightness(f64),
    /// Percent.
    Contrast(f64),
    /// Percent.
    Saturate(f64),
    /// Percent.
    Grayscale(f64),
    /// Pixels.
    Blur(f64),
    /// Degrees.
    HueRotate(f64),
    /// Percent.
    Sepia(f64),
    /// Percent.
    Invert(f64),
    /// Screen-combined channel offsets: red shifted by `red_dx`, blue by `blue_dx`.
    ChannelOffset { red_dx: f64, blue_dx: f64 },
}

impl fmt::Display for FilterPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Brightness(v) => write!(f, "brightness({v}%)"),
            Self::Contrast(v) => write!(f, "contrast({v}%)"),
            Self::Saturate(v) => write!(f, "saturate({v}%)"),
            Self::Grayscale(v) => write!(f, "grayscale({v}%)"),
            Self::Blur(v) => write!(f, "blur({v}px)"),
            Self::HueRotate(v) => write!(f, "hue-rotate({v}deg)"),
            Self::Sepia(v) => write!(f, "sepia({v}%)"),
            Self::Invert(v) => write!(f, "invert({v}%)"),
            Self::ChannelOffset { red_dx, blue_dx } => write!(
                f,
                "drop-shadow({red_dx}px 0 0 rgba(255, 0, 0, 0.5)) \
                 drop-shadow({blue_dx}px 0 0 rgba(0, 0, 255, 0.5))"
            ),
        }
    }
}

/// Effects that cannot be expressed as a single filter primitive. The rendering surface
/// decides how to realize them (overlay, pixel shader, duplicated layers).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RenderHint {
    Pixelate { size_px: f64 },
    Vignette { amount: f64 },
    Glitch { intensity: f64 },
}

/// Output of [`compose_effects`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleFragment {
    /// Ordered filter chain: legacy fields first, then the effect stack in list order.
    pub filters: Vec<FilterPrimitive>,
    pub blend_mode: BlendMode,
    pub hints: Vec<RenderHint>,
}

impl StyleFragment {
    /// Space-separated filter chain; empty when nothing contributes.
    pub fn filter_chain(&self) -> String {
        join_filters(&self.filters)
    }
}

pub(crate) fn join_filters(filters: &[FilterPrimitive]) -> String {
    filters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge the legacy scalar filter, the ordered effect stack and the blend mode.
///
/// Disabled effects and controls whose value is missing are skipped.
pub fn compose_effects(
    legacy: &LegacyFilter,
    effects: &[Effect],
    blend_mode: BlendMode,
) -> StyleFragment {
    let mut filters = legacy.primitives();
    let mut hints = Vec::new();

    for effect in effects.iter().filter(|e| e.enabled) {
        match effect.kind {
            EffectKind::HueRotate { degrees } => {
                filters.extend(degrees.map(FilterPrimitive::HueRotate));
            }
            EffectKind::Sepia { amount } => filters.extend(amount.map(FilterPrimitive::Sepia)),
            EffectKind::Invert { amount } => filters.extend(amount.map(FilterPrimitive::Invert)),
            EffectKind::GaussianBlur { radius_px } => {
                filters.extend(radius_px.map(FilterPrimitive::Blur));
            }
            EffectKind::ChromaticAberration => filters.push(FilterPrimitive::ChannelOffset {
                red_dx: CHANNEL_SPLIT_PX,
                blue_dx: -CHANNEL_SPLIT_PX,
            }),
            EffectKind::Pixelate { size_px } => {
                hints.extend(size_px.map(|size_px| RenderHint::Pixelate { size_px }));
            }
            EffectKind::Vignette { amount } => {
                hints.extend(amount.map(|amount| RenderHint::Vignette { amount }));
            }
            EffectKind::Glitch { intensity } => {
                hints.extend(intensity.map(|intensity| RenderHint::Glitch { intensity }));
            }
            EffectKind::Unrecognized => {}
        }
    }

    StyleFragment {
        filters,
        blend_mode,
        hints,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/compose.rs"]
mod tests;
