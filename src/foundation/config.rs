//! Engine options.
//!
//! Every field has a default; a partial JSON document overrides only the fields it names.

use crate::foundation::error::PostframeResult;

/// Options consumed by the geometry transform controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformOpts {
    /// Floor applied to `scale` by corner resizes.
    pub min_scale: f64,
    /// Floor applied to `width`/`height` by edge resizes.
    pub min_size_px: f64,
    /// Step used when a rotate gesture is snapped.
    pub rotation_snap_deg: f64,
}

impl Default for TransformOpts {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            min_size_px: 20.0,
            rotation_snap_deg: 15.0,
        }
    }
}

/// Options consumed by the timeline animation evaluator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationOpts {
    /// Glyph appended while a typewriter animation is still typing.
    pub cursor_glyph: char,
    /// Slide travel, as a percentage of the element's own size.
    pub slide_distance_pct: f64,
    /// Peak bounce height in pixels.
    pub bounce_height_px: f64,
    /// Blur radius at `t_vis = 0`.
    pub blur_max_px: f64,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            cursor_glyph: '|',
            slide_distance_pct: 100.0,
            bounce_height_px: 20.0,
            blur_max_px: 20.0,
        }
    }
}

/// All engine options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    pub transform: TransformOpts,
    pub animation: AnimationOpts,
}

impl EngineOpts {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(s: &str) -> PostframeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
