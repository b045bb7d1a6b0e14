use std::f64::consts::TAU;

use crate::{
    animation::config::{AnimationConfig, AnimationKind, SlideDirection},
    foundation::config::AnimationOpts,
    foundation::core::{TimeWindow, Vec2},
    scene::model::Element,
};

/// Which side of the clip window is animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Enter,
    Exit,
}

/// `clip-path: inset(...)` amounts, in percent of the element box.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    pub fn to_css(&self) -> String {
        format!(
            "inset({}% {}% {}% {}%)",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Per-frame visual change produced by an enter/exit animation.
///
/// The identity delta (`Default`) leaves the element exactly as committed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleDelta {
    /// Multiplies the element's opacity.
    pub opacity_mul: f64,
    /// Multiplies the element's scale.
    pub scale_mul: f64,
    /// Translation in percent of the element's own size.
    pub translate_pct: Vec2,
    /// Translation in pixels.
    pub offset_px: Vec2,
    /// Extra blur radius in pixels.
    pub blur_px: f64,
    pub clip_inset: Option<ClipInset>,
}

impl Default for StyleDelta {
    fn default() -> Self {
        Self {
            opacity_mul: 1.0,
            scale_mul: 1.0,
            translate_pct: Vec2::ZERO,
            offset_px: Vec2::ZERO,
            blur_px: 0.0,
            clip_inset: None,
        }
    }
}

impl StyleDelta {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of evaluating one element at one playhead time.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Evaluation {
    pub delta: StyleDelta,
    /// Text to display for text elements (typewriter-truncated while typing); `None` otherwise.
    pub text: Option<String>,
    /// The phase that produced `delta`, if any.
    pub phase: Option<Phase>,
}

/// Output of a single phase function.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PhaseDelta {
    phase: Phase,
    delta: StyleDelta,
    /// Typewriter reveal fraction, when the phase drives text.
    reveal: Option<f64>,
    /// Linear phase progress, before easing.
    progress: f64,
}

/// Stateless enter/exit animation evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator {
    opts: AnimationOpts,
}

impl Evaluator {
    pub fn new(opts: AnimationOpts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &AnimationOpts {
        &self.opts
    }

    /// Evaluate `element` at playhead time `t` (seconds).
    ///
    /// Pure and infallible: unknown animation kinds, degenerate durations and times outside
    /// the element window all yield the identity delta.
    pub fn evaluate(&self, element: &Element, t: f64) -> Evaluation {
        let text = element.text();
        if !t.is_finite() || !element.window.contains(t) {
            return Evaluation {
                text: text.map(str::to_string),
                ..Evaluation::default()
            };
        }

        let enter = element
            .animation
            .enter
            .as_ref()
            .and_then(|cfg| self.enter_phase(cfg, element.window, t, text.is_some()));
        let exit = element
            .animation
            .exit
            .as_ref()
            .and_then(|cfg| self.exit_phase(cfg, element.window, t, text.is_some()));

        let Some(active) = fold_phases(enter, exit) else {
            return Evaluation {
                text: text.map(str::to_string),
                ..Evaluation::default()
            };
        };

        let text = text.map(|content| match active.reveal {
            // cursor stays for the whole phase, independent of the easing curve
            Some(reveal) => typewriter_text(
                content,
                reveal,
                (active.progress < 1.0).then_some(self.opts.cursor_glyph),
            ),
            None => content.to_string(),
        });

        Evaluation {
            delta: active.delta,
            text,
            phase: Some(active.phase),
        }
    }

    fn enter_phase(
        &self,
        cfg: &AnimationConfig,
        window: TimeWindow,
        t: f64,
        is_text: bool,
    ) -> Option<PhaseDelta> {
        let raw = phase_progress(t - window.start, cfg.duration)?;
        let t_vis = cfg.easing.apply(raw);
        self.phase_delta(Phase::Enter, cfg, raw, t_vis, is_text)
    }

    fn exit_phase(
        &self,
        cfg: &AnimationConfig,
        window: TimeWindow,
        t: f64,
        is_text: bool,
    ) -> Option<PhaseDelta> {
        let duration = positive(cfg.duration)?;
        let remaining = window.end - t;
        if remaining <= 0.0 || remaining >= duration {
            return None;
        }
        let raw = 1.0 - remaining / duration;
        let t_vis = cfg.easing.apply(1.0 - raw);
        self.phase_delta(Phase::Exit, cfg, raw, t_vis, is_text)
    }

    fn phase_delta(
        &self,
        phase: Phase,
        cfg: &AnimationConfig,
        progress: f64,
        t_vis: f64,
        is_text: bool,
    ) -> Option<PhaseDelta> {
        let hidden = 1.0 - t_vis;
        let faded = StyleDelta {
            opacity_mul: t_vis,
            ..StyleDelta::default()
        };
        let mut reveal = None;

        let delta = match cfg.kind {
            AnimationKind::Fade => faded,
            AnimationKind::Slide => {
                let d = hidden * self.opts.slide_distance_pct;
                let translate_pct = match cfg.direction.unwrap_or_default() {
                    SlideDirection::Left => Vec2::new(-d, 0.0),
                    SlideDirection::Right => Vec2::new(d, 0.0),
                    SlideDirection::Top => Vec2::new(0.0, -d),
                    SlideDirection::Bottom => Vec2::new(0.0, d),
                };
                StyleDelta {
                    translate_pct,
                    ..faded
                }
            }
            AnimationKind::Zoom => StyleDelta {
                scale_mul: t_vis,
                ..faded
            },
            AnimationKind::Bounce => {
                let lift = (t_vis * TAU).sin().abs() * self.opts.bounce_height_px * hidden;
                StyleDelta {
                    offset_px: Vec2::new(0.0, lift),
                    scale_mul: t_vis,
                    ..faded
                }
            }
            AnimationKind::Wipe => {
                let cut = hidden * 100.0;
                let mut inset = ClipInset::default();
                match cfg.direction.unwrap_or_default() {
                    SlideDirection::Left => inset.right = cut,
                    SlideDirection::Right => inset.left = cut,
                    SlideDirection::Top => inset.bottom = cut,
                    SlideDirection::Bottom => inset.top = cut,
                }
                StyleDelta {
                    clip_inset: Some(inset),
                    ..StyleDelta::default()
                }
            }
            AnimationKind::Blur => StyleDelta {
                blur_px: hidden * self.opts.blur_max_px,
                ..faded
            },
            AnimationKind::Typewriter if is_text => {
                reveal = Some(t_vis);
                StyleDelta::default()
            }
            AnimationKind::Typewriter => faded,
            AnimationKind::Unsupported => {
                tracing::debug!(?phase, "unsupported animation kind, no delta");
                return None;
            }
        };

        Some(PhaseDelta {
            phase,
            delta,
            reveal,
            progress,
        })
    }
}

/// Evaluate with default [`AnimationOpts`].
pub fn evaluate(element: &Element, t: f64) -> Evaluation {
    Evaluator::default().evaluate(element, t)
}

/// Exit takes precedence when the enter and exit windows overlap.
fn fold_phases(enter: Option<PhaseDelta>, exit: Option<PhaseDelta>) -> Option<PhaseDelta> {
    match (enter, exit) {
        (Some(_), Some(exit)) => {
            tracing::trace!("enter and exit windows overlap, exit wins");
            Some(exit)
        }
        (enter, exit) => exit.or(enter),
    }
}

/// `elapsed / duration` while inside the phase window, `None` once finished.
fn phase_progress(elapsed: f64, duration: f64) -> Option<f64> {
    let duration = positive(duration)?;
    if !(0.0..duration).contains(&elapsed) {
        return None;
    }
    Some(elapsed / duration)
}

fn positive(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

fn typewriter_text(content: &str, reveal: f64, cursor: Option<char>) -> String {
    let len = content.chars().count();
    let shown = ((reveal.clamp(0.0, 1.0) * len as f64).floor() as usize).min(len);
    let mut out: String = content.chars().take(shown).collect();
    out.extend(cursor);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
