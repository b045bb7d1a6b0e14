use crate::animation::ease::Ease;

/// Animation family applied during an enter or exit phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Fade,
    Slide,
    Zoom,
    Bounce,
    Wipe,
    Blur,
    /// Text-only; non-text elements fall back to [`AnimationKind::Fade`].
    Typewriter,
    /// Any name this engine does not recognize. Evaluates to no delta.
    #[serde(other)]
    Unsupported,
}

/// Direction for `slide` and `wipe` animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    #[default]
    Left,
    Right,
    #[serde(alias = "up")]
    Top,
    #[serde(alias = "down")]
    Bottom,
}

/// One enter or exit animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    #[serde(rename = "type")]
    pub kind: AnimationKind,
    /// Phase length in seconds.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SlideDirection>,
    #[serde(default)]
    pub easing: Ease,
}

impl AnimationConfig {
    pub fn new(kind: AnimationKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            direction: None,
            easing: Ease::default(),
        }
    }

    pub fn with_direction(mut self, direction: SlideDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Enter/exit pair attached to an element. Either side may be absent.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<AnimationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<AnimationConfig>,
}
