use std::f64::consts::PI;

/// Easing functions used to map normalized animation progress.
///
/// Names round-trip through serde as kebab-case strings (`"ease-out"`). An unrecognized name
/// deserializes to [`Ease::EaseOut`] instead of failing, so a clip authored with an easing this
/// engine does not know still animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Ease {
    /// `x`
    Linear,
    /// Cubic ease-in, `x³`.
    EaseIn,
    /// Cubic ease-out, `1 − (1 − x)³`.
    #[default]
    EaseOut,
    /// Cubic ease-in/out.
    EaseInOut,
    /// Exponentially decaying sine overshoot that settles at 1.
    Elastic,
}

impl Ease {
    /// Resolve an easing by name. Unknown names fall back to [`Ease::EaseOut`].
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "linear" => Self::Linear,
            "easein" | "in" => Self::EaseIn,
            "easeout" | "out" => Self::EaseOut,
            "easeinout" | "inout" => Self::EaseInOut,
            "elastic" | "easeoutelastic" => Self::Elastic,
            _ => {
                tracing::debug!(ease = name, "unknown easing, falling back to ease-out");
                Self::EaseOut
            }
        }
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Elastic => "elastic",
        }
    }

    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Elastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
        }
    }
}

impl From<String> for Ease {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Ease> for &'static str {
    fn from(ease: Ease) -> Self {
        ease.name()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
