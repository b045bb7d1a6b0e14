use std::collections::BTreeMap;

/// Effect family shown in the editor's effect browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectCategory {
    Color,
    Blur,
    Distortion,
    Retro,
    #[serde(other)]
    Other,
}

/// Stable effect identity, assigned when the effect is created.
///
/// Independent of the user-facing label, which may be renamed or localized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectTag {
    HueRotate,
    Sepia,
    Invert,
    GaussianBlur,
    ChromaticAberration,
    Pixelate,
    Vignette,
    Glitch,
}

impl EffectTag {
    /// Infer a tag from a legacy record that only carries a display label.
    pub fn from_label(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "huerotate" => Some(Self::HueRotate),
            "sepia" => Some(Self::Sepia),
            "invert" => Some(Self::Invert),
            "gaussianblur" | "blur" => Some(Self::GaussianBlur),
            "chromaticaberration" => Some(Self::ChromaticAberration),
            "pixelate" => Some(Self::Pixelate),
            "vignette" => Some(Self::Vignette),
            "glitch" => Some(Self::Glitch),
            _ => None,
        }
    }

    pub fn category(self) -> EffectCategory {
        match self {
            Self::HueRotate | Self::Sepia | Self::Invert => EffectCategory::Color,
            Self::GaussianBlur => EffectCategory::Blur,
            Self::ChromaticAberration | Self::Pixelate => EffectCategory::Distortion,
            Self::Vignette | Self::Glitch => EffectCategory::Retro,
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Self::HueRotate => "Hue Rotate",
            Self::Sepia => "Sepia",
            Self::Invert => "Invert",
            Self::GaussianBlur => "Gaussian Blur",
            Self::ChromaticAberration => "Chromatic Aberration",
            Self::Pixelate => "Pixelate",
            Self::Vignette => "Vignette",
            Self::Glitch => "Glitch",
        }
    }
}

/// Store-facing effect record: loose `name -> value` params, as the editor persists them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub category: EffectCategory,
    pub name: String,
    #[serde(rename = "isEnabled", default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<EffectTag>,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

/// Typed effect parameters. A `None` field is a control whose stored value was missing or
/// non-numeric; composition skips it.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectKind {
    HueRotate { degrees: Option<f64> },
    Sepia { amount: Option<f64> },
    Invert { amount: Option<f64> },
    GaussianBlur { radius_px: Option<f64> },
    /// Fixed red/blue channel split; no tunable controls.
    ChromaticAberration,
    Pixelate { size_px: Option<f64> },
    Vignette { amount: Option<f64> },
    Glitch { intensity: Option<f64> },
    /// A record whose identity could not be resolved. Contributes nothing.
    Unrecognized,
}

impl EffectKind {
    pub fn tag(&self) -> Option<EffectTag> {
        Some(match self {
            Self::HueRotate { .. } => EffectTag::HueRotate,
            Self::Sepia { .. } => EffectTag::Sepia,
            Self::Invert { .. } => EffectTag::Invert,
            Self::GaussianBlur { .. } => EffectTag::GaussianBlur,
            Self::ChromaticAberration => EffectTag::ChromaticAberration,
            Self::Pixelate { .. } => EffectTag::Pixelate,
            Self::Vignette { .. } => EffectTag::Vignette,
            Self::Glitch { .. } => EffectTag::Glitch,
            Self::Unrecognized => return None,
        })
    }
}

/// One entry of an element's ordered effect stack.
///
/// Serializes through [`EffectRecord`], so the store keeps its loose format while the engine
/// matches exhaustively on [`EffectKind`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "EffectRecord", into = "EffectRecord")]
pub struct Effect {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub kind: EffectKind,
}

impl Effect {
    pub fn new(id: impl Into<String>, kind: EffectKind) -> Self {
        let name = kind
            .tag()
            .map(EffectTag::default_label)
            .unwrap_or_default()
            .to_string();
        Self {
            id: id.into(),
            name,
            enabled: true,
            kind,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Resolve a loose record into its typed form.
    pub fn from_record(rec: &EffectRecord) -> Self {
        let tag = rec.tag.or_else(|| EffectTag::from_label(&rec.name));
        let p = |keys: &[&str]| numeric_param(rec, keys);
        let kind = match tag {
            Some(EffectTag::HueRotate) => EffectKind::HueRotate {
                degrees: p(&["degrees", "angle", "value"]),
            },
            Some(EffectTag::Sepia) => EffectKind::Sepia {
                amount: p(&["amount", "value"]),
            },
            Some(EffectTag::Invert) => EffectKind::Invert {
                amount: p(&["amount", "value"]),
            },
            Some(EffectTag::GaussianBlur) => EffectKind::GaussianBlur {
                radius_px: p(&["radius", "value"]),
            },
            Some(EffectTag::ChromaticAberration) => EffectKind::ChromaticAberration,
            Some(EffectTag::Pixelate) => EffectKind::Pixelate {
                size_px: p(&["size", "value"]),
            },
            Some(EffectTag::Vignette) => EffectKind::Vignette {
                amount: p(&["amount", "intensity", "value"]),
            },
            Some(EffectTag::Glitch) => EffectKind::Glitch {
                intensity: p(&["intensity", "amount", "value"]),
            },
            None => {
                tracing::debug!(
                    effect_id = %rec.id,
                    name = %rec.name,
                    "unrecognized effect, it will not contribute"
                );
                EffectKind::Unrecognized
            }
        };
        Self {
            id: rec.id.clone(),
            name: rec.name.clone(),
            enabled: rec.is_enabled,
            kind,
        }
    }

    pub fn to_record(&self) -> EffectRecord {
        let mut params = BTreeMap::new();
        let mut put = |key: &str, v: Option<f64>| {
            if let Some(n) = v.and_then(serde_json::Number::from_f64) {
                params.insert(key.to_string(), serde_json::Value::Number(n));
            }
        };
        match self.kind {
            EffectKind::HueRotate { degrees } => put("degrees", degrees),
            EffectKind::Sepia { amount } | EffectKind::Invert { amount } => put("amount", amount),
            EffectKind::GaussianBlur { radius_px } => put("radius", radius_px),
            EffectKind::Pixelate { size_px } => put("size", size_px),
            EffectKind::Vignette { amount } => put("amount", amount),
            EffectKind::Glitch { intensity } => put("intensity", intensity),
            EffectKind::ChromaticAberration | EffectKind::Unrecognized => {}
        }
        let tag = self.kind.tag();
        EffectRecord {
            id: self.id.clone(),
            category: tag.map_or(EffectCategory::Other, EffectTag::category),
            name: self.name.clone(),
            is_enabled: self.enabled,
            tag,
            params,
        }
    }
}

impl From<EffectRecord> for Effect {
    fn from(rec: EffectRecord) -> Self {
        Self::from_record(&rec)
    }
}

impl From<Effect> for EffectRecord {
    fn from(effect: Effect) -> Self {
        effect.to_record()
    }
}

fn numeric_param(rec: &EffectRecord, keys: &[&str]) -> Option<f64> {
    for key in keys {
        let Some(v) = rec.params.get(*key) else {
            continue;
        };
        match v.as_f64().filter(|n| n.is_finite()) {
            Some(n) => return Some(n),
            None => {
                tracing::debug!(
                    effect_id = %rec.id,
                    param = *key,
                    value = %v,
                    "non-numeric effect param, skipping control"
                );
                return None;
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/effects/model.rs"]
mod tests;
