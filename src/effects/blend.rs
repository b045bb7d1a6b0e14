/// Blend mode used when the rendering surface composites an element.
///
/// Serialized with CSS `mix-blend-mode` names. Unknown names deserialize to
/// [`BlendMode::Normal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

const ALL: [BlendMode; 16] = [
    BlendMode::Normal,
    BlendMode::Multiply,
    BlendMode::Screen,
    BlendMode::Overlay,
    BlendMode::Darken,
    BlendMode::Lighten,
    BlendMode::ColorDodge,
    BlendMode::ColorBurn,
    BlendMode::HardLight,
    BlendMode::SoftLight,
    BlendMode::Difference,
    BlendMode::Exclusion,
    BlendMode::Hue,
    BlendMode::Saturation,
    BlendMode::Color,
    BlendMode::Luminosity,
];

impl BlendMode {
    /// Resolve a CSS blend keyword, case-insensitively. Unknown names fall back to
    /// [`BlendMode::Normal`].
    pub fn from_name(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase().replace('_', "-");
        match ALL.into_iter().find(|mode| mode.css_name() == key) {
            Some(mode) => mode,
            None => {
                tracing::debug!(blend_mode = name, "unknown blend mode, falling back to normal");
                Self::Normal
            }
        }
    }

    /// CSS keyword for this mode.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

impl From<String> for BlendMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BlendMode> for &'static str {
    fn from(mode: BlendMode) -> Self {
        mode.css_name()
    }
}
