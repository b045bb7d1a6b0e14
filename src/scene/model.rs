use crate::{
    animation::config::AnimationSet,
    effects::{blend::BlendMode, compose::LegacyFilter, model::Effect},
    foundation::core::{Affine, Canvas, Point, TimeWindow, Vec2},
    foundation::error::{PostframeError, PostframeResult},
};

/// Element geometry as committed in the store.
///
/// The element's local box is `[0, width] × [0, height]`; it is placed on the canvas by
/// [`Geometry::to_affine`], which rotates and scales about the box's top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise on a y-down canvas, in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "one")]
    pub scale: f64,
    #[serde(default = "one")]
    pub opacity: f64,
}

fn one() -> f64 {
    1.0
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Local box to canvas: `T(x, y) · R(rotation) · S(scale)`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
    }

    /// Canvas position of a point given in local box coordinates.
    pub fn local_to_canvas(&self, local: Point) -> Point {
        self.to_affine() * local
    }

    /// Canvas-space center of the box.
    pub fn center(&self) -> Point {
        self.local_to_canvas(Point::new(self.width * 0.5, self.height * 0.5))
    }

    /// Canvas-space corners, clockwise from the local top-left.
    pub fn corners(&self) -> [Point; 4] {
        let a = self.to_affine();
        [
            a * Point::new(0.0, 0.0),
            a * Point::new(self.width, 0.0),
            a * Point::new(self.width, self.height),
            a * Point::new(0.0, self.height),
        ]
    }

    pub fn apply(&mut self, patch: &GeometryPatch) {
        patch.apply_to(self);
    }

    pub fn validate(&self, min_scale: f64, min_size: f64) -> PostframeResult<()> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rotation", self.rotation),
            ("scale", self.scale),
            ("opacity", self.opacity),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(PostframeError::validation(format!(
                    "geometry {name} must be finite"
                )));
            }
        }
        if self.width < min_size || self.height < min_size {
            return Err(PostframeError::validation(format!(
                "geometry width/height must be >= {min_size}"
            )));
        }
        if self.scale < min_scale {
            return Err(PostframeError::validation(format!(
                "geometry scale must be >= {min_scale}"
            )));
        }
        if !(0.0..360.0).contains(&self.rotation) {
            return Err(PostframeError::validation(
                "geometry rotation must be in [0, 360)",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PostframeError::validation(
                "geometry opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Partial geometry update handed to the store. `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeometryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl GeometryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, g: &mut Geometry) {
        if let Some(v) = self.x {
            g.x = v;
        }
        if let Some(v) = self.y {
            g.y = v;
        }
        if let Some(v) = self.width {
            g.width = v;
        }
        if let Some(v) = self.height {
            g.height = v;
        }
        if let Some(v) = self.rotation {
            g.rotation = v;
        }
        if let Some(v) = self.scale {
            g.scale = v;
        }
    }
}

/// `(id, partial patch)` pair sent to the external store.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementPatch {
    pub id: String,
    pub geometry: GeometryPatch,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size_px: Option<f64>,
    pub font_weight: Option<u16>,
    pub color: Option<String>,
    pub align: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
}

/// What an element draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text {
        content: String,
        #[serde(default)]
        style: TextStyle,
    },
    Image {
        source: String,
    },
    Shape {
        #[serde(default)]
        shape: ShapeKind,
    },
}

/// Element background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Fill {
    Solid {
        color: String,
    },
    LinearGradient {
        #[serde(default)]
        angle_deg: f64,
        stops: Vec<String>,
    },
}

impl Fill {
    /// CSS `background` value.
    pub fn to_css(&self) -> String {
        match self {
            Self::Solid { color } => color.clone(),
            Self::LinearGradient { angle_deg, stops } => {
                format!("linear-gradient({angle_deg}deg, {})", stops.join(", "))
            }
        }
    }
}

/// A positioned, time-bounded visual object on a track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Timeline placement `[start, end)` in seconds.
    pub window: TimeWindow,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Ordered effect stack.
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub legacy_filter: LegacyFilter,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default)]
    pub animation: AnimationSet,
}

impl Element {
    /// Text content for text elements.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn is_visible_at(&self, t: f64) -> bool {
        self.window.contains(t)
    }

    pub fn validate(&self) -> PostframeResult<()> {
        self.validate_with(&crate::TransformOpts::default())
    }

    pub fn validate_with(&self, opts: &crate::TransformOpts) -> PostframeResult<()> {
        if self.id.trim().is_empty() {
            return Err(PostframeError::validation("element id must be non-empty"));
        }
        self.window.validate()?;
        self.geometry
            .validate(opts.min_scale, opts.min_size_px)
            .map_err(|e| match e {
                PostframeError::Validation(msg) => {
                    PostframeError::validation(format!("element '{}': {msg}", self.id))
                }
                other => other,
            })?;
        for cfg in [&self.animation.enter, &self.animation.exit]
            .into_iter()
            .flatten()
        {
            if !cfg.duration.is_finite() || cfg.duration < 0.0 {
                return Err(PostframeError::validation(format!(
                    "element '{}': animation duration must be finite and >= 0",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// The live element list plus the canvas it is laid out on.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub canvas: Canvas,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Scene {
    #[tracing::instrument(skip(s), fields(len = s.len()))]
    pub fn from_json(s: &str) -> PostframeResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> PostframeResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(PostframeError::validation("canvas width/height must be > 0"));
        }
        let mut seen = std::collections::BTreeSet::new();
        for el in &self.elements {
            el.validate()?;
            if !seen.insert(el.id.as_str()) {
                return Err(PostframeError::validation(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
        }
        Ok(())
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements whose window contains `t`, in list (painter's) order.
    pub fn visible_at(&self, t: f64) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.is_visible_at(t))
    }

    /// Apply a store patch. Unknown ids are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        match self.element_mut(&patch.id) {
            Some(el) => {
                patch.geometry.apply_to(&mut el.geometry);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
