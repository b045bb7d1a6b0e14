use crate::{
    animation::config::{AnimationConfig, AnimationSet},
    effects::{blend::BlendMode, compose::LegacyFilter, model::Effect},
    foundation::core::TimeWindow,
    foundation::error::PostframeResult,
    scene::model::{Element, ElementKind, Fill, Geometry, ShapeKind, TextStyle},
};

/// Fluent builder for [`Element`]; `build` validates the result.
pub struct ElementBuilder {
    id: String,
    kind: ElementKind,
    start: f64,
    end: f64,
    geometry: Geometry,
    fill: Option<Fill>,
    effects: Vec<Effect>,
    legacy_filter: LegacyFilter,
    blend_mode: BlendMode,
    animation: AnimationSet,
}

impl ElementBuilder {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            start: 0.0,
            end: 5.0,
            geometry: Geometry::new(0.0, 0.0, 100.0, 100.0),
            fill: None,
            effects: Vec::new(),
            legacy_filter: LegacyFilter::default(),
            blend_mode: BlendMode::Normal,
            animation: AnimationSet::default(),
        }
    }

    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementKind::Text {
                content: content.into(),
                style: TextStyle::default(),
            },
        )
    }

    pub fn image(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementKind::Image {
                source: source.into(),
            },
        )
    }

    pub fn shape(id: impl Into<String>, shape: ShapeKind) -> Self {
        Self::new(id, ElementKind::Shape { shape })
    }

    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn legacy_filter(mut self, filter: LegacyFilter) -> Self {
        self.legacy_filter = filter;
        self
    }

    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn enter(mut self, cfg: AnimationConfig) -> Self {
        self.animation.enter = Some(cfg);
        self
    }

    pub fn exit(mut self, cfg: AnimationConfig) -> Self {
        self.animation.exit = Some(cfg);
        self
    }

    pub fn build(self) -> PostframeResult<Element> {
        let el = Element {
            id: self.id,
            kind: self.kind,
            window: TimeWindow::new(self.start, self.end)?,
            geometry: self.geometry,
            fill: self.fill,
            effects: self.effects,
            legacy_filter: self.legacy_filter,
            blend_mode: self.blend_mode,
            animation: self.animation,
        };
        el.validate()?;
        Ok(el)
    }
}
