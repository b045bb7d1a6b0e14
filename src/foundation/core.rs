use crate::foundation::error::{PostframeError, PostframeResult};

pub use kurbo::{Affine, Point, Vec2};

/// Editor canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> PostframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostframeError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn size(self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

/// Half-open timeline window `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64, // exclusive
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> PostframeResult<Self> {
        let w = Self { start, end };
        w.validate()?;
        Ok(w)
    }

    pub fn validate(self) -> PostframeResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(PostframeError::validation("time window bounds must be finite"));
        }
        if self.end <= self.start {
            return Err(PostframeError::validation("time window end must be > start"));
        }
        Ok(())
    }

    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
