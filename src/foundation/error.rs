/// Convenience result type used across Postframe.
pub type PostframeResult<T> = Result<T, PostframeError>;

/// Top-level error taxonomy used by authoring-time engine APIs.
///
/// Per-frame and mid-gesture entry points never return these: they degrade to
/// "no visual change" instead.
#[derive(thiserror::Error, Debug)]
pub enum PostframeError {
    /// Invalid user-provided element or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A gesture could not be started (another one is still open).
    #[error("gesture error: {0}")]
    Gesture(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl PostframeError {
    /// Build a [`PostframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostframeError::Gesture`] value.
    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture(msg.into())
    }

    /// Build a [`PostframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PostframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
