/// Convenience result alias used throughout the crate.
pub type JigsawResult<T> = Result<T, JigsawError>;

/// Top-level error type for rendering, configuration and batch loading.
#[derive(thiserror::Error, Debug)]
pub enum JigsawError {
    /// Input buffers or arguments violate an API contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration or batch descriptor is malformed.
    #[error("config error: {0}")]
    Config(String),

    /// A render step could not complete.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level failure (I/O, image encoding).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JigsawError {
    /// Build a [`JigsawError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`JigsawError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`JigsawError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`JigsawError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
