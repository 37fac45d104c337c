/// Result alias used across the crate.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while building, rendering or encoding an animated chart.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// Invalid option, color specification, label style or format pattern.
    #[error("config error: {0}")]
    Config(String),

    /// Input table problems (missing columns, no numeric data, ragged columns).
    #[error("data error: {0}")]
    Data(String),

    /// Failures while drawing a frame or driving the frame sequence.
    #[error("render error: {0}")]
    Render(String),

    /// Failures in the video/GIF encoders or their IO.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON document parse errors.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartError {
    /// Build a [`ChartError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ChartError::Data`].
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`ChartError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ChartError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ChartError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
