/// Crate-wide result alias.
pub type BrewResult<T> = Result<T, BrewError>;

#[derive(thiserror::Error, Debug)]
/// Error type shared by configuration, asset, and rendering layers.
pub enum BrewError {
    /// Invalid configuration or out-of-contract input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame fetch or decode failure.
    #[error("asset error: {0}")]
    Asset(String),

    /// Surface or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually carrying `anyhow` context from an IO layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrewError {
    /// Build a [`BrewError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrewError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BrewError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BrewError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
