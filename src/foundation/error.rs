/// Convenience result type used across the sign engine.
pub type SignResult<T> = Result<T, SignError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Nothing in the scheduling core is fatal: callers log these and keep the sign lit with a
/// simplified rendering.
#[derive(thiserror::Error, Debug)]
pub enum SignError {
    /// Bad or missing asset or configuration (font, image, config file value).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A lookup by name or tag found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A caller passed a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SignError {
    /// Build a [`SignError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`SignError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`SignError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`SignError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
