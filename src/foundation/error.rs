/// Convenience result alias used across the crate.
pub type TweenResult<T> = Result<T, TweenError>;

/// Crate error type.
#[derive(thiserror::Error, Debug)]
pub enum TweenError {
    /// Invalid settings, sizes or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The animated-image encoder failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TweenError {
    /// Build a [`TweenError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TweenError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TweenError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TweenError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
