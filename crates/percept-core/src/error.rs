//! Error types for Percept

/// Result type alias using Percept's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Percept operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model failed to initialize; retry is permitted
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Precondition violation; the caller must re-submit once the input is ready
    #[error("input not ready: {0}")]
    InputNotReady(String),

    /// The model failed on valid input; not retried automatically
    #[error("inference error: {0}")]
    Inference(String),

    /// Malformed image or file; terminal for this input
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new input-not-ready error
    pub fn input_not_ready(msg: impl Into<String>) -> Self {
        Self::InputNotReady(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the same operation may succeed if retried after the
    /// condition clears (failed loads and not-yet-ready inputs).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ModelLoad(_) | Self::InputNotReady(_))
    }
}
