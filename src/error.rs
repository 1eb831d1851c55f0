use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// Fewer than two layers, or a layer with no neurons.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A vector (or dataset) length disagrees with the size the network requires.
    #[error("{what} has length {got}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Backward propagation without a forward pass for the current step.
    #[error("backward pass requested without a preceding forward pass")]
    StaleState,

    #[error("learning rate must be finite and non-negative, got {0}")]
    InvalidLearningRate(f64),

    #[error("activation `{0}` is a caller-supplied function and cannot be persisted")]
    UnserializableActivation(&'static str),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
