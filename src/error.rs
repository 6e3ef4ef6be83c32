//! Error types for the feature pipeline
//!
//! Library code returns [`PipelineError`]; the binary wraps it with `anyhow`
//! context at the command boundary.

use thiserror::Error;

use crate::codebook::Field;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while encoding, deriving or reconciling features
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A categorical code that the CodeBook does not define for this field
    #[error("Unknown code {code} for field '{field}'")]
    UnknownCode { field: Field, code: i64 },

    /// A label that the CodeBook does not define for this field
    #[error("Unknown label '{label}' for field '{field}'")]
    UnknownLabel { field: Field, label: String },

    /// Model selection that does not name one of the supported models
    #[error("Invalid model selection '{0}'. Use 'random_forest', 'neural_network' or 'hist_gradient_boosting'.")]
    InvalidSelection(String),

    /// A step was handed a frame without one of the columns it consumes
    #[error("Step '{step}' requires column '{column}' which is not present")]
    MissingColumn { step: String, column: String },

    /// A step produced a different number of columns than it declared
    #[error("Step '{step}' declared {declared} output column(s) but produced {produced}")]
    StepOutput {
        step: String,
        declared: usize,
        produced: usize,
    },

    /// Classifier output could not be turned into a prediction
    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Data error: {0}")]
    Data(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
