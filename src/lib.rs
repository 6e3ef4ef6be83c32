//! Gradpath: Student Outcome Feature Engineering
//!
//! Turns raw student enrollment records into model-ready feature frames for
//! three classifiers (random forest, neural network, histogram gradient
//! boosting), with code-book lookups, derived academic and socioeconomic
//! features, and persisted scaling state for single-record inference.

pub mod cli;
pub mod codebook;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{PipelineError, Result};
