//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{ImputeStrategy, ModelKind};

/// Gradpath - Feature engineering for student outcome models
#[derive(Parser, Debug)]
#[command(name = "gradpath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare a labelled dataset for one model and persist its artifacts
    Prepare {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Model to prepare for: random_forest (rf), neural_network (ann)
        /// or hist_gradient_boosting (hgb)
        #[arg(short, long, value_parser = parse_model)]
        model: ModelKind,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to the input directory with a '_<model>' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding per-model artifacts
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Statistic used to fill missing cells for the tree models
        #[arg(long, default_value = "mean", value_parser = parse_strategy)]
        imputer: ImputeStrategy,

        /// CSV field separator
        #[arg(long, default_value = ";", value_parser = parse_separator)]
        separator: u8,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Transform one student record into the feature row a model expects
    Transform {
        /// JSON file holding one raw record
        #[arg(short, long)]
        record: PathBuf,

        /// Model whose artifacts to use
        #[arg(short, long, value_parser = parse_model)]
        model: ModelKind,

        /// Directory holding per-model artifacts
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Print the feature row as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Look up a categorical code (or a label) in the code book
    Lookup {
        /// Field name, e.g. course or motherQualification
        field: String,

        /// Code to translate into its label
        #[arg(required_unless_present = "label")]
        code: Option<i64>,

        /// Label to translate back into its code
        #[arg(long, conflicts_with = "code")]
        label: Option<String>,
    },

    /// Resolve the academic year from the three macroeconomic indicators
    Epoch {
        /// Unemployment rate
        unemployment: f64,

        /// Inflation rate
        #[arg(allow_hyphen_values = true)]
        inflation: f64,

        /// GDP growth
        #[arg(allow_hyphen_values = true)]
        gdp: f64,
    },
}

impl Commands {
    /// Output path for `prepare`, derived from the input when not provided.
    /// The derived path sits beside the input with a '_<model>' suffix.
    pub fn prepare_output_path(input: &Path, output: Option<&Path>, model: ModelKind) -> PathBuf {
        if let Some(output) = output {
            return output.to_path_buf();
        }
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("parquet");
        parent.join(format!("{}_{}.{}", stem, model.key(), extension))
    }
}

fn parse_model(s: &str) -> Result<ModelKind, String> {
    s.parse().map_err(|e: crate::error::PipelineError| e.to_string())
}

fn parse_strategy(s: &str) -> Result<ImputeStrategy, String> {
    s.parse()
}

/// Validator for the separator parameter
fn parse_separator(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("separator must be a single ASCII character, got '{}'", s)),
    }
}
