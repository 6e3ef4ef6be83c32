//! Subcommand runners

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::warn;

use crate::codebook::{code_of, label_of, tier_label, Field};
use crate::pipeline::{
    column_values, load_dataset, save_dataset, year_of, ArtifactStore, FeaturePipeline,
    FittedArtifacts, ImputeStrategy, ModelKind, RawRecord, ScaleMode, ScalingStateStore,
};
use crate::report::{count_missing, display_features, PreparationSummary};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success,
};

/// Options for a bulk `prepare` run
#[derive(Debug, Clone)]
pub struct PrepareOptions<'a> {
    pub input: &'a Path,
    pub model: ModelKind,
    pub output: &'a Path,
    pub artifacts: &'a Path,
    pub imputer: ImputeStrategy,
    pub separator: u8,
    pub infer_schema_length: usize,
}

/// Prepare a labelled dataset in fit mode, persist the model's artifacts and
/// write the prepared table.
pub fn run_prepare(opts: &PrepareOptions<'_>) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(opts.input, opts.model, opts.output, opts.artifacts);

    let pipeline = FeaturePipeline::for_model(opts.model);
    let mut summary = PreparationSummary::new(opts.model, ScaleMode::Fit);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let raw = load_dataset(opts.input, opts.infer_schema_length, opts.separator)?;
    finish_with_success(&spinner, "Dataset loaded");
    summary.rows = raw.height();
    summary.raw_columns = raw.width();
    println!("      Rows: {}", raw.height());
    println!("      Columns: {}", raw.width());
    if raw.height() <= 1 {
        warn!(rows = raw.height(), "Fitting scalers on a dataset with at most one row");
    }
    summary.load_time = step_start.elapsed();
    print_step_time(summary.load_time);

    // Step 2: Derive and encode features
    print_step_header(2, "Derive Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Running feature pipeline...");
    let scalers = ScalingStateStore::new();
    let mut prepared = pipeline.prepare_with_mode(raw, &scalers, ScaleMode::Fit)?;
    finish_with_success(&spinner, "Features derived");
    summary.scaled_columns = scalers.len();
    summary.missing_cells = count_missing(&prepared);
    if summary.missing_cells > 0 {
        print_info(&format!(
            "{} missing cell(s) left for the imputer",
            style(summary.missing_cells).yellow().bold()
        ));
    }

    let fitted = FittedArtifacts::fit(&pipeline, &prepared, scalers, opts.imputer)?;
    summary.feature_columns = fitted.schema.len();
    summary.imputer = fitted.imputer.describe();
    summary.prepare_time = step_start.elapsed();
    print_step_time(summary.prepare_time);

    // Step 3: Persist artifacts and prepared table
    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut prepared, opts.output)?;
    finish_with_success(&spinner, &format!("Saved to {}", opts.output.display()));

    let store = ArtifactStore::new(opts.artifacts);
    let dir = store.save(opts.model, &fitted)?;
    print_success(&format!("Artifacts saved to {}", dir.display()));
    summary.save_time = step_start.elapsed();
    print_step_time(summary.save_time);

    summary.display();
    print_completion();
    Ok(())
}

#[derive(Serialize)]
struct FeatureRow {
    model: ModelKind,
    columns: Vec<String>,
    values: Vec<Option<f64>>,
}

/// Turn one JSON record into the feature row `model` expects
pub fn run_transform(record_path: &Path, model: ModelKind, artifacts: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read record: {}", record_path.display()))?;
    let mut record: RawRecord = serde_json::from_str(&text)
        .with_context(|| format!("Invalid record: {}", record_path.display()))?;
    record.validate()?;
    record.target = None;

    let artifacts = ArtifactStore::new(artifacts).load(model)?;
    let raw = RawRecord::to_frame(std::slice::from_ref(&record))?;
    let features = FeaturePipeline::for_model(model).infer(raw, &artifacts)?;

    if json {
        let columns: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let values = columns
            .iter()
            .map(|name| -> crate::error::Result<Option<f64>> {
                Ok(column_values(&features, name)?.first().copied().flatten())
            })
            .collect::<crate::error::Result<Vec<Option<f64>>>>()?;
        let row = FeatureRow {
            model,
            columns,
            values,
        };
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        display_features(&features, model)?;
    }
    Ok(())
}

/// Translate a code into its label, or a label back into its code
pub fn run_lookup(field: &str, code: Option<i64>, label: Option<&str>) -> Result<()> {
    let field: Field = field.parse().map_err(anyhow::Error::msg)?;

    let code = match (code, label) {
        (_, Some(label)) => {
            let code = code_of(field, label)?;
            println!("{} {} → {}", style(field).cyan(), style(label).dim(), style(code).bold());
            code
        }
        (Some(code), None) => {
            let label = label_of(field, code)?;
            println!("{} {} → {}", style(field).cyan(), style(code).dim(), style(label).bold());
            code
        }
        (None, None) => anyhow::bail!("Provide a code or --label to look up"),
    };

    if let Some(tier) = tier_label(field, code) {
        println!("  tier: {}", style(tier).yellow());
    }
    Ok(())
}

/// Resolve the academic year of an indicator triple
pub fn run_epoch(unemployment: f64, inflation: f64, gdp: f64) -> Result<()> {
    match year_of(unemployment, inflation, gdp) {
        Some(year) => println!("{}", style(year).bold()),
        None => println!("{}", style("unknown").yellow()),
    }
    Ok(())
}
