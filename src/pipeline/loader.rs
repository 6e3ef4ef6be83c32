//! Dataset loading and saving for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Path to the dataset
/// * `infer_schema_length` - Rows scanned to infer CSV column types (0 = all rows)
/// * `separator` - CSV field separator; the student dataset ships with `;`
pub fn load_dataset(path: &Path, infer_schema_length: usize, separator: u8) -> Result<DataFrame> {
    let extension = extension_of(path);

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_separator(separator)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Write a prepared frame (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = extension_of(path);
    if !matches!(extension.as_str(), "csv" | "parquet") {
        anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        );
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    if extension == "csv" {
        CsvWriter::new(&mut file)
            .finish(df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    } else {
        ParquetWriter::new(&mut file)
            .finish(df)
            .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
    }
    Ok(())
}
