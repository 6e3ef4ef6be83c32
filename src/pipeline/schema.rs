//! Frozen training-time column schema and reconciliation against it

use std::path::Path;

use anyhow::Context;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::steps::column_values;
use crate::error::Result;

/// Ordered feature columns a trained model expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Freeze the columns of a prepared training frame, leaving out
    /// non-feature columns such as the target.
    pub fn freeze(df: &DataFrame, exclude: &[&str]) -> Self {
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| !exclude.contains(&name.as_str()))
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reindex a frame to exactly this schema's columns, in order, as `Float64`.
    ///
    /// Never fails on shape: columns the frame lacks are added filled with 0
    /// and columns the schema does not name are dropped. Missing cells inside
    /// present columns stay missing for the imputer to handle.
    pub fn reconcile(&self, df: &DataFrame) -> Result<DataFrame> {
        let height = df.height();
        let mut filled = 0usize;

        let columns = self
            .columns
            .iter()
            .map(|name| {
                let values = if df.column(name).is_ok() {
                    column_values(df, name)?
                } else {
                    filled += 1;
                    vec![Some(0.0); height]
                };
                Ok(Column::new(name.as_str().into(), values))
            })
            .collect::<Result<Vec<Column>>>()?;

        let dropped = df
            .get_column_names()
            .iter()
            .filter(|name| !self.columns.iter().any(|c| c == name.as_str()))
            .count();
        debug!(zero_filled = filled, dropped, "Reconciled frame against column schema");

        Ok(DataFrame::new(columns)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write column schema: {}", path.display()))?;
        info!(path = %path.display(), columns = self.len(), "Saved column schema");
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read column schema: {}", path.display()))?;
        let schema: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid column schema: {}", path.display()))?;
        Ok(schema)
    }
}
