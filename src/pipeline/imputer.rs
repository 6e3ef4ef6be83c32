//! Missing-value imputation applied after schema reconciliation
//!
//! The imputer is a collaborator of the pipeline: the Ordinal encoding hands
//! its reconciled frame to a fitted [`SimpleImputer`], while the OneHot
//! encoding replaces missing cells with 0 through [`ZeroFill`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::steps::{column_values, set_column};
use crate::error::Result;

/// Fills missing cells of a reconciled feature frame
pub trait Imputer: Send + Sync {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame>;
}

/// Statistic used to fill a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    #[default]
    Mean,
    Median,
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImputeStrategy::Mean => write!(f, "mean"),
            ImputeStrategy::Median => write!(f, "median"),
        }
    }
}

impl FromStr for ImputeStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            _ => Err(format!("Unknown imputation strategy: '{}'. Use 'mean' or 'median'.", s)),
        }
    }
}

/// Per-column mean or median fitted on training data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    statistics: BTreeMap<String, f64>,
}

impl SimpleImputer {
    /// Fit one statistic per column of `df`. A column with no observed
    /// values gets a statistic of 0.
    pub fn fit(df: &DataFrame, strategy: ImputeStrategy) -> Result<Self> {
        let mut statistics = BTreeMap::new();

        for name in df.get_column_names() {
            let mut observed: Vec<f64> = column_values(df, name.as_str())?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();

            let statistic = match strategy {
                ImputeStrategy::Mean => mean(&observed),
                ImputeStrategy::Median => median(&mut observed),
            };
            let statistic = statistic.unwrap_or_else(|| {
                warn!(column = %name, "Column has no observed values, imputing 0");
                0.0
            });
            statistics.insert(name.to_string(), statistic);
        }

        Ok(Self {
            strategy,
            statistics,
        })
    }

    pub fn strategy(&self) -> ImputeStrategy {
        self.strategy
    }

    pub fn statistic(&self, column: &str) -> Option<f64> {
        self.statistics.get(column).copied()
    }

    /// Number of fitted columns
    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }
}

impl Imputer for SimpleImputer {
    /// Fill missing cells of every column the imputer was fitted on;
    /// other columns are returned as they are.
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        for (name, statistic) in &self.statistics {
            if df.column(name).is_err() {
                continue;
            }
            let values = column_values(df, name)?
                .into_iter()
                .map(|v| Some(v.filter(|x| !x.is_nan()).unwrap_or(*statistic)))
                .collect();
            set_column(&mut out, name, values)?;
        }
        Ok(out)
    }
}

/// Replaces every missing cell with 0
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFill;

impl Imputer for ZeroFill {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        for name in df.get_column_names() {
            let values = column_values(df, name.as_str())?
                .into_iter()
                .map(|v| Some(v.filter(|x| !x.is_nan()).unwrap_or(0.0)))
                .collect();
            set_column(&mut out, name.as_str(), values)?;
        }
        Ok(out)
    }
}

/// Imputer persisted alongside a model's other artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedImputer {
    Simple(SimpleImputer),
    ZeroFill,
}

impl FittedImputer {
    pub fn describe(&self) -> String {
        match self {
            FittedImputer::Simple(imputer) => format!("{} ({} columns)", imputer.strategy(), imputer.len()),
            FittedImputer::ZeroFill => "zero fill".to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write imputer: {}", path.display()))?;
        info!(path = %path.display(), imputer = %self.describe(), "Saved imputer");
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read imputer: {}", path.display()))?;
        let imputer: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid imputer: {}", path.display()))?;
        Ok(imputer)
    }
}

impl Imputer for FittedImputer {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        match self {
            FittedImputer::Simple(imputer) => imputer.transform(df),
            FittedImputer::ZeroFill => ZeroFill.transform(df),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
