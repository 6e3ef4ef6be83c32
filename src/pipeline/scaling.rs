//! Min-max scaling with fit/transform-only state
//!
//! A [`ScalingStateStore`] keeps one fitted [`MinMaxScaler`] per column.
//! In [`ScaleMode::Fit`] each column gets a fresh scaler that overwrites the
//! stored one; in [`ScaleMode::TransformOnly`] the stored scaler is applied
//! without being touched, and columns without one pass through unscaled.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use chrono::Utc;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::steps::{column_values, set_column, Values};
use crate::error::Result;

/// Whether scaling fits new parameters or reuses stored ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Fit a new scaler per column and store it (bulk / training data)
    Fit,
    /// Apply stored scalers only (online inference)
    TransformOnly,
}

impl ScaleMode {
    /// Default mode for a frame: more than one row fits, a single row
    /// transforms only.
    pub fn from_row_count(rows: usize) -> Self {
        if rows > 1 {
            ScaleMode::Fit
        } else {
            ScaleMode::TransformOnly
        }
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleMode::Fit => write!(f, "fit"),
            ScaleMode::TransformOnly => write!(f, "transform-only"),
        }
    }
}

/// Scaler mapping the observed `[min, max]` of a column onto `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: f64,
    pub data_max: f64,
}

impl MinMaxScaler {
    /// Fit on the non-missing values of a column. Returns `None` when there
    /// is nothing to fit on.
    pub fn fit(values: &[Option<f64>]) -> Option<Self> {
        let (min, max) = values
            .iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if min.is_finite() && max.is_finite() {
            Some(Self {
                data_min: min,
                data_max: max,
            })
        } else {
            None
        }
    }

    /// Multiplier applied to values; a constant column scales by 1
    pub fn scale(&self) -> f64 {
        let range = self.data_max - self.data_min;
        if range == 0.0 {
            1.0
        } else {
            1.0 / range
        }
    }

    /// Scale one value. Values outside the fitted range extrapolate.
    pub fn transform_value(&self, value: f64) -> f64 {
        let scale = self.scale();
        value * scale + (0.0 - self.data_min * scale)
    }

    pub fn transform(&self, values: &[Option<f64>]) -> Values {
        values
            .iter()
            .map(|v| v.map(|x| self.transform_value(x)))
            .collect()
    }
}

/// On-disk form of a scaling store
#[derive(Debug, Serialize, Deserialize)]
struct ScalerSnapshot {
    fitted_at: String,
    gradpath_version: String,
    scalers: BTreeMap<String, MinMaxScaler>,
}

/// Fitted scalers keyed by column name, shareable across threads
#[derive(Debug, Default)]
pub struct ScalingStateStore {
    scalers: RwLock<BTreeMap<String, MinMaxScaler>>,
}

impl ScalingStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already fitted scalers
    pub fn from_scalers(scalers: BTreeMap<String, MinMaxScaler>) -> Self {
        Self {
            scalers: RwLock::new(scalers),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, MinMaxScaler>> {
        self.scalers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, MinMaxScaler>> {
        self.scalers.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, column: &str) -> Option<MinMaxScaler> {
        self.read().get(column).copied()
    }

    pub fn insert(&self, column: &str, scaler: MinMaxScaler) {
        self.write().insert(column.to_string(), scaler);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the stored scalers
    pub fn snapshot(&self) -> BTreeMap<String, MinMaxScaler> {
        self.read().clone()
    }

    /// Scale the values of one column.
    ///
    /// `Fit` fits, stores (overwriting) and applies a new scaler.
    /// `TransformOnly` applies the stored scaler; without one the values are
    /// returned unchanged and a warning is logged.
    pub fn scale_column(&self, column: &str, values: &[Option<f64>], mode: ScaleMode) -> Values {
        match mode {
            ScaleMode::Fit => match MinMaxScaler::fit(values) {
                Some(scaler) => {
                    self.insert(column, scaler);
                    scaler.transform(values)
                }
                None => {
                    warn!(column, "No observed values to fit a scaler on, column left unscaled");
                    values.to_vec()
                }
            },
            ScaleMode::TransformOnly => match self.get(column) {
                Some(scaler) => scaler.transform(values),
                None => {
                    warn!(column, "Skipping column: no fitted scaler, value left unscaled");
                    values.to_vec()
                }
            },
        }
    }

    /// Scale several columns of a frame in place. Columns absent from the
    /// frame are skipped with a warning.
    ///
    /// The whole frame sees one state of the store: `Fit` swaps all new
    /// scalers in under a single write guard, `TransformOnly` resolves every
    /// scaler under a single read guard.
    pub fn scale_frame(&self, df: &mut DataFrame, columns: &[&str], mode: ScaleMode) -> Result<()> {
        let mut present: Vec<(&str, Values)> = Vec::with_capacity(columns.len());
        for &column in columns {
            if df.column(column).is_ok() {
                present.push((column, column_values(df, column)?));
            } else {
                warn!(column, "Skipping column: not present in frame");
            }
        }

        let resolved: Vec<(&str, Option<MinMaxScaler>)> = match mode {
            ScaleMode::Fit => {
                let fitted: Vec<(&str, Option<MinMaxScaler>)> = present
                    .par_iter()
                    .map(|(column, values)| (*column, MinMaxScaler::fit(values)))
                    .collect();

                let mut scalers = self.write();
                for (column, scaler) in &fitted {
                    match scaler {
                        Some(scaler) => {
                            scalers.insert(column.to_string(), *scaler);
                        }
                        None => warn!(
                            column = *column,
                            "No observed values to fit a scaler on, column left unscaled"
                        ),
                    }
                }
                fitted
            }
            ScaleMode::TransformOnly => {
                let scalers = self.read();
                let resolved: Vec<(&str, Option<MinMaxScaler>)> = present
                    .iter()
                    .map(|(column, _)| {
                        let scaler = scalers.get(*column).copied();
                        if scaler.is_none() {
                            warn!(
                                column = *column,
                                "Skipping column: no fitted scaler, value left unscaled"
                            );
                        }
                        (*column, scaler)
                    })
                    .collect();
                resolved
            }
        };

        let scaled: Vec<(&str, Values)> = present
            .into_par_iter()
            .zip(resolved.into_par_iter())
            .map(|((column, values), (_, scaler))| match scaler {
                Some(scaler) => (column, scaler.transform(&values)),
                None => (column, values),
            })
            .collect();

        for (column, values) in scaled {
            set_column(df, column, values)?;
        }
        Ok(())
    }

    /// Persist the stored scalers as JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let snapshot = ScalerSnapshot {
            fitted_at: Utc::now().to_rfc3339(),
            gradpath_version: env!("CARGO_PKG_VERSION").to_string(),
            scalers: self.snapshot(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scaler state: {}", path.display()))?;
        info!(path = %path.display(), scalers = snapshot.scalers.len(), "Saved scaler state");
        Ok(())
    }

    /// Load scalers persisted by [`ScalingStateStore::save`]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler state: {}", path.display()))?;
        let snapshot: ScalerSnapshot = serde_json::from_str(&json)
            .with_context(|| format!("Invalid scaler state: {}", path.display()))?;
        info!(
            path = %path.display(),
            scalers = snapshot.scalers.len(),
            fitted_at = %snapshot.fitted_at,
            "Loaded scaler state"
        );
        Ok(Self::from_scalers(snapshot.scalers))
    }
}
