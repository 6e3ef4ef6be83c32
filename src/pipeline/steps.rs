//! Named transformation steps with declared input and output columns.
//!
//! A [`Step`] states up front which columns it reads, which it appends and
//! which it removes. [`run_steps`] checks the declared inputs are present,
//! hands their values to the step, and applies the declared column changes.

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Column values as seen by a step: one `Option<f64>` per row, null = missing
pub type Values = Vec<Option<f64>>;

type ComputeFn = Box<dyn Fn(&[Values]) -> Result<Vec<Values>> + Send + Sync>;

/// A single transformation over a feature frame
pub struct Step {
    name: &'static str,
    consumes: Vec<String>,
    produces: Vec<String>,
    drops: Vec<String>,
    compute: ComputeFn,
}

impl Step {
    /// Create a step. `compute` receives the consumed columns in declaration
    /// order and must return the produced columns in declaration order.
    pub fn new<F>(name: &'static str, consumes: &[&str], produces: &[&str], compute: F) -> Self
    where
        F: Fn(&[Values]) -> Result<Vec<Values>> + Send + Sync + 'static,
    {
        Self {
            name,
            consumes: consumes.iter().map(|s| s.to_string()).collect(),
            produces: produces.iter().map(|s| s.to_string()).collect(),
            drops: Vec::new(),
            compute: Box::new(compute),
        }
    }

    /// Same as [`Step::new`] for steps whose output names are built at runtime
    pub fn with_outputs<F>(name: &'static str, consumes: &[&str], produces: Vec<String>, compute: F) -> Self
    where
        F: Fn(&[Values]) -> Result<Vec<Values>> + Send + Sync + 'static,
    {
        Self {
            name,
            consumes: consumes.iter().map(|s| s.to_string()).collect(),
            produces,
            drops: Vec::new(),
            compute: Box::new(compute),
        }
    }

    /// Remove these columns once the step's outputs are appended
    pub fn dropping(mut self, columns: &[&str]) -> Self {
        self.drops = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn consumes(&self) -> &[String] {
        &self.consumes
    }

    pub fn produces(&self) -> &[String] {
        &self.produces
    }

    pub fn drops(&self) -> &[String] {
        &self.drops
    }

    /// Apply the step to a frame in place
    pub fn apply(&self, df: &mut DataFrame) -> Result<()> {
        let inputs = self
            .consumes
            .iter()
            .map(|column| {
                column_values(df, column).map_err(|e| match e {
                    PipelineError::MissingColumn { column, .. } => PipelineError::MissingColumn {
                        step: self.name.to_string(),
                        column,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<Values>>>()?;

        let outputs = (self.compute)(&inputs)?;
        if outputs.len() != self.produces.len() {
            return Err(PipelineError::StepOutput {
                step: self.name.to_string(),
                declared: self.produces.len(),
                produced: outputs.len(),
            });
        }

        for (name, values) in self.produces.iter().zip(outputs) {
            set_column(df, name, values)?;
        }

        if !self.drops.is_empty() {
            *df = df.drop_many(self.drops.iter().map(|s| s.as_str()));
        }

        debug!(
            step = self.name,
            produced = self.produces.len(),
            dropped = self.drops.len(),
            "Applied step"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("consumes", &self.consumes)
            .field("produces", &self.produces)
            .field("drops", &self.drops)
            .finish()
    }
}

/// Run steps in order, each exactly once
pub fn run_steps(mut df: DataFrame, steps: &[Step]) -> Result<DataFrame> {
    for step in steps {
        step.apply(&mut df)?;
    }
    Ok(df)
}

/// Read a column as `Float64` values. Non-numeric entries read as null.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Values> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::MissingColumn {
            step: String::from("read"),
            column: name.to_string(),
        })?;
    let float_col = column.cast(&DataType::Float64)?;
    Ok(float_col.f64()?.into_iter().collect())
}

/// Insert or replace a `Float64` column
pub fn set_column(df: &mut DataFrame, name: &str, values: Values) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Interpret a numeric cell as an integer code
pub(crate) fn as_code(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}
