//! Model-specific feature pipelines
//!
//! Three models are served. The random forest and the histogram gradient
//! boosting model share the Ordinal encoding (raw codes and ordinal tiers, no
//! scaling) and differ only in their artifacts. The neural network uses the
//! OneHot encoding: nominal fields expanded to indicators, numeric columns
//! min-max scaled through the [`ScalingStateStore`].

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::*;
use super::derive::{derive_steps, encode_target};
use super::encode::one_hot_steps;
use super::imputer::Imputer;
use super::record::rename_to_canonical;
use super::scaling::{ScaleMode, ScalingStateStore};
use super::schema::ColumnSchema;
use super::steps::{run_steps, Step};
use crate::error::{PipelineError, Result};

/// Numeric columns the OneHot encoding passes through the scaling store
pub const SCALED_COLUMNS: [&str; 34] = [
    APPLICATION_ORDER_SHIFTED,
    PREVIOUS_QUALIFICATION_ORDINAL,
    PREVIOUS_QUALIFICATION_GRADE,
    MOTHER_QUALIFICATION_ORDINAL,
    FATHER_QUALIFICATION_ORDINAL,
    AVG_PARENTAL_EDUCATION,
    PARENTAL_EDU_DISPARITY,
    MOTHER_OCCUPATION_ORDINAL,
    FATHER_OCCUPATION_ORDINAL,
    AVG_PARENTAL_INCOME,
    PARENTAL_INCOME_DISPARITY,
    ADMISSION_GRADE,
    AGE_AT_ENROLLMENT,
    CU_1ST_CREDITED,
    CU_1ST_ENROLLED,
    CU_1ST_EVALUATIONS,
    CU_1ST_APPROVED,
    CU_1ST_GRADE,
    CU_1ST_WITHOUT_EVALUATIONS,
    CU_2ND_CREDITED,
    CU_2ND_ENROLLED,
    CU_2ND_EVALUATIONS,
    CU_2ND_APPROVED,
    CU_2ND_GRADE,
    CU_2ND_WITHOUT_EVALUATIONS,
    PERFORMANCE_INDEX_1ST,
    PERFORMANCE_INDEX_2ND,
    CREDIT_LOAD_REDUCTION_1ST,
    CREDIT_LOAD_REDUCTION_2ND,
    ECONOMIC_STRESS_INDEX,
    YEAR,
    UNEMPLOYMENT_RATE,
    INFLATION_RATE,
    GDP,
];

/// How categorical fields are turned into numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// Raw codes and ordinal tiers, unscaled; missing cells go to the imputer
    Ordinal,
    /// Indicator columns plus min-max scaling; missing cells become 0
    OneHot,
}

/// The downstream classifier a request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    RandomForest,
    NeuralNetwork,
    HistGradientBoosting,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::RandomForest,
        ModelKind::NeuralNetwork,
        ModelKind::HistGradientBoosting,
    ];

    /// Stable key addressing this model's artifacts
    pub fn key(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::NeuralNetwork => "neural_network",
            ModelKind::HistGradientBoosting => "hist_gradient_boosting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "Random Forest",
            ModelKind::NeuralNetwork => "Neural Network",
            ModelKind::HistGradientBoosting => "Histogram Gradient Boosting",
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            ModelKind::RandomForest | ModelKind::HistGradientBoosting => Encoding::Ordinal,
            ModelKind::NeuralNetwork => Encoding::OneHot,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ModelKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "random_forest" | "rf" => Ok(ModelKind::RandomForest),
            "neural_network" | "ann" | "mlp" => Ok(ModelKind::NeuralNetwork),
            "hist_gradient_boosting" | "histogram_gradient_boosting" | "hgb" => {
                Ok(ModelKind::HistGradientBoosting)
            }
            _ => Err(PipelineError::InvalidSelection(s.to_string())),
        }
    }
}

/// Artifacts a trained model was frozen with
pub struct ModelArtifacts {
    pub schema: ColumnSchema,
    pub imputer: Box<dyn Imputer>,
    pub scalers: ScalingStateStore,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("schema", &self.schema)
            .field("scalers", &self.scalers)
            .finish_non_exhaustive()
    }
}

/// Feature pipeline for one model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturePipeline {
    model: ModelKind,
}

impl FeaturePipeline {
    pub fn for_model(model: ModelKind) -> Self {
        Self { model }
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn encoding(&self) -> Encoding {
        self.model.encoding()
    }

    /// Every step the pipeline runs, in order. The deriver steps appear
    /// exactly once.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = match self.encoding() {
            Encoding::Ordinal => Vec::new(),
            Encoding::OneHot => one_hot_steps(),
        };
        steps.extend(derive_steps());
        steps
    }

    /// Columns scaled by this pipeline (empty for the Ordinal encoding)
    pub fn scaled_columns(&self) -> Vec<&'static str> {
        match self.encoding() {
            Encoding::Ordinal => Vec::new(),
            Encoding::OneHot => SCALED_COLUMNS.to_vec(),
        }
    }

    /// Prepare a raw frame, choosing the scaling mode from its row count
    /// (more than one row fits, a single row transforms only).
    pub fn prepare(&self, raw: DataFrame, scalers: &ScalingStateStore) -> Result<DataFrame> {
        let mode = ScaleMode::from_row_count(raw.height());
        self.prepare_with_mode(raw, scalers, mode)
    }

    /// Prepare a raw frame with an explicit scaling mode. The Ordinal
    /// encoding never touches `scalers`.
    pub fn prepare_with_mode(
        &self,
        raw: DataFrame,
        scalers: &ScalingStateStore,
        mode: ScaleMode,
    ) -> Result<DataFrame> {
        let df = rename_to_canonical(raw)?;
        let mut df = run_steps(df, &self.steps())?;
        encode_target(&mut df)?;

        if self.encoding() == Encoding::OneHot {
            scalers.scale_frame(&mut df, &self.scaled_columns(), mode)?;
        }

        debug!(
            model = %self.model,
            rows = df.height(),
            columns = df.width(),
            mode = %mode,
            "Prepared feature frame"
        );
        Ok(df)
    }

    /// Single-sample inference path: prepare in transform-only mode,
    /// reconcile against the frozen schema, then fill missing cells.
    pub fn infer(&self, raw: DataFrame, artifacts: &ModelArtifacts) -> Result<DataFrame> {
        let prepared = self.prepare_with_mode(raw, &artifacts.scalers, ScaleMode::TransformOnly)?;
        let reconciled = artifacts.schema.reconcile(&prepared)?;
        artifacts.imputer.transform(&reconciled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("rf".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert_eq!("Neural Network".parse::<ModelKind>().unwrap(), ModelKind::NeuralNetwork);
        assert_eq!(
            "hist-gradient-boosting".parse::<ModelKind>().unwrap(),
            ModelKind::HistGradientBoosting
        );
        assert!(matches!(
            "svm".parse::<ModelKind>(),
            Err(PipelineError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_tree_models_share_ordinal_encoding() {
        assert_eq!(ModelKind::RandomForest.encoding(), Encoding::Ordinal);
        assert_eq!(ModelKind::HistGradientBoosting.encoding(), Encoding::Ordinal);
        assert_eq!(ModelKind::NeuralNetwork.encoding(), Encoding::OneHot);
    }

    #[test]
    fn test_deriver_steps_appear_once() {
        for model in ModelKind::ALL {
            let steps = FeaturePipeline::for_model(model).steps();
            let derive_count = derive_steps().len();
            let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
            for step in derive_steps() {
                assert_eq!(
                    names.iter().filter(|n| **n == step.name()).count(),
                    1,
                    "{} should run once for {}",
                    step.name(),
                    model
                );
            }
            assert!(steps.len() >= derive_count);
        }
    }

    #[test]
    fn test_scaled_columns_include_gdp_for_one_hot_only() {
        let ann = FeaturePipeline::for_model(ModelKind::NeuralNetwork).scaled_columns();
        assert_eq!(ann.len(), 34);
        assert!(ann.contains(&GDP));
        assert!(FeaturePipeline::for_model(ModelKind::RandomForest)
            .scaled_columns()
            .is_empty());
    }
}
