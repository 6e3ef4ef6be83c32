//! Per-model training artifacts and their on-disk layout
//!
//! Each model keeps its own directory under the artifact root:
//!
//! ```text
//! <root>/<model-key>/schema.json
//! <root>/<model-key>/imputer.json
//! <root>/<model-key>/scalers.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use polars::prelude::*;
use tracing::info;

use super::columns::TARGET_INT;
use super::imputer::{FittedImputer, ImputeStrategy, SimpleImputer};
use super::scaling::ScalingStateStore;
use super::schema::ColumnSchema;
use super::variant::{Encoding, FeaturePipeline, ModelArtifacts, ModelKind};
use crate::error::Result;

const SCHEMA_FILE: &str = "schema.json";
const IMPUTER_FILE: &str = "imputer.json";
const SCALERS_FILE: &str = "scalers.json";

/// Artifacts fitted on a prepared training frame, ready to be persisted
#[derive(Debug)]
pub struct FittedArtifacts {
    pub schema: ColumnSchema,
    pub imputer: FittedImputer,
    pub scalers: ScalingStateStore,
}

impl FittedArtifacts {
    /// Freeze the schema of `prepared` (without `targetInt`) and fit the
    /// imputer matching the pipeline's encoding.
    ///
    /// # Arguments
    /// * `pipeline` - Pipeline that produced `prepared`
    /// * `prepared` - Prepared training frame
    /// * `scalers` - Store the pipeline fitted its scalers into
    /// * `strategy` - Statistic for the Ordinal encoding's imputer
    pub fn fit(
        pipeline: &FeaturePipeline,
        prepared: &DataFrame,
        scalers: ScalingStateStore,
        strategy: ImputeStrategy,
    ) -> Result<Self> {
        let schema = ColumnSchema::freeze(prepared, &[TARGET_INT]);
        let imputer = match pipeline.encoding() {
            Encoding::Ordinal => {
                let reconciled = schema.reconcile(prepared)?;
                FittedImputer::Simple(SimpleImputer::fit(&reconciled, strategy)?)
            }
            Encoding::OneHot => FittedImputer::ZeroFill,
        };

        Ok(Self {
            schema,
            imputer,
            scalers,
        })
    }

    pub fn into_model_artifacts(self) -> ModelArtifacts {
        ModelArtifacts {
            schema: self.schema,
            imputer: Box::new(self.imputer),
            scalers: self.scalers,
        }
    }
}

/// Directory of persisted artifacts, one subdirectory per model
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn model_dir(&self, model: ModelKind) -> PathBuf {
        self.root.join(model.key())
    }

    /// True when all three artifact files exist for `model`
    pub fn contains(&self, model: ModelKind) -> bool {
        let dir = self.model_dir(model);
        [SCHEMA_FILE, IMPUTER_FILE, SCALERS_FILE]
            .iter()
            .all(|file| dir.join(file).is_file())
    }

    /// Write the artifacts of `model`, replacing any already stored
    pub fn save(&self, model: ModelKind, artifacts: &FittedArtifacts) -> anyhow::Result<PathBuf> {
        let dir = self.model_dir(model);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create artifact directory: {}", dir.display()))?;

        artifacts.schema.save(&dir.join(SCHEMA_FILE))?;
        artifacts.imputer.save(&dir.join(IMPUTER_FILE))?;
        artifacts.scalers.save(&dir.join(SCALERS_FILE))?;

        info!(model = %model, dir = %dir.display(), "Saved model artifacts");
        Ok(dir)
    }

    /// Load the artifacts of `model` for inference
    pub fn load(&self, model: ModelKind) -> anyhow::Result<ModelArtifacts> {
        let dir = self.model_dir(model);
        if !dir.is_dir() {
            anyhow::bail!(
                "No artifacts for model '{}' in {}. Run 'gradpath prepare' first.",
                model,
                self.root.display()
            );
        }

        let schema = ColumnSchema::load(&dir.join(SCHEMA_FILE))?;
        let imputer = FittedImputer::load(&dir.join(IMPUTER_FILE))?;
        let scalers = ScalingStateStore::load(&dir.join(SCALERS_FILE))?;

        info!(
            model = %model,
            columns = schema.len(),
            scalers = scalers.len(),
            "Loaded model artifacts"
        );
        Ok(ModelArtifacts {
            schema,
            imputer: Box::new(imputer),
            scalers,
        })
    }
}
