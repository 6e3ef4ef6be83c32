//! Outcome prediction for single student records
//!
//! The classifier itself sits behind the [`Classifier`] trait; this module
//! validates the record, runs the model's inference path and turns class
//! probabilities into a [`Prediction`].

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::record::RawRecord;
use super::variant::{FeaturePipeline, ModelArtifacts, ModelKind};
use crate::codebook::Outcome;
use crate::error::{PipelineError, Result};

/// A trained model scoring reconciled feature frames.
///
/// Returns one row of class scores per input row, in [`Outcome::ALL`] order.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &DataFrame) -> Result<Vec<[f64; 3]>>;
}

/// Predicted outcome with per-class probabilities summing to 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub model: ModelKind,
    pub outcome: Outcome,
    pub probabilities: BTreeMap<Outcome, f64>,
}

impl Prediction {
    /// Build a prediction from raw class scores.
    ///
    /// Scores are normalized to sum to 1; rows that are negative, NaN or
    /// sum to 0 are rejected. Ties go to the lowest class index.
    pub fn from_scores(model: ModelKind, scores: [f64; 3]) -> Result<Self> {
        if scores.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(PipelineError::Inference(format!(
                "classifier returned invalid scores {:?}",
                scores
            )));
        }
        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            return Err(PipelineError::Inference(
                "classifier returned all-zero scores".to_string(),
            ));
        }

        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }

        let probabilities = Outcome::ALL
            .iter()
            .zip(scores)
            .map(|(outcome, score)| (*outcome, score / total))
            .collect();

        Ok(Self {
            model,
            outcome: Outcome::ALL[best],
            probabilities,
        })
    }

    pub fn probability(&self, outcome: Outcome) -> f64 {
        self.probabilities.get(&outcome).copied().unwrap_or(0.0)
    }
}

/// A model's feature pipeline, its artifacts and its classifier
pub struct Predictor {
    pipeline: FeaturePipeline,
    artifacts: ModelArtifacts,
    classifier: Box<dyn Classifier>,
}

impl Predictor {
    pub fn new(model: ModelKind, artifacts: ModelArtifacts, classifier: Box<dyn Classifier>) -> Self {
        Self {
            pipeline: FeaturePipeline::for_model(model),
            artifacts,
            classifier,
        }
    }

    pub fn model(&self) -> ModelKind {
        self.pipeline.model()
    }

    /// Reconciled, imputed feature row for one record, as the classifier sees it
    pub fn features(&self, record: &RawRecord) -> Result<DataFrame> {
        record.validate()?;
        let mut record = record.clone();
        record.target = None;
        let raw = RawRecord::to_frame(std::slice::from_ref(&record))?;
        self.pipeline.infer(raw, &self.artifacts)
    }

    /// Predict the outcome of one student
    pub fn predict(&self, record: &RawRecord) -> Result<Prediction> {
        let features = self.features(record)?;
        let scores = self.classifier.predict_proba(&features)?;
        let row = match scores.as_slice() {
            [row] => *row,
            rows => {
                return Err(PipelineError::Inference(format!(
                    "classifier returned {} score rows for 1 record",
                    rows.len()
                )))
            }
        };
        debug!(model = %self.model(), scores = ?row, "Classifier scores");

        let prediction = Prediction::from_scores(self.model(), row)?;
        info!(model = %self.model(), outcome = %prediction.outcome, "Predicted outcome");
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_are_normalized() {
        let p = Prediction::from_scores(ModelKind::RandomForest, [1.0, 1.0, 2.0]).unwrap();
        assert_eq!(p.outcome, Outcome::Graduate);
        assert!((p.probability(Outcome::Graduate) - 0.5).abs() < 1e-12);
        let total: f64 = p.probabilities.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_go_to_lowest_class() {
        let p = Prediction::from_scores(ModelKind::NeuralNetwork, [0.4, 0.4, 0.2]).unwrap();
        assert_eq!(p.outcome, Outcome::Dropout);
    }

    #[test]
    fn test_invalid_scores_rejected() {
        for scores in [[0.0, 0.0, 0.0], [f64::NAN, 0.5, 0.5], [-0.1, 0.6, 0.5]] {
            assert!(matches!(
                Prediction::from_scores(ModelKind::HistGradientBoosting, scores),
                Err(PipelineError::Inference(_))
            ));
        }
    }
}
