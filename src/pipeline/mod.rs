//! Pipeline module - feature derivation, encoding, scaling and inference

pub mod artifacts;
pub mod columns;
pub mod derive;
pub mod encode;
pub mod epoch;
pub mod imputer;
pub mod loader;
pub mod predict;
pub mod record;
pub mod scaling;
pub mod schema;
pub mod steps;
pub mod variant;

pub use artifacts::{ArtifactStore, FittedArtifacts};
pub use derive::{derive_steps, encode_target};
pub use encode::{indicator_name, indicator_names, one_hot_steps, ONE_HOT_FIELDS};
pub use epoch::{epochs, year_of};
pub use imputer::{FittedImputer, ImputeStrategy, Imputer, SimpleImputer, ZeroFill};
pub use loader::*;
pub use predict::{Classifier, Prediction, Predictor};
pub use record::{rename_to_canonical, RawRecord};
pub use scaling::{MinMaxScaler, ScaleMode, ScalingStateStore};
pub use schema::ColumnSchema;
pub use steps::{column_values, run_steps, Step, Values};
pub use variant::{Encoding, FeaturePipeline, ModelArtifacts, ModelKind, SCALED_COLUMNS};
