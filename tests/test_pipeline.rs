//! End-to-end tests for the model feature pipelines

#[path = "common/mod.rs"]
mod common;

use common::*;
use gradpath::pipeline::columns::*;
use gradpath::pipeline::{
    column_values, indicator_names, FeaturePipeline, FittedArtifacts, ImputeStrategy, ModelKind,
    RawRecord, ScaleMode, ScalingStateStore, ONE_HOT_FIELDS,
};

fn value(df: &polars::prelude::DataFrame, column: &str) -> Option<f64> {
    column_values(df, column).unwrap()[0]
}

fn fitted_artifacts(model: ModelKind) -> gradpath::pipeline::ModelArtifacts {
    let pipeline = FeaturePipeline::for_model(model);
    let scalers = ScalingStateStore::new();
    let prepared = pipeline
        .prepare_with_mode(bulk_frame(60), &scalers, ScaleMode::Fit)
        .unwrap();
    FittedArtifacts::fit(&pipeline, &prepared, scalers, ImputeStrategy::Mean)
        .unwrap()
        .into_model_artifacts()
}

#[test]
fn test_inference_output_matches_frozen_schema() {
    for model in ModelKind::ALL {
        let artifacts = fitted_artifacts(model);
        let raw = RawRecord::to_frame(&[sample_record()]).unwrap();

        let features = FeaturePipeline::for_model(model)
            .infer(raw, &artifacts)
            .unwrap();

        assert_eq!(
            column_names(&features),
            artifacts.schema.columns().to_vec(),
            "{} output must equal its schema, order included",
            model
        );
        assert_eq!(features.height(), 1);
        assert_eq!(
            features.get_columns().iter().map(|c| c.null_count()).sum::<usize>(),
            0,
            "{} output must be fully imputed",
            model
        );
    }
}

#[test]
fn test_raw_source_columns_absent_after_preparation() {
    for model in ModelKind::ALL {
        let prepared = FeaturePipeline::for_model(model)
            .prepare(bulk_frame(12), &ScalingStateStore::new())
            .unwrap();

        assert_missing_columns(
            &prepared,
            &[
                APPLICATION_ORDER,
                PREVIOUS_QUALIFICATION,
                MOTHER_QUALIFICATION,
                FATHER_QUALIFICATION,
                MOTHER_OCCUPATION,
                FATHER_OCCUPATION,
                TARGET,
            ],
        );
        assert_has_columns(
            &prepared,
            &[
                APPLICATION_ORDER_SHIFTED,
                AVG_PARENTAL_EDUCATION,
                AVG_PARENTAL_INCOME,
                NO_ACADEMIC_ACTIVITY,
                IS_ECONOMY_GOOD,
                YEAR,
                TARGET_INT,
            ],
        );
    }
}

#[test]
fn test_ordinal_keeps_codes_and_one_hot_expands_them() {
    let ordinal = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(bulk_frame(6), &ScalingStateStore::new())
        .unwrap();
    assert_has_columns(&ordinal, &[COURSE, MARITAL_STATUS, GENDER]);

    let one_hot = FeaturePipeline::for_model(ModelKind::NeuralNetwork)
        .prepare(bulk_frame(6), &ScalingStateStore::new())
        .unwrap();
    assert_missing_columns(&one_hot, &[COURSE, MARITAL_STATUS, GENDER]);
    for field in ONE_HOT_FIELDS {
        let names = indicator_names(field);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_has_columns(&one_hot, &names);
    }
}

#[test]
fn test_single_row_one_hot_expands_full_code_table() {
    let prepared = FeaturePipeline::for_model(ModelKind::NeuralNetwork)
        .prepare(
            RawRecord::to_frame(&[sample_record()]).unwrap(),
            &ScalingStateStore::new(),
        )
        .unwrap();

    let course_columns = indicator_names(gradpath::codebook::Field::Course);
    assert!(course_columns.len() > 1);
    let hot: Vec<&String> = course_columns
        .iter()
        .filter(|name| value(&prepared, name) == Some(1.0))
        .collect();
    assert_eq!(hot, vec!["course_9119"]);
}

#[test]
fn test_tree_models_prepare_identically() {
    let rf = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(bulk_frame(30), &ScalingStateStore::new())
        .unwrap();
    let hgb = FeaturePipeline::for_model(ModelKind::HistGradientBoosting)
        .prepare(bulk_frame(30), &ScalingStateStore::new())
        .unwrap();
    assert!(rf.equals_missing(&hgb));
}

#[test]
fn test_ratios_stay_in_unit_interval() {
    let prepared = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(bulk_frame(120), &ScalingStateStore::new())
        .unwrap();

    for column in [
        APPROVED_RATE_1ST,
        APPROVED_RATE_2ND,
        CREDIT_LOAD_REDUCTION_1ST,
        CREDIT_LOAD_REDUCTION_2ND,
        EVAL_RATE_1ST,
        EVAL_RATE_2ND,
    ] {
        for v in column_values(&prepared, column).unwrap() {
            let v = v.expect("ratios are never missing");
            assert!(!v.is_nan(), "{} produced NaN", column);
            assert!((0.0..=1.0).contains(&v), "{} out of range: {}", column, v);
        }
    }
}

#[test]
fn test_application_order_shift() {
    let prepared = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(
            RawRecord::to_frame(&[sample_record()]).unwrap(),
            &ScalingStateStore::new(),
        )
        .unwrap();

    assert_eq!(value(&prepared, APPLICATION_ORDER_SHIFTED), Some(2.0));
    assert_missing_columns(&prepared, &[APPLICATION_ORDER]);
}

#[test]
fn test_first_semester_inactive_second_active() {
    let mut record = sample_record();
    record.curricular_units_1st_sem_credited = 0;
    record.curricular_units_1st_sem_enrolled = 0;
    record.curricular_units_1st_sem_evaluations = 0;
    record.curricular_units_1st_sem_approved = 0;
    record.curricular_units_1st_sem_grade = 0.0;
    record.curricular_units_1st_sem_without_evaluations = 0;

    let prepared = FeaturePipeline::for_model(ModelKind::HistGradientBoosting)
        .prepare(RawRecord::to_frame(&[record]).unwrap(), &ScalingStateStore::new())
        .unwrap();

    assert_eq!(value(&prepared, APPROVED_RATE_1ST), Some(0.0));
    assert_eq!(value(&prepared, PERFORMANCE_INDEX_1ST), Some(0.0));
    assert_eq!(value(&prepared, NO_ACADEMIC_ACTIVITY), Some(0.0));
}

#[test]
fn test_no_academic_activity_when_everything_zero() {
    let mut record = sample_record();
    record.curricular_units_1st_sem_enrolled = 0;
    record.curricular_units_1st_sem_evaluations = 0;
    record.curricular_units_1st_sem_approved = 0;
    record.curricular_units_1st_sem_grade = 0.0;
    record.curricular_units_2nd_sem_enrolled = 0;
    record.curricular_units_2nd_sem_evaluations = 0;
    record.curricular_units_2nd_sem_approved = 0;
    record.curricular_units_2nd_sem_grade = 0.0;

    let prepared = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(RawRecord::to_frame(&[record]).unwrap(), &ScalingStateStore::new())
        .unwrap();
    assert_eq!(value(&prepared, NO_ACADEMIC_ACTIVITY), Some(1.0));
}

#[test]
fn test_economic_indicators() {
    let mut known = sample_record();
    known.unemployment_rate = 10.8;
    known.inflation_rate = 1.4;
    known.gdp = 1.74;

    let mut unknown = known.clone();
    unknown.gdp = 1.75;

    let mut good = sample_record();
    good.unemployment_rate = 5.0;
    good.gdp = 2.0;

    let mut weak = good.clone();
    weak.gdp = 1.0;

    let prepared = FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare_with_mode(
            RawRecord::to_frame(&[known, unknown, good, weak]).unwrap(),
            &ScalingStateStore::new(),
            ScaleMode::TransformOnly,
        )
        .unwrap();

    let years = column_values(&prepared, YEAR).unwrap();
    assert_eq!(years[0], Some(2010.0));
    assert_eq!(years[1], None);

    let good_flags = column_values(&prepared, IS_ECONOMY_GOOD).unwrap();
    assert_eq!(good_flags[2], Some(1.0));
    assert_eq!(good_flags[3], Some(0.0));
}

#[test]
fn test_unknown_year_is_imputed_at_inference() {
    let artifacts = fitted_artifacts(ModelKind::RandomForest);
    let mut record = sample_record();
    record.gdp = 3.52;

    let features = FeaturePipeline::for_model(ModelKind::RandomForest)
        .infer(RawRecord::to_frame(&[record]).unwrap(), &artifacts)
        .unwrap();
    assert!(value(&features, YEAR).is_some());
}

#[test]
fn test_one_hot_scaling_fits_bulk_and_reuses_for_single_row() {
    let pipeline = FeaturePipeline::for_model(ModelKind::NeuralNetwork);
    let scalers = ScalingStateStore::new();
    let prepared = pipeline.prepare(bulk_frame(40), &scalers).unwrap();

    for v in column_values(&prepared, ADMISSION_GRADE).unwrap().into_iter().flatten() {
        assert!((0.0..=1.0).contains(&v));
    }
    let fitted = scalers.get(ADMISSION_GRADE).unwrap();

    let single = pipeline
        .prepare(RawRecord::to_frame(&[sample_record()]).unwrap(), &scalers)
        .unwrap();
    assert_eq!(scalers.get(ADMISSION_GRADE), Some(fitted));

    let expected = (135.5 - fitted.data_min) / (fitted.data_max - fitted.data_min);
    assert!((value(&single, ADMISSION_GRADE).unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_ordinal_never_touches_scalers() {
    let scalers = ScalingStateStore::new();
    FeaturePipeline::for_model(ModelKind::RandomForest)
        .prepare(bulk_frame(20), &scalers)
        .unwrap();
    assert!(scalers.is_empty());
}

#[test]
fn test_original_dataset_headers_are_accepted() {
    let mut raw = bulk_frame(5);
    let headers: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| match name.as_str() {
            MARITAL_STATUS => "Marital status".to_string(),
            NATIONALITY => "Nacionality".to_string(),
            DAYTIME_EVENING_ATTENDANCE => "Daytime/evening attendance\t".to_string(),
            TARGET => "Target".to_string(),
            other => other.to_string(),
        })
        .collect();
    raw.set_column_names(headers).unwrap();

    let prepared = FeaturePipeline::for_model(ModelKind::NeuralNetwork)
        .prepare(raw, &ScalingStateStore::new())
        .unwrap();
    assert_has_columns(&prepared, &["maritalStatus_1", "nationality_1", TARGET_INT]);
}
