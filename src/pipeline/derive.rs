//! Derived features shared by every model pipeline
//!
//! These steps compute ratios, ordinal tiers, parental aggregates and
//! economic indicators from raw values. Nothing here is scaled or dummy
//! encoded; that is left to the model-specific encoding.

use polars::prelude::*;
use tracing::warn;

use super::columns::*;
use super::epoch::year_of;
use super::steps::{as_code, Step, Values};
use crate::codebook::{income_tier, qualification_tier, Field, Outcome};
use crate::error::{PipelineError, Result};

/// Steps of the feature deriver, in application order
pub fn derive_steps() -> Vec<Step> {
    vec![
        application_order_step(),
        previous_qualification_step(),
        parental_education_step(),
        parental_income_step(),
        semester_step(
            "semester_1st_ratios",
            [
                CU_1ST_APPROVED,
                CU_1ST_ENROLLED,
                CU_1ST_GRADE,
                CU_1ST_CREDITED,
                CU_1ST_EVALUATIONS,
                CU_1ST_WITHOUT_EVALUATIONS,
            ],
            [
                APPROVED_RATE_1ST,
                PERFORMANCE_INDEX_1ST,
                CREDIT_LOAD_REDUCTION_1ST,
                EVAL_RATE_1ST,
            ],
        ),
        semester_step(
            "semester_2nd_ratios",
            [
                CU_2ND_APPROVED,
                CU_2ND_ENROLLED,
                CU_2ND_GRADE,
                CU_2ND_CREDITED,
                CU_2ND_EVALUATIONS,
                CU_2ND_WITHOUT_EVALUATIONS,
            ],
            [
                APPROVED_RATE_2ND,
                PERFORMANCE_INDEX_2ND,
                CREDIT_LOAD_REDUCTION_2ND,
                EVAL_RATE_2ND,
            ],
        ),
        academic_activity_step(),
        economic_step(),
    ]
}

fn application_order_step() -> Step {
    Step::new(
        "shift_application_order",
        &[APPLICATION_ORDER],
        &[APPLICATION_ORDER_SHIFTED],
        |inputs| Ok(vec![inputs[0].iter().map(|v| v.map(|x| x + 1.0)).collect()]),
    )
    .dropping(&[APPLICATION_ORDER])
}

fn previous_qualification_step() -> Step {
    Step::new(
        "previous_qualification_tier",
        &[PREVIOUS_QUALIFICATION],
        &[PREVIOUS_QUALIFICATION_ORDINAL],
        |inputs| {
            Ok(vec![map_tiers(
                &inputs[0],
                Field::PreviousQualification,
                qualification_tier,
            )])
        },
    )
    .dropping(&[PREVIOUS_QUALIFICATION])
}

fn parental_education_step() -> Step {
    Step::new(
        "parental_education",
        &[MOTHER_QUALIFICATION, FATHER_QUALIFICATION],
        &[
            MOTHER_QUALIFICATION_ORDINAL,
            FATHER_QUALIFICATION_ORDINAL,
            AVG_PARENTAL_EDUCATION,
            PARENTAL_EDU_DISPARITY,
        ],
        |inputs| {
            let mother = map_tiers(&inputs[0], Field::MotherQualification, qualification_tier);
            let father = map_tiers(&inputs[1], Field::FatherQualification, qualification_tier);
            let (avg, disparity) = pair_aggregates(&mother, &father);
            Ok(vec![mother, father, avg, disparity])
        },
    )
    .dropping(&[MOTHER_QUALIFICATION, FATHER_QUALIFICATION])
}

fn parental_income_step() -> Step {
    Step::new(
        "parental_income",
        &[MOTHER_OCCUPATION, FATHER_OCCUPATION],
        &[
            MOTHER_OCCUPATION_ORDINAL,
            FATHER_OCCUPATION_ORDINAL,
            AVG_PARENTAL_INCOME,
            PARENTAL_INCOME_DISPARITY,
        ],
        |inputs| {
            let mother = map_tiers(&inputs[0], Field::MotherOccupation, income_tier);
            let father = map_tiers(&inputs[1], Field::FatherOccupation, income_tier);
            let (avg, disparity) = pair_aggregates(&mother, &father);
            Ok(vec![mother, father, avg, disparity])
        },
    )
    .dropping(&[MOTHER_OCCUPATION, FATHER_OCCUPATION])
}

/// Consumes `[approved, enrolled, grade, credited, evaluations, without_evaluations]`
/// and produces `[approved_rate, performance_index, credit_load_reduction, eval_rate]`.
/// The raw curricular columns stay in the frame.
fn semester_step(name: &'static str, consumes: [&'static str; 6], produces: [&'static str; 4]) -> Step {
    Step::new(name, &consumes, &produces, |inputs| {
        let rows = inputs[0].len();
        let mut approved_rate = Vec::with_capacity(rows);
        let mut performance = Vec::with_capacity(rows);
        let mut credit_load = Vec::with_capacity(rows);
        let mut eval_rate = Vec::with_capacity(rows);

        for row in 0..rows {
            let approved = inputs[0][row];
            let enrolled = inputs[1][row];
            let grade = inputs[2][row];
            let credited = inputs[3][row];
            let evaluations = inputs[4][row];
            let without = inputs[5][row];

            let rate = ratio_or_zero(approved, enrolled);
            approved_rate.push(Some(rate));
            performance.push(Some(grade.map(|g| rate * g).unwrap_or(0.0)));
            credit_load.push(Some(ratio_or_zero(credited, enrolled)));
            let evaluated_total = match (evaluations, without) {
                (Some(e), Some(w)) => Some(e + w),
                _ => None,
            };
            eval_rate.push(Some(ratio_or_zero(evaluations, evaluated_total)));
        }

        Ok(vec![approved_rate, performance, credit_load, eval_rate])
    })
}

fn academic_activity_step() -> Step {
    Step::new(
        "academic_activity",
        &[
            CU_1ST_ENROLLED,
            CU_2ND_ENROLLED,
            CU_1ST_EVALUATIONS,
            CU_2ND_EVALUATIONS,
            CU_1ST_GRADE,
            CU_2ND_GRADE,
        ],
        &[NO_ACADEMIC_ACTIVITY],
        |inputs| {
            let rows = inputs[0].len();
            let flags = (0..rows)
                .map(|row| {
                    let inactive = inputs.iter().all(|col| col[row] == Some(0.0));
                    Some(if inactive { 1.0 } else { 0.0 })
                })
                .collect();
            Ok(vec![flags])
        },
    )
}

fn economic_step() -> Step {
    Step::new(
        "economic_indicators",
        &[UNEMPLOYMENT_RATE, INFLATION_RATE, GDP],
        &[ECONOMIC_STRESS_INDEX, IS_ECONOMY_GOOD, YEAR],
        |inputs| {
            let rows = inputs[0].len();
            let mut stress = Vec::with_capacity(rows);
            let mut good = Vec::with_capacity(rows);
            let mut year = Vec::with_capacity(rows);

            for row in 0..rows {
                let triple = (inputs[0][row], inputs[1][row], inputs[2][row]);
                match triple {
                    (Some(unemployment), Some(inflation), Some(gdp)) => {
                        stress.push(Some(unemployment + inflation - gdp));
                        year.push(year_of(unemployment, inflation, gdp).map(f64::from));
                    }
                    _ => {
                        stress.push(None);
                        year.push(None);
                    }
                }
                let is_good = matches!(triple, (Some(u), _, Some(g)) if g > 1.5 && u < 10.0);
                good.push(Some(if is_good { 1.0 } else { 0.0 }));
            }

            Ok(vec![stress, good, year])
        },
    )
}

/// `numerator / denominator`, or 0 when either side is missing or the
/// denominator is zero
fn ratio_or_zero(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => {
            let r = n / d;
            if r.is_finite() {
                r
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Map raw codes to ordinal tiers. Codes without a tier become null.
fn map_tiers(values: &[Option<f64>], field: Field, tier: fn(i64) -> Option<u8>) -> Values {
    values
        .iter()
        .map(|v| {
            let code = v.and_then(as_code)?;
            let mapped = tier(code);
            if mapped.is_none() {
                warn!(field = %field, code, "No ordinal tier for code, leaving it missing");
            }
            mapped.map(f64::from)
        })
        .collect()
}

/// Row-wise mean (skipping missing values) and absolute difference of two tiers
fn pair_aggregates(a: &[Option<f64>], b: &[Option<f64>]) -> (Values, Values) {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let mean = match (x, y) {
                (Some(x), Some(y)) => Some((x + y) / 2.0),
                (Some(v), None) | (None, Some(v)) => Some(*v),
                (None, None) => None,
            };
            let disparity = match (x, y) {
                (Some(x), Some(y)) => Some((x - y).abs()),
                _ => None,
            };
            (mean, disparity)
        })
        .unzip()
}

/// Replace the textual `target` column with the integer `targetInt` class.
///
/// Frames without a target (inference input) are left untouched, so no
/// `targetInt` column appears for them. Null labels stay null; any other
/// label outside Dropout/Enrolled/Graduate is rejected.
pub fn encode_target(df: &mut DataFrame) -> Result<()> {
    let Ok(target) = df.column(TARGET) else {
        return Ok(());
    };

    let labels = target.cast(&DataType::String)?;
    let classes = labels
        .str()?
        .into_iter()
        .map(|label| match label {
            Some(label) => Outcome::from_label(label.trim())
                .map(|o| Some(o.code()))
                .map_err(|_| PipelineError::UnknownLabel {
                    field: Field::Target,
                    label: label.to_string(),
                }),
            None => Ok(None),
        })
        .collect::<Result<Vec<Option<i64>>>>()?;

    df.with_column(Column::new(TARGET_INT.into(), classes))?;
    *df = df.drop(TARGET)?;
    Ok(())
}
