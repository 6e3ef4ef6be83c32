//! One-hot expansion of nominal fields.
//!
//! The indicator universe of each field is its full code table, never the
//! values observed in the frame: a single inference row must expand to the
//! same columns the model was trained on.

use tracing::warn;

use super::steps::{as_code, Step};
use crate::codebook::Field;

/// Nominal fields expanded into indicator columns, in expansion order
pub const ONE_HOT_FIELDS: [Field; 7] = [
    Field::MaritalStatus,
    Field::ApplicationMode,
    Field::Course,
    Field::DaytimeEveningAttendance,
    Field::Nationality,
    Field::Gender,
    Field::ScholarshipHolder,
];

/// Indicator column name for one code of a field, e.g. `course_9119`
pub fn indicator_name(field: Field, code: i64) -> String {
    format!("{}_{}", field.column(), code)
}

/// Indicator column names of a field, in code order
pub fn indicator_names(field: Field) -> Vec<String> {
    field.codes().map(|code| indicator_name(field, code)).collect()
}

/// Step replacing `field` with one 0/1 column per code of its table.
/// Missing values and codes outside the table set every indicator to 0.
pub fn one_hot_step(field: Field) -> Step {
    let codes: Vec<i64> = field.codes().collect();
    Step::with_outputs("one_hot", &[field.column()], indicator_names(field), move |inputs| {
        let values = &inputs[0];
        let mut indicators = vec![Vec::with_capacity(values.len()); codes.len()];

        for value in values {
            let code = value.and_then(as_code);
            if let Some(c) = code {
                if codes.binary_search(&c).is_err() {
                    warn!(field = %field, code = c, "Code outside the field's table, all indicators set to 0");
                }
            }
            for (idx, known) in codes.iter().enumerate() {
                let hit = code == Some(*known);
                indicators[idx].push(Some(if hit { 1.0 } else { 0.0 }));
            }
        }

        Ok(indicators)
    })
    .dropping(&[field.column()])
}

/// Expansion steps for every nominal field
pub fn one_hot_steps() -> Vec<Step> {
    ONE_HOT_FIELDS.iter().map(|field| one_hot_step(*field)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::Field;
    use crate::pipeline::steps::column_values;
    use polars::prelude::*;

    #[test]
    fn test_single_row_expands_to_full_universe() {
        let mut df = df! { "course" => [9119i64] }.unwrap();
        one_hot_step(Field::Course).apply(&mut df).unwrap();

        assert_eq!(df.width(), Field::Course.table().len());
        assert!(df.column("course").is_err());
        assert_eq!(column_values(&df, "course_9119").unwrap(), vec![Some(1.0)]);
        assert_eq!(column_values(&df, "course_33").unwrap(), vec![Some(0.0)]);
    }

    #[test]
    fn test_binary_field_gets_both_indicators() {
        let mut df = df! { "gender" => [0i64, 1, 1] }.unwrap();
        one_hot_step(Field::Gender).apply(&mut df).unwrap();

        assert_eq!(
            column_values(&df, "gender_0").unwrap(),
            vec![Some(1.0), Some(0.0), Some(0.0)]
        );
        assert_eq!(
            column_values(&df, "gender_1").unwrap(),
            vec![Some(0.0), Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn test_unknown_and_missing_codes_are_all_zero() {
        let mut df = df! { "maritalStatus" => [Some(9i64), None] }.unwrap();
        one_hot_step(Field::MaritalStatus).apply(&mut df).unwrap();

        for name in indicator_names(Field::MaritalStatus) {
            assert_eq!(column_values(&df, &name).unwrap(), vec![Some(0.0), Some(0.0)]);
        }
    }
}
