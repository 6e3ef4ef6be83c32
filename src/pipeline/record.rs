//! Raw student records and canonical column naming

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::{self, canonical_name};
use crate::codebook::{label_of, Field};
use crate::error::Result;

/// One student as submitted for prediction, with canonical field names.
///
/// A record without `target` is an inference input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub marital_status: i64,
    pub application_mode: i64,
    pub application_order: i64,
    pub course: i64,
    pub daytime_evening_attendance: i64,
    pub previous_qualification: i64,
    pub previous_qualification_grade: f64,
    pub nationality: i64,
    pub mother_qualification: i64,
    pub father_qualification: i64,
    pub mother_occupation: i64,
    pub father_occupation: i64,
    pub admission_grade: f64,
    pub displaced: i64,
    pub educational_special_needs: i64,
    pub debtor: i64,
    pub tuition_fees_up_to_date: i64,
    pub gender: i64,
    pub scholarship_holder: i64,
    pub age_at_enrollment: i64,
    pub international: i64,
    pub curricular_units_1st_sem_credited: i64,
    pub curricular_units_1st_sem_enrolled: i64,
    pub curricular_units_1st_sem_evaluations: i64,
    pub curricular_units_1st_sem_approved: i64,
    pub curricular_units_1st_sem_grade: f64,
    pub curricular_units_1st_sem_without_evaluations: i64,
    pub curricular_units_2nd_sem_credited: i64,
    pub curricular_units_2nd_sem_enrolled: i64,
    pub curricular_units_2nd_sem_evaluations: i64,
    pub curricular_units_2nd_sem_approved: i64,
    pub curricular_units_2nd_sem_grade: f64,
    pub curricular_units_2nd_sem_without_evaluations: i64,
    pub unemployment_rate: f64,
    pub inflation_rate: f64,
    pub gdp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RawRecord {
    /// Code held by a categorical field (the target has no code here)
    pub fn code(&self, field: Field) -> Option<i64> {
        let code = match field {
            Field::MaritalStatus => self.marital_status,
            Field::ApplicationMode => self.application_mode,
            Field::Course => self.course,
            Field::DaytimeEveningAttendance => self.daytime_evening_attendance,
            Field::PreviousQualification => self.previous_qualification,
            Field::Nationality => self.nationality,
            Field::MotherQualification => self.mother_qualification,
            Field::FatherQualification => self.father_qualification,
            Field::MotherOccupation => self.mother_occupation,
            Field::FatherOccupation => self.father_occupation,
            Field::Displaced => self.displaced,
            Field::EducationalSpecialNeeds => self.educational_special_needs,
            Field::Debtor => self.debtor,
            Field::TuitionFeesUpToDate => self.tuition_fees_up_to_date,
            Field::Gender => self.gender,
            Field::ScholarshipHolder => self.scholarship_holder,
            Field::International => self.international,
            Field::Target => return None,
        };
        Some(code)
    }

    /// Check every categorical code against the CodeBook, failing on the
    /// first unknown one.
    pub fn validate(&self) -> Result<()> {
        for field in Field::ALL {
            if let Some(code) = self.code(field) {
                label_of(field, code)?;
            }
        }
        if let Some(target) = &self.target {
            crate::codebook::Outcome::from_label(target)?;
        }
        Ok(())
    }

    /// Build a raw frame with canonical column names. A `target` column is
    /// added only when at least one record carries a label.
    pub fn to_frame(records: &[RawRecord]) -> Result<DataFrame> {
        fn int(records: &[RawRecord], name: &str, get: fn(&RawRecord) -> i64) -> Column {
            Column::new(name.into(), records.iter().map(get).collect::<Vec<i64>>())
        }
        fn float(records: &[RawRecord], name: &str, get: fn(&RawRecord) -> f64) -> Column {
            Column::new(name.into(), records.iter().map(get).collect::<Vec<f64>>())
        }

        let mut frame_columns = vec![
            int(records, columns::MARITAL_STATUS, |r| r.marital_status),
            int(records, columns::APPLICATION_MODE, |r| r.application_mode),
            int(records, columns::APPLICATION_ORDER, |r| r.application_order),
            int(records, columns::COURSE, |r| r.course),
            int(records, columns::DAYTIME_EVENING_ATTENDANCE, |r| r.daytime_evening_attendance),
            int(records, columns::PREVIOUS_QUALIFICATION, |r| r.previous_qualification),
            float(records, columns::PREVIOUS_QUALIFICATION_GRADE, |r| r.previous_qualification_grade),
            int(records, columns::NATIONALITY, |r| r.nationality),
            int(records, columns::MOTHER_QUALIFICATION, |r| r.mother_qualification),
            int(records, columns::FATHER_QUALIFICATION, |r| r.father_qualification),
            int(records, columns::MOTHER_OCCUPATION, |r| r.mother_occupation),
            int(records, columns::FATHER_OCCUPATION, |r| r.father_occupation),
            float(records, columns::ADMISSION_GRADE, |r| r.admission_grade),
            int(records, columns::DISPLACED, |r| r.displaced),
            int(records, columns::EDUCATIONAL_SPECIAL_NEEDS, |r| r.educational_special_needs),
            int(records, columns::DEBTOR, |r| r.debtor),
            int(records, columns::TUITION_FEES_UP_TO_DATE, |r| r.tuition_fees_up_to_date),
            int(records, columns::GENDER, |r| r.gender),
            int(records, columns::SCHOLARSHIP_HOLDER, |r| r.scholarship_holder),
            int(records, columns::AGE_AT_ENROLLMENT, |r| r.age_at_enrollment),
            int(records, columns::INTERNATIONAL, |r| r.international),
            int(records, columns::CU_1ST_CREDITED, |r| r.curricular_units_1st_sem_credited),
            int(records, columns::CU_1ST_ENROLLED, |r| r.curricular_units_1st_sem_enrolled),
            int(records, columns::CU_1ST_EVALUATIONS, |r| r.curricular_units_1st_sem_evaluations),
            int(records, columns::CU_1ST_APPROVED, |r| r.curricular_units_1st_sem_approved),
            float(records, columns::CU_1ST_GRADE, |r| r.curricular_units_1st_sem_grade),
            int(records, columns::CU_1ST_WITHOUT_EVALUATIONS, |r| {
                r.curricular_units_1st_sem_without_evaluations
            }),
            int(records, columns::CU_2ND_CREDITED, |r| r.curricular_units_2nd_sem_credited),
            int(records, columns::CU_2ND_ENROLLED, |r| r.curricular_units_2nd_sem_enrolled),
            int(records, columns::CU_2ND_EVALUATIONS, |r| r.curricular_units_2nd_sem_evaluations),
            int(records, columns::CU_2ND_APPROVED, |r| r.curricular_units_2nd_sem_approved),
            float(records, columns::CU_2ND_GRADE, |r| r.curricular_units_2nd_sem_grade),
            int(records, columns::CU_2ND_WITHOUT_EVALUATIONS, |r| {
                r.curricular_units_2nd_sem_without_evaluations
            }),
            float(records, columns::UNEMPLOYMENT_RATE, |r| r.unemployment_rate),
            float(records, columns::INFLATION_RATE, |r| r.inflation_rate),
            float(records, columns::GDP, |r| r.gdp),
        ];

        if records.iter().any(|r| r.target.is_some()) {
            let targets: Vec<Option<String>> = records.iter().map(|r| r.target.clone()).collect();
            frame_columns.push(Column::new(columns::TARGET.into(), targets));
        }

        Ok(DataFrame::new(frame_columns)?)
    }
}

/// Rename the dataset's original headers to canonical names. Columns that
/// already carry canonical (or unrecognised) names are left as they are.
pub fn rename_to_canonical(mut df: DataFrame) -> Result<DataFrame> {
    let mut renamed = 0usize;
    let names: Vec<PlSmallStr> = df
        .get_column_names()
        .iter()
        .map(|name| match canonical_name(name.as_str()) {
            Some(canonical) if canonical != name.as_str() => {
                renamed += 1;
                PlSmallStr::from_static(canonical)
            }
            _ => (*name).clone(),
        })
        .collect();

    if renamed > 0 {
        df.set_column_names(names)?;
        debug!(renamed, "Renamed dataset headers to canonical names");
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "maritalStatus": 1, "applicationMode": 17, "applicationOrder": 5, "course": 171,
            "daytimeEveningAttendance": 1, "previousQualification": 1, "previousQualificationGrade": 122.0,
            "nationality": 1, "motherQualification": 19, "fatherQualification": 12,
            "motherOccupation": 5, "fatherOccupation": 9, "admissionGrade": 127.3,
            "displaced": 1, "educationalSpecialNeeds": 0, "debtor": 0, "tuitionFeesUpToDate": 1,
            "gender": 1, "scholarshipHolder": 0, "ageAtEnrollment": 20, "international": 0,
            "curricularUnits1stSemCredited": 0, "curricularUnits1stSemEnrolled": 0,
            "curricularUnits1stSemEvaluations": 0, "curricularUnits1stSemApproved": 0,
            "curricularUnits1stSemGrade": 0.0, "curricularUnits1stSemWithoutEvaluations": 0,
            "curricularUnits2ndSemCredited": 0, "curricularUnits2ndSemEnrolled": 0,
            "curricularUnits2ndSemEvaluations": 0, "curricularUnits2ndSemApproved": 0,
            "curricularUnits2ndSemGrade": 0.0, "curricularUnits2ndSemWithoutEvaluations": 0,
            "unemploymentRate": 10.8, "inflationRate": 1.4, "gdp": 1.74
        }"#
    }

    #[test]
    fn test_deserializes_canonical_names() {
        let record: RawRecord = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(record.course, 171);
        assert_eq!(record.curricular_units_1st_sem_grade, 0.0);
        assert!(record.target.is_none());
        record.validate().unwrap();
    }

    #[test]
    fn test_frame_has_all_raw_columns() {
        let record: RawRecord = serde_json::from_str(sample_json()).unwrap();
        let df = RawRecord::to_frame(&[record]).unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), columns::RAW_FEATURES.len());
        for name in columns::RAW_FEATURES {
            assert!(df.column(name).is_ok(), "missing {}", name);
        }
    }

    #[test]
    fn test_frame_includes_target_when_labelled() {
        let mut record: RawRecord = serde_json::from_str(sample_json()).unwrap();
        record.target = Some("Dropout".to_string());
        let df = RawRecord::to_frame(&[record]).unwrap();
        assert!(df.column(columns::TARGET).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_code() {
        let mut record: RawRecord = serde_json::from_str(sample_json()).unwrap();
        record.course = 1234;
        assert!(matches!(
            record.validate(),
            Err(crate::error::PipelineError::UnknownCode {
                field: Field::Course,
                code: 1234
            })
        ));
    }

    #[test]
    fn test_rename_to_canonical() {
        let df = df! {
            "Marital status" => [1i64],
            "Daytime/evening attendance\t" => [1i64],
            "Nacionality" => [1i64],
            "gdp" => [1.74f64],
            "unrelated" => [0i64],
        }
        .unwrap();

        let df = rename_to_canonical(df).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "maritalStatus",
                "daytimeEveningAttendance",
                "nationality",
                "gdp",
                "unrelated"
            ]
        );
    }

    #[test]
    fn test_rename_after_in_memory_rename() {
        let mut df = df! {
            "maritalStatus" => [1i64],
            "gdp" => [1.74f64],
        }
        .unwrap();
        df.rename("maritalStatus", "Marital status".into()).unwrap();

        let df = rename_to_canonical(df).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["maritalStatus", "gdp"]);
    }
}
