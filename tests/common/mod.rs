//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gradpath::codebook::Field;
use gradpath::pipeline::{Classifier, RawRecord};
use gradpath::Result;
use polars::prelude::*;
use tempfile::TempDir;

/// A valid record with known values: 1st and 2nd semester activity, an
/// economic triple from 2015 and an application order of 1.
pub fn sample_record() -> RawRecord {
    RawRecord {
        marital_status: 1,
        application_mode: 1,
        application_order: 1,
        course: 9119,
        daytime_evening_attendance: 1,
        previous_qualification: 1,
        previous_qualification_grade: 140.0,
        nationality: 1,
        mother_qualification: 19,
        father_qualification: 3,
        mother_occupation: 5,
        father_occupation: 9,
        admission_grade: 135.5,
        displaced: 1,
        educational_special_needs: 0,
        debtor: 0,
        tuition_fees_up_to_date: 1,
        gender: 0,
        scholarship_holder: 1,
        age_at_enrollment: 19,
        international: 0,
        curricular_units_1st_sem_credited: 0,
        curricular_units_1st_sem_enrolled: 6,
        curricular_units_1st_sem_evaluations: 8,
        curricular_units_1st_sem_approved: 5,
        curricular_units_1st_sem_grade: 13.2,
        curricular_units_1st_sem_without_evaluations: 0,
        curricular_units_2nd_sem_credited: 0,
        curricular_units_2nd_sem_enrolled: 6,
        curricular_units_2nd_sem_evaluations: 7,
        curricular_units_2nd_sem_approved: 6,
        curricular_units_2nd_sem_grade: 14.0,
        curricular_units_2nd_sem_without_evaluations: 0,
        unemployment_rate: 8.9,
        inflation_rate: 1.4,
        gdp: 3.51,
        target: None,
    }
}

fn pick(field: Field, i: usize) -> i64 {
    let codes: Vec<i64> = field.codes().collect();
    codes[i % codes.len()]
}

/// `rows` labelled records with valid, varied codes. Every third record
/// carries an economic triple outside the known epochs.
pub fn bulk_records(rows: usize) -> Vec<RawRecord> {
    let labels = ["Dropout", "Enrolled", "Graduate"];
    (0..rows)
        .map(|i| {
            let enrolled = (i % 7) as i64;
            let enrolled_2nd = (i % 8) as i64;
            let mut record = RawRecord {
                marital_status: pick(Field::MaritalStatus, i),
                application_mode: pick(Field::ApplicationMode, i * 3),
                application_order: (i % 10) as i64,
                course: pick(Field::Course, i * 5),
                daytime_evening_attendance: pick(Field::DaytimeEveningAttendance, i),
                previous_qualification: pick(Field::PreviousQualification, i * 2),
                previous_qualification_grade: 95.0 + (i % 90) as f64,
                nationality: pick(Field::Nationality, i / 4),
                mother_qualification: pick(Field::MotherQualification, i * 7),
                father_qualification: pick(Field::FatherQualification, i * 11),
                mother_occupation: pick(Field::MotherOccupation, i * 13),
                father_occupation: pick(Field::FatherOccupation, i * 17),
                admission_grade: 95.0 + (i % 95) as f64,
                displaced: pick(Field::Displaced, i),
                educational_special_needs: pick(Field::EducationalSpecialNeeds, i / 9),
                debtor: pick(Field::Debtor, i / 3),
                tuition_fees_up_to_date: pick(Field::TuitionFeesUpToDate, i + 1),
                gender: pick(Field::Gender, i),
                scholarship_holder: pick(Field::ScholarshipHolder, i / 2),
                age_at_enrollment: 17 + (i % 30) as i64,
                international: pick(Field::International, i / 5),
                curricular_units_1st_sem_credited: ((i % 3) as i64).min(enrolled),
                curricular_units_1st_sem_enrolled: enrolled,
                curricular_units_1st_sem_evaluations: enrolled + (i % 4) as i64,
                curricular_units_1st_sem_approved: enrolled / 2,
                curricular_units_1st_sem_grade: if enrolled == 0 { 0.0 } else { 10.0 + (i % 9) as f64 },
                curricular_units_1st_sem_without_evaluations: (i % 2) as i64,
                curricular_units_2nd_sem_credited: ((i % 2) as i64).min(enrolled_2nd),
                curricular_units_2nd_sem_enrolled: enrolled_2nd,
                curricular_units_2nd_sem_evaluations: (i % 11) as i64,
                curricular_units_2nd_sem_approved: ((i % 5) as i64).min(enrolled_2nd),
                curricular_units_2nd_sem_grade: 9.0 + (i % 10) as f64,
                curricular_units_2nd_sem_without_evaluations: 0,
                unemployment_rate: 10.8,
                inflation_rate: 1.4,
                gdp: 1.74,
                target: Some(labels[i % 3].to_string()),
            };
            if i % 3 == 2 {
                record.unemployment_rate = 11.0 + (i % 5) as f64;
                record.gdp = -1.0;
            } else if i % 3 == 1 {
                record.unemployment_rate = 8.9;
                record.gdp = 3.51;
            }
            record
        })
        .collect()
}

/// Labelled bulk frame with canonical column names
pub fn bulk_frame(rows: usize) -> DataFrame {
    RawRecord::to_frame(&bulk_records(rows)).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame, separator: u8) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("students.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file)
        .with_separator(separator)
        .finish(df)
        .unwrap();

    (temp_dir, csv_path)
}

/// Write a record as JSON into `dir`
pub fn write_record(dir: &TempDir, record: &RawRecord) -> PathBuf {
    let path = dir.path().join("record.json");
    std::fs::write(&path, serde_json::to_string_pretty(record).unwrap()).unwrap();
    path
}

/// Assert that a DataFrame has specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Expected column '{}' not found. Available: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT have specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Column '{}' should have been removed but was found",
            col
        );
    }
}

/// Column names of a frame, in order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Classifier returning fixed scores and remembering the columns it saw
pub struct StubClassifier {
    scores: [f64; 3],
    seen_columns: Arc<Mutex<Vec<String>>>,
}

impl StubClassifier {
    pub fn new(scores: [f64; 3]) -> Self {
        Self {
            scores,
            seen_columns: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the columns of the last scored frame; stays valid after
    /// the classifier is boxed into a predictor
    pub fn seen_columns(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen_columns)
    }
}

impl Classifier for StubClassifier {
    fn predict_proba(&self, features: &DataFrame) -> Result<Vec<[f64; 3]>> {
        *self.seen_columns.lock().unwrap() = column_names(features);
        Ok(vec![self.scores; features.height()])
    }
}

/// In-memory sink for `tracing` output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `f` with a subscriber recording warnings emitted on this thread
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
