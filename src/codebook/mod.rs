//! CodeBook - code/label tables for the categorical student fields
//!
//! Every categorical field of a raw record holds an integer code. The tables
//! here translate codes to human labels (and back, for form front-ends), and
//! collapse the qualification and occupation codes into ordered tiers.

mod tables;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::columns;

pub use tables::{
    income_tier, qualification_tier, CodeTable, INCOME_TIER_NAMES, QUALIFICATION_TIER_NAMES,
};

/// A categorical field with a fixed code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    MaritalStatus,
    ApplicationMode,
    Course,
    DaytimeEveningAttendance,
    PreviousQualification,
    Nationality,
    MotherQualification,
    FatherQualification,
    MotherOccupation,
    FatherOccupation,
    Displaced,
    EducationalSpecialNeeds,
    Debtor,
    TuitionFeesUpToDate,
    Gender,
    ScholarshipHolder,
    International,
    Target,
}

impl Field {
    /// Every field, in raw-record order
    pub const ALL: [Field; 18] = [
        Field::MaritalStatus,
        Field::ApplicationMode,
        Field::Course,
        Field::DaytimeEveningAttendance,
        Field::PreviousQualification,
        Field::Nationality,
        Field::MotherQualification,
        Field::FatherQualification,
        Field::MotherOccupation,
        Field::FatherOccupation,
        Field::Displaced,
        Field::EducationalSpecialNeeds,
        Field::Debtor,
        Field::TuitionFeesUpToDate,
        Field::Gender,
        Field::ScholarshipHolder,
        Field::International,
        Field::Target,
    ];

    /// Canonical column name of this field
    pub fn column(&self) -> &'static str {
        match self {
            Field::MaritalStatus => columns::MARITAL_STATUS,
            Field::ApplicationMode => columns::APPLICATION_MODE,
            Field::Course => columns::COURSE,
            Field::DaytimeEveningAttendance => columns::DAYTIME_EVENING_ATTENDANCE,
            Field::PreviousQualification => columns::PREVIOUS_QUALIFICATION,
            Field::Nationality => columns::NATIONALITY,
            Field::MotherQualification => columns::MOTHER_QUALIFICATION,
            Field::FatherQualification => columns::FATHER_QUALIFICATION,
            Field::MotherOccupation => columns::MOTHER_OCCUPATION,
            Field::FatherOccupation => columns::FATHER_OCCUPATION,
            Field::Displaced => columns::DISPLACED,
            Field::EducationalSpecialNeeds => columns::EDUCATIONAL_SPECIAL_NEEDS,
            Field::Debtor => columns::DEBTOR,
            Field::TuitionFeesUpToDate => columns::TUITION_FEES_UP_TO_DATE,
            Field::Gender => columns::GENDER,
            Field::ScholarshipHolder => columns::SCHOLARSHIP_HOLDER,
            Field::International => columns::INTERNATIONAL,
            Field::Target => columns::TARGET,
        }
    }

    /// The code table defining every valid code for this field
    pub fn table(&self) -> CodeTable {
        match self {
            Field::MaritalStatus => tables::MARITAL_STATUS,
            Field::ApplicationMode => tables::APPLICATION_MODE,
            Field::Course => tables::COURSE,
            Field::DaytimeEveningAttendance => tables::DAYTIME_EVENING_ATTENDANCE,
            Field::PreviousQualification => tables::PREVIOUS_QUALIFICATION,
            Field::Nationality => tables::NATIONALITY,
            Field::MotherQualification => tables::MOTHER_QUALIFICATION,
            Field::FatherQualification => tables::FATHER_QUALIFICATION,
            Field::MotherOccupation => tables::MOTHER_OCCUPATION,
            Field::FatherOccupation => tables::FATHER_OCCUPATION,
            Field::Displaced
            | Field::EducationalSpecialNeeds
            | Field::Debtor
            | Field::TuitionFeesUpToDate
            | Field::ScholarshipHolder
            | Field::International => tables::YES_NO,
            Field::Gender => tables::GENDER,
            Field::Target => tables::TARGET,
        }
    }

    /// All codes of this field in ascending order
    pub fn codes(&self) -> impl Iterator<Item = i64> {
        self.table().iter().map(|(code, _)| *code)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .find(|field| field.column().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown field: '{}'", s))
    }
}

/// Translate a code into its label
pub fn label_of(field: Field, code: i64) -> Result<&'static str> {
    let table = field.table();
    table
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| table[idx].1)
        .map_err(|_| PipelineError::UnknownCode { field, code })
}

/// Inverse lookup: translate a label back into its code
pub fn code_of(field: Field, label: &str) -> Result<i64> {
    field
        .table()
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(code, _)| *code)
        .ok_or_else(|| PipelineError::UnknownLabel {
            field,
            label: label.to_string(),
        })
}

/// Display name of an education tier
pub fn qualification_tier_name(tier: u8) -> Option<&'static str> {
    QUALIFICATION_TIER_NAMES.get(tier as usize).copied()
}

/// Display name of an income tier
pub fn income_tier_name(tier: u8) -> Option<&'static str> {
    INCOME_TIER_NAMES.get(tier as usize).copied()
}

/// Tier name a qualification or occupation code collapses into. Other
/// fields, and codes without a tier, give `None`.
pub fn tier_label(field: Field, code: i64) -> Option<&'static str> {
    match field {
        Field::PreviousQualification | Field::MotherQualification | Field::FatherQualification => {
            qualification_tier(code).and_then(qualification_tier_name)
        }
        Field::MotherOccupation | Field::FatherOccupation => {
            income_tier(code).and_then(income_tier_name)
        }
        _ => None,
    }
}

/// Academic outcome predicted for a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Dropout,
    Enrolled,
    Graduate,
}

impl Outcome {
    /// Outcomes in class-index order
    pub const ALL: [Outcome; 3] = [Outcome::Dropout, Outcome::Enrolled, Outcome::Graduate];

    /// Integer class used as the training target
    pub fn code(&self) -> i64 {
        match self {
            Outcome::Dropout => 0,
            Outcome::Enrolled => 1,
            Outcome::Graduate => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.code() == code)
            .ok_or(PipelineError::UnknownCode {
                field: Field::Target,
                code,
            })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Dropout => "Dropout",
            Outcome::Enrolled => "Enrolled",
            Outcome::Graduate => "Graduate",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        code_of(Field::Target, label).and_then(Outcome::from_code)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
