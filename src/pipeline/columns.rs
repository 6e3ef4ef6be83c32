//! Canonical column names used throughout the pipeline.
//!
//! Raw columns arrive either with these names (single records) or with the
//! dataset's original headers, which [`HEADER_RENAMES`] maps onto them.

// ============================================================================
// RAW COLUMNS
// ============================================================================

pub const MARITAL_STATUS: &str = "maritalStatus";
pub const APPLICATION_MODE: &str = "applicationMode";
pub const APPLICATION_ORDER: &str = "applicationOrder";
pub const COURSE: &str = "course";
pub const DAYTIME_EVENING_ATTENDANCE: &str = "daytimeEveningAttendance";
pub const PREVIOUS_QUALIFICATION: &str = "previousQualification";
pub const PREVIOUS_QUALIFICATION_GRADE: &str = "previousQualificationGrade";
pub const NATIONALITY: &str = "nationality";
pub const MOTHER_QUALIFICATION: &str = "motherQualification";
pub const FATHER_QUALIFICATION: &str = "fatherQualification";
pub const MOTHER_OCCUPATION: &str = "motherOccupation";
pub const FATHER_OCCUPATION: &str = "fatherOccupation";
pub const ADMISSION_GRADE: &str = "admissionGrade";
pub const DISPLACED: &str = "displaced";
pub const EDUCATIONAL_SPECIAL_NEEDS: &str = "educationalSpecialNeeds";
pub const DEBTOR: &str = "debtor";
pub const TUITION_FEES_UP_TO_DATE: &str = "tuitionFeesUpToDate";
pub const GENDER: &str = "gender";
pub const SCHOLARSHIP_HOLDER: &str = "scholarshipHolder";
pub const AGE_AT_ENROLLMENT: &str = "ageAtEnrollment";
pub const INTERNATIONAL: &str = "international";

pub const CU_1ST_CREDITED: &str = "curricularUnits1stSemCredited";
pub const CU_1ST_ENROLLED: &str = "curricularUnits1stSemEnrolled";
pub const CU_1ST_EVALUATIONS: &str = "curricularUnits1stSemEvaluations";
pub const CU_1ST_APPROVED: &str = "curricularUnits1stSemApproved";
pub const CU_1ST_GRADE: &str = "curricularUnits1stSemGrade";
pub const CU_1ST_WITHOUT_EVALUATIONS: &str = "curricularUnits1stSemWithoutEvaluations";

pub const CU_2ND_CREDITED: &str = "curricularUnits2ndSemCredited";
pub const CU_2ND_ENROLLED: &str = "curricularUnits2ndSemEnrolled";
pub const CU_2ND_EVALUATIONS: &str = "curricularUnits2ndSemEvaluations";
pub const CU_2ND_APPROVED: &str = "curricularUnits2ndSemApproved";
pub const CU_2ND_GRADE: &str = "curricularUnits2ndSemGrade";
pub const CU_2ND_WITHOUT_EVALUATIONS: &str = "curricularUnits2ndSemWithoutEvaluations";

pub const UNEMPLOYMENT_RATE: &str = "unemploymentRate";
pub const INFLATION_RATE: &str = "inflationRate";
pub const GDP: &str = "gdp";

pub const TARGET: &str = "target";

// ============================================================================
// DERIVED COLUMNS
// ============================================================================

pub const APPLICATION_ORDER_SHIFTED: &str = "applicationOrderShifted";
pub const PREVIOUS_QUALIFICATION_ORDINAL: &str = "previousQualificationOrdinal";

pub const MOTHER_QUALIFICATION_ORDINAL: &str = "motherQualificationOrdinal";
pub const FATHER_QUALIFICATION_ORDINAL: &str = "fatherQualificationOrdinal";
pub const AVG_PARENTAL_EDUCATION: &str = "avgParentalEducation";
pub const PARENTAL_EDU_DISPARITY: &str = "parentalEduDisparity";

pub const MOTHER_OCCUPATION_ORDINAL: &str = "motherOccupationOrdinal";
pub const FATHER_OCCUPATION_ORDINAL: &str = "fatherOccupationOrdinal";
pub const AVG_PARENTAL_INCOME: &str = "avgParentalIncome";
pub const PARENTAL_INCOME_DISPARITY: &str = "parentalIncomeDisparity";

pub const APPROVED_RATE_1ST: &str = "approvedRate1stSem";
pub const APPROVED_RATE_2ND: &str = "approvedRate2ndSem";
pub const PERFORMANCE_INDEX_1ST: &str = "performanceIndex1stSem";
pub const PERFORMANCE_INDEX_2ND: &str = "performanceIndex2ndSem";
pub const CREDIT_LOAD_REDUCTION_1ST: &str = "creditLoadReduction1stSem";
pub const CREDIT_LOAD_REDUCTION_2ND: &str = "creditLoadReduction2ndSem";
pub const EVAL_RATE_1ST: &str = "evalRate1stSem";
pub const EVAL_RATE_2ND: &str = "evalRate2ndSem";

pub const NO_ACADEMIC_ACTIVITY: &str = "noAcademicActivity";
pub const ECONOMIC_STRESS_INDEX: &str = "economicStressIndex";
pub const IS_ECONOMY_GOOD: &str = "isEconomyGood";
pub const YEAR: &str = "year";

pub const TARGET_INT: &str = "targetInt";

/// Raw columns of a student record, in dataset order (target excluded)
pub const RAW_FEATURES: [&str; 36] = [
    MARITAL_STATUS,
    APPLICATION_MODE,
    APPLICATION_ORDER,
    COURSE,
    DAYTIME_EVENING_ATTENDANCE,
    PREVIOUS_QUALIFICATION,
    PREVIOUS_QUALIFICATION_GRADE,
    NATIONALITY,
    MOTHER_QUALIFICATION,
    FATHER_QUALIFICATION,
    MOTHER_OCCUPATION,
    FATHER_OCCUPATION,
    ADMISSION_GRADE,
    DISPLACED,
    EDUCATIONAL_SPECIAL_NEEDS,
    DEBTOR,
    TUITION_FEES_UP_TO_DATE,
    GENDER,
    SCHOLARSHIP_HOLDER,
    AGE_AT_ENROLLMENT,
    INTERNATIONAL,
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
    UNEMPLOYMENT_RATE,
    INFLATION_RATE,
    GDP,
];

/// Original dataset headers and the canonical names they map to
pub const HEADER_RENAMES: [(&str, &str); 37] = [
    ("Marital status", MARITAL_STATUS),
    ("Application mode", APPLICATION_MODE),
    ("Application order", APPLICATION_ORDER),
    ("Course", COURSE),
    ("Daytime/evening attendance", DAYTIME_EVENING_ATTENDANCE),
    ("Previous qualification", PREVIOUS_QUALIFICATION),
    ("Previous qualification (grade)", PREVIOUS_QUALIFICATION_GRADE),
    ("Nacionality", NATIONALITY),
    ("Mothers qualification", MOTHER_QUALIFICATION),
    ("Fathers qualification", FATHER_QUALIFICATION),
    ("Mothers occupation", MOTHER_OCCUPATION),
    ("Fathers occupation", FATHER_OCCUPATION),
    ("Admission grade", ADMISSION_GRADE),
    ("Displaced", DISPLACED),
    ("Educational special needs", EDUCATIONAL_SPECIAL_NEEDS),
    ("Debtor", DEBTOR),
    ("Tuition fees up to date", TUITION_FEES_UP_TO_DATE),
    ("Gender", GENDER),
    ("Scholarship holder", SCHOLARSHIP_HOLDER),
    ("Age at enrollment", AGE_AT_ENROLLMENT),
    ("International", INTERNATIONAL),
    ("Curricular units 1st sem (credited)", CU_1ST_CREDITED),
    ("Curricular units 1st sem (enrolled)", CU_1ST_ENROLLED),
    ("Curricular units 1st sem (evaluations)", CU_1ST_EVALUATIONS),
    ("Curricular units 1st sem (approved)", CU_1ST_APPROVED),
    ("Curricular units 1st sem (grade)", CU_1ST_GRADE),
    ("Curricular units 1st sem (without evaluations)", CU_1ST_WITHOUT_EVALUATIONS),
    ("Curricular units 2nd sem (credited)", CU_2ND_CREDITED),
    ("Curricular units 2nd sem (enrolled)", CU_2ND_ENROLLED),
    ("Curricular units 2nd sem (evaluations)", CU_2ND_EVALUATIONS),
    ("Curricular units 2nd sem (approved)", CU_2ND_APPROVED),
    ("Curricular units 2nd sem (grade)", CU_2ND_GRADE),
    ("Curricular units 2nd sem (without evaluations)", CU_2ND_WITHOUT_EVALUATIONS),
    ("Unemployment rate", UNEMPLOYMENT_RATE),
    ("Inflation rate", INFLATION_RATE),
    ("GDP", GDP),
    ("Target", TARGET),
];

/// Canonical name for a dataset header, if it is one the dataset ships with.
/// Surrounding whitespace is ignored.
pub fn canonical_name(header: &str) -> Option<&'static str> {
    let trimmed = header.trim();
    HEADER_RENAMES
        .iter()
        .find(|(original, _)| *original == trimmed)
        .map(|(_, canonical)| *canonical)
}
