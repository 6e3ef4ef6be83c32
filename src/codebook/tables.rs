//! Static code tables for every categorical field of the student dataset.
//!
//! Each table is sorted by code so lookups can binary search.

pub type CodeTable = &'static [(i64, &'static str)];

pub const MARITAL_STATUS: CodeTable = &[
    (1, "single"),
    (2, "married"),
    (3, "widower"),
    (4, "divorced"),
    (5, "facto union"),
    (6, "legally separated"),
];

pub const APPLICATION_MODE: CodeTable = &[
    (1, "1st phase - general contingent"),
    (2, "Ordinance No. 612/93"),
    (5, "1st phase - special contingent (Azores Island)"),
    (7, "Holders of other higher courses"),
    (10, "Ordinance No. 854-B/99"),
    (15, "International student (bachelor)"),
    (16, "1st phase - special contingent (Madeira Island)"),
    (17, "2nd phase - general contingent"),
    (18, "3rd phase - general contingent"),
    (26, "Ordinance No. 533-A/99, item b2) (Different Plan)"),
    (27, "Ordinance No. 533-A/99, item b3 (Other Institution)"),
    (39, "Over 23 years old"),
    (42, "Transfer"),
    (43, "Change of course"),
    (44, "Technological specialization diploma holders"),
    (51, "Change of institution/course"),
    (53, "Short cycle diploma holders"),
    (57, "Change of institution/course (International)"),
];

pub const COURSE: CodeTable = &[
    (33, "Biofuel Production Technologies"),
    (171, "Animation and Multimedia Design"),
    (8014, "Social Service (evening attendance)"),
    (9003, "Agronomy"),
    (9070, "Communication Design"),
    (9085, "Veterinary Nursing"),
    (9119, "Informatics Engineering"),
    (9130, "Equinculture"),
    (9147, "Management"),
    (9238, "Social Service"),
    (9254, "Tourism"),
    (9500, "Nursing"),
    (9556, "Oral Hygiene"),
    (9670, "Advertising and Marketing Management"),
    (9773, "Journalism and Communication"),
    (9853, "Basic Education"),
    (9991, "Management (evening attendance)"),
];

pub const DAYTIME_EVENING_ATTENDANCE: CodeTable = &[(0, "evening"), (1, "daytime")];

pub const PREVIOUS_QUALIFICATION: CodeTable = &[
    (1, "Secondary education"),
    (2, "Higher education - bachelor's degree"),
    (3, "Higher education - degree"),
    (4, "Higher education - master's"),
    (5, "Higher education - doctorate"),
    (6, "Frequency of higher education"),
    (9, "12th year of schooling - not completed"),
    (10, "11th year of schooling - not completed"),
    (12, "Other - 11th year of schooling"),
    (14, "10th year of schooling"),
    (15, "10th year of schooling - not completed"),
    (19, "Basic education 3rd cycle (9th/10th/11th year) or equiv."),
    (38, "Basic education 2nd cycle (6th/7th/8th year) or equiv."),
    (39, "Technological specialization course"),
    (40, "Higher education - degree (1st cycle)"),
    (42, "Professional higher technical course"),
    (43, "Higher education - master (2nd cycle)"),
];

pub const NATIONALITY: CodeTable = &[
    (1, "Portuguese"),
    (2, "German"),
    (6, "Spanish"),
    (11, "Italian"),
    (13, "Dutch"),
    (14, "English"),
    (17, "Lithuanian"),
    (21, "Angolan"),
    (22, "Cape Verdean"),
    (24, "Guinean"),
    (25, "Mozambican"),
    (26, "Santomean"),
    (32, "Turkish"),
    (41, "Brazilian"),
    (62, "Romanian"),
    (100, "Moldova (Republic of)"),
    (101, "Mexican"),
    (103, "Ukrainian"),
    (105, "Russian"),
    (108, "Cuban"),
    (109, "Colombian"),
];

pub const MOTHER_QUALIFICATION: CodeTable = &[
    (1, "Secondary Education - 12th Year of Schooling or Eq."),
    (2, "Higher Education - Bachelor's Degree"),
    (3, "Higher Education - Degree"),
    (4, "Higher Education - Master's"),
    (5, "Higher Education - Doctorate"),
    (6, "Frequency of Higher Education"),
    (9, "12th Year of Schooling - Not Completed"),
    (10, "11th Year of Schooling - Not Completed"),
    (11, "7th Year (Old)"),
    (12, "Other - 11th Year of Schooling"),
    (14, "10th Year of Schooling"),
    (18, "General commerce course"),
    (19, "Basic Education 3rd Cycle (9th/10th/11th Year) or Equiv."),
    (22, "Technical-professional course"),
    (26, "7th year of schooling"),
    (27, "2nd cycle of the general high school course"),
    (29, "9th Year of Schooling - Not Completed"),
    (30, "8th year of schooling"),
    (34, "Unknown"),
    (35, "Can't read or write"),
    (36, "Can read without having a 4th year of schooling"),
    (37, "Basic education 1st cycle (4th/5th year) or equiv."),
    (38, "Basic Education 2nd Cycle (6th/7th/8th Year) or Equiv."),
    (39, "Technological specialization course"),
    (40, "Higher education - degree (1st cycle)"),
    (41, "Specialized higher studies course"),
    (42, "Professional higher technical course"),
    (43, "Higher Education - Master (2nd cycle)"),
    (44, "Higher Education - Doctorate (3rd cycle)"),
];

pub const FATHER_QUALIFICATION: CodeTable = &[
    (1, "Secondary Education - 12th Year of Schooling or Eq."),
    (2, "Higher Education - Bachelor's Degree"),
    (3, "Higher Education - Degree"),
    (4, "Higher Education - Master's"),
    (5, "Higher Education - Doctorate"),
    (6, "Frequency of Higher Education"),
    (9, "12th Year of Schooling - Not Completed"),
    (10, "11th Year of Schooling - Not Completed"),
    (11, "7th Year (Old)"),
    (12, "Other - 11th Year of Schooling"),
    (13, "2nd year complementary high school course"),
    (14, "10th Year of Schooling"),
    (18, "General commerce course"),
    (19, "Basic Education 3rd Cycle (9th/10th/11th Year) or Equiv."),
    (20, "Complementary High School Course"),
    (22, "Technical-professional course"),
    (25, "Complementary High School Course - not concluded"),
    (26, "7th year of schooling"),
    (27, "2nd cycle of the general high school course"),
    (29, "9th Year of Schooling - Not Completed"),
    (30, "8th year of schooling"),
    (31, "General Course of Administration and Commerce"),
    (33, "Supplementary Accounting and Administration"),
    (34, "Unknown"),
    (35, "Can't read or write"),
    (36, "Can read without having a 4th year of schooling"),
    (37, "Basic education 1st cycle (4th/5th year) or equiv."),
    (38, "Basic Education 2nd Cycle (6th/7th/8th Year) or Equiv."),
    (39, "Technological specialization course"),
    (40, "Higher education - degree (1st cycle)"),
    (41, "Specialized higher studies course"),
    (42, "Professional higher technical course"),
    (43, "Higher Education - Master (2nd cycle)"),
    (44, "Higher Education - Doctorate (3rd cycle)"),
];

pub const MOTHER_OCCUPATION: CodeTable = &[
    (0, "Student"),
    (1, "Representatives of the Legislative Power and Executive Bodies, Directors, Directors and Executive Managers"),
    (2, "Specialists in Intellectual and Scientific Activities"),
    (3, "Intermediate Level Technicians and Professions"),
    (4, "Administrative staff"),
    (5, "Personal Services, Security and Safety Workers and Sellers"),
    (6, "Farmers and Skilled Workers in Agriculture, Fisheries and Forestry"),
    (7, "Skilled Workers in Industry, Construction and Craftsmen"),
    (8, "Installation and Machine Operators and Assembly Workers"),
    (9, "Unskilled Workers"),
    (10, "Armed Forces Professions"),
    (90, "Other Situation"),
    (99, "(blank)"),
    (122, "Health professionals"),
    (123, "teachers"),
    (125, "Specialists in information and communication technologies (ICT)"),
    (131, "Intermediate level science and engineering technicians and professions"),
    (132, "Technicians and professionals, of intermediate level of health"),
    (134, "Intermediate level technicians from legal, social, sports, cultural and similar services"),
    (141, "Office workers, secretaries in general and data processing operators"),
    (143, "Data, accounting, statistical, financial services and registry-related operators"),
    (144, "Other administrative support staff"),
    (151, "personal service workers"),
    (152, "sellers"),
    (153, "Personal care workers and the like"),
    (171, "Skilled construction workers and the like, except electricians"),
    (173, "Skilled workers in printing, precision instrument manufacturing, jewelers, artisans and the like"),
    (175, "Workers in food processing, woodworking, clothing and other industries and crafts"),
    (191, "cleaning workers"),
    (192, "Unskilled workers in agriculture, animal production, fisheries and forestry"),
    (193, "Unskilled workers in extractive industry, construction, manufacturing and transport"),
    (194, "Meal preparation assistants"),
];

pub const FATHER_OCCUPATION: CodeTable = &[
    (0, "Student"),
    (1, "Representatives of the Legislative Power and Executive Bodies, Directors, Directors and Executive Managers"),
    (2, "Specialists in Intellectual and Scientific Activities"),
    (3, "Intermediate Level Technicians and Professions"),
    (4, "Administrative staff"),
    (5, "Personal Services, Security and Safety Workers and Sellers"),
    (6, "Farmers and Skilled Workers in Agriculture, Fisheries and Forestry"),
    (7, "Skilled Workers in Industry, Construction and Craftsmen"),
    (8, "Installation and Machine Operators and Assembly Workers"),
    (9, "Unskilled Workers"),
    (10, "Armed Forces Professions"),
    (90, "Other Situation"),
    (99, "(blank)"),
    (101, "Armed Forces Officers"),
    (102, "Armed Forces Sergeants"),
    (103, "Other Armed Forces personnel"),
    (112, "Directors of administrative and commercial services"),
    (114, "Hotel, catering, trade and other services directors"),
    (121, "Specialists in the physical sciences, mathematics, engineering and related techniques"),
    (122, "Health professionals"),
    (123, "teachers"),
    (124, "Specialists in finance, accounting, administrative organization, public and commercial relations"),
    (131, "Intermediate level science and engineering technicians and professions"),
    (132, "Technicians and professionals, of intermediate level of health"),
    (134, "Intermediate level technicians from legal, social, sports, cultural and similar services"),
    (135, "Information and communication technology technicians"),
    (141, "Office workers, secretaries in general and data processing operators"),
    (143, "Data, accounting, statistical, financial services and registry-related operators"),
    (144, "Other administrative support staff"),
    (151, "personal service workers"),
    (152, "sellers"),
    (153, "Personal care workers and the like"),
    (154, "Protection and security services personnel"),
    (161, "Market-oriented farmers and skilled agricultural and animal production workers"),
    (163, "Farmers, livestock keepers, fishermen, hunters and gatherers, subsistence"),
    (171, "Skilled construction workers and the like, except electricians"),
    (172, "Skilled workers in metallurgy, metalworking and similar"),
    (174, "Skilled workers in electricity and electronics"),
    (175, "Workers in food processing, woodworking, clothing and other industries and crafts"),
    (181, "Fixed plant and machine operators"),
    (182, "assembly workers"),
    (183, "Vehicle drivers and mobile equipment operators"),
    (192, "Unskilled workers in agriculture, animal production, fisheries and forestry"),
    (193, "Unskilled workers in extractive industry, construction, manufacturing and transport"),
    (194, "Meal preparation assistants"),
    (195, "Street vendors (except food) and street service providers"),
];

pub const YES_NO: CodeTable = &[(0, "no"), (1, "yes")];

pub const GENDER: CodeTable = &[(0, "female"), (1, "male")];

pub const TARGET: CodeTable = &[(0, "Dropout"), (1, "Enrolled"), (2, "Graduate")];

pub const QUALIFICATION_TIER_NAMES: [&str; 5] = [
    "None. No documented education",
    "Basic. Basic/primary schooling",
    "Secondary. Interrupted or completed",
    "Post-Secondary. Technological or sub-degree",
    "Higher Ed. Degree and beyond",
];

pub const INCOME_TIER_NAMES: [&str; 6] = [
    "None/Unknown",
    "Low income",
    "Lower-Middle income",
    "Middle income",
    "Upper-Middle income",
    "High income",
];

/// Collapse a qualification code (previous, mother's or father's) into an
/// education tier from 0 (none documented) to 4 (degree and beyond).
pub fn qualification_tier(code: i64) -> Option<u8> {
    match code {
        34 | 35 => Some(0),
        11 | 12 | 26 | 27 | 29 | 30 | 31 | 36 | 37 | 38 => Some(1),
        9 | 10 | 13 | 14 | 15 | 18 | 19 | 20 | 22 | 25 | 33 | 41 => Some(2),
        39 | 42 => Some(3),
        1 | 2 | 3 | 4 | 5 | 6 | 40 | 43 | 44 => Some(4),
        _ => None,
    }
}

/// Collapse an occupation code into an income tier from 0 (none/unknown)
/// to 5 (high income).
pub fn income_tier(code: i64) -> Option<u8> {
    match code {
        0 | 90 | 99 => Some(0),
        9 | 163 | 191..=195 => Some(1),
        6 | 7 | 8 | 151..=154 | 171..=175 | 181..=183 => Some(2),
        3 | 4 | 5 | 10 | 101..=103 | 131 | 132 | 134 | 135 | 141 | 143 | 144 | 161 => Some(3),
        2 | 121..=125 => Some(4),
        1 | 112 | 114 => Some(5),
        _ => None,
    }
}
