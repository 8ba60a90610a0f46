use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Everything captured by the admission form, with photos already stored.
#[derive(Debug, Clone, Default)]
pub struct AdmissionDetails {
    pub school_name: String,
    pub continuous_student_id: Option<String>,
    pub udise_pen: Option<String>,
    pub admission_class: Option<String>,
    pub birth_register_no: Option<String>,
    pub aadhaar_no: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub student_photo: Option<String>,
    pub parent_photo: Option<String>,
    pub first_name_marathi: String,
    pub last_name_marathi: String,
    pub father_name: String,
    pub mother_name: String,
    pub birth_date_words: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub sub_caste: Option<String>,
    pub caste_certificate: Option<String>,
    pub is_minority: bool,
    pub nationality: Option<String>,
    pub mother_tongue: Option<String>,
    pub mobile_number: Option<String>,
    pub bpl_status: bool,
    pub bpl_number: Option<String>,
    pub disability_status: bool,
    pub disability_type: Option<String>,
    pub parent_full_name: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct AdmissionRecord {
    pub id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub details: AdmissionDetails,
}
