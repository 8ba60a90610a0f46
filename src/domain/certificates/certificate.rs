use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateKind {
    Bonafide,
    /// Pratinidhan (representation) certificate.
    Representation,
}

impl CertificateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateKind::Bonafide => "bonafide",
            CertificateKind::Representation => "representation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bonafide" => Some(CertificateKind::Bonafide),
            "representation" | "pratinidhan" => Some(CertificateKind::Representation),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CertificateKind::Bonafide => "बोनाफाईड दाखला / Bonafide Certificate",
            CertificateKind::Representation => "प्रतिनिधान प्रमाणपत्र / Representation Certificate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CertificateDetails {
    pub student_name: String,
    pub academic_year: String,
    pub class_standard: String,
    pub division: String,
    pub conduct: String,
    pub caste: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub school_place: String,
}

#[derive(Debug, Clone)]
pub struct CertificateRequest {
    pub id: Uuid,
    pub kind: CertificateKind,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub details: CertificateDetails,
}
