use super::{CleanedForm, FieldKind, FieldSpec, Form, FormErrors, Rule};
use crate::domain::certificates::certificate::{CertificateDetails, CertificateKind};

const REQUIRED: &[Rule] = &[Rule::Required];

fn details_from(c: &mut CleanedForm) -> Result<CertificateDetails, FormErrors> {
    Ok(CertificateDetails {
        student_name: c.required_text("student_name")?,
        academic_year: c.required_text("academic_year")?,
        class_standard: c.required_text("class_standard")?,
        division: c.required_text("division")?,
        conduct: c.required_text("conduct")?,
        caste: c.required_text("caste")?,
        birth_date: c.required_date("birth_date")?,
        birth_place: c.required_text("birth_place")?,
        school_place: c.required_text("school_place")?,
    })
}

#[derive(Debug, Clone)]
pub struct BonafideForm(pub CertificateDetails);

impl Form for BonafideForm {
    const NAME: &'static str = "bonafide";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("student_name", "विद्यार्थ्याचे पूर्ण नाव", FieldKind::Text, REQUIRED),
        FieldSpec::new("academic_year", "शैक्षणिक वर्ष", FieldKind::Text, REQUIRED),
        FieldSpec::new("class_standard", "इयत्ता", FieldKind::Text, REQUIRED),
        FieldSpec::new("division", "तुकडी", FieldKind::Text, REQUIRED),
        FieldSpec::new("conduct", "वर्तन", FieldKind::Text, REQUIRED),
        FieldSpec::new("caste", "जात", FieldKind::Text, REQUIRED),
        FieldSpec::new("birth_date", "जन्मतारीख", FieldKind::Date, REQUIRED),
        FieldSpec::new("birth_place", "जन्मस्थान", FieldKind::Text, REQUIRED),
        FieldSpec::new("school_place", "शाळेचे स्थळ", FieldKind::Text, REQUIRED),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        details_from(&mut c).map(Self)
    }
}

#[derive(Debug, Clone)]
pub struct RepresentationForm(pub CertificateDetails);

impl Form for RepresentationForm {
    const NAME: &'static str = "representation";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "student_name",
            "विद्यार्थ्याचे पूर्ण नाव / Student Name",
            FieldKind::Text,
            REQUIRED,
        ),
        FieldSpec::new(
            "academic_year",
            "शैक्षणिक वर्ष / Academic Year",
            FieldKind::Text,
            REQUIRED,
        ),
        FieldSpec::new("class_standard", "इयत्ता / Class", FieldKind::Text, REQUIRED),
        FieldSpec::new("division", "तुकडी / Division", FieldKind::Text, REQUIRED),
        FieldSpec::new("conduct", "वर्तन / Conduct", FieldKind::Text, REQUIRED),
        FieldSpec::new("caste", "जात / Caste", FieldKind::Text, REQUIRED),
        FieldSpec::new(
            "birth_date",
            "जन्मतारीख / Date of Birth",
            FieldKind::Date,
            REQUIRED,
        ),
        FieldSpec::new(
            "birth_place",
            "जन्मस्थान / Place of Birth",
            FieldKind::Text,
            REQUIRED,
        ),
        FieldSpec::new(
            "school_place",
            "शाळेचे स्थळ / School Location",
            FieldKind::Text,
            REQUIRED,
        ),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        details_from(&mut c).map(Self)
    }
}

/// Validates a certificate submission against the schema for `kind`.
pub fn validate_for(
    kind: CertificateKind,
    data: super::FormData,
) -> Result<CertificateDetails, FormErrors> {
    match kind {
        CertificateKind::Bonafide => BonafideForm::validate(data).map(|f| f.0),
        CertificateKind::Representation => RepresentationForm::validate(data).map(|f| f.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{FormData, MSG_DATE, MSG_REQUIRED};
    use chrono::NaiveDate;

    fn filled() -> FormData {
        FormData::new()
            .with_field("student_name", "सीता राम पाटील")
            .with_field("academic_year", "2024-25")
            .with_field("class_standard", "5")
            .with_field("division", "A")
            .with_field("conduct", "चांगले")
            .with_field("caste", "मराठा")
            .with_field("birth_date", "2014-03-09")
            .with_field("birth_place", "सातारा")
            .with_field("school_place", "वाई")
    }

    #[test]
    fn all_fields_are_required_for_both_kinds() {
        for kind in [CertificateKind::Bonafide, CertificateKind::Representation] {
            let errors = validate_for(kind, FormData::new()).unwrap_err();
            assert_eq!(errors.fields().count(), 9, "{kind:?}");
            assert_eq!(errors.field("birth_date"), [MSG_REQUIRED]);
        }
    }

    #[test]
    fn filled_submission_produces_details() {
        let details = validate_for(CertificateKind::Representation, filled()).unwrap();
        assert_eq!(details.birth_date, NaiveDate::from_ymd_opt(2014, 3, 9).unwrap());
        assert_eq!(details.division, "A");
    }

    #[test]
    fn bad_birth_date_is_rejected() {
        let errors = BonafideForm::validate(filled().with_field("birth_date", "9 March 2014"))
            .unwrap_err();
        assert_eq!(errors.field("birth_date"), [MSG_DATE]);
    }
}
