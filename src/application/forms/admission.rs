use chrono::NaiveDate;

use super::{CleanedForm, FieldKind, FieldSpec, Form, FormErrors, IMAGES_ONLY, Rule, UploadedFile};
use crate::domain::admissions::admission::Gender;

const REQUIRED: &[Rule] = &[Rule::Required];
const PHOTO: FieldKind = FieldKind::File {
    allowed: &["jpg", "png", "jpeg", "gif"],
    message: IMAGES_ONLY,
};
const GENDER_CHOICES: &[(&str, &str)] = &[("", "निवडा"), ("male", "मुलगा"), ("female", "मुलगी")];

#[derive(Debug, Clone)]
pub struct AdmissionForm {
    pub school_name: String,
    pub continuous_student_id: Option<String>,
    pub udise_pen: Option<String>,
    pub admission_class: Option<String>,
    pub birth_register_no: Option<String>,
    pub aadhaar_no: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub student_photo: Option<UploadedFile>,
    pub parent_photo: Option<UploadedFile>,
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

impl Form for AdmissionForm {
    const NAME: &'static str = "admission";
    const FIELDS: &'static [FieldSpec] = &[
        // school
        FieldSpec::new("school_name", "शाळेचे नाव", FieldKind::Text, REQUIRED),
        FieldSpec::new("continuous_student_id", "विद्यार्थी सतत ID", FieldKind::Text, &[]),
        FieldSpec::new(
            "udise_pen",
            "U-DISE+ पोर्टल SDMS - STUDENT PEN",
            FieldKind::Text,
            &[],
        ),
        FieldSpec::new("admission_class", "प्रवेश इयत्ता", FieldKind::Text, &[]),
        // personal
        FieldSpec::new("birth_register_no", "जन्माचा रजिस्टर नं.", FieldKind::Text, &[]),
        FieldSpec::new("aadhaar_no", "आधार कार्ड नं.", FieldKind::Text, &[]),
        FieldSpec::new("birth_date", "जन्मतारीख", FieldKind::Date, &[]),
        FieldSpec::new("admission_date", "शाळेत प्रवेश तारीख", FieldKind::Date, &[]),
        FieldSpec::new("gender", "लिंग", FieldKind::Select(GENDER_CHOICES), &[]),
        // photos
        FieldSpec::new("student_photo", "विद्यार्थ्याचे फोटो", PHOTO, &[]),
        FieldSpec::new("parent_photo", "पालकांचे फोटो", PHOTO, &[]),
        // names
        FieldSpec::new("first_name_marathi", "प्रथम नाव (मराठी)", FieldKind::Text, REQUIRED),
        FieldSpec::new("last_name_marathi", "आडनाव (मराठी)", FieldKind::Text, REQUIRED),
        FieldSpec::new("father_name", "वडिलांचे नाव", FieldKind::Text, REQUIRED),
        FieldSpec::new("mother_name", "आईचे नाव", FieldKind::Text, REQUIRED),
        FieldSpec::new("birth_date_words", "जन्मतारीख अक्षरी", FieldKind::Text, &[]),
        // background
        FieldSpec::new("religion", "धर्म", FieldKind::Text, &[]),
        FieldSpec::new("caste", "जात", FieldKind::Text, &[]),
        FieldSpec::new("sub_caste", "पोटजात", FieldKind::Text, &[]),
        FieldSpec::new("caste_certificate", "जात प्रमाण", FieldKind::Text, &[]),
        FieldSpec::new("is_minority", "अल्पसंख्याक", FieldKind::Bool, &[]),
        FieldSpec::new("nationality", "राष्ट्रत्व", FieldKind::Text, &[]),
        FieldSpec::new("mother_tongue", "मातृभाषा", FieldKind::Text, &[]),
        FieldSpec::new("mobile_number", "मोबाईल क्रमांक", FieldKind::Text, &[]),
        // BPL and disability
        FieldSpec::new("bpl_status", "BPL स्थिती", FieldKind::Bool, &[]),
        FieldSpec::new("bpl_number", "BPL क्रमांक", FieldKind::Text, &[]),
        FieldSpec::new("disability_status", "दिव्यांग स्थिती", FieldKind::Bool, &[]),
        FieldSpec::new("disability_type", "दिव्यांग प्रकार", FieldKind::Text, &[]),
        // guardian
        FieldSpec::new("parent_full_name", "पालकांचे संपूर्ण नाव", FieldKind::Text, REQUIRED),
        FieldSpec::new("address", "पत्ता", FieldKind::TextArea, REQUIRED),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        Ok(Self {
            school_name: c.required_text("school_name")?,
            continuous_student_id: c.text("continuous_student_id"),
            udise_pen: c.text("udise_pen"),
            admission_class: c.text("admission_class"),
            birth_register_no: c.text("birth_register_no"),
            aadhaar_no: c.text("aadhaar_no"),
            birth_date: c.date("birth_date"),
            admission_date: c.date("admission_date"),
            gender: c.text("gender").as_deref().and_then(Gender::parse),
            student_photo: c.file("student_photo"),
            parent_photo: c.file("parent_photo"),
            first_name_marathi: c.required_text("first_name_marathi")?,
            last_name_marathi: c.required_text("last_name_marathi")?,
            father_name: c.required_text("father_name")?,
            mother_name: c.required_text("mother_name")?,
            birth_date_words: c.text("birth_date_words"),
            religion: c.text("religion"),
            caste: c.text("caste"),
            sub_caste: c.text("sub_caste"),
            caste_certificate: c.text("caste_certificate"),
            is_minority: c.flag("is_minority"),
            nationality: c.text("nationality"),
            mother_tongue: c.text("mother_tongue"),
            mobile_number: c.text("mobile_number"),
            bpl_status: c.flag("bpl_status"),
            bpl_number: c.text("bpl_number"),
            disability_status: c.flag("disability_status"),
            disability_type: c.text("disability_type"),
            parent_full_name: c.required_text("parent_full_name")?,
            address: c.required_text("address")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{FormData, MSG_REQUIRED};

    fn minimal() -> FormData {
        FormData::new()
            .with_field("school_name", "जिल्हा परिषद शाळा")
            .with_field("first_name_marathi", "सीता")
            .with_field("last_name_marathi", "पाटील")
            .with_field("father_name", "राम")
            .with_field("mother_name", "गीता")
            .with_field("parent_full_name", "राम पाटील")
            .with_field("address", "मु. पो. वाई")
    }

    #[test]
    fn has_thirty_fields() {
        assert_eq!(AdmissionForm::FIELDS.len(), 30);
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let errors = AdmissionForm::validate(FormData::new()).unwrap_err();
        let required: Vec<&str> = AdmissionForm::FIELDS
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name)
            .collect();
        assert_eq!(required.len(), 7);
        for name in required {
            assert_eq!(errors.field(name), [MSG_REQUIRED], "{name}");
        }
        assert!(errors.field("religion").is_empty());
    }

    #[test]
    fn minimal_submission_is_accepted() {
        let form = AdmissionForm::validate(minimal()).unwrap();
        assert_eq!(form.first_name_marathi, "सीता");
        assert!(form.gender.is_none());
        assert!(form.student_photo.is_none());
        assert!(!form.is_minority);
    }

    #[test]
    fn typed_fields_are_coerced() {
        let form = AdmissionForm::validate(
            minimal()
                .with_field("birth_date", "2015-06-01")
                .with_field("gender", "female")
                .with_field("bpl_status", "y")
                .with_file("student_photo", UploadedFile::new("child.JPG", vec![1, 2, 3])),
        )
        .unwrap();
        assert_eq!(form.birth_date, NaiveDate::from_ymd_opt(2015, 6, 1));
        assert_eq!(form.gender, Some(Gender::Female));
        assert!(form.bpl_status);
        assert_eq!(form.student_photo.map(|f| f.bytes), Some(vec![1, 2, 3]));
    }

    #[test]
    fn photo_extension_allow_list() {
        let errors = AdmissionForm::validate(
            minimal().with_file("parent_photo", UploadedFile::new("setup.exe", vec![0])),
        )
        .unwrap_err();
        assert_eq!(errors.field("parent_photo"), [IMAGES_ONLY]);

        let ok = AdmissionForm::validate(
            minimal().with_file("parent_photo", UploadedFile::new("parent.png", vec![0])),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn empty_file_part_counts_as_no_file() {
        let form = AdmissionForm::validate(
            minimal().with_file("student_photo", UploadedFile::new("", Vec::new())),
        )
        .unwrap();
        assert!(form.student_photo.is_none());
    }
}
