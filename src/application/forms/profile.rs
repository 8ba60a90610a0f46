use chrono::NaiveDate;

use super::{CleanedForm, FieldKind, FieldSpec, Form, FormErrors, IMAGES_ONLY, Rule, UploadedFile};

const OPTIONAL: &[Rule] = &[Rule::Optional];

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_photo: Option<UploadedFile>,
}

impl Form for ProfileForm {
    const NAME: &'static str = "profile";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("full_name", "पूर्ण नाव / Full Name", FieldKind::Text, OPTIONAL),
        FieldSpec::new(
            "email",
            "ईमेल / Email",
            FieldKind::Text,
            &[Rule::Optional, Rule::Email],
        ),
        FieldSpec::new(
            "phone_number",
            "फोन नंबर / Phone Number",
            FieldKind::Text,
            OPTIONAL,
        ),
        FieldSpec::new("address", "पत्ता / Address", FieldKind::TextArea, OPTIONAL),
        FieldSpec::new(
            "date_of_birth",
            "जन्मतारीख / Date of Birth",
            FieldKind::Date,
            OPTIONAL,
        ),
        FieldSpec::new(
            "profile_photo",
            "प्रोफाइल फोटो / Profile Photo",
            FieldKind::File {
                allowed: &["jpg", "png", "jpeg"],
                message: IMAGES_ONLY,
            },
            &[],
        ),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        Ok(Self {
            full_name: c.text("full_name"),
            email: c.text("email"),
            phone_number: c.text("phone_number"),
            address: c.text("address"),
            date_of_birth: c.date("date_of_birth"),
            profile_photo: c.file("profile_photo"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{FormData, MSG_EMAIL};

    #[test]
    fn empty_submission_is_valid() {
        let form = ProfileForm::validate(FormData::new()).unwrap();
        assert!(form.email.is_none());
        assert!(form.profile_photo.is_none());
    }

    #[test]
    fn email_checked_only_when_present() {
        let errors =
            ProfileForm::validate(FormData::new().with_field("email", "not-an-email")).unwrap_err();
        assert_eq!(errors.field("email"), [MSG_EMAIL]);
        let form = ProfileForm::validate(FormData::new().with_field("email", "a@b.com")).unwrap();
        assert_eq!(form.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn gif_is_not_allowed_for_profile_photo() {
        let errors = ProfileForm::validate(
            FormData::new().with_file("profile_photo", UploadedFile::new("me.gif", vec![1])),
        )
        .unwrap_err();
        assert_eq!(errors.field("profile_photo"), [IMAGES_ONLY]);
    }
}
