use super::{CleanedForm, FieldKind, FieldSpec, Form, FormErrors, Rule};

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Form for LoginForm {
    const NAME: &'static str = "login";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "username",
            "Username / वापरकर्ता नाव",
            FieldKind::Text,
            &[Rule::Required],
        ),
        FieldSpec::new(
            "password",
            "Password / पासवर्ड",
            FieldKind::Password,
            &[Rule::Required],
        ),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        Ok(Self {
            username: c.required_text("username")?,
            password: c.required_text("password")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl Form for RegistrationForm {
    const NAME: &'static str = "registration";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "username",
            "Username / वापरकर्ता नाव",
            FieldKind::Text,
            &[
                Rule::Required,
                Rule::Length {
                    min: Some(4),
                    max: Some(20),
                },
            ],
        ),
        FieldSpec::new(
            "email",
            "Email / ईमेल",
            FieldKind::Text,
            &[Rule::Required, Rule::Email],
        ),
        FieldSpec::new(
            "full_name",
            "Full Name / पूर्ण नाव",
            FieldKind::Text,
            &[Rule::Required],
        ),
        FieldSpec::new(
            "password",
            "Password / पासवर्ड",
            FieldKind::Password,
            &[
                Rule::Required,
                Rule::Length {
                    min: Some(6),
                    max: None,
                },
            ],
        ),
        FieldSpec::new(
            "password2",
            "Confirm Password / पासवर्ड पुष्टी",
            FieldKind::Password,
            &[Rule::Required, Rule::EqualTo("password")],
        ),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        Ok(Self {
            username: c.required_text("username")?,
            email: c.required_text("email")?,
            full_name: c.required_text("full_name")?,
            password: c.required_text("password")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{FormData, MSG_EMAIL, MSG_REQUIRED};

    fn registration(username: &str, email: &str, password: &str, password2: &str) -> FormData {
        FormData::new()
            .with_field("username", username)
            .with_field("email", email)
            .with_field("full_name", "Sita Patil")
            .with_field("password", password)
            .with_field("password2", password2)
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::validate(FormData::new()).unwrap_err();
        assert_eq!(errors.field("username"), [MSG_REQUIRED]);
        assert_eq!(errors.field("password"), [MSG_REQUIRED]);
    }

    #[test]
    fn login_accepts_credentials() {
        let form = LoginForm::validate(
            FormData::new()
                .with_field("username", "clerk01")
                .with_field("password", " spaced "),
        )
        .unwrap();
        assert_eq!(form.username, "clerk01");
        assert_eq!(form.password, " spaced ");
    }

    #[test]
    fn username_length_bounds() {
        let twenty = "a".repeat(20);
        let twenty_one = "a".repeat(21);
        for (name, ok) in [
            ("abc", false),
            ("abcd", true),
            (twenty.as_str(), true),
            (twenty_one.as_str(), false),
        ] {
            let res = RegistrationForm::validate(registration(name, "a@b.com", "secret1", "secret1"));
            assert_eq!(res.is_ok(), ok, "username of length {}", name.len());
            if let Err(e) = res {
                assert_eq!(
                    e.field("username"),
                    ["Field must be between 4 and 20 characters long."]
                );
            }
        }
    }

    #[test]
    fn username_length_counts_trimmed_value() {
        let errors =
            RegistrationForm::validate(registration("   abc   ", "a@b.com", "secret1", "secret1"))
                .unwrap_err();
        assert_eq!(
            errors.field("username"),
            ["Field must be between 4 and 20 characters long."]
        );

        let form =
            RegistrationForm::validate(registration(" abcd ", "a@b.com", "secret1", "secret1"))
                .unwrap();
        assert_eq!(form.username, "abcd");
    }

    #[test]
    fn password_confirmation_must_match() {
        let errors =
            RegistrationForm::validate(registration("sitap", "a@b.com", "secret1", "secret2"))
                .unwrap_err();
        assert_eq!(errors.field("password2"), ["Field must be equal to password."]);
        assert!(errors.field("password").is_empty());
    }

    #[test]
    fn password_minimum_length() {
        let errors =
            RegistrationForm::validate(registration("sitap", "a@b.com", "12345", "12345"))
                .unwrap_err();
        assert_eq!(
            errors.field("password"),
            ["Field must be at least 6 characters long."]
        );
    }

    #[test]
    fn email_shape_is_checked() {
        let errors =
            RegistrationForm::validate(registration("sitap", "not-an-email", "secret1", "secret1"))
                .unwrap_err();
        assert_eq!(errors.field("email"), [MSG_EMAIL]);

        let form =
            RegistrationForm::validate(registration("sitap", "a@b.com", "secret1", "secret1"))
                .unwrap();
        assert_eq!(form.email, "a@b.com");
        assert_eq!(form.full_name, "Sita Patil");
    }

    #[test]
    fn every_blank_required_field_reports() {
        let errors = RegistrationForm::validate(FormData::new()).unwrap_err();
        for f in ["username", "email", "full_name", "password", "password2"] {
            assert_eq!(errors.field(f), [MSG_REQUIRED], "{f}");
        }
    }
}
