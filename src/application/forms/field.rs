use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormData, UploadedFile};

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_EMAIL: &str = "Invalid email address.";
pub const MSG_DATE: &str = "Not a valid date value.";
pub const MSG_CHOICE: &str = "Not a valid choice.";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Date,
    Bool,
    Select(&'static [(&'static str, &'static str)]),
    File {
        allowed: &'static [&'static str],
        message: &'static str,
    },
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::TextArea => "textarea",
            FieldKind::Date => "date",
            FieldKind::Bool => "checkbox",
            FieldKind::Select(_) => "select",
            FieldKind::File { .. } => "file",
        }
    }
}

/// Validators run in declaration order; `Required` and `Optional` end the chain
/// when the value is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Optional,
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    Email,
    EqualTo(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        rules: &'static [Rule],
    ) -> Self {
        Self {
            name,
            label,
            kind,
            rules,
        }
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Bool(bool),
    File(Option<UploadedFile>),
}

/// Coerces and validates one field. Returns the typed value and any messages.
pub(crate) fn check_field(spec: &FieldSpec, data: &mut FormData) -> (FieldValue, Vec<String>) {
    let raw = data.text(spec.name).map(str::to_string);
    let file = match spec.kind {
        FieldKind::File { .. } => data.take_file(spec.name),
        _ => None,
    };
    let blank = match spec.kind {
        FieldKind::File { .. } => file.as_ref().map(|f| !f.has_name()).unwrap_or(true),
        _ => raw.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true),
    };

    let mut errors = Vec::new();
    let value = match spec.kind {
        FieldKind::Text | FieldKind::TextArea => FieldValue::Text(
            raw.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        ),
        FieldKind::Password => FieldValue::Text(raw.clone().filter(|s| !s.is_empty())),
        FieldKind::Date => match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => FieldValue::Date(None),
            Some(s) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(d) => FieldValue::Date(Some(d)),
                Err(_) => {
                    errors.push(MSG_DATE.to_string());
                    FieldValue::Date(None)
                }
            },
        },
        FieldKind::Bool => FieldValue::Bool(
            raw.as_deref()
                .map(|s| {
                    let s = s.trim();
                    !(s.is_empty() || s.eq_ignore_ascii_case("false"))
                })
                .unwrap_or(false),
        ),
        FieldKind::Select(choices) => {
            let v = raw.as_deref().map(str::trim).unwrap_or("");
            if !choices.iter().any(|(key, _)| *key == v) {
                errors.push(MSG_CHOICE.to_string());
            }
            FieldValue::Text(Some(v.to_string()).filter(|s| !s.is_empty()))
        }
        FieldKind::File { allowed, message } => {
            if let Some(f) = file.as_ref().filter(|f| f.has_name()) {
                let ok = f
                    .extension()
                    .map(|ext| allowed.contains(&ext.as_str()))
                    .unwrap_or(false);
                if !ok {
                    errors.push(message.to_string());
                }
            }
            FieldValue::File(file.filter(|f| f.has_name()))
        }
    };

    // Rules see the value as stored: trimmed, except for passwords.
    let coerce = |s: &str| -> String {
        match spec.kind {
            FieldKind::Password => s.to_string(),
            _ => s.trim().to_string(),
        }
    };
    let text = coerce(raw.as_deref().unwrap_or(""));
    for rule in spec.rules {
        match rule {
            Rule::Required => {
                if blank {
                    return (value, vec![MSG_REQUIRED.to_string()]);
                }
            }
            Rule::Optional => {
                if blank {
                    return (value, Vec::new());
                }
            }
            Rule::Length { min, max } => {
                let len = text.chars().count();
                let too_short = min.map(|m| len < m).unwrap_or(false);
                let too_long = max.map(|m| len > m).unwrap_or(false);
                if too_short || too_long {
                    errors.push(length_message(*min, *max));
                }
            }
            Rule::Email => {
                if !EMAIL_RE.is_match(&text) {
                    errors.push(MSG_EMAIL.to_string());
                }
            }
            Rule::EqualTo(other) => {
                if coerce(data.text(other).unwrap_or("")) != text {
                    errors.push(format!("Field must be equal to {other}."));
                }
            }
        }
    }
    (value, errors)
}

fn length_message(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("Field must be between {lo} and {hi} characters long."),
        (Some(lo), None) => format!("Field must be at least {lo} characters long."),
        (None, Some(hi)) => format!("Field cannot be longer than {hi} characters."),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERNAME: FieldSpec = FieldSpec::new(
        "username",
        "Username",
        FieldKind::Text,
        &[
            Rule::Required,
            Rule::Length {
                min: Some(4),
                max: Some(20),
            },
        ],
    );

    fn run(spec: &FieldSpec, data: FormData) -> Vec<String> {
        let mut data = data;
        check_field(spec, &mut data).1
    }

    #[test]
    fn required_short_circuits_other_rules() {
        let errors = run(&USERNAME, FormData::new().with_field("username", "   "));
        assert_eq!(errors, vec![MSG_REQUIRED.to_string()]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let errors = run(&USERNAME, FormData::new().with_field("username", "अबकड"));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn optional_skips_email_check_when_blank() {
        let spec = FieldSpec::new("email", "Email", FieldKind::Text, &[Rule::Optional, Rule::Email]);
        assert!(run(&spec, FormData::new()).is_empty());
        assert_eq!(
            run(&spec, FormData::new().with_field("email", "nope")),
            vec![MSG_EMAIL.to_string()]
        );
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.com", "first.last@school.edu.in"] {
            assert!(EMAIL_RE.is_match(ok), "{ok}");
        }
        for bad in ["not-an-email", "a@b", "a b@c.com", "@b.com", "a@.com"] {
            assert!(!EMAIL_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn malformed_date_is_reported() {
        let spec = FieldSpec::new("birth_date", "DOB", FieldKind::Date, &[]);
        let mut data = FormData::new().with_field("birth_date", "31/12/2010");
        let (value, errors) = check_field(&spec, &mut data);
        assert_eq!(errors, vec![MSG_DATE.to_string()]);
        assert!(matches!(value, FieldValue::Date(None)));
    }

    #[test]
    fn checkbox_values() {
        let spec = FieldSpec::new("flag", "Flag", FieldKind::Bool, &[]);
        for (input, expected) in [(Some("y"), true), (Some("false"), false), (Some(""), false), (None, false)] {
            let mut data = FormData::new();
            if let Some(v) = input {
                data.insert_field("flag", v);
            }
            let (value, _) = check_field(&spec, &mut data);
            assert!(matches!(value, FieldValue::Bool(b) if b == expected), "{input:?}");
        }
    }

    #[test]
    fn select_rejects_unknown_choice() {
        let spec = FieldSpec::new(
            "gender",
            "Gender",
            FieldKind::Select(&[("", "-"), ("male", "M")]),
            &[],
        );
        assert!(run(&spec, FormData::new().with_field("gender", "male")).is_empty());
        assert_eq!(
            run(&spec, FormData::new().with_field("gender", "other")),
            vec![MSG_CHOICE.to_string()]
        );
    }

    #[test]
    fn length_messages() {
        assert_eq!(
            length_message(Some(6), None),
            "Field must be at least 6 characters long."
        );
        assert_eq!(
            length_message(None, Some(3)),
            "Field cannot be longer than 3 characters."
        );
    }
}
