//! Declarative form schemas.
//!
//! Each schema is a static table of [`FieldSpec`]s. [`Form::validate`] runs every
//! field through its kind coercion and validator chain, collecting per-field
//! messages, and only builds the typed form when nothing failed.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

mod field;

pub mod admission;
pub mod auth;
pub mod certificate;
pub mod chat;
pub mod profile;

pub use field::{
    DATE_FORMAT, FieldKind, FieldSpec, FieldValue, MSG_CHOICE, MSG_DATE, MSG_EMAIL,
    MSG_REQUIRED, Rule,
};

pub const IMAGES_ONLY: &str = "Images only!";

#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: Some(filename.into()),
            content_type: None,
            bytes,
        }
    }

    pub fn has_name(&self) -> bool {
        self.filename
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false)
    }

    /// Lowercased extension of the submitted filename.
    pub fn extension(&self) -> Option<String> {
        let name = self.filename.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Raw submitted key/value pairs plus uploaded files.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.insert_field(name, value);
        self
    }

    pub fn with_file(mut self, name: &str, file: UploadedFile) -> Self {
        self.insert_file(name, file);
        self
    }

    pub fn insert_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    pub fn insert_file(&mut self, name: &str, file: UploadedFile) {
        self.files.insert(name.to_string(), file);
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

impl From<HashMap<String, String>> for FormData {
    fn from(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            files: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.fields().collect();
        write!(f, "invalid form fields: {}", names.join(", "))
    }
}

impl std::error::Error for FormErrors {}

impl FormErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Typed values of a form whose fields all passed validation.
#[derive(Debug, Default)]
pub struct CleanedForm {
    values: HashMap<&'static str, FieldValue>,
}

impl CleanedForm {
    pub fn text(&mut self, name: &str) -> Option<String> {
        match self.values.remove(name) {
            Some(FieldValue::Text(v)) => v,
            _ => None,
        }
    }

    pub fn required_text(&mut self, name: &str) -> Result<String, FormErrors> {
        self.text(name)
            .ok_or_else(|| FormErrors::single(name, MSG_REQUIRED))
    }

    pub fn date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.values.remove(name) {
            Some(FieldValue::Date(v)) => v,
            _ => None,
        }
    }

    pub fn required_date(&mut self, name: &str) -> Result<NaiveDate, FormErrors> {
        self.date(name)
            .ok_or_else(|| FormErrors::single(name, MSG_REQUIRED))
    }

    pub fn flag(&mut self, name: &str) -> bool {
        matches!(self.values.remove(name), Some(FieldValue::Bool(true)))
    }

    pub fn file(&mut self, name: &str) -> Option<UploadedFile> {
        match self.values.remove(name) {
            Some(FieldValue::File(v)) => v,
            _ => None,
        }
    }
}

pub fn clean(fields: &'static [FieldSpec], mut data: FormData) -> Result<CleanedForm, FormErrors> {
    let mut cleaned = CleanedForm::default();
    let mut errors = FormErrors::default();
    for spec in fields {
        let (value, messages) = field::check_field(spec, &mut data);
        for m in messages {
            errors.add(spec.name, m);
        }
        cleaned.values.insert(spec.name, value);
    }
    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

pub trait Form: Sized {
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];

    fn from_cleaned(cleaned: CleanedForm) -> Result<Self, FormErrors>;

    fn validate(data: FormData) -> Result<Self, FormErrors> {
        let cleaned = clean(Self::FIELDS, data)?;
        Self::from_cleaned(cleaned)
    }
}

#[derive(Debug, Serialize)]
pub struct ChoiceDescription {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
    pub choices: Vec<ChoiceDescription>,
    pub accept: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FormDescription {
    pub name: &'static str,
    pub fields: Vec<FieldDescription>,
}

fn registry() -> [(&'static str, &'static [FieldSpec]); 7] {
    [
        (auth::LoginForm::NAME, auth::LoginForm::FIELDS),
        (auth::RegistrationForm::NAME, auth::RegistrationForm::FIELDS),
        (admission::AdmissionForm::NAME, admission::AdmissionForm::FIELDS),
        (certificate::BonafideForm::NAME, certificate::BonafideForm::FIELDS),
        (
            certificate::RepresentationForm::NAME,
            certificate::RepresentationForm::FIELDS,
        ),
        (profile::ProfileForm::NAME, profile::ProfileForm::FIELDS),
        (chat::ChatForm::NAME, chat::ChatForm::FIELDS),
    ]
}

/// Field metadata for rendering a form on the client.
pub fn describe(name: &str) -> Option<FormDescription> {
    let (name, fields) = registry().into_iter().find(|(n, _)| *n == name)?;
    Some(FormDescription {
        name,
        fields: fields
            .iter()
            .map(|f| FieldDescription {
                name: f.name,
                label: f.label,
                kind: f.kind.as_str(),
                required: f.is_required(),
                choices: match f.kind {
                    FieldKind::Select(choices) => choices
                        .iter()
                        .map(|&(value, label)| ChoiceDescription { value, label })
                        .collect(),
                    _ => Vec::new(),
                },
                accept: match f.kind {
                    FieldKind::File { allowed, .. } => allowed.to_vec(),
                    _ => Vec::new(),
                },
            })
            .collect(),
    })
}
