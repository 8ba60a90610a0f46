use super::{CleanedForm, FieldKind, FieldSpec, Form, FormErrors, Rule};

#[derive(Debug, Clone)]
pub struct ChatForm {
    pub api_key: String,
    pub message: String,
}

impl Form for ChatForm {
    const NAME: &'static str = "chat";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "api_key",
            "Hugging Face API Key",
            FieldKind::Password,
            &[Rule::Required],
        ),
        FieldSpec::new(
            "message",
            "संदेश / Message",
            FieldKind::TextArea,
            &[Rule::Required],
        ),
    ];

    fn from_cleaned(mut c: CleanedForm) -> Result<Self, FormErrors> {
        Ok(Self {
            api_key: c.required_text("api_key")?.trim().to_string(),
            message: c.required_text("message")?,
        })
    }
}
