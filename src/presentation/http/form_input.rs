use std::collections::HashMap;

use axum::{
    Json,
    extract::{Form, FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::application::forms::{FormData, UploadedFile};
use crate::presentation::http::error::ApiError;

/// Submitted form fields from a urlencoded, multipart or flat JSON body.
pub struct FormInput(pub FormData);

fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn rejection(status: StatusCode, body: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(body)
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ct = content_type(&req);
        if ct.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            return read_multipart(multipart).await.map(FormInput);
        }
        if ct.starts_with("application/json") {
            let Json(map) = Json::<serde_json::Map<String, serde_json::Value>>::from_request(
                req, state,
            )
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
            let mut data = FormData::new();
            for (name, value) in map {
                match value {
                    serde_json::Value::Null => {}
                    serde_json::Value::String(s) => data.insert_field(&name, &s),
                    serde_json::Value::Bool(b) => {
                        data.insert_field(&name, if b { "y" } else { "false" })
                    }
                    other => data.insert_field(&name, &other.to_string()),
                }
            }
            return Ok(FormInput(data));
        }
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        Ok(FormInput(FormData::from(fields)))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormData, ApiError> {
    let mut data = FormData::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejection(e.status(), e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                data.insert_file(
                    &name,
                    UploadedFile {
                        filename: Some(file_name),
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                data.insert_field(&name, &text);
            }
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(ct: &str, body: impl Into<Body>) -> Result<FormData, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, ct)
            .body(body.into())
            .unwrap();
        FormInput::from_request(req, &()).await.map(|f| f.0)
    }

    #[tokio::test]
    async fn urlencoded_fields() {
        let data = extract(
            "application/x-www-form-urlencoded",
            "username=sitap&password=secret1",
        )
        .await
        .unwrap();
        assert_eq!(data.text("username"), Some("sitap"));
        assert_eq!(data.text("password"), Some("secret1"));
    }

    #[tokio::test]
    async fn json_values_become_text() {
        let data = extract(
            "application/json",
            r#"{"username":"sitap","is_minority":true,"bpl_status":false,"n":5,"x":null}"#,
        )
        .await
        .unwrap();
        assert_eq!(data.text("username"), Some("sitap"));
        assert_eq!(data.text("is_minority"), Some("y"));
        assert_eq!(data.text("bpl_status"), Some("false"));
        assert_eq!(data.text("n"), Some("5"));
        assert_eq!(data.text("x"), None);
    }

    #[tokio::test]
    async fn multipart_fields_and_files() {
        let body = "--XBOUND\r\n\
Content-Disposition: form-data; name=\"full_name\"\r\n\r\n\
Sita Patil\r\n\
--XBOUND\r\n\
Content-Disposition: form-data; name=\"profile_photo\"; filename=\"me.png\"\r\n\
Content-Type: image/png\r\n\r\n\
PNGDATA\r\n\
--XBOUND--\r\n";
        let mut data = extract("multipart/form-data; boundary=XBOUND", body)
            .await
            .unwrap();
        assert_eq!(data.text("full_name"), Some("Sita Patil"));
        let file = data.take_file("profile_photo").unwrap();
        assert_eq!(file.filename.as_deref(), Some("me.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.bytes, b"PNGDATA");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        assert!(matches!(
            extract("application/json", "{not json").await,
            Err(ApiError::BadRequest(_))
        ));
    }
}
