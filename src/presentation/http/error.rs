use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::forms::FormErrors;
use crate::application::ports::chat_client::ChatError;

pub const LOGIN_REQUIRED: &str = "कृपया प्रवेश करा / Please login to access this page.";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub errors: FormErrors,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("form validation failed: {0}")]
    Validation(FormErrors),
    #[error("login required")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("chat service failed: {0}")]
    ChatUpstream(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Path ids that are not UUIDs name no record, so they answer 404 like a missing one.
pub fn parse_id(key: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(key).map_err(|_| ApiError::NotFound)
}

impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Unauthorized => {
                ApiError::Validation(FormErrors::single("api_key", "Invalid API key."))
            }
            ChatError::Transport(e) => {
                tracing::warn!(error = ?e, "chat_transport_failed");
                ApiError::ChatUpstream("could not reach the chat service".into())
            }
            other => ApiError::ChatUpstream(other.to_string()),
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { errors }),
            )
                .into_response(),
            ApiError::Unauthorized => error_body(StatusCode::UNAUTHORIZED, LOGIN_REQUIRED),
            ApiError::InvalidCredentials => error_body(
                StatusCode::UNAUTHORIZED,
                "Invalid username or password / चुकीचे वापरकर्ता नाव किंवा पासवर्ड",
            ),
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, "Not found"),
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge => {
                error_body(StatusCode::PAYLOAD_TOO_LARGE, "File is too large")
            }
            ApiError::ChatUpstream(msg) => error_body(StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request_failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (
                ApiError::Validation(FormErrors::single("x", "bad")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                ApiError::from(ChatError::Upstream(503)),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(ChatError::Unauthorized),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
