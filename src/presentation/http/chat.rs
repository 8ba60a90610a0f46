use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::forms::Form;
use crate::application::forms::chat::ChatForm;
use crate::application::use_cases::chat::ask::AskChat;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::form_input::FormInput;
use crate::presentation::http::session::CurrentUser;

#[derive(Debug, ToSchema)]
pub struct ChatRequest {
    pub api_key: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/chat", post(ask)).with_state(ctx)
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body(content = ChatRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = ChatResponse),
        (status = 401, body = ErrorBody),
        (status = 422, description = "Missing fields or rejected API key"),
        (status = 502, body = ErrorBody)
    )
)]
pub async fn ask(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    FormInput(data): FormInput,
) -> Result<Json<ChatResponse>, ApiError> {
    let form = ChatForm::validate(data)?;
    let client = ctx.chat_client();
    let uc = AskChat {
        client: client.as_ref(),
    };
    let reply = uc.execute(&form).await.map_err(|e| {
        tracing::warn!(error = %e, user_id = %user.id, "chat_failed");
        ApiError::from(e)
    })?;
    Ok(Json(ChatResponse { reply }))
}
