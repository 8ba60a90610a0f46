use axum::{
    Json, Router,
    extract::Path,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::forms::describe;
use crate::presentation::http::error::{ApiError, ErrorBody};

pub fn routes() -> Router {
    Router::new().route("/forms/:name", get(describe_form))
}

/// Field names, kinds, bilingual labels and validation flags of a form.
#[utoipa::path(
    get,
    path = "/api/forms/{name}",
    tag = "Forms",
    params(("name" = String, Path, description = "login | registration | admission | bonafide | representation | profile | chat")),
    responses(
        (status = 200, description = "Form description", content_type = "application/json"),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn describe_form(Path(name): Path<String>) -> Result<Response, ApiError> {
    let description = describe(&name).ok_or(ApiError::NotFound)?;
    Ok(Json(description).into_response())
}
