use axum::{
    Router,
    extract::{Path as AxumPath, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::session::CurrentUser;

pub const UPLOADS_PREFIX: &str = "/api/uploads";

/// Public URL of a stored upload.
pub fn upload_url(relative_path: &str) -> String {
    format!("{}/{}", UPLOADS_PREFIX, relative_path.trim_start_matches('/'))
}

#[utoipa::path(
    get,
    path = "/api/uploads/{path}",
    tag = "Uploads",
    params(("path" = String, Path, description = "Stored upload path")),
    responses(
        (status = 200, description = "OK", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn serve_upload(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, ApiError> {
    let store = ctx.upload_store();
    let data = store.read_bytes(&path).await.map_err(|e| {
        tracing::debug!(error = %e, user_id = %user.id, path = %path, "upload_not_served");
        ApiError::NotFound
    })?;

    let guessed = mime_guess::from_path(&path).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(guessed.essence_str())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok((headers, data).into_response())
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/uploads/*path", get(serve_upload))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_prefix_once() {
        assert_eq!(
            upload_url("profiles/a.png"),
            "/api/uploads/profiles/a.png"
        );
        assert_eq!(
            upload_url("/admissions/b.jpg"),
            "/api/uploads/admissions/b.jpg"
        );
    }
}
