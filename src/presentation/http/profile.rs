use axum::{Json, Router, extract::State, routing::get};
use chrono::NaiveDate;
use utoipa::ToSchema;

use crate::application::forms::profile::ProfileForm;
use crate::application::forms::{Form, FormErrors};
use crate::application::use_cases::profile::update_profile::{UpdateProfile, UpdateProfileError};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::UserResponse;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::form_input::FormInput;
use crate::presentation::http::session::CurrentUser;

/// Profile form fields. Every field is optional; blank fields leave the stored value alone.
#[derive(Debug, ToSchema)]
pub struct ProfileMultipart {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub profile_photo: Option<Vec<u8>>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/profile", get(get_profile).post(update_profile))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/profile", tag = "Profile", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

#[utoipa::path(
    post,
    path = "/api/profile",
    tag = "Profile",
    request_body(content = ProfileMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = UserResponse),
        (status = 401, body = ErrorBody),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    FormInput(data): FormInput,
) -> Result<Json<UserResponse>, ApiError> {
    let form = ProfileForm::validate(data)?;
    let repo = ctx.user_repo();
    let uploads = ctx.upload_store();
    let uc = UpdateProfile {
        repo: repo.as_ref(),
        uploads: uploads.as_ref(),
    };
    let updated = uc.execute(user.id, form).await.map_err(|e| match e {
        UpdateProfileError::EmailTaken => ApiError::Validation(FormErrors::single(
            "email",
            "हा ईमेल आधीच नोंदणीकृत आहे / Email already registered.",
        )),
        UpdateProfileError::NotFound => ApiError::Unauthorized,
        UpdateProfileError::Other(e) => ApiError::Internal(e),
    })?;
    tracing::info!(user_id = %updated.id, "profile_updated");
    Ok(Json(UserResponse::from(updated)))
}
