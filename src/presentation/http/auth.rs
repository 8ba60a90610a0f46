use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::forms::Form;
use crate::application::forms::FormErrors;
use crate::application::forms::auth::{LoginForm, RegistrationForm};
use crate::application::use_cases::auth::login::Login;
use crate::application::use_cases::auth::register::{Register, RegisterError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::form_input::FormInput;
use crate::presentation::http::session::{
    CurrentUser, build_session_cookie, clear_session_cookie, issue_session, request_is_https,
};
use crate::presentation::http::uploads::upload_url;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_photo_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            phone_number: u.phone_number,
            address: u.address,
            date_of_birth: u.date_of_birth,
            profile_photo_url: u.profile_photo.as_deref().map(upload_url),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

/// Login form fields, as sent by the client.
#[derive(Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub password2: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, body = UserResponse),
        (status = 422, description = "Invalid or duplicate fields")
    ))]
pub async fn register(
    State(ctx): State<AppContext>,
    FormInput(data): FormInput,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let form = RegistrationForm::validate(data)?;
    let repo = ctx.user_repo();
    let uc = Register {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&form).await.map_err(|e| match e {
        RegisterError::UsernameTaken => ApiError::Validation(FormErrors::single(
            "username",
            "हे वापरकर्ता नाव आधीच घेतले आहे / Username already taken.",
        )),
        RegisterError::EmailTaken => ApiError::Validation(FormErrors::single(
            "email",
            "हा ईमेल आधीच नोंदणीकृत आहे / Email already registered.",
        )),
        RegisterError::Other(e) => ApiError::Internal(e),
    })?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, body = ErrorBody)
    ))]
pub async fn login(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    FormInput(data): FormInput,
) -> Result<Response, ApiError> {
    let form = LoginForm::validate(data)?;
    let repo = ctx.user_repo();
    let uc = Login {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&form).await?.ok_or_else(|| {
        tracing::info!(username = %form.username, "login_rejected");
        ApiError::InvalidCredentials
    })?;
    let token = issue_session(&ctx.cfg, user.id)?;
    let cookie = build_session_cookie(
        &token,
        ctx.cfg.session_expires_secs,
        request_is_https(&headers),
    );
    tracing::info!(user_id = %user.id, "user_logged_in");
    Ok(with_cookie(
        &cookie,
        Json(LoginResponse {
            access_token: token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(headers: HeaderMap) -> Response {
    let cookie = clear_session_cookie(request_is_https(&headers));
    with_cookie(&cookie, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

fn with_cookie(cookie: &str, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
