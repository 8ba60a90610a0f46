use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::auth::me::LoadUser;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::User;
use crate::presentation::http::error::ApiError;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn issue_session(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.session_expires_secs.max(0) as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.session_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Subject of a valid, unexpired session token.
pub fn session_subject(cfg: &Config, token: &str) -> Option<String> {
    jsonwebtoken::decode::<Claims>(
        token.trim(),
        &DecodingKey::from_secret(cfg.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.sub)
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(t) = auth.strip_prefix("Bearer ") {
            return Some(t.to_string());
        }
    }
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|hdr| get_cookie(hdr, SESSION_COOKIE))
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Whether the client reached us over TLS, trusting one proxy hop.
pub fn request_is_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    build_session_cookie("", 0, secure)
}

/// The logged-in user, resolved from the session token on every request.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let subject = session_subject(&ctx.cfg, &token).ok_or(ApiError::Unauthorized)?;
        let repo = ctx.user_repo();
        let loader = LoadUser {
            repo: repo.as_ref(),
        };
        loader
            .execute(&subject)
            .await
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cfg(secret: &str) -> Config {
        Config {
            port: 0,
            frontend_url: None,
            database_url: String::new(),
            session_secret: secret.into(),
            session_expires_secs: 3600,
            upload_folder: String::new(),
            max_content_length: 0,
            skip_db_create: true,
            chat_api_url: String::new(),
            debug: false,
            is_production: false,
        }
    }

    #[test]
    fn session_round_trip() {
        let cfg = cfg("s3cret-s3cret-s3cret");
        let id = Uuid::new_v4();
        let token = issue_session(&cfg, id).unwrap();
        assert_eq!(session_subject(&cfg, &token), Some(id.to_string()));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_session(&cfg("one-secret-value"), Uuid::new_v4()).unwrap();
        assert_eq!(session_subject(&cfg("another-secret-value"), &token), None);
        assert_eq!(session_subject(&cfg("one-secret-value"), "garbage"), None);
    }

    #[test]
    fn token_from_header_or_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.def"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer xyz"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn forwarded_proto_uses_last_hop() {
        let mut headers = HeaderMap::new();
        assert!(!request_is_https(&headers));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("http, https"));
        assert!(request_is_https(&headers));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert!(!request_is_https(&headers));
    }

    #[test]
    fn cookie_attributes() {
        assert_eq!(
            build_session_cookie("t", 60, true),
            "session=t; HttpOnly; Secure; Path=/; Max-Age=60; SameSite=Lax"
        );
        assert_eq!(
            clear_session_cookie(false),
            "session=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
        );
    }
}
