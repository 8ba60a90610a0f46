use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::forms::certificate::validate_for;
use crate::application::use_cases::certificates::create_certificate::CreateCertificate;
use crate::application::use_cases::certificates::get_certificate::{
    GetCertificate, ListCertificates,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::certificates::certificate::{CertificateKind, CertificateRequest};
use crate::presentation::http::error::{ApiError, ErrorBody, parse_id};
use crate::presentation::http::form_input::FormInput;
use crate::presentation::http::session::CurrentUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateResponse {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub student_name: String,
    pub academic_year: String,
    pub class_standard: String,
    pub division: String,
    pub conduct: String,
    pub caste: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub school_place: String,
    pub document_url: String,
}

impl From<CertificateRequest> for CertificateResponse {
    fn from(c: CertificateRequest) -> Self {
        let d = c.details;
        Self {
            document_url: format!("/api/certificates/{}/document", c.id),
            id: c.id,
            kind: c.kind.as_str().to_string(),
            title: c.kind.title().to_string(),
            created_by: c.created_by,
            created_at: c.created_at,
            student_name: d.student_name,
            academic_year: d.academic_year,
            class_standard: d.class_standard,
            division: d.division,
            conduct: d.conduct,
            caste: d.caste,
            birth_date: d.birth_date,
            birth_place: d.birth_place,
            school_place: d.school_place,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateListResponse {
    pub items: Vec<CertificateResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub kind: Option<String>,
}

// POST takes a certificate kind and GET an id in the same segment, so both share one route.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/certificates", get(list_certificates))
        .route(
            "/certificates/:key",
            get(get_certificate).post(create_certificate),
        )
        .route("/certificates/:key/document", get(certificate_document))
        .with_state(ctx)
}

#[utoipa::path(
    post,
    path = "/api/certificates/{kind}",
    tag = "Certificates",
    params(("kind" = String, Path, description = "bonafide | representation")),
    request_body(content_type = "application/x-www-form-urlencoded", description = "Certificate form fields, see GET /api/forms/{kind}"),
    responses(
        (status = 201, body = CertificateResponse),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_certificate(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(kind): Path<String>,
    FormInput(data): FormInput,
) -> Result<(StatusCode, Json<CertificateResponse>), ApiError> {
    let kind = CertificateKind::parse(&kind).ok_or(ApiError::NotFound)?;
    let details = validate_for(kind, data)?;
    let repo = ctx.certificate_repo();
    let uc = CreateCertificate {
        repo: repo.as_ref(),
    };
    let cert = uc.execute(user.id, kind, &details).await?;
    Ok((StatusCode::CREATED, Json(CertificateResponse::from(cert))))
}

#[utoipa::path(
    get,
    path = "/api/certificates",
    tag = "Certificates",
    params(("kind" = Option<String>, Query, description = "Filter by kind")),
    responses(
        (status = 200, body = CertificateListResponse),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody)
    )
)]
pub async fn list_certificates(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<CertificateListResponse>, ApiError> {
    let kind = match q.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(k) => Some(
            CertificateKind::parse(k)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown certificate kind: {k}")))?,
        ),
        None => None,
    };
    let repo = ctx.certificate_repo();
    let uc = ListCertificates {
        repo: repo.as_ref(),
    };
    let items = uc
        .execute(user.id, kind)
        .await?
        .into_iter()
        .map(CertificateResponse::from)
        .collect();
    Ok(Json(CertificateListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/certificates/{id}",
    tag = "Certificates",
    params(("id" = Uuid, Path, description = "Certificate ID")),
    responses(
        (status = 200, body = CertificateResponse),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn get_certificate(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let id = parse_id(&key)?;
    let repo = ctx.certificate_repo();
    let uc = GetCertificate {
        repo: repo.as_ref(),
    };
    let cert = uc.execute(user.id, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(CertificateResponse::from(cert)))
}

#[utoipa::path(
    get,
    path = "/api/certificates/{id}/document",
    tag = "Certificates",
    params(("id" = Uuid, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Printable certificate", body = String, content_type = "text/html"),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn certificate_document(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&key)?;
    let repo = ctx.certificate_repo();
    let uc = GetCertificate {
        repo: repo.as_ref(),
    };
    let html = uc.render(user.id, id).await?.ok_or(ApiError::NotFound)?;
    let mut response = Html(html).into_response();
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}
