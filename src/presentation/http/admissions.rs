use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::forms::Form;
use crate::application::forms::admission::AdmissionForm;
use crate::application::use_cases::admissions::create_admission::CreateAdmission;
use crate::application::use_cases::admissions::get_admission::GetAdmission;
use crate::application::use_cases::admissions::list_admissions::ListAdmissions;
use crate::bootstrap::app_context::AppContext;
use crate::domain::admissions::admission::AdmissionRecord;
use crate::presentation::http::error::{ApiError, ErrorBody, parse_id};
use crate::presentation::http::form_input::FormInput;
use crate::presentation::http::session::CurrentUser;
use crate::presentation::http::uploads::upload_url;

#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionResponse {
    pub id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub school_name: String,
    pub continuous_student_id: Option<String>,
    pub udise_pen: Option<String>,
    pub admission_class: Option<String>,
    pub birth_register_no: Option<String>,
    pub aadhaar_no: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub student_photo_url: Option<String>,
    pub parent_photo_url: Option<String>,
    pub first_name_marathi: String,
    pub last_name_marathi: String,
    pub father_name: String,
    pub mother_name: String,
    pub birth_date_words: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub sub_caste: Option<String>,
    pub caste_certificate: Option<String>,
    pub is_minority: bool,
    pub nationality: Option<String>,
    pub mother_tongue: Option<String>,
    pub mobile_number: Option<String>,
    pub bpl_status: bool,
    pub bpl_number: Option<String>,
    pub disability_status: bool,
    pub disability_type: Option<String>,
    pub parent_full_name: String,
    pub address: String,
}

impl From<AdmissionRecord> for AdmissionResponse {
    fn from(r: AdmissionRecord) -> Self {
        let d = r.details;
        Self {
            id: r.id,
            created_by: r.created_by,
            created_at: r.created_at,
            school_name: d.school_name,
            continuous_student_id: d.continuous_student_id,
            udise_pen: d.udise_pen,
            admission_class: d.admission_class,
            birth_register_no: d.birth_register_no,
            aadhaar_no: d.aadhaar_no,
            birth_date: d.birth_date,
            admission_date: d.admission_date,
            gender: d.gender.map(|g| g.as_str().to_string()),
            student_photo_url: d.student_photo.as_deref().map(upload_url),
            parent_photo_url: d.parent_photo.as_deref().map(upload_url),
            first_name_marathi: d.first_name_marathi,
            last_name_marathi: d.last_name_marathi,
            father_name: d.father_name,
            mother_name: d.mother_name,
            birth_date_words: d.birth_date_words,
            religion: d.religion,
            caste: d.caste,
            sub_caste: d.sub_caste,
            caste_certificate: d.caste_certificate,
            is_minority: d.is_minority,
            nationality: d.nationality,
            mother_tongue: d.mother_tongue,
            mobile_number: d.mobile_number,
            bpl_status: d.bpl_status,
            bpl_number: d.bpl_number,
            disability_status: d.disability_status,
            disability_type: d.disability_type,
            parent_full_name: d.parent_full_name,
            address: d.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionListResponse {
    pub items: Vec<AdmissionResponse>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admissions", get(list_admissions).post(create_admission))
        .route("/admissions/:id", get(get_admission))
        .with_state(ctx)
}

#[utoipa::path(
    post,
    path = "/api/admissions",
    tag = "Admissions",
    request_body(content_type = "multipart/form-data", description = "Admission form fields, see GET /api/forms/admission"),
    responses(
        (status = 201, body = AdmissionResponse),
        (status = 401, body = ErrorBody),
        (status = 413, body = ErrorBody),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_admission(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    FormInput(data): FormInput,
) -> Result<(StatusCode, Json<AdmissionResponse>), ApiError> {
    let form = AdmissionForm::validate(data)?;
    let repo = ctx.admission_repo();
    let uploads = ctx.upload_store();
    let uc = CreateAdmission {
        repo: repo.as_ref(),
        uploads: uploads.as_ref(),
    };
    let record = uc.execute(user.id, form).await?;
    Ok((StatusCode::CREATED, Json(AdmissionResponse::from(record))))
}

#[utoipa::path(get, path = "/api/admissions", tag = "Admissions", responses(
    (status = 200, body = AdmissionListResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn list_admissions(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AdmissionListResponse>, ApiError> {
    let repo = ctx.admission_repo();
    let uc = ListAdmissions {
        repo: repo.as_ref(),
    };
    let items = uc
        .execute(user.id)
        .await?
        .into_iter()
        .map(AdmissionResponse::from)
        .collect();
    Ok(Json(AdmissionListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/admissions/{id}",
    tag = "Admissions",
    params(("id" = Uuid, Path, description = "Admission ID")),
    responses(
        (status = 200, body = AdmissionResponse),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn get_admission(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<AdmissionResponse>, ApiError> {
    let id = parse_id(&key)?;
    let repo = ctx.admission_repo();
    let uc = GetAdmission {
        repo: repo.as_ref(),
    };
    let record = uc.execute(user.id, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(AdmissionResponse::from(record)))
}
