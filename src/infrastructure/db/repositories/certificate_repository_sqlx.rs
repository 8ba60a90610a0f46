use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::certificate_repository::CertificateRepository;
use crate::domain::certificates::certificate::{
    CertificateDetails, CertificateKind, CertificateRequest,
};
use crate::infrastructure::db::PgPool;

const CERTIFICATE_COLUMNS: &str = "id, kind, created_by, created_at, student_name, academic_year, \
    class_standard, division, conduct, caste, birth_date, birth_place, school_place";

pub struct SqlxCertificateRepository {
    pub pool: PgPool,
}

impl SqlxCertificateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_certificate(r: &PgRow) -> anyhow::Result<CertificateRequest> {
    let kind: String = r.get("kind");
    let kind = CertificateKind::parse(&kind)
        .ok_or_else(|| anyhow::anyhow!("unknown certificate kind {kind}"))?;
    Ok(CertificateRequest {
        id: r.get("id"),
        kind,
        created_by: r.get("created_by"),
        created_at: r.get("created_at"),
        details: CertificateDetails {
            student_name: r.get("student_name"),
            academic_year: r.get("academic_year"),
            class_standard: r.get("class_standard"),
            division: r.get("division"),
            conduct: r.get("conduct"),
            caste: r.get("caste"),
            birth_date: r.get("birth_date"),
            birth_place: r.get("birth_place"),
            school_place: r.get("school_place"),
        },
    })
}

#[async_trait]
impl CertificateRepository for SqlxCertificateRepository {
    async fn insert(
        &self,
        kind: CertificateKind,
        created_by: Uuid,
        d: &CertificateDetails,
    ) -> anyhow::Result<CertificateRequest> {
        let row = sqlx::query(&format!(
            "INSERT INTO certificate_requests (kind, created_by, student_name, academic_year, \
               class_standard, division, conduct, caste, birth_date, birth_place, school_place) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {CERTIFICATE_COLUMNS}"
        ))
        .bind(kind.as_str())
        .bind(created_by)
        .bind(&d.student_name)
        .bind(&d.academic_year)
        .bind(&d.class_standard)
        .bind(&d.division)
        .bind(&d.conduct)
        .bind(&d.caste)
        .bind(d.birth_date)
        .bind(&d.birth_place)
        .bind(&d.school_place)
        .fetch_one(&self.pool)
        .await?;
        map_certificate(&row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CertificateRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificate_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_certificate).transpose()
    }

    async fn list_by_creator(
        &self,
        created_by: Uuid,
        kind: Option<CertificateKind>,
    ) -> anyhow::Result<Vec<CertificateRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificate_requests \
             WHERE created_by = $1 AND ($2::text IS NULL OR kind = $2) \
             ORDER BY created_at DESC"
        ))
        .bind(created_by)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_certificate).collect()
    }
}
