use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::admission_repository::AdmissionRepository;
use crate::domain::admissions::admission::{AdmissionDetails, AdmissionRecord, Gender};
use crate::infrastructure::db::PgPool;

const ADMISSION_COLUMNS: &str = "id, created_by, created_at, school_name, continuous_student_id, \
    udise_pen, admission_class, birth_register_no, aadhaar_no, birth_date, admission_date, gender, \
    student_photo, parent_photo, first_name_marathi, last_name_marathi, father_name, mother_name, \
    birth_date_words, religion, caste, sub_caste, caste_certificate, is_minority, nationality, \
    mother_tongue, mobile_number, bpl_status, bpl_number, disability_status, disability_type, \
    parent_full_name, address";

pub struct SqlxAdmissionRepository {
    pub pool: PgPool,
}

impl SqlxAdmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn opt(r: &PgRow, col: &str) -> Option<String> {
    r.try_get(col).ok().flatten()
}

fn map_admission(r: &PgRow) -> AdmissionRecord {
    let gender: Option<String> = opt(r, "gender");
    AdmissionRecord {
        id: r.get("id"),
        created_by: r.get("created_by"),
        created_at: r.get("created_at"),
        details: AdmissionDetails {
            school_name: r.get("school_name"),
            continuous_student_id: opt(r, "continuous_student_id"),
            udise_pen: opt(r, "udise_pen"),
            admission_class: opt(r, "admission_class"),
            birth_register_no: opt(r, "birth_register_no"),
            aadhaar_no: opt(r, "aadhaar_no"),
            birth_date: r.try_get("birth_date").ok().flatten(),
            admission_date: r.try_get("admission_date").ok().flatten(),
            gender: gender.as_deref().and_then(Gender::parse),
            student_photo: opt(r, "student_photo"),
            parent_photo: opt(r, "parent_photo"),
            first_name_marathi: r.get("first_name_marathi"),
            last_name_marathi: r.get("last_name_marathi"),
            father_name: r.get("father_name"),
            mother_name: r.get("mother_name"),
            birth_date_words: opt(r, "birth_date_words"),
            religion: opt(r, "religion"),
            caste: opt(r, "caste"),
            sub_caste: opt(r, "sub_caste"),
            caste_certificate: opt(r, "caste_certificate"),
            is_minority: r.get("is_minority"),
            nationality: opt(r, "nationality"),
            mother_tongue: opt(r, "mother_tongue"),
            mobile_number: opt(r, "mobile_number"),
            bpl_status: r.get("bpl_status"),
            bpl_number: opt(r, "bpl_number"),
            disability_status: r.get("disability_status"),
            disability_type: opt(r, "disability_type"),
            parent_full_name: r.get("parent_full_name"),
            address: r.get("address"),
        },
    }
}

#[async_trait]
impl AdmissionRepository for SqlxAdmissionRepository {
    async fn insert(
        &self,
        created_by: Uuid,
        d: &AdmissionDetails,
    ) -> anyhow::Result<AdmissionRecord> {
        let row = sqlx::query(&format!(
            "INSERT INTO admission_records (created_by, school_name, continuous_student_id, \
               udise_pen, admission_class, birth_register_no, aadhaar_no, birth_date, \
               admission_date, gender, student_photo, parent_photo, first_name_marathi, \
               last_name_marathi, father_name, mother_name, birth_date_words, religion, caste, \
               sub_caste, caste_certificate, is_minority, nationality, mother_tongue, \
               mobile_number, bpl_status, bpl_number, disability_status, disability_type, \
               parent_full_name, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
               $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31) \
             RETURNING {ADMISSION_COLUMNS}"
        ))
        .bind(created_by)
        .bind(&d.school_name)
        .bind(d.continuous_student_id.as_deref())
        .bind(d.udise_pen.as_deref())
        .bind(d.admission_class.as_deref())
        .bind(d.birth_register_no.as_deref())
        .bind(d.aadhaar_no.as_deref())
        .bind(d.birth_date)
        .bind(d.admission_date)
        .bind(d.gender.map(|g| g.as_str()))
        .bind(d.student_photo.as_deref())
        .bind(d.parent_photo.as_deref())
        .bind(&d.first_name_marathi)
        .bind(&d.last_name_marathi)
        .bind(&d.father_name)
        .bind(&d.mother_name)
        .bind(d.birth_date_words.as_deref())
        .bind(d.religion.as_deref())
        .bind(d.caste.as_deref())
        .bind(d.sub_caste.as_deref())
        .bind(d.caste_certificate.as_deref())
        .bind(d.is_minority)
        .bind(d.nationality.as_deref())
        .bind(d.mother_tongue.as_deref())
        .bind(d.mobile_number.as_deref())
        .bind(d.bpl_status)
        .bind(d.bpl_number.as_deref())
        .bind(d.disability_status)
        .bind(d.disability_type.as_deref())
        .bind(&d.parent_full_name)
        .bind(&d.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_admission(&row))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<AdmissionRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ADMISSION_COLUMNS} FROM admission_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_admission))
    }

    async fn list_by_creator(&self, created_by: Uuid) -> anyhow::Result<Vec<AdmissionRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ADMISSION_COLUMNS} FROM admission_records \
             WHERE created_by = $1 ORDER BY created_at DESC"
        ))
        .bind(created_by)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_admission).collect())
    }
}
