use uuid::Uuid;

use crate::application::forms::UploadedFile;
use crate::application::forms::admission::AdmissionForm;
use crate::application::ports::admission_repository::AdmissionRepository;
use crate::application::ports::upload_store::{UploadStore, discard_uploads};
use crate::domain::admissions::admission::{AdmissionDetails, AdmissionRecord};

pub const ADMISSION_UPLOADS: &str = "admissions";

pub struct CreateAdmission<'a, R, S>
where
    R: AdmissionRepository + ?Sized,
    S: UploadStore + ?Sized,
{
    pub repo: &'a R,
    pub uploads: &'a S,
}

impl<'a, R, S> CreateAdmission<'a, R, S>
where
    R: AdmissionRepository + ?Sized,
    S: UploadStore + ?Sized,
{
    pub async fn execute(
        &self,
        created_by: Uuid,
        form: AdmissionForm,
    ) -> anyhow::Result<AdmissionRecord> {
        let student_photo = self.store_photo(form.student_photo).await?;
        let parent_photo = match self.store_photo(form.parent_photo).await {
            Ok(path) => path,
            Err(err) => {
                discard_uploads(self.uploads, student_photo.as_slice()).await;
                return Err(err);
            }
        };
        let stored: Vec<String> = student_photo.iter().chain(&parent_photo).cloned().collect();
        let details = AdmissionDetails {
            school_name: form.school_name,
            continuous_student_id: form.continuous_student_id,
            udise_pen: form.udise_pen,
            admission_class: form.admission_class,
            birth_register_no: form.birth_register_no,
            aadhaar_no: form.aadhaar_no,
            birth_date: form.birth_date,
            admission_date: form.admission_date,
            gender: form.gender,
            student_photo,
            parent_photo,
            first_name_marathi: form.first_name_marathi,
            last_name_marathi: form.last_name_marathi,
            father_name: form.father_name,
            mother_name: form.mother_name,
            birth_date_words: form.birth_date_words,
            religion: form.religion,
            caste: form.caste,
            sub_caste: form.sub_caste,
            caste_certificate: form.caste_certificate,
            is_minority: form.is_minority,
            nationality: form.nationality,
            mother_tongue: form.mother_tongue,
            mobile_number: form.mobile_number,
            bpl_status: form.bpl_status,
            bpl_number: form.bpl_number,
            disability_status: form.disability_status,
            disability_type: form.disability_type,
            parent_full_name: form.parent_full_name,
            address: form.address,
        };
        let record = match self.repo.insert(created_by, &details).await {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(error = ?err, created_by = %created_by, "insert_admission_failed");
                discard_uploads(self.uploads, &stored).await;
                return Err(err);
            }
        };
        tracing::info!(admission_id = %record.id, created_by = %created_by, "admission_created");
        Ok(record)
    }

    async fn store_photo(&self, file: Option<UploadedFile>) -> anyhow::Result<Option<String>> {
        let Some(file) = file else {
            return Ok(None);
        };
        let stored = self
            .uploads
            .save(ADMISSION_UPLOADS, file.filename.as_deref(), &file.bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "store_admission_photo_failed");
                err
            })?;
        Ok(Some(stored.relative_path))
    }
}
