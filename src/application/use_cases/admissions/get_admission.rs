use uuid::Uuid;

use crate::application::ports::admission_repository::AdmissionRepository;
use crate::domain::admissions::admission::AdmissionRecord;

pub struct GetAdmission<'a, R: AdmissionRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AdmissionRepository + ?Sized> GetAdmission<'a, R> {
    /// Only the user who filed the admission can read it back.
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<AdmissionRecord>> {
        Ok(self
            .repo
            .get(id)
            .await?
            .filter(|r| r.created_by == user_id))
    }
}
