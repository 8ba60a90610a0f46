use uuid::Uuid;

use crate::application::ports::admission_repository::AdmissionRepository;
use crate::domain::admissions::admission::AdmissionRecord;

pub struct ListAdmissions<'a, R: AdmissionRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AdmissionRepository + ?Sized> ListAdmissions<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<AdmissionRecord>> {
        self.repo.list_by_creator(user_id).await
    }
}
