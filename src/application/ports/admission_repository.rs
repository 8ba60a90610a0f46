use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::admissions::admission::{AdmissionDetails, AdmissionRecord};

#[async_trait]
pub trait AdmissionRepository: Send + Sync {
    async fn insert(
        &self,
        created_by: Uuid,
        details: &AdmissionDetails,
    ) -> anyhow::Result<AdmissionRecord>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<AdmissionRecord>>;
    /// Newest first.
    async fn list_by_creator(&self, created_by: Uuid) -> anyhow::Result<Vec<AdmissionRecord>>;
}
