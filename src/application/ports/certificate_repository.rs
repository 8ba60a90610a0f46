use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::certificates::certificate::{
    CertificateDetails, CertificateKind, CertificateRequest,
};

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn insert(
        &self,
        kind: CertificateKind,
        created_by: Uuid,
        details: &CertificateDetails,
    ) -> anyhow::Result<CertificateRequest>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CertificateRequest>>;
    async fn list_by_creator(
        &self,
        created_by: Uuid,
        kind: Option<CertificateKind>,
    ) -> anyhow::Result<Vec<CertificateRequest>>;
}
