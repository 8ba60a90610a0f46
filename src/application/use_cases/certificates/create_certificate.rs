use uuid::Uuid;

use crate::application::ports::certificate_repository::CertificateRepository;
use crate::domain::certificates::certificate::{
    CertificateDetails, CertificateKind, CertificateRequest,
};

pub struct CreateCertificate<'a, R: CertificateRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CertificateRepository + ?Sized> CreateCertificate<'a, R> {
    pub async fn execute(
        &self,
        created_by: Uuid,
        kind: CertificateKind,
        details: &CertificateDetails,
    ) -> anyhow::Result<CertificateRequest> {
        let cert = self.repo.insert(kind, created_by, details).await?;
        tracing::info!(certificate_id = %cert.id, kind = kind.as_str(), "certificate_created");
        Ok(cert)
    }
}
