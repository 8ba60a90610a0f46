use uuid::Uuid;

use crate::application::ports::certificate_repository::CertificateRepository;
use crate::application::services::certificates::render_html;
use crate::domain::certificates::certificate::{CertificateKind, CertificateRequest};

pub struct GetCertificate<'a, R: CertificateRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CertificateRepository + ?Sized> GetCertificate<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<CertificateRequest>> {
        Ok(self
            .repo
            .get(id)
            .await?
            .filter(|c| c.created_by == user_id))
    }

    /// Printable HTML document for a certificate the user owns.
    pub async fn render(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<String>> {
        Ok(self.execute(user_id, id).await?.as_ref().map(render_html))
    }
}

pub struct ListCertificates<'a, R: CertificateRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CertificateRepository + ?Sized> ListCertificates<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        kind: Option<CertificateKind>,
    ) -> anyhow::Result<Vec<CertificateRequest>> {
        self.repo.list_by_creator(user_id, kind).await
    }
}
