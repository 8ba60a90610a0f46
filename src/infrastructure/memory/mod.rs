//! In-process repositories backed by `RwLock`ed vectors. Used by tests and
//! by local runs that do not need a database.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::admission_repository::AdmissionRepository;
use crate::application::ports::certificate_repository::CertificateRepository;
use crate::application::ports::user_repository::{NewUser, UserConflict, UserRepository};
use crate::domain::admissions::admission::{AdmissionDetails, AdmissionRecord};
use crate::domain::certificates::certificate::{
    CertificateDetails, CertificateKind, CertificateRequest,
};
use crate::domain::users::user::{ProfileChanges, User};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserConflict::Username.into());
        }
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(user.email)) {
            return Err(UserConflict::Email.into());
        }
        let row = User {
            id: Uuid::new_v4(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            full_name: user.full_name.to_string(),
            password_hash: Some(user.password_hash.to_string()),
            phone_number: None,
            address: None,
            date_of_birth: None,
            profile_photo: None,
            created_at: Utc::now(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned().map(|mut u| {
            u.password_hash = None;
            u
        }))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> anyhow::Result<Option<User>> {
        let mut users = self.users.write().await;
        if let Some(email) = &changes.email {
            if users
                .iter()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(UserConflict::Email.into());
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.full_name {
            user.full_name = v.clone();
        }
        if let Some(v) = &changes.email {
            user.email = v.clone();
        }
        if let Some(v) = &changes.phone_number {
            user.phone_number = Some(v.clone());
        }
        if let Some(v) = &changes.address {
            user.address = Some(v.clone());
        }
        if let Some(v) = changes.date_of_birth {
            user.date_of_birth = Some(v);
        }
        if let Some(v) = &changes.profile_photo {
            user.profile_photo = Some(v.clone());
        }
        let mut out = user.clone();
        out.password_hash = None;
        Ok(Some(out))
    }
}

#[derive(Default)]
pub struct InMemoryAdmissionRepository {
    records: RwLock<Vec<AdmissionRecord>>,
}

#[async_trait]
impl AdmissionRepository for InMemoryAdmissionRepository {
    async fn insert(
        &self,
        created_by: Uuid,
        details: &AdmissionDetails,
    ) -> anyhow::Result<AdmissionRecord> {
        let record = AdmissionRecord {
            id: Uuid::new_v4(),
            created_by,
            created_at: Utc::now(),
            details: details.clone(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<AdmissionRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_creator(&self, created_by: Uuid) -> anyhow::Result<Vec<AdmissionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.created_by == created_by)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryCertificateRepository {
    certificates: RwLock<Vec<CertificateRequest>>,
}

#[async_trait]
impl CertificateRepository for InMemoryCertificateRepository {
    async fn insert(
        &self,
        kind: CertificateKind,
        created_by: Uuid,
        details: &CertificateDetails,
    ) -> anyhow::Result<CertificateRequest> {
        let cert = CertificateRequest {
            id: Uuid::new_v4(),
            kind,
            created_by,
            created_at: Utc::now(),
            details: details.clone(),
        };
        self.certificates.write().await.push(cert.clone());
        Ok(cert)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CertificateRequest>> {
        let certs = self.certificates.read().await;
        Ok(certs.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_creator(
        &self,
        created_by: Uuid,
        kind: Option<CertificateKind>,
    ) -> anyhow::Result<Vec<CertificateRequest>> {
        let certs = self.certificates.read().await;
        Ok(certs
            .iter()
            .rev()
            .filter(|c| c.created_by == created_by && kind.map(|k| k == c.kind).unwrap_or(true))
            .cloned()
            .collect())
    }
}
