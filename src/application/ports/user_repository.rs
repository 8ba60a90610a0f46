use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::{ProfileChanges, User};

#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
}

/// A write hit a unique column owned by another user. Carried inside the
/// `anyhow::Error` returned by `create_user` and `update_profile`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserConflict {
    #[error("username already exists")]
    Username,
    #[error("email already exists")]
    Email,
}

impl UserConflict {
    pub fn of(err: &anyhow::Error) -> Option<Self> {
        err.downcast_ref::<Self>().copied()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<User>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> anyhow::Result<Option<User>>;
}
