use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

/// Resolves a session subject to a user. Any failure means "no user".
pub struct LoadUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> LoadUser<'a, R> {
    pub async fn execute(&self, subject: &str) -> Option<User> {
        let id = Uuid::parse_str(subject).ok()?;
        match self.repo.find_by_id(id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = ?e, user_id = %id, "load_user_failed");
                None
            }
        }
    }
}
