use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::forms::auth::LoginForm;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` when the username is unknown or the password does not match.
    pub async fn execute(&self, form: &LoginForm) -> anyhow::Result<Option<User>> {
        let mut user = match self.repo.find_by_username(&form.username).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let hash = user.password_hash.take().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(form.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
