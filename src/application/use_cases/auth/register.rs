use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::forms::auth::RegistrationForm;
use crate::application::ports::user_repository::{NewUser, UserConflict, UserRepository};
use crate::domain::users::user::User;

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("email is already registered")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RegisterError {
    fn from_repo(err: anyhow::Error) -> Self {
        match UserConflict::of(&err) {
            Some(UserConflict::Username) => Self::UsernameTaken,
            Some(UserConflict::Email) => Self::EmailTaken,
            None => Self::Other(err),
        }
    }
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, form: &RegistrationForm) -> Result<User, RegisterError> {
        if self.repo.find_by_username(&form.username).await?.is_some() {
            return Err(RegisterError::UsernameTaken);
        }
        if self.repo.find_by_email(&form.email).await?.is_some() {
            return Err(RegisterError::EmailTaken);
        }
        let hash = hash_password(&form.password)?;
        let user = self
            .repo
            .create_user(NewUser {
                username: &form.username,
                email: &form.email,
                full_name: &form.full_name,
                password_hash: &hash,
            })
            .await
            .map_err(RegisterError::from_repo)?;
        tracing::info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}
