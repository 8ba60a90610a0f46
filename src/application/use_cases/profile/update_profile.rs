use uuid::Uuid;

use crate::application::forms::profile::ProfileForm;
use crate::application::ports::upload_store::{UploadStore, discard_uploads};
use crate::application::ports::user_repository::{UserConflict, UserRepository};
use crate::domain::users::user::{ProfileChanges, User};

pub const PROFILE_UPLOADS: &str = "profiles";

#[derive(thiserror::Error, Debug)]
pub enum UpdateProfileError {
    #[error("email is already registered to another account")]
    EmailTaken,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct UpdateProfile<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: UploadStore + ?Sized,
{
    pub repo: &'a R,
    pub uploads: &'a S,
}

impl<'a, R, S> UpdateProfile<'a, R, S>
where
    R: UserRepository + ?Sized,
    S: UploadStore + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        form: ProfileForm,
    ) -> Result<User, UpdateProfileError> {
        if let Some(email) = form.email.as_deref() {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != user_id {
                    return Err(UpdateProfileError::EmailTaken);
                }
            }
        }

        let profile_photo = match form.profile_photo {
            Some(file) => {
                let stored = self
                    .uploads
                    .save(PROFILE_UPLOADS, file.filename.as_deref(), &file.bytes)
                    .await
                    .map_err(|err| {
                        tracing::error!(error = ?err, user_id = %user_id, "store_profile_photo_failed");
                        err
                    })?;
                Some(stored.relative_path)
            }
            None => None,
        };

        let changes = ProfileChanges {
            full_name: form.full_name,
            email: form.email,
            phone_number: form.phone_number,
            address: form.address,
            date_of_birth: form.date_of_birth,
            profile_photo,
        };
        if changes.is_empty() {
            return self
                .repo
                .find_by_id(user_id)
                .await?
                .ok_or(UpdateProfileError::NotFound);
        }
        let result = match self.repo.update_profile(user_id, &changes).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UpdateProfileError::NotFound),
            Err(err) if UserConflict::of(&err) == Some(UserConflict::Email) => {
                Err(UpdateProfileError::EmailTaken)
            }
            Err(err) => {
                tracing::error!(error = ?err, user_id = %user_id, "update_profile_failed");
                Err(UpdateProfileError::Other(err))
            }
        };
        if result.is_err() {
            if let Some(photo) = changes.profile_photo {
                discard_uploads(self.uploads, &[photo]).await;
            }
        }
        result
    }
}
