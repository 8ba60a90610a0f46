pub mod login;
pub mod me;
pub mod register;

#[cfg(test)]
mod tests {
    use super::login::Login;
    use super::me::LoadUser;
    use super::register::{Register, RegisterError};
    use crate::application::forms::auth::{LoginForm, RegistrationForm};
    use crate::application::ports::user_repository::{NewUser, UserRepository};
    use crate::domain::users::user::{ProfileChanges, User};
    use crate::infrastructure::memory::InMemoryUserRepository;
    use async_trait::async_trait;
    use uuid::Uuid;

    /// Answers every lookup with "absent", as a concurrent registration would see it.
    #[derive(Default)]
    struct StaleLookups(InMemoryUserRepository);

    #[async_trait]
    impl UserRepository for StaleLookups {
        async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<User> {
            self.0.create_user(user).await
        }
        async fn find_by_username(&self, _: &str) -> anyhow::Result<Option<User>> {
            Ok(None)
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<User>> {
            Ok(None)
        }
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
            self.0.find_by_id(id).await
        }
        async fn update_profile(
            &self,
            id: Uuid,
            changes: &ProfileChanges,
        ) -> anyhow::Result<Option<User>> {
            self.0.update_profile(id, changes).await
        }
    }

    fn registration(username: &str, email: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.into(),
            email: email.into(),
            full_name: "Sita Patil".into(),
            password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let repo = InMemoryUserRepository::default();
        let user = Register { repo: &repo }
            .execute(&registration("sitap", "sita@school.in"))
            .await
            .unwrap();
        assert_ne!(user.password_hash.as_deref(), Some("secret1"));

        let login = Login { repo: &repo };
        let ok = login
            .execute(&LoginForm {
                username: "sitap".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ok.id, user.id);
        assert!(ok.password_hash.is_none());

        let wrong = login
            .execute(&LoginForm {
                username: "sitap".into(),
                password: "secret2".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_rejected() {
        let repo = InMemoryUserRepository::default();
        let uc = Register { repo: &repo };
        uc.execute(&registration("sitap", "sita@school.in"))
            .await
            .unwrap();
        assert!(matches!(
            uc.execute(&registration("sitap", "other@school.in")).await,
            Err(RegisterError::UsernameTaken)
        ));
        assert!(matches!(
            uc.execute(&registration("gitap", "sita@school.in")).await,
            Err(RegisterError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn insert_conflicts_map_to_field_errors() {
        let repo = StaleLookups::default();
        let uc = Register { repo: &repo };
        uc.execute(&registration("sitap", "sita@school.in"))
            .await
            .unwrap();
        assert!(matches!(
            uc.execute(&registration("sitap", "other@school.in")).await,
            Err(RegisterError::UsernameTaken)
        ));
        assert!(matches!(
            uc.execute(&registration("gitap", "SITA@school.in")).await,
            Err(RegisterError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn load_user_signals_absence() {
        let repo = InMemoryUserRepository::default();
        let user = Register { repo: &repo }
            .execute(&registration("sitap", "sita@school.in"))
            .await
            .unwrap();
        let loader = LoadUser { repo: &repo };
        assert_eq!(
            loader.execute(&user.id.to_string()).await.map(|u| u.id),
            Some(user.id)
        );
        assert!(loader.execute("42").await.is_none());
        assert!(
            loader
                .execute(&uuid::Uuid::new_v4().to_string())
                .await
                .is_none()
        );
    }
}
