use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{NewUser, UserConflict, UserRepository};
use crate::domain::users::user::{ProfileChanges, User};
use crate::infrastructure::db::PgPool;

// Constraint names Postgres assigns in migrations/20250101000000_init.sql.
const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_lower_idx";

const USER_COLUMNS: &str = "id, username, email, full_name, password_hash, phone_number, \
                            address, date_of_birth, profile_photo, created_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        full_name: r.get("full_name"),
        password_hash: r.try_get("password_hash").ok(),
        phone_number: r.try_get("phone_number").ok().flatten(),
        address: r.try_get("address").ok().flatten(),
        date_of_birth: r.try_get("date_of_birth").ok().flatten(),
        profile_photo: r.try_get("profile_photo").ok().flatten(),
        created_at: r.get("created_at"),
    }
}

fn conflict_or(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            match db.constraint() {
                Some(USERNAME_CONSTRAINT) => return UserConflict::Username.into(),
                Some(EMAIL_CONSTRAINT) => return UserConflict::Email.into(),
                _ => {}
            }
        }
    }
    err.into()
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (username, email, full_name, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.username)
        .bind(user.email)
        .bind(user.full_name)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_or)?;
        Ok(map_user(&row))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        // The session loader never needs the hash.
        Ok(row.as_ref().map(map_user).map(|mut u| {
            u.password_hash = None;
            u
        }))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "UPDATE users SET \
               full_name = COALESCE($2, full_name), \
               email = COALESCE($3, email), \
               phone_number = COALESCE($4, phone_number), \
               address = COALESCE($5, address), \
               date_of_birth = COALESCE($6, date_of_birth), \
               profile_photo = COALESCE($7, profile_photo) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.full_name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.phone_number.as_deref())
        .bind(changes.address.as_deref())
        .bind(changes.date_of_birth)
        .bind(changes.profile_photo.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(conflict_or)?;
        Ok(row.as_ref().map(map_user).map(|mut u| {
            u.password_hash = None;
            u
        }))
    }
}
