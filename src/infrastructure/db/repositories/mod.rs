pub mod admission_repository_sqlx;
pub mod certificate_repository_sqlx;
pub mod user_repository_sqlx;
