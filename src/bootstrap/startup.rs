use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;
use crate::infrastructure::chat::HuggingFaceChatClient;
use crate::infrastructure::db::{self, PgPool};
use crate::infrastructure::db::repositories::admission_repository_sqlx::SqlxAdmissionRepository;
use crate::infrastructure::db::repositories::certificate_repository_sqlx::SqlxCertificateRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::storage::FsUploadStore;

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("failed to create upload directory {path}")]
    UploadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to connect to the database")]
    Database(#[source] sqlx::Error),
    #[error("failed to create database tables")]
    Migrate(#[source] sqlx::migrate::MigrateError),
    #[error("failed to build the chat client")]
    ChatClient(#[source] anyhow::Error),
}

/// Result of a successful startup: the shared context and the pool behind it.
pub struct Initialized {
    pub ctx: AppContext,
    pub pool: PgPool,
}

pub async fn ensure_upload_dir(cfg: &Config) -> Result<PathBuf, StartupError> {
    let path = PathBuf::from(&cfg.upload_folder);
    tokio::fs::create_dir_all(&path)
        .await
        .map_err(|source| StartupError::UploadDir {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Brings up every dependency in order and fails on the first error.
pub async fn initialize(cfg: Config) -> Result<Initialized, StartupError> {
    let upload_root = ensure_upload_dir(&cfg).await?;
    info!(dir = %upload_root.display(), "upload directory ready");

    let pool = db::connect_pool(&cfg.database_url)
        .await
        .map_err(StartupError::Database)?;

    if cfg.skip_db_create {
        info!("SKIP_DB_CREATE set, skipping table creation");
    } else {
        db::migrate(&pool).await.map_err(StartupError::Migrate)?;
        info!("database tables created/ensured");
    }

    let chat_client =
        HuggingFaceChatClient::new(cfg.chat_api_url.clone()).map_err(StartupError::ChatClient)?;

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxAdmissionRepository::new(pool.clone())),
        Arc::new(SqlxCertificateRepository::new(pool.clone())),
        Arc::new(FsUploadStore::new(upload_root)),
        Arc::new(chat_client),
    );

    Ok(Initialized {
        ctx: AppContext::new(cfg, services),
        pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(upload_folder: String) -> Config {
        Config {
            port: 0,
            frontend_url: None,
            database_url: "postgresql://localhost/none".into(),
            session_secret: "test".into(),
            session_expires_secs: 60,
            upload_folder,
            max_content_length: 1024,
            skip_db_create: true,
            chat_api_url: "http://localhost/".into(),
            debug: false,
            is_production: false,
        }
    }

    #[tokio::test]
    async fn upload_dir_creation_is_idempotent() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("uploads");
        let cfg = cfg(dir.to_string_lossy().to_string());
        ensure_upload_dir(&cfg).await.unwrap();
        ensure_upload_dir(&cfg).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn upload_dir_failure_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        let cfg = cfg(file.join("uploads").to_string_lossy().to_string());
        let err = ensure_upload_dir(&cfg).await.unwrap_err();
        assert!(matches!(err, StartupError::UploadDir { .. }));
    }
}
