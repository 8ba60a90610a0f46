use std::sync::Arc;

use crate::application::ports::admission_repository::AdmissionRepository;
use crate::application::ports::certificate_repository::CertificateRepository;
use crate::application::ports::chat_client::ChatClient;
use crate::application::ports::upload_store::UploadStore;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

/// Everything a request handler needs, built once at startup and shared as router state.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    admission_repo: Arc<dyn AdmissionRepository>,
    certificate_repo: Arc<dyn CertificateRepository>,
    upload_store: Arc<dyn UploadStore>,
    chat_client: Arc<dyn ChatClient>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        admission_repo: Arc<dyn AdmissionRepository>,
        certificate_repo: Arc<dyn CertificateRepository>,
        upload_store: Arc<dyn UploadStore>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            user_repo,
            admission_repo,
            certificate_repo,
            upload_store,
            chat_client,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn admission_repo(&self) -> Arc<dyn AdmissionRepository> {
        self.services.admission_repo.clone()
    }

    pub fn certificate_repo(&self) -> Arc<dyn CertificateRepository> {
        self.services.certificate_repo.clone()
    }

    pub fn upload_store(&self) -> Arc<dyn UploadStore> {
        self.services.upload_store.clone()
    }

    pub fn chat_client(&self) -> Arc<dyn ChatClient> {
        self.services.chat_client.clone()
    }
}
