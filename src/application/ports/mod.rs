pub mod admission_repository;
pub mod certificate_repository;
pub mod chat_client;
pub mod upload_store;
pub mod user_repository;
