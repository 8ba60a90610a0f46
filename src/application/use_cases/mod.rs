pub mod admissions;
pub mod auth;
pub mod certificates;
pub mod chat;
pub mod profile;
