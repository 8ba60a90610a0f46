use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::bootstrap::app_context::AppContext;

pub mod admissions;
pub mod auth;
pub mod certificates;
pub mod chat;
pub mod error;
pub mod form_input;
pub mod forms;
pub mod health;
pub mod profile;
pub mod session;
pub mod uploads;

/// All `/api` routes that run on the application context, with the body size cap applied.
pub fn router(ctx: AppContext) -> Router {
    let limit = ctx.cfg.max_content_length;
    Router::new()
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", forms::routes())
        .nest("/api", profile::routes(ctx.clone()))
        .nest("/api", admissions::routes(ctx.clone()))
        .nest("/api", certificates::routes(ctx.clone()))
        .nest("/api", chat::routes(ctx.clone()))
        .nest("/api", uploads::routes(ctx))
        .layer(DefaultBodyLimit::max(limit))
}
