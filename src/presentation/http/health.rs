use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answered, otherwise `degraded`.
    pub status: &'static str,
    pub database_latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResp> {
    let started = Instant::now();
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => Json(HealthResp {
            status: "ok",
            database_latency_ms: Some(started.elapsed().as_millis() as u64),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "health_database_unreachable");
            Json(HealthResp {
                status: "degraded",
                database_latency_ms: None,
            })
        }
    }
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
