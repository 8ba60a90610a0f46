use std::net::SocketAddr;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use school_records::bootstrap::config::Config;
use school_records::bootstrap::startup::{Initialized, initialize};
use school_records::presentation::http as api;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::auth::register,
            api::auth::login,
            api::auth::logout,
            api::auth::me,
            api::profile::get_profile,
            api::profile::update_profile,
            api::admissions::create_admission,
            api::admissions::list_admissions,
            api::admissions::get_admission,
            api::certificates::create_certificate,
            api::certificates::list_certificates,
            api::certificates::get_certificate,
            api::certificates::certificate_document,
            api::chat::ask,
            api::forms::describe_form,
            api::uploads::serve_upload,
            api::health::health,
        ),
        components(schemas(
            api::auth::RegisterRequest,
            api::auth::LoginRequest,
            api::auth::LoginResponse,
            api::auth::UserResponse,
            api::profile::ProfileMultipart,
            api::admissions::AdmissionResponse,
            api::admissions::AdmissionListResponse,
            api::certificates::CertificateResponse,
            api::certificates::CertificateListResponse,
            api::chat::ChatRequest,
            api::chat::ChatResponse,
            api::error::ErrorBody,
            api::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration, login and session"),
            (name = "Profile", description = "Current user's profile"),
            (name = "Admissions", description = "Student admission records"),
            (name = "Certificates", description = "Bonafide and representation certificates"),
            (name = "Chat", description = "Assistant backed by a hosted inference API"),
            (name = "Forms", description = "Form field descriptions"),
            (name = "Uploads", description = "Stored photos"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::OPTIONS,
    ];
    let headers = [
        http::header::CONTENT_TYPE,
        http::header::AUTHORIZATION,
    ];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(_)) | None if cfg.is_production => {
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = Config::from_env()?;

    let default_filter = if cfg.debug {
        "school_records=debug,tower_http=debug"
    } else {
        "school_records=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()))
        .init();

    info!(
        port = cfg.port,
        upload_folder = %cfg.upload_folder,
        skip_db_create = cfg.skip_db_create,
        debug = cfg.debug,
        production = cfg.is_production,
        "Starting school records backend"
    );

    let Initialized { ctx, pool } = match initialize(cfg.clone()).await {
        Ok(init) => init,
        Err(e) => {
            error!(error = ?e, "startup_failed");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .nest("/api", api::health::routes(pool))
        .merge(api::router(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
