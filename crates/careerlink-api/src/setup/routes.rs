pub mod health;

use crate::constants::{
    API_BASE, API_PREFIX, MULTIPART_OVERHEAD_BYTES, UPLOADS_PATH, UPLOAD_ALIAS_PATH,
};
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use careerlink_core::Config;
use health::{health_check, liveness_check};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit.max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .merge(public_routes())
        .merge(file_routes())
        .merge(upload_routes(config))
        .merge(utoipa_rapidoc::RapiDoc::new(format!("{}/openapi.json", API_BASE)).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route(
            &format!("{}/openapi.json", API_BASE),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/{{dir}}/{{filename}}", UPLOADS_PATH),
            get(handlers::file_get::get_file),
        )
        .route(
            &format!("{}/{{alias}}/{{filename}}", UPLOAD_ALIAS_PATH),
            get(handlers::file_get::get_file_by_alias),
        )
}

/// Upload routes read the body themselves and reject oversized files with a
/// structured error, so axum's default 2 MB cap is lifted and replaced with a
/// hard ceiling a little above the configured file size.
fn upload_routes(config: &Config) -> Router<Arc<AppState>> {
    let body_limit = config
        .max_file_size()
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            &format!("{}/uploads/{{category}}", API_PREFIX),
            post(handlers::upload::upload_file),
        )
        .route(
            &format!("{}/uploads/{{category}}/{{filename}}", API_PREFIX),
            put(handlers::upload::replace_file).delete(handlers::file_delete::delete_file),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
}
