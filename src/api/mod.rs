use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::error::ConfigError;
use crate::pipeline::MockPipeline;

pub mod handlers;
pub mod models;

pub fn create_router(pipeline: Arc<MockPipeline>, config: &Config) -> Result<Router, ConfigError> {
    // Credentialed CORS rejects `*`, so methods and headers echo the preflight.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(config.origin_header()?))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/query", post(handlers::query_handler))
        .fallback(handlers::not_found_handler)
        .with_state(pipeline)
        .layer(cors))
}

/// Router built from `config`, with the pipeline delay it specifies.
pub fn app(config: &Config) -> Result<Router, ConfigError> {
    create_router(Arc::new(MockPipeline::new(config.delay)), config)
}
