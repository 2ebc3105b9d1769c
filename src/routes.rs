use axum::{body::Body, http::Request, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{Config, ConfigError};
use crate::handlers;

/// Build the application router from the loaded config.
pub fn create_router(config: &Config) -> Result<Router, ConfigError> {
    let cors = cors_layer(config)?;

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Ok(Router::new()
        .route("/", get(handlers::root))
        .layer(ServiceBuilder::new().layer(trace).layer(cors)))
}

/// Credentialed CORS for the configured origins. Methods and headers are
/// mirrored from the preflight request, since a literal `*` is not allowed
/// alongside credentials.
fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let origins = config.cors_origins()?;
    tracing::debug!("CORS origins: {:?}", config.allow_origins());

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
