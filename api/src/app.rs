//! Application factory
//!
//! Builds the Actix-web application: middleware, routes and the fallbacks
//! that turn unmatched URIs and unreadable bodies into API errors.

use actix_web::body::MessageBody;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::config::Config;
use crate::handlers::error::{json_error_handler, uri_not_found};
use crate::middleware::LanguageMiddleware;
use crate::routes::spatial;

/// Register every route of the API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1").service(
            web::scope("/spatial-ids").route("/search", web::post().to(spatial::search)),
        ),
    );
}

/// Create and configure the application
pub fn create_app(
    config: &Config,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(config.app.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(web::Data::new(config.error.clone()))
        .app_data(json_config)
        // Language first so every handler and fallback can read it
        .wrap(LanguageMiddleware)
        .wrap(Logger::default())
        .configure(configure)
        .default_service(web::route().to(uri_not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "spatial-id-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
