//! Route table for the panel API.
//!
//! Shared by the binary and the integration tests so both serve the same
//! endpoints behind the same middleware.

use crate::error::AppError;
use crate::handlers::{auth_handlers, blob_handlers, db_handlers, main_handlers, query_handlers};
use crate::middleware::AuthenticationMiddleware;
use actix_web::web;

/// Configures all application routes.
///
/// Everything lives under `/api`; [`AuthenticationMiddleware`] lets the
/// health, login and logout endpoints through and requires a bearer token
/// for the rest.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings become the usual `{error, message}` 400
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }));

    let api_scope = web::scope("/api")
        .wrap(AuthenticationMiddleware)
        // Public endpoints (no auth required)
        .route("/health", web::get().to(main_handlers::health_check))
        .route("/login", web::post().to(auth_handlers::login))
        .route("/logout", web::get().to(auth_handlers::logout))
        // Database endpoints, bound to the database of the session
        .service(
            web::scope("/db")
                .route("/tables", web::get().to(db_handlers::get_tables))
                .route("/info", web::get().to(db_handlers::get_database_info))
                .route("/table-schema", web::get().to(db_handlers::get_table_schema))
                .route("/table-data", web::get().to(db_handlers::get_table_data))
                .route(
                    "/update-table-data",
                    web::post().to(db_handlers::update_table_data),
                )
                .route("/execute-query", web::post().to(query_handlers::execute_query))
                .route("/generate-query", web::post().to(query_handlers::generate_query))
                .route("/blob-data", web::get().to(blob_handlers::get_blob_data))
                .route(
                    "/update-blob-data",
                    web::post().to(blob_handlers::update_blob_data),
                ),
        );

    cfg.service(api_scope);
}
