pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod policy;
pub mod store;

use actix_web::web;

use crate::error::ApiError;

/// Route table, shared between the binary and the test harness.
/// Literal segments are registered before `{id}` so `/owner` and
/// `/stats/owner` are not swallowed by the id matcher.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api/residences")
                .route("", web::get().to(handlers::residences::list_residences))
                .route("", web::post().to(handlers::residences::create_residence))
                .route(
                    "/owner/{owner_id}",
                    web::get().to(handlers::residences::list_by_owner),
                )
                .route("/{id}", web::get().to(handlers::residences::get_residence))
                .route("/{id}", web::put().to(handlers::residences::update_residence))
                .route(
                    "/{id}",
                    web::delete().to(handlers::residences::delete_residence),
                ),
        )
        .service(
            web::scope("/api/reservations")
                .route("", web::post().to(handlers::reservations::create_reservation))
                .route("/owner", web::get().to(handlers::reservations::list_for_owner))
                .route(
                    "/client",
                    web::get().to(handlers::reservations::list_for_client),
                )
                .route(
                    "/stats/owner",
                    web::get().to(handlers::reservations::owner_stats),
                )
                .route(
                    "/{id}/status",
                    web::patch().to(handlers::reservations::transition_reservation),
                )
                .route("/{id}", web::get().to(handlers::reservations::get_reservation))
                .route(
                    "/{id}",
                    web::delete().to(handlers::reservations::delete_reservation),
                ),
        );
}

/// Malformed JSON bodies (bad syntax, unknown enum values) surface as the
/// standard InvalidInput shape instead of actix's default error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into())
}
