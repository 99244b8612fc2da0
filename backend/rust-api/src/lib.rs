use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::HuntError;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The booking and play screens are served from another origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .merge(api_routes().layer(cors))
        .with_state(app_state)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/hunts", get(handlers::hunts::list_hunts))
        .route("/api/v1/hunts/{id}", get(handlers::hunts::get_hunt))
        .route(
            "/api/v1/reservations",
            get(handlers::reservations::list_reservations)
                .post(handlers::reservations::create_reservation),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(handlers::reservations::get_reservation),
        )
        .route(
            "/api/v1/reservations/{id}/countdown",
            get(handlers::sse::countdown_stream),
        )
        .route(
            "/api/v1/sessions",
            post(handlers::sessions::create_session),
        )
        .route(
            "/api/v1/sessions/{id}",
            get(handlers::sessions::get_session),
        )
        .route(
            "/api/v1/sessions/{id}/activate",
            post(handlers::sessions::activate_session),
        )
        .route(
            "/api/v1/sessions/{id}/answers",
            post(handlers::sessions::submit_answer),
        )
        .route(
            "/api/v1/sessions/{id}/hints",
            post(handlers::sessions::request_hint),
        )
        .route(
            "/api/v1/sessions/{id}/qr",
            post(handlers::sessions::verify_qr),
        )
        .route(
            "/api/v1/sessions/{id}/abandon",
            post(handlers::sessions::abandon_session),
        )
        .route(
            "/api/v1/sessions/{id}/summary",
            get(handlers::sessions::get_summary),
        )
}
