//! medcalc-api
//!
//! HTTP host for the calculators: lists them, describes their fields and
//! runs a fresh form controller for every calculation request.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/calculators", get(routes::calculators::list_calculators))
        .route(
            "/calculators/{id}",
            get(routes::calculators::get_calculator_detail),
        )
        .route(
            "/calculators/{id}/calculate",
            post(routes::calculators::calculate),
        )
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
