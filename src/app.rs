use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub const DATASET_ROUTE: &str = "/hotel_bookings_1000.csv";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(DATASET_ROUTE, get(handlers::get_dataset))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
