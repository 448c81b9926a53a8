use axum::{routing::get, Router};

use crate::forecast::handlers as forecast_handlers;
use crate::openapi::swagger_ui;
use crate::AppState;

/// Build the weather API routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(forecast_handlers::get_weather))
        .route(
            "/weather/{city}",
            get(forecast_handlers::get_weather_by_city),
        )
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(forecast_handlers::health))
        .route("/health", get(forecast_handlers::health))
        // API routes
        .nest("/api", weather_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
