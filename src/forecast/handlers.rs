use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::models::WeatherData;
use super::service::ForecastError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name
    pub city: Option<String>,
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get the seven-day forecast by query parameter or default city
///
/// GET /api/weather?city=Shanghai
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherData>, ForecastError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let forecast = state.forecast_service.get_forecast(&city, &units).await?;
    Ok(Json(forecast))
}

/// Get the seven-day forecast by city path parameter
///
/// GET /api/weather/{city}?units=metric
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherData>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let forecast = state.forecast_service.get_forecast(&city, &units).await?;
    Ok(Json(forecast))
}
