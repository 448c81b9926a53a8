use axum::http::StatusCode;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;

use super::aggregate::aggregate_daily;
use super::models::*;
use crate::api_budget::CallBudget;
use crate::cache::{normalize_cache_key, CachedLocation, GeoCache};
use crate::config::AppConfig;
use crate::error::HttpError;
use crate::impl_into_response;

/// Maximum number of 3-hour steps the provider will return (5 days)
const MAX_SAMPLES: u32 = 40;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Failed to fetch weather data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather provider error: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Daily provider call budget exhausted")]
    BudgetExhausted,
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            // Mirror the provider's status; anything unrepresentable becomes 500
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::BudgetExhausted => StatusCode::TOO_MANY_REQUESTS,
            Self::Request(_) | Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::Upstream { .. } => Some("UPSTREAM_ERROR"),
            Self::Request(_) => Some("REQUEST_ERROR"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
            Self::BudgetExhausted => Some("BUDGET_EXHAUSTED"),
        }
    }
}

impl_into_response!(ForecastError);

pub struct ForecastService {
    client: Client,
    api_key: String,
    geocoding_url: String,
    forecast_url: String,
    geo_cache: GeoCache,
    budget: Arc<CallBudget>,
}

impl ForecastService {
    pub fn new(
        client: Client,
        config: &AppConfig,
        geo_cache: GeoCache,
        budget: Arc<CallBudget>,
    ) -> Self {
        Self {
            client,
            api_key: config.openweathermap_api_key.clone(),
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            geo_cache,
            budget,
        }
    }

    /// Resolve a city name to coordinates via the Geocoding API.
    /// The first match wins; results are cached for 24 hours.
    pub async fn geocode(&self, city: &str) -> Result<GeoLocation, ForecastError> {
        let cache_key = normalize_cache_key(city);

        if let Some(cached) = self.geo_cache.get(&cache_key) {
            tracing::debug!(city = %city, "Geocoding cache hit");
            return Ok(GeoLocation {
                name: cached.name,
                lat: cached.lat,
                lon: cached.lon,
                country: cached.country,
            });
        }

        tracing::debug!(city = %city, "Geocoding cache miss");

        if !self.budget.try_acquire() {
            tracing::warn!(
                used_today = self.budget.used_today(),
                "Provider call budget exhausted, rejecting geocoding request"
            );
            return Err(ForecastError::BudgetExhausted);
        }

        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[("q", city), ("limit", "1"), ("appid", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ForecastError::Upstream {
                status: status.as_u16(),
                message: format!("Geocoding failed: {}", message),
            });
        }

        let locations: Vec<GeoLocation> = response.json().await?;

        let location = locations
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::CityNotFound(city.to_string()))?;

        self.geo_cache.insert(
            cache_key,
            CachedLocation {
                name: location.name.clone(),
                lat: location.lat,
                lon: location.lon,
                country: location.country.clone(),
            },
        );

        Ok(location)
    }

    /// Fetch the 5-day/3-hour forecast for a city and aggregate it into
    /// seven daily summaries.
    pub async fn get_forecast(
        &self,
        city: &str,
        units: &str,
    ) -> Result<WeatherData, ForecastError> {
        let location = self.geocode(city).await?;

        tracing::debug!(
            city = %location.name,
            lat = %location.lat,
            lon = %location.lon,
            "Fetching 5-day forecast"
        );

        if !self.budget.try_acquire() {
            tracing::warn!(
                used_today = self.budget.used_today(),
                "Provider call budget exhausted, rejecting forecast request"
            );
            return Err(ForecastError::BudgetExhausted);
        }

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("units", units.to_string()),
                ("cnt", MAX_SAMPLES.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        if !status.is_success() {
            let error: ProviderError = response.json().await.unwrap_or(ProviderError {
                message: format!("HTTP {}", status),
            });
            return Err(ForecastError::Upstream {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let data: FiveDayForecast = response.json().await?;

        Self::build_weather_data(city, location, data.list)
    }

    /// Shape the final response: reject empty provider data, then aggregate.
    /// The requested city name is echoed back, as the card UI displays it.
    fn build_weather_data(
        city: &str,
        location: GeoLocation,
        samples: Vec<ForecastSample>,
    ) -> Result<WeatherData, ForecastError> {
        if samples.is_empty() {
            return Err(ForecastError::InvalidResponse(
                "forecast contained no samples".to_string(),
            ));
        }

        let list = aggregate_daily(&samples);

        tracing::info!(
            city = %location.name,
            days = list.len(),
            "Forecast aggregated"
        );

        Ok(WeatherData {
            city: city.to_string(),
            country: location.country,
            list,
        })
    }
}
