use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Geocoding API Response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

// ============================================================================
// 5-day/3-hour Forecast API Response (Internal)
// These structs deserialize the raw API response; unused fields are ignored
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FiveDayForecast {
    pub list: Vec<ForecastSample>,
}

/// One 3-hour forecast step as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: SampleMain,
    pub weather: Vec<WeatherCondition>,
    pub wind: SampleWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleWind {
    pub speed: f64,
}

/// Error body the provider returns on non-success statuses
#[derive(Debug, Deserialize)]
pub struct ProviderError {
    pub message: String,
}

// ============================================================================
// API Response Models (External - what we return to clients)
// ============================================================================

/// Seven-day forecast for one city
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherData {
    pub city: String,
    pub country: String,
    pub list: Vec<DailySummary>,
}

/// One aggregated calendar day
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailySummary {
    /// Timestamp of the day's first 3-hour sample
    pub dt: i64,
    pub temp: DailyTemperature,
    /// Conditions of the day's first sample, copied verbatim
    pub weather: Vec<WeatherCondition>,
    /// Mean humidity over the day, rounded to the nearest percent
    pub humidity: u32,
    /// Mean wind speed over the day
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyTemperature {
    /// Mean of the day's sampled temperatures
    pub day: f64,
    /// Lowest sampled minimum
    pub min: f64,
    /// Highest sampled maximum
    pub max: f64,
}

/// Weather condition descriptor, passed through from the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}
