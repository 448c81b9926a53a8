use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::forecast::models::{DailySummary, DailyTemperature, WeatherCondition, WeatherData};

/// OpenAPI documentation for the Sevencast API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sevencast API",
        version = "1.0.0",
        description = "Seven-day weather forecast API. Aggregates OpenWeatherMap's 5-day/3-hour forecast into daily card summaries.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "forecast", description = "Seven-day aggregated weather forecasts")
    ),
    components(
        schemas(
            ErrorResponse,
            WeatherData,
            DailySummary,
            DailyTemperature,
            WeatherCondition,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
