pub mod handlers;
pub mod models;

mod aggregate;
mod service;

pub use service::{ForecastError, ForecastService};
