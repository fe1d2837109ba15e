use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{error::SourceError, model::CityMatch};

pub mod raw;
pub mod weatherapi;

pub use raw::{CurrentPayload, DayPayload, ForecastPayload};
pub use weatherapi::WeatherApiSource;

/// Upstream endpoints, one per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Current,
    Forecast,
    History,
    Future,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Search => "search.json",
            Endpoint::Current => "current.json",
            Endpoint::Forecast => "forecast.json",
            Endpoint::History => "history.json",
            Endpoint::Future => "future.json",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Search,
            Endpoint::Current,
            Endpoint::Forecast,
            Endpoint::History,
            Endpoint::Future,
        ]
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability the resolver consumes. Implementations own transport and
/// credentials; the resolver only sees decoded payloads and `SourceError`.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn search_cities(&self, query: &str) -> Result<Vec<CityMatch>, SourceError>;

    async fn current_conditions(&self, city: &str) -> Result<CurrentPayload, SourceError>;

    async fn forecast_window(&self, city: &str, days: u8) -> Result<ForecastPayload, SourceError>;

    async fn historical(&self, city: &str, date: NaiveDate) -> Result<DayPayload, SourceError>;

    async fn extended_forecast(&self, city: &str, date: NaiveDate)
    -> Result<DayPayload, SourceError>;
}
