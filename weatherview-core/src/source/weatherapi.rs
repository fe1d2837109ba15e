use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{MalformedResponse, SourceError},
    model::CityMatch,
    source::{
        Endpoint, WeatherSource,
        raw::{CurrentPayload, DayPayload, ForecastPayload, RawCity},
    },
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// `WeatherSource` backed by the weatherapi.com REST API.
#[derive(Clone)]
pub struct WeatherApiSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%endpoint, ?query, "sending weatherapi request");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|source| SourceError::Network { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| SourceError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(SourceError::Transport {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| MalformedResponse::new(endpoint.as_str(), e.to_string()).into())
    }
}

impl std::fmt::Debug for WeatherApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiSource")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl WeatherSource for WeatherApiSource {
    async fn search_cities(&self, query: &str) -> Result<Vec<CityMatch>, SourceError> {
        let cities: Vec<RawCity> = self.get(Endpoint::Search, &[("q", query)]).await?;

        Ok(cities
            .into_iter()
            .map(|c| CityMatch {
                id: c.id,
                name: c.name,
                region: c.region,
                country: c.country,
                lat: c.lat,
                lon: c.lon,
            })
            .collect())
    }

    async fn current_conditions(&self, city: &str) -> Result<CurrentPayload, SourceError> {
        self.get(Endpoint::Current, &[("q", city), ("aqi", "no")]).await
    }

    async fn forecast_window(&self, city: &str, days: u8) -> Result<ForecastPayload, SourceError> {
        let days = days.to_string();
        self.get(
            Endpoint::Forecast,
            &[("q", city), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
        )
        .await
    }

    async fn historical(&self, city: &str, date: NaiveDate) -> Result<DayPayload, SourceError> {
        let dt = date.format("%Y-%m-%d").to_string();
        self.get(Endpoint::History, &[("q", city), ("dt", dt.as_str())]).await
    }

    async fn extended_forecast(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<DayPayload, SourceError> {
        let dt = date.format("%Y-%m-%d").to_string();
        self.get(Endpoint::Future, &[("q", city), ("dt", dt.as_str())]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
