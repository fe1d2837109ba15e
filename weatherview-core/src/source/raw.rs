//! Upstream payload shapes as returned by weatherapi.com.
//!
//! Only the fields the normalizer reads are declared; everything else in the
//! responses is ignored by serde.

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLocation {
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCondition {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrent {
    pub temp_f: f64,
    pub feelslike_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    #[serde(default)]
    pub uv: f64,
    pub condition: RawCondition,
}

/// `current.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentPayload {
    pub location: RawLocation,
    pub current: RawCurrent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDaySummary {
    pub maxtemp_f: f64,
    pub mintemp_f: f64,
    pub avgtemp_f: f64,
    #[serde(default)]
    pub avghumidity: Option<f64>,
    #[serde(default)]
    pub uv: Option<f64>,
    pub condition: RawCondition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHour {
    pub time: String,
    pub temp_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    pub condition: RawCondition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastDay {
    pub date: NaiveDate,
    pub day: RawDaySummary,
    #[serde(default)]
    pub hour: Vec<RawHour>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastDays {
    pub forecastday: Vec<RawForecastDay>,
}

/// `forecast.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    pub location: RawLocation,
    #[serde(default)]
    pub current: Option<RawCurrent>,
    pub forecast: RawForecastDays,
}

impl ForecastPayload {
    pub fn days(&self) -> &[RawForecastDay] {
        &self.forecast.forecastday
    }

    pub fn day(&self, date: NaiveDate) -> Option<&RawForecastDay> {
        self.days().iter().find(|d| d.date == date)
    }
}

/// `history.json` and `future.json`: a single requested day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayPayload {
    pub location: RawLocation,
    pub forecast: RawForecastDays,
}

/// One element of the `search.json` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}
