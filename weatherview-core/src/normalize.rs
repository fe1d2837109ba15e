//! Pure translation of upstream payloads into view records.
//!
//! Nothing here looks at dates relative to today; that is the resolver's job.

use crate::{
    error::MalformedResponse,
    model::{CurrentConditions, ForecastDay},
    source::raw::{CurrentPayload, DayPayload, ForecastPayload, RawForecastDay, RawHour},
};

/// Maximum number of entries in the forecast strip.
pub const FORECAST_STRIP_LEN: usize = 7;

/// Humidity used for a future-tier day that reports neither a daily average
/// nor hourly data.
pub const FUTURE_DEFAULT_HUMIDITY: u8 = 64;
/// Wind used for a future-tier day without hourly data.
pub const FUTURE_DEFAULT_WIND_MPH: i32 = 11;
/// Humidity used for a forecast-window day without hourly data.
pub const FORECAST_DAY_DEFAULT_HUMIDITY: u8 = 65;
/// Wind used for a forecast-window day without hourly data.
pub const FORECAST_DAY_DEFAULT_WIND_MPH: i32 = 8;

/// Which tier a single-day payload came from. Decides the fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTier {
    /// `future.json`, 15-300 days out.
    Future,
    /// A day picked out of the base forecast window.
    ForecastWindow,
    /// `history.json`. The endpoint reports no usable wind.
    Historical,
}

/// Keyword rules for the forecast strip, checked in order. "partly cloudy"
/// has to come before the bare "cloudy" rule.
const EMOJI_RULES: &[(&[&str], &str)] = &[
    (&["sun", "clear"], "☀️"),
    (&["partly cloudy"], "⛅"),
    (&["cloudy", "overcast"], "☁️"),
    (&["rain", "drizzle"], "🌧️"),
    (&["thunder", "storm"], "⛈️"),
    (&["snow"], "❄️"),
    (&["fog", "mist"], "🌫️"),
    (&["wind"], "💨"),
];
const DEFAULT_EMOJI: &str = "🌤️";

pub fn condition_emoji(condition: &str) -> &'static str {
    let lower = condition.to_lowercase();

    EMOJI_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Rounds half up, so -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_f(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

fn round_humidity(value: f64) -> u8 {
    round_f(value).clamp(0, 100) as u8
}

/// Current conditions, with today's range taken from the first forecast day.
pub fn normalize_current(
    raw: &CurrentPayload,
    today: Option<&RawForecastDay>,
) -> CurrentConditions {
    let current = &raw.current;

    CurrentConditions {
        temperature_f: round_f(current.temp_f),
        condition: current.condition.text.clone(),
        feels_like_f: round_f(current.feelslike_f),
        humidity_pct: current.humidity,
        wind_mph: round_f(current.wind_mph),
        uv_index: current.uv,
        high_f: today.map(|d| round_f(d.day.maxtemp_f)),
        low_f: today.map(|d| round_f(d.day.mintemp_f)),
    }
}

/// The forecast strip: the first seven days of the window, in upstream order.
pub fn normalize_forecast_days(raw: &ForecastPayload) -> Vec<ForecastDay> {
    raw.days()
        .iter()
        .take(FORECAST_STRIP_LEN)
        .map(|d| ForecastDay {
            day_label: d.date.format("%a").to_string(),
            iso_date: d.date,
            emoji: condition_emoji(&d.day.condition.text).to_string(),
            high_f: round_f(d.day.maxtemp_f),
            low_f: round_f(d.day.mintemp_f),
        })
        .collect()
}

/// Representative conditions for a `history.json` / `future.json` payload.
pub fn normalize_extended_day(
    raw: &DayPayload,
    tier: DayTier,
) -> Result<CurrentConditions, MalformedResponse> {
    let payload = match tier {
        DayTier::Future => "future",
        DayTier::Historical => "history",
        DayTier::ForecastWindow => "forecast",
    };

    let day = raw
        .forecast
        .forecastday
        .first()
        .ok_or_else(|| MalformedResponse::new(payload, "response contained no forecastday"))?;

    Ok(normalize_day(day, tier))
}

/// Representative conditions for one day record of any tier.
pub fn normalize_day(day: &RawForecastDay, tier: DayTier) -> CurrentConditions {
    let summary = &day.day;
    let midday = midday_hour(&day.hour);
    let avg_humidity = summary.avghumidity.filter(|h| *h > 0.0).map(round_humidity);

    let (humidity_pct, wind_mph) = match tier {
        DayTier::Future => (
            avg_humidity.or(midday.map(|h| h.humidity)).unwrap_or(FUTURE_DEFAULT_HUMIDITY),
            midday.map(|h| round_f(h.wind_mph)).unwrap_or(FUTURE_DEFAULT_WIND_MPH),
        ),
        DayTier::ForecastWindow => (
            midday.map(|h| h.humidity).unwrap_or(FORECAST_DAY_DEFAULT_HUMIDITY),
            midday.map(|h| round_f(h.wind_mph)).unwrap_or(FORECAST_DAY_DEFAULT_WIND_MPH),
        ),
        DayTier::Historical => (avg_humidity.unwrap_or(0), 0),
    };

    CurrentConditions {
        temperature_f: round_f(summary.avgtemp_f),
        condition: summary.condition.text.clone(),
        feels_like_f: round_f(summary.avgtemp_f),
        humidity_pct,
        wind_mph,
        uv_index: summary.uv.unwrap_or(0.0),
        high_f: Some(round_f(summary.maxtemp_f)),
        low_f: Some(round_f(summary.mintemp_f)),
    }
}

/// Hour 12 when the day has it, otherwise the middle entry.
fn midday_hour(hours: &[RawHour]) -> Option<&RawHour> {
    hours.get(12).or_else(|| hours.get(hours.len() / 2))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    pub(crate) fn hour(time: &str, humidity: u8, wind_mph: f64) -> Value {
        json!({
            "time": time,
            "temp_f": 60.0,
            "humidity": humidity,
            "wind_mph": wind_mph,
            "condition": { "text": "Clear" }
        })
    }

    pub(crate) fn forecast_day(date: &str, condition: &str, hours: Vec<Value>) -> Value {
        json!({
            "date": date,
            "day": {
                "maxtemp_f": 71.6,
                "mintemp_f": 50.4,
                "avgtemp_f": 61.5,
                "avghumidity": 70.0,
                "uv": 4.0,
                "condition": { "text": condition }
            },
            "hour": hours
        })
    }

    fn location() -> Value {
        json!({ "name": "Lisbon", "region": "Lisboa", "country": "Portugal" })
    }

    fn day_payload(day: Value) -> DayPayload {
        serde_json::from_value(json!({ "location": location(), "forecast": { "forecastday": [day] } }))
            .unwrap()
    }

    fn day_hours(n: usize) -> Vec<Value> {
        (0..n).map(|i| hour(&format!("2026-11-20 {i:02}:00"), 40 + i as u8, i as f64 + 0.4)).collect()
    }

    #[test]
    fn emoji_rules_apply_in_order() {
        assert_eq!(condition_emoji("Sunny"), "☀️");
        assert_eq!(condition_emoji("Clear "), "☀️");
        assert_eq!(condition_emoji("Partly Cloudy"), "⛅");
        assert_eq!(condition_emoji("Cloudy"), "☁️");
        assert_eq!(condition_emoji("Overcast"), "☁️");
        assert_eq!(condition_emoji("Patchy light drizzle"), "🌧️");
        assert_eq!(condition_emoji("Thundery outbreaks possible"), "⛈️");
        assert_eq!(condition_emoji("Blowing snow"), "❄️");
        assert_eq!(condition_emoji("Freezing fog"), "🌫️");
        assert_eq!(condition_emoji("Windy"), "💨");
        assert_eq!(condition_emoji("Haze"), "🌤️");
    }

    #[test]
    fn emoji_first_match_wins() {
        // contains both "rain" and "thunder"; rain is checked first
        assert_eq!(condition_emoji("Moderate or heavy rain with thunder"), "🌧️");
        // "sun" beats "cloudy"
        assert_eq!(condition_emoji("Sunny, partly cloudy later"), "☀️");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_f(2.5), 3);
        assert_eq!(round_f(2.49), 2);
        assert_eq!(round_f(-2.5), -2);
        assert_eq!(round_f(-2.51), -3);
    }

    #[test]
    fn forecast_strip_is_truncated_to_seven_in_order() {
        let days: Vec<_> = (1..=10)
            .map(|d| forecast_day(&format!("2026-10-{d:02}"), "Sunny", vec![]))
            .collect();
        let raw: ForecastPayload = serde_json::from_value(json!({
            "location": location(),
            "forecast": { "forecastday": days }
        }))
        .unwrap();

        let strip = normalize_forecast_days(&raw);

        assert_eq!(strip.len(), 7);
        let dates: Vec<_> = strip.iter().map(|d| d.iso_date.to_string()).collect();
        assert_eq!(dates.first().map(String::as_str), Some("2026-10-01"));
        assert_eq!(dates.last().map(String::as_str), Some("2026-10-07"));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(strip[0].day_label, "Thu");
        assert_eq!(strip[0].high_f, 72);
        assert_eq!(strip[0].low_f, 50);
    }

    #[test]
    fn current_takes_range_from_first_forecast_day() {
        let raw: CurrentPayload = serde_json::from_value(json!({
            "location": location(),
            "current": {
                "temp_f": 64.4, "feelslike_f": 63.5, "humidity": 77,
                "wind_mph": 9.6, "uv": 5.0, "condition": { "text": "Partly cloudy" }
            }
        }))
        .unwrap();
        let first: RawForecastDay =
            serde_json::from_value(forecast_day("2026-10-19", "Sunny", vec![])).unwrap();

        let with_range = normalize_current(&raw, Some(&first));
        assert_eq!(with_range.temperature_f, 64);
        assert_eq!(with_range.feels_like_f, 64);
        assert_eq!(with_range.wind_mph, 10);
        assert_eq!(with_range.humidity_pct, 77);
        assert_eq!(with_range.high_f, Some(72));
        assert_eq!(with_range.low_f, Some(50));

        let without_range = normalize_current(&raw, None);
        assert_eq!(without_range.high_f, None);
        assert_eq!(without_range.low_f, None);
    }

    #[test]
    fn extended_day_prefers_hour_twelve() {
        let mut day = forecast_day("2026-11-20", "Light rain", day_hours(24));
        day["day"]["avghumidity"] = json!(0.0);

        let current = normalize_extended_day(&day_payload(day), DayTier::Future).unwrap();

        assert_eq!(current.humidity_pct, 52);
        assert_eq!(current.wind_mph, 12);
        assert_eq!(current.temperature_f, 62);
        assert_eq!(current.high_f, Some(72));
        assert_eq!(current.low_f, Some(50));
        assert_eq!(current.condition, "Light rain");
    }

    #[test]
    fn extended_day_uses_midpoint_when_short() {
        let day = forecast_day("2026-11-20", "Mist", day_hours(6));

        let current = normalize_day(&serde_json::from_value(day).unwrap(), DayTier::ForecastWindow);

        assert_eq!(current.humidity_pct, 43);
        assert_eq!(current.wind_mph, 3);
    }

    #[test]
    fn future_tier_prefers_daily_humidity() {
        let day = forecast_day("2026-11-20", "Sunny", day_hours(24));

        let current = normalize_extended_day(&day_payload(day), DayTier::Future).unwrap();

        assert_eq!(current.humidity_pct, 70);
    }

    #[test]
    fn future_tier_fallback_constants() {
        let mut day = forecast_day("2026-11-20", "Sunny", vec![]);
        day["day"]["avghumidity"] = Value::Null;
        day["day"]["uv"] = Value::Null;

        let current = normalize_extended_day(&day_payload(day), DayTier::Future).unwrap();

        assert_eq!(current.humidity_pct, FUTURE_DEFAULT_HUMIDITY);
        assert_eq!(current.wind_mph, FUTURE_DEFAULT_WIND_MPH);
        assert_eq!(current.uv_index, 0.0);
        assert_eq!((FUTURE_DEFAULT_HUMIDITY, FUTURE_DEFAULT_WIND_MPH), (64, 11));
    }

    #[test]
    fn forecast_window_fallback_constants() {
        let day = forecast_day("2026-10-21", "Sunny", vec![]);

        let current = normalize_day(&serde_json::from_value(day).unwrap(), DayTier::ForecastWindow);

        assert_eq!(current.humidity_pct, FORECAST_DAY_DEFAULT_HUMIDITY);
        assert_eq!(current.wind_mph, FORECAST_DAY_DEFAULT_WIND_MPH);
        assert_eq!((FORECAST_DAY_DEFAULT_HUMIDITY, FORECAST_DAY_DEFAULT_WIND_MPH), (65, 8));
    }

    #[test]
    fn historical_tier_has_no_wind() {
        let day = forecast_day("2026-09-01", "Overcast", day_hours(24));

        let current = normalize_extended_day(&day_payload(day), DayTier::Historical).unwrap();

        assert_eq!(current.wind_mph, 0);
        assert_eq!(current.humidity_pct, 70);
        assert_eq!(current.uv_index, 4.0);
    }

    #[test]
    fn empty_single_day_payload_is_malformed() {
        let raw: DayPayload = serde_json::from_value(json!({
            "location": location(),
            "forecast": { "forecastday": [] }
        }))
        .unwrap();

        let err = normalize_extended_day(&raw, DayTier::Future).unwrap_err();
        assert_eq!(err.payload, "future");
        assert!(err.reason.contains("no forecastday"));
    }
}
