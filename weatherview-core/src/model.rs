use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conditions shown in the main block of a `WeatherView`.
///
/// Degraded results keep the same shape: the message goes into `condition`,
/// every numeric field is zero and `high_f`/`low_f` are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: i32,
    pub condition: String,
    pub feels_like_f: i32,
    pub humidity_pct: u8,
    pub wind_mph: i32,
    pub uv_index: f64,
    pub high_f: Option<i32>,
    pub low_f: Option<i32>,
}

impl CurrentConditions {
    pub fn degraded(reason: &UnavailabilityReason) -> Self {
        Self {
            temperature_f: 0,
            condition: reason.to_string(),
            feels_like_f: 0,
            humidity_pct: 0,
            wind_mph: 0,
            uv_index: 0.0,
            high_f: None,
            low_f: None,
        }
    }

    /// Recovers the unavailability reason from `condition`, if it is one.
    pub fn unavailability(&self) -> Option<UnavailabilityReason> {
        UnavailabilityReason::parse(&self.condition)
    }
}

/// One entry of the forecast strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short weekday name, e.g. "Mon".
    pub day_label: String,
    pub iso_date: NaiveDate,
    pub emoji: String,
    pub high_f: i32,
    pub low_f: i32,
}

/// Result of `Resolver::resolve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherView {
    pub fn is_degraded(&self) -> bool {
        self.current.unavailability().is_some()
    }
}

const DAY_NOT_IN_PLAN_PREFIX: &str = "Forecast for day ";
const DAY_NOT_IN_PLAN_SUFFIX: &str = " is not available. Your plan includes days 1-3. \
Extended forecasts (15-300 days) require the future API.";
const FORECAST_ONLY_UNTIL_PREFIX: &str = "Forecast only available up to ";
const NO_DATA: &str = "No data available";
const EXTENDED_UNAVAILABLE: &str =
    "Future forecast not available. This feature may require a premium plan.";
const TOO_FAR_IN_FUTURE: &str = "Date is too far in the future (max 300 days)";
const EXTENDED_NOT_LOADED: &str = "Extended forecast available. Click search to load.";

/// Long US date, e.g. "Monday, October 19, 2026".
const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const LONG_DATE_PARSE_FORMAT: &str = "%A, %B %d, %Y";

/// Why a view could not carry real conditions for the requested date.
///
/// The `Display` text is what consumers see in `CurrentConditions::condition`
/// and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailabilityReason {
    NoData,
    DayNotInPlan { day: i64 },
    ExtendedUnavailable,
    TooFarInFuture,
    ExtendedNotLoaded,
    ForecastOnlyUntil { last: NaiveDate },
}

impl UnavailabilityReason {
    /// Inverse of `Display`: recognises exactly the unavailability vocabulary.
    pub fn parse(message: &str) -> Option<Self> {
        match message {
            NO_DATA => return Some(Self::NoData),
            EXTENDED_UNAVAILABLE => return Some(Self::ExtendedUnavailable),
            TOO_FAR_IN_FUTURE => return Some(Self::TooFarInFuture),
            EXTENDED_NOT_LOADED => return Some(Self::ExtendedNotLoaded),
            _ => {}
        }

        if let Some(rest) = message.strip_prefix(DAY_NOT_IN_PLAN_PREFIX) {
            let day = rest.strip_suffix(DAY_NOT_IN_PLAN_SUFFIX)?.parse().ok()?;
            return Some(Self::DayNotInPlan { day });
        }

        if let Some(rest) = message.strip_prefix(FORECAST_ONLY_UNTIL_PREFIX) {
            let last = NaiveDate::parse_from_str(rest, LONG_DATE_PARSE_FORMAT).ok()?;
            return Some(Self::ForecastOnlyUntil { last });
        }

        None
    }
}

impl std::fmt::Display for UnavailabilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => f.write_str(NO_DATA),
            Self::DayNotInPlan { day } => {
                write!(f, "{DAY_NOT_IN_PLAN_PREFIX}{day}{DAY_NOT_IN_PLAN_SUFFIX}")
            }
            Self::ExtendedUnavailable => f.write_str(EXTENDED_UNAVAILABLE),
            Self::TooFarInFuture => f.write_str(TOO_FAR_IN_FUTURE),
            Self::ExtendedNotLoaded => f.write_str(EXTENDED_NOT_LOADED),
            Self::ForecastOnlyUntil { last } => {
                write!(f, "{FORECAST_ONLY_UNTIL_PREFIX}{}", last.format(LONG_DATE_FORMAT))
            }
        }
    }
}

/// A city returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl CityMatch {
    /// "Name, Region, Country", skipping an empty region.
    pub fn full_name(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.region, self.country)
        }
    }
}
