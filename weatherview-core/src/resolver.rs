use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    date::{Clock, DateClass, EXTENDED_MAX_DAYS, EXTENDED_MIN_DAYS, SystemClock},
    error::{BaseCall, ResolveError, SourceError},
    model::{CityMatch, CurrentConditions, UnavailabilityReason, WeatherView},
    normalize::{self, DayTier},
    source::{CurrentPayload, ForecastPayload, WeatherSource},
};

/// Days requested from the forecast endpoint on every resolve.
pub const BASE_WINDOW_DAYS: u8 = 10;
/// Shorter autocomplete queries are not sent upstream.
pub const MIN_CITY_QUERY_LEN: usize = 4;

/// What the main block ends up showing, before it is flattened into
/// `CurrentConditions`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Observed(CurrentConditions),
    Degraded(UnavailabilityReason),
}

impl Reading {
    pub fn into_conditions(self) -> CurrentConditions {
        match self {
            Reading::Observed(current) => current,
            Reading::Degraded(reason) => CurrentConditions::degraded(&reason),
        }
    }
}

/// Turns a city and an optional date into a `WeatherView`.
///
/// Holds no per-request state, so one resolver can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Resolver {
    source: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
}

impl Resolver {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn WeatherSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Resolves weather for `city` on `target` (today when `None`).
    ///
    /// Fails only when one of the two base calls (current conditions and the
    /// forecast window) fails. Every other problem is reported through a
    /// degraded `current` block.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve(
        &self,
        city: &str,
        target: Option<NaiveDate>,
    ) -> Result<WeatherView, ResolveError> {
        let (current, forecast) = tokio::join!(
            self.source.current_conditions(city),
            self.source.forecast_window(city, BASE_WINDOW_DAYS),
        );
        let current = current.map_err(|source| base_failure(city, BaseCall::Current, source))?;
        let forecast = forecast.map_err(|source| base_failure(city, BaseCall::Forecast, source))?;

        let class = DateClass::classify(self.clock.today(), target);
        debug!(?class, "classified target date");

        let reading = match target {
            Some(date) => self.read_date(city, date, class, &current, &forecast).await,
            None => read_today(&current, &forecast),
        };

        Ok(WeatherView {
            current: reading.into_conditions(),
            forecast: normalize::normalize_forecast_days(&forecast),
        })
    }

    async fn read_date(
        &self,
        city: &str,
        date: NaiveDate,
        class: DateClass,
        current: &CurrentPayload,
        forecast: &ForecastPayload,
    ) -> Reading {
        match class {
            DateClass::Today => read_today(current, forecast),
            DateClass::NearFuture(day) => match forecast.day(date) {
                Some(raw) => Reading::Observed(normalize::normalize_day(raw, DayTier::ForecastWindow)),
                None => {
                    debug!(%date, "date missing from forecast window");
                    Reading::Degraded(UnavailabilityReason::DayNotInPlan { day })
                }
            },
            DateClass::MidGap(day) => Reading::Degraded(UnavailabilityReason::DayNotInPlan { day }),
            DateClass::ExtendedFuture(_) => match self.extended_day(city, date).await {
                Ok(current) => Reading::Observed(current),
                Err(e) => {
                    warn!(error = %e, %date, "extended forecast unavailable");
                    Reading::Degraded(UnavailabilityReason::ExtendedUnavailable)
                }
            },
            DateClass::FarFuture(_) => Reading::Degraded(UnavailabilityReason::TooFarInFuture),
            DateClass::Past(offset) => match self.historical_day(city, date).await {
                Ok(current) => Reading::Observed(current),
                Err(e) => {
                    warn!(error = %e, %date, "historical data unavailable, using forecast window");
                    select_from_window(forecast, date, offset)
                }
            },
        }
    }

    async fn extended_day(&self, city: &str, date: NaiveDate) -> Result<CurrentConditions, SourceError> {
        let raw = self.source.extended_forecast(city, date).await?;
        normalize::normalize_extended_day(&raw, DayTier::Future).map_err(SourceError::from)
    }

    async fn historical_day(&self, city: &str, date: NaiveDate) -> Result<CurrentConditions, SourceError> {
        let raw = self.source.historical(city, date).await?;
        normalize::normalize_extended_day(&raw, DayTier::Historical).map_err(SourceError::from)
    }

    /// City names for autocomplete. Never fails: a failed search is logged
    /// and yields no suggestions.
    pub async fn suggest_cities(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.chars().count() < MIN_CITY_QUERY_LEN {
            return Vec::new();
        }

        match self.source.search_cities(query).await {
            Ok(cities) => cities.iter().map(CityMatch::full_name).collect(),
            Err(e) => {
                warn!(error = %e, query, "city search failed");
                Vec::new()
            }
        }
    }
}

fn base_failure(city: &str, call: BaseCall, source: SourceError) -> ResolveError {
    ResolveError::UpstreamUnavailable { city: city.to_string(), call, source }
}

fn read_today(current: &CurrentPayload, forecast: &ForecastPayload) -> Reading {
    Reading::Observed(normalize::normalize_current(current, forecast.days().first()))
}

/// Picks `date` out of the base window, or explains why it cannot.
pub fn select_from_window(forecast: &ForecastPayload, date: NaiveDate, offset: i64) -> Reading {
    let Some(last) = forecast.days().last() else {
        return Reading::Degraded(UnavailabilityReason::NoData);
    };

    if let Some(raw) = forecast.day(date) {
        return Reading::Observed(normalize::normalize_day(raw, DayTier::ForecastWindow));
    }

    let reason = match offset {
        n if (1..EXTENDED_MIN_DAYS).contains(&n) => UnavailabilityReason::DayNotInPlan { day: n },
        n if (EXTENDED_MIN_DAYS..=EXTENDED_MAX_DAYS).contains(&n) => {
            UnavailabilityReason::ExtendedNotLoaded
        }
        n if n > EXTENDED_MAX_DAYS => UnavailabilityReason::TooFarInFuture,
        _ => UnavailabilityReason::ForecastOnlyUntil { last: last.date },
    };
    Reading::Degraded(reason)
}
