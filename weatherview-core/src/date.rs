use chrono::{Local, NaiveDate};

/// Last day offset served by the base forecast window on the default plan.
pub const NEAR_FUTURE_MAX_DAYS: i64 = 3;
/// First day offset served by the future endpoint.
pub const EXTENDED_MIN_DAYS: i64 = 15;
/// Last day offset served by the future endpoint.
pub const EXTENDED_MAX_DAYS: i64 = 300;

/// Where a target date falls relative to today. Every variant other than
/// `Today` carries the signed day offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateClass {
    Today,
    NearFuture(i64),
    MidGap(i64),
    ExtendedFuture(i64),
    FarFuture(i64),
    Past(i64),
}

impl DateClass {
    /// Classifies `target` against `today` by calendar days. `None` is today.
    pub fn classify(today: NaiveDate, target: Option<NaiveDate>) -> Self {
        let Some(target) = target else {
            return DateClass::Today;
        };

        match days_between(today, target) {
            0 => DateClass::Today,
            n if n < 0 => DateClass::Past(n),
            n if n <= NEAR_FUTURE_MAX_DAYS => DateClass::NearFuture(n),
            n if n < EXTENDED_MIN_DAYS => DateClass::MidGap(n),
            n if n <= EXTENDED_MAX_DAYS => DateClass::ExtendedFuture(n),
            n => DateClass::FarFuture(n),
        }
    }

    pub fn offset(&self) -> i64 {
        match *self {
            DateClass::Today => 0,
            DateClass::NearFuture(n)
            | DateClass::MidGap(n)
            | DateClass::ExtendedFuture(n)
            | DateClass::FarFuture(n)
            | DateClass::Past(n) => n,
        }
    }

    pub fn is_future(&self) -> bool {
        self.offset() > 0
    }
}

/// Signed number of calendar days from `today` to `target`.
pub fn days_between(today: NaiveDate, target: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

/// Source of "today" for classification.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
