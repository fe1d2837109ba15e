//! Core library for the `weatherview` CLI.
//!
//! This crate defines:
//! - The weather resolution engine: date classification, source selection
//!   and fallback, composition of a single `WeatherView`
//! - Normalization of weatherapi.com payloads into view records
//! - The `WeatherSource` capability and its weatherapi.com implementation
//! - Configuration & credentials handling
//!
//! It is used by `weatherview-cli`, but any other front end can drive the
//! `Resolver` directly with its own `WeatherSource`.

pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod source;

pub use config::Config;
pub use date::{Clock, DateClass, FixedClock, SystemClock};
pub use error::{MalformedResponse, ResolveError, SourceError};
pub use model::{CityMatch, CurrentConditions, ForecastDay, UnavailabilityReason, WeatherView};
pub use resolver::Resolver;
pub use source::{WeatherApiSource, WeatherSource};
