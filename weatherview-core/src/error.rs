use thiserror::Error;

use crate::source::Endpoint;

/// A payload that decoded but does not have the shape the normalizer needs,
/// or that could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {payload} payload: {reason}")]
pub struct MalformedResponse {
    pub payload: &'static str,
    pub reason: String,
}

impl MalformedResponse {
    pub fn new(payload: &'static str, reason: impl Into<String>) -> Self {
        Self { payload, reason: reason.into() }
    }
}

/// Failure of a single `WeatherSource` call.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{endpoint} request failed with status {status}: {body}")]
    Transport { endpoint: Endpoint, status: u16, body: String },

    #[error("failed to send {endpoint} request: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl SourceError {
    /// HTTP status for transport failures, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The base call that failed when `resolve` gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCall {
    Current,
    Forecast,
}

impl std::fmt::Display for BaseCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BaseCall::Current => "current conditions",
            BaseCall::Forecast => "forecast window",
        })
    }
}

/// Hard failures of `Resolver::resolve`. Everything else degrades.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("weather data for '{city}' is unavailable: {call} request failed: {source}")]
    UpstreamUnavailable {
        city: String,
        call: BaseCall,
        #[source]
        source: SourceError,
    },
}
