use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Errors a single provider fetch can produce.
///
/// Each variant maps to one step of the fetch: building the request URL,
/// executing the call, reading the body, checking the status, decoding the
/// payload. A fetch cut off by the shared race deadline reports
/// `DeadlineExceeded`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("deadline exceeded while awaiting response")]
    DeadlineExceeded,

    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Final result of a race, as seen by the caller.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The deadline fired before any provider produced an outcome.
    #[error("timeout")]
    Timeout,

    /// The race was started with an empty provider set.
    #[error("no providers configured")]
    NoProviders,

    /// The first outcome to arrive was a failure; it is reported as-is,
    /// without waiting on the remaining providers.
    #[error("{provider}: {source}")]
    Fetch {
        provider: ProviderId,
        #[source]
        source: FetchError,
    },
}
