use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed kline response: {0}")]
    MalformedResponse(String),

    #[error("malformed kline row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum PerformanceError {
    #[error("first open price is zero")]
    ZeroOpen,

    #[error("performance is not a finite number")]
    NonFinite,
}

/// Anything that stops a single symbol from producing a record.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Performance(#[from] PerformanceError),
}
