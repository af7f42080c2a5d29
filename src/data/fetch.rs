use crate::error::FetchError;
use chrono::{DateTime, NaiveTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.bybit.com";
const KLINE_PATH: &str = "/v5/market/kline";
const CATEGORY: &str = "linear";
const INTERVAL: &str = "60";

/// One hourly candlestick as returned by the kline endpoint.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Kline {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub turnover: f64,
}

/// Midnight UTC of the day `now` falls on.
pub fn start_of_utc_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Anything that can hand back today's hourly bars for a symbol.
pub trait KlineSource {
    async fn fetch_klines_since(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
    ) -> Result<Option<Vec<Kline>>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct BybitClient {
    base_url: String,
    client: Client,
}

impl BybitClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Builds a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hourly bars for `symbol` since 00:00 UTC today.
    ///
    /// `Ok(None)` means the exchange had nothing for the symbol (non-zero
    /// `retCode` or an empty list); transport and decoding problems are errors.
    #[allow(dead_code)]
    pub async fn fetch_day_klines(&self, symbol: &str) -> Result<Option<Vec<Kline>>, FetchError> {
        self.fetch_klines_since(symbol, start_of_utc_day(Utc::now()))
            .await
    }
}

impl Default for BybitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KlineSource for BybitClient {
    async fn fetch_klines_since(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
    ) -> Result<Option<Vec<Kline>>, FetchError> {
        let url = format!("{}{}", self.base_url, KLINE_PATH);
        let start_ms = start.timestamp_millis().to_string();

        let res = self
            .client
            .get(&url)
            .query(&[
                ("category", CATEGORY),
                ("symbol", symbol),
                ("interval", INTERVAL),
                ("start", start_ms.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.json::<Value>().await?;
        parse_kline_response(&body)
    }
}

/// Turns a kline response body into bars, in the order the exchange sent them.
pub fn parse_kline_response(body: &Value) -> Result<Option<Vec<Kline>>, FetchError> {
    if body.get("retCode").and_then(Value::as_i64) != Some(0) {
        return Ok(None);
    }

    let list = body
        .pointer("/result/list")
        .ok_or_else(|| FetchError::MalformedResponse("missing result.list".to_string()))?;
    let rows = match list {
        Value::Null => return Ok(None),
        Value::Array(rows) if rows.is_empty() => return Ok(None),
        Value::Array(rows) => rows,
        other => {
            return Err(FetchError::MalformedResponse(format!(
                "result.list is not an array: {other}"
            )))
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_row(index: usize, row: &Value) -> Result<Kline, FetchError> {
    let malformed = |reason: String| FetchError::MalformedRow { index, reason };

    let arr = row
        .as_array()
        .ok_or_else(|| malformed("row is not an array".to_string()))?;
    if arr.len() < 7 {
        return Err(malformed(format!("expected 7 fields, got {}", arr.len())));
    }

    let ms = as_i64(&arr[0]).ok_or_else(|| malformed("bad timestamp".to_string()))?;
    let timestamp = DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| malformed(format!("timestamp {ms} out of range")))?;

    let field = |i: usize, name: &str| {
        as_f64(&arr[i]).ok_or_else(|| malformed(format!("bad {name}")))
    };

    Ok(Kline {
        timestamp,
        open: field(1, "open")?,
        high: field(2, "high")?,
        low: field(3, "low")?,
        close: field(4, "close")?,
        volume: field(5, "volume")?,
        turnover: field(6, "turnover")?,
    })
}

// Bybit sends every number as a string; accept plain numbers too.
fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}
