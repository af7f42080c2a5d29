use crate::data::{compute_performance, sort_descending, start_of_utc_day, KlineSource, PerformanceRecord};
use crate::error::SymbolError;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFailure {
    pub symbol: String,
    pub message: String,
}

/// Outcome of one pass over the selected symbols.
#[derive(Debug, Clone)]
pub struct Report {
    pub day_start: DateTime<Utc>,
    pub records: Vec<PerformanceRecord>,
    pub skipped: Vec<String>,
    pub failures: Vec<SymbolFailure>,
    pub finished_at: DateTime<Utc>,
}

impl Report {
    /// True when no symbol produced a record, which is the warning case.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetches each symbol in turn, computes its performance and sorts the lot.
///
/// Symbols without data are left out quietly. A symbol that errors is left
/// out too, but the error is kept on the report so it can be shown.
pub async fn run_pipeline<S: KlineSource>(source: &S, symbols: &[String]) -> Report {
    run_pipeline_at(source, symbols, Utc::now()).await
}

pub async fn run_pipeline_at<S: KlineSource>(
    source: &S,
    symbols: &[String],
    now: DateTime<Utc>,
) -> Report {
    let day_start = start_of_utc_day(now);
    info!(count = symbols.len(), %day_start, "refreshing daily performance");

    let mut records = Vec::with_capacity(symbols.len());
    let mut skipped = Vec::new();
    let mut failures = Vec::new();

    for symbol in symbols {
        match symbol_performance(source, symbol, day_start).await {
            Ok(Some(performance_pct)) => {
                debug!(%symbol, performance_pct, "computed performance");
                records.push(PerformanceRecord {
                    symbol: symbol.clone(),
                    performance_pct,
                });
            }
            Ok(None) => {
                debug!(%symbol, "no data, skipping");
                skipped.push(symbol.clone());
            }
            Err(e) => {
                warn!(%symbol, error = %e, "symbol failed");
                failures.push(SymbolFailure {
                    symbol: symbol.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    sort_descending(&mut records);
    info!(
        records = records.len(),
        skipped = skipped.len(),
        failed = failures.len(),
        "refresh finished"
    );

    Report {
        day_start,
        records,
        skipped,
        failures,
        finished_at: Utc::now(),
    }
}

async fn symbol_performance<S: KlineSource>(
    source: &S,
    symbol: &str,
    day_start: DateTime<Utc>,
) -> Result<Option<f64>, SymbolError> {
    let Some(bars) = source.fetch_klines_since(symbol, day_start).await? else {
        return Ok(None);
    };
    Ok(compute_performance(&bars)?)
}
