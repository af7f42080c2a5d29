use crate::data::Kline;
use crate::error::PerformanceError;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub symbol: String,
    pub performance_pct: f64,
}

/// Percent change from the first bar's open to the last bar's close.
///
/// An empty series has no performance and yields `Ok(None)`.
pub fn compute_performance(bars: &[Kline]) -> Result<Option<f64>, PerformanceError> {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Ok(None);
    };

    if first.open == 0.0 {
        return Err(PerformanceError::ZeroOpen);
    }

    let pct = (last.close / first.open - 1.0) * 100.0;
    if !pct.is_finite() {
        return Err(PerformanceError::NonFinite);
    }

    Ok(Some(pct))
}

pub fn sort_descending(records: &mut [PerformanceRecord]) {
    records.sort_by(|a, b| b.performance_pct.total_cmp(&a.performance_pct));
}
