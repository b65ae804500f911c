use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Tolerance used when matching keys across stacked series.
///
/// Relative to `|key|`, absolute for `key == 0`.
#[must_use]
pub fn key_match_epsilon(key: f64) -> f64 {
    if key == 0.0 { 1e-6 } else { key.abs() * 1e-6 }
}
