use serde::{Deserialize, Serialize};

use crate::core::types::DataRange;
use crate::error::{ChartError, ChartResult};

/// Mapping mode used by an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisScaleType {
    /// Uniform spacing in raw data units.
    #[default]
    Linear,
    /// Uniform spacing in natural-log units (range bounds must be > 0).
    Logarithmic,
}

/// Maps data coordinates to the unit interval of an axis range and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapping {
    range: DataRange,
    scale_type: AxisScaleType,
}

impl ScaleMapping {
    pub fn new(range: DataRange, scale_type: AxisScaleType) -> ChartResult<Self> {
        let valid = match scale_type {
            AxisScaleType::Linear => range.is_valid(),
            AxisScaleType::Logarithmic => {
                range.is_valid_log() || (range.is_valid() && range.lower < 0.0 && range.upper < 0.0)
            }
        };
        if !valid {
            return Err(ChartError::InvalidRange {
                lower: range.lower,
                upper: range.upper,
            });
        }

        Ok(Self { range, scale_type })
    }

    #[must_use]
    pub fn range(self) -> DataRange {
        self.range
    }

    #[must_use]
    pub fn scale_type(self) -> AxisScaleType {
        self.scale_type
    }

    /// Fraction of the way from `range.lower` to `range.upper`.
    ///
    /// Logarithmic scales clamp values on the wrong side of zero to the
    /// smallest representable magnitude of the range's sign.
    #[must_use]
    pub fn to_fraction(self, value: f64) -> f64 {
        match self.scale_type {
            AxisScaleType::Linear => (value - self.range.lower) / self.range.size(),
            AxisScaleType::Logarithmic => {
                let value = if self.range.lower > 0.0 {
                    value.max(f64::MIN_POSITIVE)
                } else {
                    value.min(-f64::MIN_POSITIVE)
                };
                (value / self.range.lower).ln() / (self.range.upper / self.range.lower).ln()
            }
        }
    }

    #[must_use]
    pub fn from_fraction(self, fraction: f64) -> f64 {
        match self.scale_type {
            AxisScaleType::Linear => self.range.lower + fraction * self.range.size(),
            AxisScaleType::Logarithmic => {
                self.range.lower * (self.range.upper / self.range.lower).powf(fraction)
            }
        }
    }
}
