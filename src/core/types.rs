use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

new_key_type! {
    /// Handle of an axis owned by a [`crate::api::BarPlot`].
    pub struct AxisId;
    /// Handle of a bar series owned by a [`crate::api::BarPlot`].
    pub struct SeriesId;
    /// Handle of a bar group owned by a [`crate::api::BarPlot`].
    pub struct GroupId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Closed interval in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub lower: f64,
    pub upper: f64,
}

impl DataRange {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn size(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.lower + self.upper) * 0.5
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Finite bounds with a non-zero span.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower != self.upper
    }

    /// Same as [`is_valid`](Self::is_valid) and strictly positive bounds.
    #[must_use]
    pub fn is_valid_log(self) -> bool {
        self.is_valid() && self.lower > 0.0 && self.upper > 0.0
    }

    /// Returns the range with `lower <= upper`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.lower <= self.upper {
            self
        } else {
            Self::new(self.upper, self.lower)
        }
    }

    #[must_use]
    pub fn expanded(self, value: f64) -> Self {
        Self::new(self.lower.min(value), self.upper.max(value))
    }
}

/// One bar sample: `key` on the key axis, `value` on the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub key: f64,
    pub value: f64,
}

impl BarData {
    #[must_use]
    pub const fn new(key: f64, value: f64) -> Self {
        Self { key, value }
    }

    /// Builds a sample keyed by unix seconds.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            key: datetime_to_unix_seconds(time),
            value: decimal_to_f64(value, "value")?,
        })
    }
}

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel space (`y` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Smallest rectangle containing all `points`; `None` for an empty slice.
    #[must_use]
    pub fn bounding(points: &[PixelPoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    #[must_use]
    pub fn contains(self, point: PixelPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    #[must_use]
    pub fn extent(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}
