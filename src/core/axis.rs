use serde::{Deserialize, Serialize};

use crate::core::scale::{AxisScaleType, ScaleMapping};
use crate::core::types::{DataRange, Orientation, PixelRect};
use crate::error::{ChartError, ChartResult};

/// Coordinate services bar geometry needs from an axis.
pub trait AxisTransform {
    fn coord_to_pixel(&self, value: f64) -> f64;
    fn pixel_to_coord(&self, pixel: f64) -> f64;
    fn orientation(&self) -> Orientation;
    fn range_reversed(&self) -> bool;
    fn range(&self) -> DataRange;
    /// Size of the owning axis rect along `orientation`.
    fn axis_rect_extent(&self, orientation: Orientation) -> f64;

    /// `1.0` when pixels grow with the key, `-1.0` when they shrink.
    fn pixel_orientation(&self) -> f64 {
        if self.range_reversed() ^ (self.orientation() == Orientation::Vertical) {
            -1.0
        } else {
            1.0
        }
    }
}

/// Axis bound to a pixel rectangle.
///
/// Horizontal axes grow to the right, vertical axes grow upwards (towards
/// smaller pixel `y`). `reversed` flips either direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    mapping: ScaleMapping,
    orientation: Orientation,
    #[serde(default)]
    reversed: bool,
    rect: PixelRect,
}

impl Axis {
    pub fn new(orientation: Orientation, range: DataRange, rect: PixelRect) -> ChartResult<Self> {
        Self::new_with_scale(orientation, range, rect, AxisScaleType::Linear)
    }

    pub fn new_with_scale(
        orientation: Orientation,
        range: DataRange,
        rect: PixelRect,
        scale_type: AxisScaleType,
    ) -> ChartResult<Self> {
        validate_rect(rect)?;
        Ok(Self {
            mapping: ScaleMapping::new(range, scale_type)?,
            orientation,
            reversed: false,
            rect,
        })
    }

    /// Horizontal linear axis spanning the full width of `rect`.
    pub fn horizontal(lower: f64, upper: f64, rect: PixelRect) -> ChartResult<Self> {
        Self::new(Orientation::Horizontal, DataRange::new(lower, upper), rect)
    }

    /// Vertical linear axis spanning the full height of `rect`.
    pub fn vertical(lower: f64, upper: f64, rect: PixelRect) -> ChartResult<Self> {
        Self::new(Orientation::Vertical, DataRange::new(lower, upper), rect)
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn set_range(&mut self, range: DataRange) -> ChartResult<()> {
        self.mapping = ScaleMapping::new(range, self.mapping.scale_type())?;
        Ok(())
    }

    pub fn set_scale_type(&mut self, scale_type: AxisScaleType) -> ChartResult<()> {
        self.mapping = ScaleMapping::new(self.mapping.range(), scale_type)?;
        Ok(())
    }

    pub fn set_rect(&mut self, rect: PixelRect) -> ChartResult<()> {
        validate_rect(rect)?;
        self.rect = rect;
        Ok(())
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    #[must_use]
    pub fn scale_type(&self) -> AxisScaleType {
        self.mapping.scale_type()
    }

    #[must_use]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }
}

impl AxisTransform for Axis {
    fn coord_to_pixel(&self, value: f64) -> f64 {
        let fraction = self.mapping.to_fraction(value);
        match (self.orientation, self.reversed) {
            (Orientation::Horizontal, false) => self.rect.left + fraction * self.rect.width,
            (Orientation::Horizontal, true) => self.rect.right() - fraction * self.rect.width,
            (Orientation::Vertical, false) => self.rect.bottom() - fraction * self.rect.height,
            (Orientation::Vertical, true) => self.rect.top + fraction * self.rect.height,
        }
    }

    fn pixel_to_coord(&self, pixel: f64) -> f64 {
        let fraction = match (self.orientation, self.reversed) {
            (Orientation::Horizontal, false) => (pixel - self.rect.left) / self.rect.width,
            (Orientation::Horizontal, true) => (self.rect.right() - pixel) / self.rect.width,
            (Orientation::Vertical, false) => (self.rect.bottom() - pixel) / self.rect.height,
            (Orientation::Vertical, true) => (pixel - self.rect.top) / self.rect.height,
        };
        self.mapping.from_fraction(fraction)
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn range_reversed(&self) -> bool {
        self.reversed
    }

    fn range(&self) -> DataRange {
        self.mapping.range()
    }

    fn axis_rect_extent(&self, orientation: Orientation) -> f64 {
        self.rect.extent(orientation)
    }
}

fn validate_rect(rect: PixelRect) -> ChartResult<()> {
    if !rect.left.is_finite()
        || !rect.top.is_finite()
        || !rect.width.is_finite()
        || !rect.height.is_finite()
        || rect.width <= 0.0
        || rect.height <= 0.0
    {
        return Err(ChartError::InvalidData(
            "axis rect must be finite with width and height > 0".to_owned(),
        ));
    }
    Ok(())
}
