use serde::{Deserialize, Serialize};

use crate::core::axis::AxisTransform;
use crate::core::data_container::BarDataContainer;
use crate::core::types::{AxisId, BarData, GroupId, SeriesId};
use crate::render::Color;

/// How [`BarSeries::width`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WidthType {
    /// Width in pixels.
    Absolute,
    /// Fraction of the axis rect size along the key axis.
    AxisRectRatio,
    /// Width in key-axis coordinates.
    #[default]
    PlotCoordinates,
}

/// Fill and outline used for every bar of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgba(40.0 / 255.0, 50.0 / 255.0, 1.0, 30.0 / 255.0),
            stroke_color: Color::rgb(0.0, 0.0, 1.0),
            stroke_width: 1.0,
        }
    }
}

/// One bar series.
///
/// Stack and group links are owned by the plot's adjacency table and can only
/// be changed through [`crate::core::bar_stack`] and the group operations of
/// [`crate::api::BarPlot`], which keep both sides of every link in sync.
#[derive(Debug, Clone)]
pub struct BarSeries {
    key_axis: AxisId,
    value_axis: AxisId,
    pub width: f64,
    pub width_type: WidthType,
    pub base_value: f64,
    pub style: BarStyle,
    pub(crate) data: BarDataContainer,
    pub(crate) below: Option<SeriesId>,
    pub(crate) above: Option<SeriesId>,
    pub(crate) group: Option<GroupId>,
}

impl BarSeries {
    #[must_use]
    pub fn new(key_axis: AxisId, value_axis: AxisId) -> Self {
        Self {
            key_axis,
            value_axis,
            width: 0.75,
            width_type: WidthType::PlotCoordinates,
            base_value: 0.0,
            style: BarStyle::default(),
            data: BarDataContainer::new(),
            below: None,
            above: None,
            group: None,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f64, width_type: WidthType) -> Self {
        self.width = width;
        self.width_type = width_type;
        self
    }

    #[must_use]
    pub fn with_base_value(mut self, base_value: f64) -> Self {
        self.base_value = base_value;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_data(mut self, points: Vec<BarData>) -> Self {
        self.data = BarDataContainer::from_points(points);
        self
    }

    #[must_use]
    pub fn key_axis(&self) -> AxisId {
        self.key_axis
    }

    #[must_use]
    pub fn value_axis(&self) -> AxisId {
        self.value_axis
    }

    #[must_use]
    pub fn data(&self) -> &BarDataContainer {
        &self.data
    }

    /// Series drawn directly below this one in its stack.
    #[must_use]
    pub fn bar_below(&self) -> Option<SeriesId> {
        self.below
    }

    /// Series drawn directly above this one in its stack.
    #[must_use]
    pub fn bar_above(&self) -> Option<SeriesId> {
        self.above
    }

    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    #[must_use]
    pub fn shares_axes_with(&self, other: &BarSeries) -> bool {
        self.key_axis == other.key_axis && self.value_axis == other.value_axis
    }

    /// Pixel offsets of the bar's two key-direction edges relative to the
    /// key pixel, as `(lower, upper)`.
    ///
    /// Pixel and axis-rect widths are swapped when the key axis is reversed
    /// or vertical (but not both), so `lower` always sits at the smaller key.
    #[must_use]
    pub fn pixel_width(&self, key: f64, key_axis: &(impl AxisTransform + ?Sized)) -> (f64, f64) {
        match self.width_type {
            WidthType::Absolute => symmetric_width(self.width * 0.5, key_axis),
            WidthType::AxisRectRatio => {
                let extent = key_axis.axis_rect_extent(key_axis.orientation());
                symmetric_width(extent * self.width * 0.5, key_axis)
            }
            WidthType::PlotCoordinates => {
                let key_pixel = key_axis.coord_to_pixel(key);
                let upper = key_axis.coord_to_pixel(key + self.width * 0.5) - key_pixel;
                let lower = key_axis.coord_to_pixel(key - self.width * 0.5) - key_pixel;
                (lower, upper)
            }
        }
    }
}

fn symmetric_width(half: f64, key_axis: &(impl AxisTransform + ?Sized)) -> (f64, f64) {
    if key_axis.pixel_orientation() < 0.0 {
        (half, -half)
    } else {
        (-half, half)
    }
}
