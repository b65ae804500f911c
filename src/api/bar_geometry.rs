use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::bar_stack;
use crate::core::{
    Axis, AxisTransform, BarData, BarSeries, DataRange, GroupId, Orientation, PixelPoint,
    PixelRect, SeriesId,
};
use crate::error::{ChartError, ChartResult};

use super::BarPlot;

/// Bar found under a pixel position by [`BarPlot::hit_test`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarHit {
    pub series: SeriesId,
    pub index: usize,
    pub point: BarData,
}

impl BarPlot {
    /// Pixel offset of the bars of `series` at `key` inside its group.
    ///
    /// Series without a group are not offset.
    pub fn key_pixel_offset(&self, series: SeriesId, key: f64) -> ChartResult<f64> {
        let entry = self.entry(series)?;
        Ok(entry
            .group()
            .and_then(|group| self.groups.get(group))
            .map_or(0.0, |group| group.key_pixel_offset(self, series, key)))
    }

    /// Pixel gap `group` leaves after the bars of `series` at `key`.
    pub fn pixel_spacing(&self, group: GroupId, series: SeriesId, key: f64) -> ChartResult<f64> {
        let group = self.groups.get(group).ok_or(ChartError::UnknownGroup)?;
        let entry = self.entry(series)?;
        let key_axis = self.key_axis_of(entry)?;
        Ok(group.pixel_spacing(key_axis, key))
    }

    /// Pixel offsets of both key-direction bar edges relative to the key pixel.
    pub fn pixel_width(&self, series: SeriesId, key: f64) -> ChartResult<(f64, f64)> {
        let entry = self.entry(series)?;
        Ok(entry.pixel_width(key, self.key_axis_of(entry)?))
    }

    /// Outline of the bar of `series` for one data point.
    ///
    /// The first and last corners lie on the stacked base, so an open
    /// polyline through the points outlines the bar without its base edge.
    pub fn bar_polygon(&self, series: SeriesId, key: f64, value: f64) -> ChartResult<[PixelPoint; 4]> {
        let entry = self.entry(series)?;
        let key_axis = self.key_axis_of(entry)?;
        let value_axis = self.value_axis_of(entry)?;
        let offset = self.key_pixel_offset(series, key)?;
        let base = bar_stack::stacked_base(&self.series, series, key, value >= 0.0)?;
        Ok(polygon_for(entry, key_axis, value_axis, offset, base, key, value))
    }

    /// Key span covered by the bars of `series`, widened by the bar width
    /// and group offset at both ends. `None` without data.
    pub fn key_range(&self, series: SeriesId) -> ChartResult<Option<DataRange>> {
        let entry = self.entry(series)?;
        let Some(mut range) = entry.data().key_range() else {
            return Ok(None);
        };
        let key_axis = self.key_axis_of(entry)?;

        let (lower_width, _) = entry.pixel_width(range.lower, key_axis);
        let lower_pixel = key_axis.coord_to_pixel(range.lower)
            + lower_width
            + self.key_pixel_offset(series, range.lower)?;
        let lower = key_axis.pixel_to_coord(lower_pixel);
        if lower.is_finite() && lower < range.lower {
            range.lower = lower;
        }

        let (_, upper_width) = entry.pixel_width(range.upper, key_axis);
        let upper_pixel = key_axis.coord_to_pixel(range.upper)
            + upper_width
            + self.key_pixel_offset(series, range.upper)?;
        let upper = key_axis.pixel_to_coord(upper_pixel);
        if upper.is_finite() && upper > range.upper {
            range.upper = upper;
        }

        Ok(Some(range))
    }

    /// Value span covered by the bars of `series`, stacking included.
    ///
    /// The base value is always part of the span.
    pub fn value_range(&self, series: SeriesId) -> ChartResult<DataRange> {
        let entry = self.entry(series)?;
        let mut range = DataRange::new(entry.base_value, entry.base_value);
        for point in entry.data() {
            let base = bar_stack::stacked_base(&self.series, series, point.key, point.value >= 0.0)?;
            let top = point.value + base;
            if top.is_finite() {
                range = range.expanded(top);
            }
        }
        Ok(range)
    }

    /// Index range of the data points of `series` whose bars can be visible.
    ///
    /// Starts from the points with keys inside the key axis range and widens
    /// it while neighboring bars still reach into the axis span in pixels.
    pub fn visible_data_bounds(&self, series: SeriesId) -> ChartResult<Range<usize>> {
        let entry = self.entry(series)?;
        let key_axis = self.key_axis_of(entry)?;
        let value_axis = self.value_axis_of(entry)?;
        let data = entry.data();
        if data.is_empty() {
            return Ok(0..0);
        }

        let axis_range = key_axis.range().normalized();
        let visible = data.range_indices(axis_range.lower, axis_range.upper);
        let first_pixel = key_axis.coord_to_pixel(axis_range.lower);
        let last_pixel = key_axis.coord_to_pixel(axis_range.upper);
        let span = (first_pixel.min(last_pixel), first_pixel.max(last_pixel));
        let orientation = key_axis.orientation();

        let reaches_span = |index: usize| -> ChartResult<bool> {
            let Some(point) = data.get(index) else {
                return Ok(false);
            };
            let offset = self.key_pixel_offset(series, point.key)?;
            let base = bar_stack::stacked_base(&self.series, series, point.key, point.value >= 0.0)?;
            let polygon = polygon_for(entry, key_axis, value_axis, offset, base, point.key, point.value);
            let Some(rect) = PixelRect::bounding(&polygon) else {
                return Ok(false);
            };
            let (near, far) = match orientation {
                Orientation::Horizontal => (rect.left, rect.right()),
                Orientation::Vertical => (rect.top, rect.bottom()),
            };
            Ok(far >= span.0 && near <= span.1)
        };

        let mut begin = visible.start;
        while begin > 0 && reaches_span(begin - 1)? {
            begin -= 1;
        }
        let mut end = visible.end;
        while end < data.len() && reaches_span(end)? {
            end += 1;
        }
        Ok(begin..end)
    }

    /// Index of the topmost visible bar of `series` containing `point`.
    pub fn select_test(&self, series: SeriesId, point: PixelPoint) -> ChartResult<Option<usize>> {
        let entry = self.entry(series)?;
        let key_axis = self.key_axis_of(entry)?;
        if !key_axis.rect().contains(point) {
            return Ok(None);
        }
        let value_axis = self.value_axis_of(entry)?;

        let bounds = self.visible_data_bounds(series)?;
        for index in bounds.rev() {
            let Some(data) = entry.data().get(index) else {
                continue;
            };
            let offset = self.key_pixel_offset(series, data.key)?;
            let base = bar_stack::stacked_base(&self.series, series, data.key, data.value >= 0.0)?;
            let polygon = polygon_for(entry, key_axis, value_axis, offset, base, data.key, data.value);
            if PixelRect::bounding(&polygon).is_some_and(|rect| rect.contains(point)) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Topmost bar under `point` across all series, latest drawn first.
    pub fn hit_test(&self, point: PixelPoint) -> ChartResult<Option<BarHit>> {
        for series in self.draw_order.iter().rev().copied() {
            if let Some(index) = self.select_test(series, point)? {
                let data = self.entry(series)?.data().get(index);
                if let Some(point) = data {
                    return Ok(Some(BarHit {
                        series,
                        index,
                        point,
                    }));
                }
            }
        }
        Ok(None)
    }
}

pub(super) fn polygon_for(
    entry: &BarSeries,
    key_axis: &Axis,
    value_axis: &Axis,
    key_offset: f64,
    base: f64,
    key: f64,
    value: f64,
) -> [PixelPoint; 4] {
    let base_pixel = value_axis.coord_to_pixel(base);
    let value_pixel = value_axis.coord_to_pixel(base + value);
    let key_pixel = key_axis.coord_to_pixel(key) + key_offset;
    let (lower, upper) = entry.pixel_width(key, key_axis);
    let (near, far) = (key_pixel + lower, key_pixel + upper);

    match key_axis.orientation() {
        Orientation::Horizontal => [
            PixelPoint::new(near, base_pixel),
            PixelPoint::new(near, value_pixel),
            PixelPoint::new(far, value_pixel),
            PixelPoint::new(far, base_pixel),
        ],
        Orientation::Vertical => [
            PixelPoint::new(base_pixel, near),
            PixelPoint::new(value_pixel, near),
            PixelPoint::new(value_pixel, far),
            PixelPoint::new(base_pixel, far),
        ],
    }
}
