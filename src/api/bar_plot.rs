use std::fmt;

use indexmap::IndexSet;
use slotmap::SlotMap;
use tracing::debug;

use crate::core::bar_stack::{self, SeriesTable};
use crate::core::{
    Axis, AxisId, AxisTransform, BarData, BarGroup, BarSeries, GroupId, GroupLayout, SeriesId,
};
use crate::diagnostics::{Diagnostic, SharedDiagnostics, default_diagnostics};
use crate::error::{ChartError, ChartResult};

use super::BarPlotConfig;

/// Owner of the axes, bar series and bar groups of one plot.
///
/// Series and groups refer to each other through handles only. Every link
/// change goes through this type so both sides of a stack or group link are
/// updated in the same call, and removing a series unlinks it first.
pub struct BarPlot {
    pub(super) config: BarPlotConfig,
    pub(super) axes: SlotMap<AxisId, Axis>,
    pub(super) series: SeriesTable,
    pub(super) groups: SlotMap<GroupId, BarGroup>,
    pub(super) draw_order: IndexSet<SeriesId>,
    pub(super) diagnostics: SharedDiagnostics,
}

impl fmt::Debug for BarPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarPlot")
            .field("config", &self.config)
            .field("axes", &self.axes.len())
            .field("series", &self.series.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

impl Default for BarPlot {
    fn default() -> Self {
        Self::new(BarPlotConfig::default())
    }
}

impl BarPlot {
    #[must_use]
    pub fn new(config: BarPlotConfig) -> Self {
        Self {
            config,
            axes: SlotMap::with_key(),
            series: SeriesTable::with_key(),
            groups: SlotMap::with_key(),
            draw_order: IndexSet::new(),
            diagnostics: default_diagnostics(),
        }
    }

    /// Replaces the sink that receives usage diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: SharedDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn config(&self) -> BarPlotConfig {
        self.config
    }

    pub fn add_axis(&mut self, axis: Axis) -> AxisId {
        self.axes.insert(axis)
    }

    #[must_use]
    pub fn axis(&self, axis: AxisId) -> Option<&Axis> {
        self.axes.get(axis)
    }

    #[must_use]
    pub fn axis_mut(&mut self, axis: AxisId) -> Option<&mut Axis> {
        self.axes.get_mut(axis)
    }

    /// Creates an empty series using the configured width and base value.
    pub fn add_series(&mut self, key_axis: AxisId, value_axis: AxisId) -> ChartResult<SeriesId> {
        let series = BarSeries::new(key_axis, value_axis)
            .with_width(self.config.bar_width, self.config.width_type)
            .with_base_value(self.config.base_value);
        self.insert_series(series)
    }

    /// Takes ownership of a prepared series.
    pub fn insert_series(&mut self, mut series: BarSeries) -> ChartResult<SeriesId> {
        if !self.axes.contains_key(series.key_axis()) || !self.axes.contains_key(series.value_axis())
        {
            return Err(ChartError::UnknownAxis);
        }
        series.below = None;
        series.above = None;
        series.group = None;
        let id = self.series.insert(series);
        self.draw_order.insert(id);
        debug!(?id, count = self.series.len(), "add bar series");
        Ok(id)
    }

    /// Removes a series after taking it out of its group and its stack.
    ///
    /// The series' former stack neighbors are connected to each other.
    pub fn remove_series(&mut self, series: SeriesId) -> ChartResult<BarSeries> {
        self.set_series_group(series, None)?;
        bar_stack::unlink(&mut self.series, series)?;
        self.draw_order.shift_remove(&series);
        let removed = self.series.remove(series).ok_or(ChartError::UnknownSeries)?;
        debug!(?series, count = self.series.len(), "remove bar series");
        Ok(removed)
    }

    #[must_use]
    pub fn series(&self, series: SeriesId) -> Option<&BarSeries> {
        self.series.get(series)
    }

    /// Mutable access to width, base value, style and data.
    ///
    /// Stack and group links stay read-only here.
    #[must_use]
    pub fn series_mut(&mut self, series: SeriesId) -> Option<&mut BarSeries> {
        self.series.get_mut(series)
    }

    /// Series in draw order (first drawn first).
    pub fn series_ids(&self) -> impl ExactSizeIterator<Item = SeriesId> + '_ {
        self.draw_order.iter().copied()
    }

    /// Replaces the data of `series` from parallel key/value columns.
    ///
    /// Mismatched lengths are reported and the longer column is truncated.
    pub fn set_data(
        &mut self,
        series: SeriesId,
        keys: &[f64],
        values: &[f64],
        already_sorted: bool,
    ) -> ChartResult<()> {
        let entry = self.series.get_mut(series).ok_or(ChartError::UnknownSeries)?;
        entry.data.clear();
        self.add_data(series, keys, values, already_sorted)
    }

    /// Adds key/value columns to the data of `series`.
    pub fn add_data(
        &mut self,
        series: SeriesId,
        keys: &[f64],
        values: &[f64],
        already_sorted: bool,
    ) -> ChartResult<()> {
        let entry = self.series.get_mut(series).ok_or(ChartError::UnknownSeries)?;
        if keys.len() != values.len() {
            self.diagnostics.report(&Diagnostic::DataLengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let points = keys
            .iter()
            .zip(values)
            .map(|(key, value)| BarData::new(*key, *value))
            .collect();
        entry.data.add_many(points, already_sorted);
        Ok(())
    }

    pub fn add_point(&mut self, series: SeriesId, point: BarData) -> ChartResult<()> {
        let entry = self.series.get_mut(series).ok_or(ChartError::UnknownSeries)?;
        entry.data.add(point);
        Ok(())
    }

    pub(super) fn entry(&self, series: SeriesId) -> ChartResult<&BarSeries> {
        self.series.get(series).ok_or(ChartError::UnknownSeries)
    }

    pub(super) fn key_axis_of(&self, entry: &BarSeries) -> ChartResult<&Axis> {
        self.axes.get(entry.key_axis()).ok_or(ChartError::UnknownAxis)
    }

    pub(super) fn value_axis_of(&self, entry: &BarSeries) -> ChartResult<&Axis> {
        self.axes.get(entry.value_axis()).ok_or(ChartError::UnknownAxis)
    }
}

impl GroupLayout for BarPlot {
    fn stack_base(&self, series: SeriesId) -> Option<SeriesId> {
        bar_stack::stack_base(&self.series, series).ok()
    }

    fn pixel_width(&self, series: SeriesId, key: f64) -> Option<(f64, f64)> {
        let entry = self.series.get(series)?;
        let axis = self.axes.get(entry.key_axis())?;
        Some(entry.pixel_width(key, axis))
    }

    fn key_axis(&self, series: SeriesId) -> Option<&dyn AxisTransform> {
        let entry = self.series.get(series)?;
        self.axes
            .get(entry.key_axis())
            .map(|axis| axis as &dyn AxisTransform)
    }
}
