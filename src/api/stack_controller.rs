use crate::core::SeriesId;
use crate::core::bar_stack;
use crate::diagnostics::Diagnostic;
use crate::error::{ChartError, ChartResult};

use super::BarPlot;

impl BarPlot {
    /// Places `upper` directly on top of `lower`. See [`bar_stack::connect`].
    ///
    /// Series on different axes are reported and rejected without changing
    /// any link.
    pub fn connect_stack(
        &mut self,
        lower: Option<SeriesId>,
        upper: Option<SeriesId>,
    ) -> ChartResult<()> {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if !self.entry(lower)?.shares_axes_with(self.entry(upper)?) {
                self.diagnostics.report(&Diagnostic::StackAxisMismatch {
                    series: upper,
                    target: lower,
                });
                return Err(ChartError::AxisMismatch);
            }
        }
        bar_stack::connect(&mut self.series, lower, upper)
    }

    /// Moves `series` directly below `target`; `None` takes it out of its stack.
    ///
    /// Targets on different axes are reported and rejected without changing
    /// any link.
    pub fn move_below(&mut self, series: SeriesId, target: Option<SeriesId>) -> ChartResult<()> {
        let result = bar_stack::move_below(&mut self.series, series, target);
        self.report_axis_mismatch(series, target, result)
    }

    /// Moves `series` directly above `target`; `None` takes it out of its stack.
    pub fn move_above(&mut self, series: SeriesId, target: Option<SeriesId>) -> ChartResult<()> {
        let result = bar_stack::move_above(&mut self.series, series, target);
        self.report_axis_mismatch(series, target, result)
    }

    /// Series drawn directly below `series`, if any.
    pub fn stack_below(&self, series: SeriesId) -> ChartResult<Option<SeriesId>> {
        Ok(self.entry(series)?.bar_below())
    }

    /// Series drawn directly on top of `series`, if any.
    pub fn stack_above(&self, series: SeriesId) -> ChartResult<Option<SeriesId>> {
        Ok(self.entry(series)?.bar_above())
    }

    /// Bottom-most series of the stack containing `series`.
    pub fn stack_base(&self, series: SeriesId) -> ChartResult<SeriesId> {
        bar_stack::stack_base(&self.series, series)
    }

    /// Series of the stack containing `series`, bottom to top.
    pub fn stack_members(&self, series: SeriesId) -> ChartResult<Vec<SeriesId>> {
        bar_stack::stack_members(&self.series, series)
    }

    /// Value at which the bar of `series` at `key` starts.
    pub fn stacked_base(&self, series: SeriesId, key: f64, positive: bool) -> ChartResult<f64> {
        bar_stack::stacked_base(&self.series, series, key, positive)
    }

    fn report_axis_mismatch(
        &self,
        series: SeriesId,
        target: Option<SeriesId>,
        result: ChartResult<()>,
    ) -> ChartResult<()> {
        if let (Err(ChartError::AxisMismatch), Some(target)) = (&result, target) {
            self.diagnostics
                .report(&Diagnostic::StackAxisMismatch { series, target });
        }
        result
    }
}
