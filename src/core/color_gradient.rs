use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::gradient_presets::GradientPreset;
use crate::core::types::DataRange;
use crate::diagnostics::{Diagnostic, SharedDiagnostics, default_diagnostics};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_LEVEL_COUNT: usize = 350;

/// Color space used between two stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorInterpolation {
    /// Per-channel linear blend.
    #[default]
    Rgb,
    /// Linear saturation/value, hue along the shorter arc of the hue circle.
    Hsv,
}

/// Maps scalars to colors through a sampled table of `level_count` colors
/// interpolated between user-defined stops.
///
/// The table is rebuilt lazily on the first lookup after the stops, the level
/// count or the interpolation changed. `periodic` only affects lookups.
#[derive(Clone)]
pub struct ColorGradient {
    stops: BTreeMap<OrderedFloat<f64>, Color>,
    level_count: usize,
    interpolation: ColorInterpolation,
    periodic: bool,
    buffer: Vec<Color>,
    buffer_valid: bool,
    diagnostics: SharedDiagnostics,
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::from_preset(GradientPreset::Cold)
    }
}

impl fmt::Debug for ColorGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorGradient")
            .field("stops", &self.stops)
            .field("level_count", &self.level_count)
            .field("interpolation", &self.interpolation)
            .field("periodic", &self.periodic)
            .field("buffer_valid", &self.buffer_valid)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ColorGradient {
    fn eq(&self, other: &Self) -> bool {
        self.level_count == other.level_count
            && self.interpolation == other.interpolation
            && self.periodic == other.periodic
            && self.stops == other.stops
    }
}

impl ColorGradient {
    /// Gradient without stops (all lookups yield black).
    #[must_use]
    pub fn new() -> Self {
        Self {
            stops: BTreeMap::new(),
            level_count: DEFAULT_LEVEL_COUNT,
            interpolation: ColorInterpolation::Rgb,
            periodic: false,
            buffer: Vec::new(),
            buffer_valid: false,
            diagnostics: default_diagnostics(),
        }
    }

    #[must_use]
    pub fn from_preset(preset: GradientPreset) -> Self {
        let mut gradient = Self::new();
        gradient.load_preset(preset);
        gradient
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: SharedDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    #[must_use]
    pub fn interpolation(&self) -> ColorInterpolation {
        self.interpolation
    }

    #[must_use]
    pub fn periodic(&self) -> bool {
        self.periodic
    }

    /// Stops in position order.
    pub fn stops(&self) -> impl ExactSizeIterator<Item = (f64, Color)> + '_ {
        self.stops.iter().map(|(position, color)| (position.0, *color))
    }

    /// Sets the number of sampled levels; values below 2 are clamped to 2.
    pub fn set_level_count(&mut self, level_count: usize) {
        let mut level_count = level_count;
        if level_count < 2 {
            self.diagnostics.report(&Diagnostic::LevelCountClamped {
                requested: level_count,
                applied: 2,
            });
            level_count = 2;
        }
        if level_count != self.level_count {
            self.level_count = level_count;
            self.buffer_valid = false;
        }
    }

    /// Replaces all stops. Nothing changes if any position is not finite.
    pub fn set_stops(&mut self, stops: impl IntoIterator<Item = (f64, Color)>) -> ChartResult<()> {
        let mut replacement = BTreeMap::new();
        for (position, color) in stops {
            replacement.insert(finite_position(position)?, color);
        }
        self.stops = replacement;
        self.buffer_valid = false;
        Ok(())
    }

    /// Inserts or replaces the stop at `position`.
    pub fn set_stop_at(&mut self, position: f64, color: Color) -> ChartResult<()> {
        self.stops.insert(finite_position(position)?, color);
        self.buffer_valid = false;
        Ok(())
    }

    pub fn clear_stops(&mut self) {
        self.stops.clear();
        self.buffer_valid = false;
    }

    pub fn set_interpolation(&mut self, interpolation: ColorInterpolation) {
        if interpolation != self.interpolation {
            self.interpolation = interpolation;
            self.buffer_valid = false;
        }
    }

    pub fn set_periodic(&mut self, periodic: bool) {
        self.periodic = periodic;
    }

    /// Clears the stops and installs a preset with its interpolation mode.
    pub fn load_preset(&mut self, preset: GradientPreset) {
        self.clear_stops();
        self.set_interpolation(preset.interpolation());
        for (position, [red, green, blue]) in preset.stops() {
            self.stops
                .insert(OrderedFloat(*position), Color::from_rgb8(*red, *green, *blue));
        }
    }

    /// Copy with every stop moved from `p` to `1 - p`.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut result = self.clone();
        result.stops = self
            .stops
            .iter()
            .map(|(position, color)| (OrderedFloat(1.0 - position.0), *color))
            .collect();
        result.buffer_valid = false;
        result
    }

    /// Color for one data value mapped through `range`.
    ///
    /// In periodic mode the position wraps into `[lower, upper)` before it is
    /// scaled, so `upper` maps back to the first level and the last level is
    /// never returned.
    pub fn color_at(
        &mut self,
        position: f64,
        range: DataRange,
        logarithmic: bool,
    ) -> ChartResult<Color> {
        let lookup = self.lookup();
        let index = lookup.level_index(position, range, logarithmic)?;
        Ok(self.ensure_buffer()[index])
    }

    /// Colors `output.len()` samples, reading sample `i` from `data[i * stride]`.
    ///
    /// A `stride` equal to the column count of a row-major grid extracts one
    /// column. Every sample is validated before any output is written, and
    /// each color equals what [`color_at`](Self::color_at) returns for it.
    pub fn colorize(
        &mut self,
        data: &[f64],
        range: DataRange,
        output: &mut [Color],
        stride: usize,
        logarithmic: bool,
    ) -> ChartResult<()> {
        if output.is_empty() {
            return Ok(());
        }
        if stride == 0 || (output.len() - 1).saturating_mul(stride) >= data.len() {
            return Err(ChartError::InvalidData(format!(
                "{} samples with stride {stride} exceed data length {}",
                output.len(),
                data.len()
            )));
        }

        let lookup = self.lookup();
        let indices = (0..output.len())
            .map(|i| lookup.level_index(data[i * stride], range, logarithmic))
            .collect::<ChartResult<Vec<usize>>>()?;
        let buffer = self.ensure_buffer();
        for (slot, index) in output.iter_mut().zip(indices) {
            *slot = buffer[index];
        }
        Ok(())
    }

    /// Colors a row-major grid, one color per value.
    ///
    /// Rows are processed in parallel with the `parallel-colorize` feature.
    pub fn colorize_grid(
        &mut self,
        data: &[f64],
        columns: usize,
        range: DataRange,
        logarithmic: bool,
    ) -> ChartResult<Vec<Color>> {
        if columns == 0 || data.len() % columns != 0 {
            return Err(ChartError::InvalidData(format!(
                "grid of {} values does not split into rows of {columns}",
                data.len()
            )));
        }

        let lookup = self.lookup();
        let buffer = self.ensure_buffer();
        let color_of = |value: &f64| {
            lookup
                .level_index(*value, range, logarithmic)
                .map(|index| buffer[index])
        };

        #[cfg(feature = "parallel-colorize")]
        {
            use rayon::prelude::*;
            return data
                .par_chunks(columns)
                .flat_map_iter(|row| row.iter().map(&color_of))
                .collect();
        }

        #[cfg(not(feature = "parallel-colorize"))]
        {
            data.iter().map(color_of).collect()
        }
    }

    fn lookup(&self) -> LevelLookup {
        LevelLookup {
            level_count: self.level_count,
            periodic: self.periodic,
        }
    }

    fn ensure_buffer(&mut self) -> &[Color] {
        if !self.buffer_valid {
            self.recompute_buffer();
        }
        &self.buffer
    }

    fn recompute_buffer(&mut self) {
        trace!(
            level_count = self.level_count,
            stops = self.stops.len(),
            interpolation = ?self.interpolation,
            "recompute gradient buffer"
        );
        let last = (self.level_count - 1) as f64;
        self.buffer = (0..self.level_count)
            .map(|level| self.sample(level as f64 / last))
            .collect();
        self.buffer_valid = true;
    }

    fn sample(&self, position: f64) -> Color {
        let key = OrderedFloat(position);
        let Some((high_position, high)) = self.stops.range(key..).next() else {
            return self.stops.values().next_back().copied().unwrap_or(Color::BLACK);
        };
        let Some((low_position, low)) = self
            .stops
            .range((Bound::Unbounded, Bound::Excluded(key)))
            .next_back()
        else {
            return *high;
        };

        let t = (position - low_position.0) / (high_position.0 - low_position.0);
        match self.interpolation {
            ColorInterpolation::Rgb => Color::rgba(
                (1.0 - t) * low.red + t * high.red,
                (1.0 - t) * low.green + t * high.green,
                (1.0 - t) * low.blue + t * high.blue,
                (1.0 - t) * low.alpha + t * high.alpha,
            ),
            ColorInterpolation::Hsv => {
                let (low_hue, low_saturation, low_value) = low.to_hsv();
                let (high_hue, high_saturation, high_value) = high.to_hsv();
                let hue_diff = high_hue - low_hue;
                let hue = if hue_diff > 0.5 {
                    low_hue - t * (1.0 - hue_diff)
                } else if hue_diff < -0.5 {
                    low_hue + t * (1.0 + hue_diff)
                } else {
                    low_hue + t * hue_diff
                };
                Color::from_hsv(
                    hue.rem_euclid(1.0),
                    (1.0 - t) * low_saturation + t * high_saturation,
                    (1.0 - t) * low_value + t * high_value,
                    (1.0 - t) * low.alpha + t * high.alpha,
                )
            }
        }
    }
}

/// Position-to-level mapping shared by single and batch lookups.
#[derive(Debug, Clone, Copy)]
struct LevelLookup {
    level_count: usize,
    periodic: bool,
}

impl LevelLookup {
    fn level_index(self, position: f64, range: DataRange, logarithmic: bool) -> ChartResult<usize> {
        if !range.is_valid() {
            return Err(ChartError::InvalidRange {
                lower: range.lower,
                upper: range.upper,
            });
        }

        let fraction = if logarithmic {
            if !(range.lower > 0.0 && range.upper > 0.0 && position > 0.0) {
                return Err(ChartError::LogDomain {
                    position,
                    lower: range.lower,
                    upper: range.upper,
                });
            }
            (position / range.lower).ln() / (range.upper / range.lower).ln()
        } else {
            (position - range.lower) / range.size()
        };

        let last = (self.level_count - 1) as f64;
        let index = if self.periodic {
            (fraction.rem_euclid(1.0) * last) as usize
        } else {
            (fraction * last).clamp(0.0, last) as usize
        };
        Ok(index.min(self.level_count - 1))
    }
}

fn finite_position(position: f64) -> ChartResult<OrderedFloat<f64>> {
    if !position.is_finite() {
        return Err(ChartError::InvalidData(
            "gradient stop position must be finite".to_owned(),
        ));
    }
    Ok(OrderedFloat(position))
}
