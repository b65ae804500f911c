use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::axis::AxisTransform;
use crate::core::types::SeriesId;

/// How [`BarGroup::spacing`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpacingMode {
    /// Spacing in pixels.
    #[default]
    Absolute,
    /// Fraction of the axis rect size along the key axis.
    AxisRectRatio,
    /// Spacing in key-axis coordinates.
    PlotCoordinates,
}

/// Per-series lookups a group needs to lay out its members.
pub trait GroupLayout {
    /// Bottom-most series of the stack containing `series`.
    fn stack_base(&self, series: SeriesId) -> Option<SeriesId>;
    /// `(lower, upper)` pixel edges of the bar of `series` at `key`.
    fn pixel_width(&self, series: SeriesId, key: f64) -> Option<(f64, f64)>;
    fn key_axis(&self, series: SeriesId) -> Option<&dyn AxisTransform>;
}

/// Series drawn side by side at shared keys, in member order.
///
/// Membership is only changed through [`crate::api::BarPlot`], which updates
/// the member list and the series' back-reference together.
#[derive(Debug, Clone)]
pub struct BarGroup {
    members: IndexSet<SeriesId>,
    spacing_mode: SpacingMode,
    spacing: f64,
}

impl Default for BarGroup {
    fn default() -> Self {
        Self::new(SpacingMode::Absolute, 4.0)
    }
}

impl BarGroup {
    #[must_use]
    pub fn new(spacing_mode: SpacingMode, spacing: f64) -> Self {
        Self {
            members: IndexSet::new(),
            spacing_mode,
            spacing,
        }
    }

    #[must_use]
    pub fn spacing_mode(&self) -> SpacingMode {
        self.spacing_mode
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_spacing_mode(&mut self, spacing_mode: SpacingMode) {
        self.spacing_mode = spacing_mode;
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.spacing = spacing;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, series: SeriesId) -> bool {
        self.members.contains(&series)
    }

    #[must_use]
    pub fn member_at(&self, index: usize) -> Option<SeriesId> {
        self.members.get_index(index).copied()
    }

    #[must_use]
    pub fn index_of(&self, series: SeriesId) -> Option<usize> {
        self.members.get_index_of(&series)
    }

    pub fn members(&self) -> impl ExactSizeIterator<Item = SeriesId> + '_ {
        self.members.iter().copied()
    }

    pub(crate) fn register(&mut self, series: SeriesId) {
        self.members.insert(series);
    }

    pub(crate) fn unregister(&mut self, series: SeriesId) {
        self.members.shift_remove(&series);
    }

    /// Moves an existing member to `index`, clamped to the member range.
    pub(crate) fn reposition(&mut self, series: SeriesId, index: usize) {
        if let Some(from) = self.members.get_index_of(&series) {
            let to = index.min(self.members.len() - 1);
            self.members.move_index(from, to);
        }
    }

    /// Spacing in pixels after the bar of a series on `key_axis` at `key`.
    #[must_use]
    pub fn pixel_spacing(&self, key_axis: &dyn AxisTransform, key: f64) -> f64 {
        match self.spacing_mode {
            SpacingMode::Absolute => self.spacing,
            SpacingMode::AxisRectRatio => {
                key_axis.axis_rect_extent(key_axis.orientation()) * self.spacing
            }
            SpacingMode::PlotCoordinates => {
                let key_pixel = key_axis.coord_to_pixel(key);
                (key_axis.coord_to_pixel(key + self.spacing) - key_pixel).abs()
            }
        }
    }

    /// Pixel offset along the key axis for the bars of `series` at `key`.
    ///
    /// Stacked members share one column (their stack base). Columns fan out
    /// symmetrically around the key: with an odd column count the middle one
    /// sits at offset 0, with an even count the middle spacing straddles it.
    /// Series whose base is not a column get offset 0. The first member always
    /// sits at the smaller key, so on vertical or reversed key axes the pixel
    /// offsets flip sign.
    #[must_use]
    pub fn key_pixel_offset(&self, layout: &impl GroupLayout, series: SeriesId, key: f64) -> f64 {
        let direction = layout
            .key_axis(series)
            .map_or(1.0, |axis| axis.pixel_orientation());
        self.key_offset_along_members(layout, series, key) * direction
    }

    /// Offset of the column of `series` in member order, positive towards later members.
    fn key_offset_along_members(
        &self,
        layout: &impl GroupLayout,
        series: SeriesId,
        key: f64,
    ) -> f64 {
        let mut columns: SmallVec<[SeriesId; 8]> = SmallVec::new();
        for member in &self.members {
            if let Some(base) = layout.stack_base(*member) {
                if !columns.contains(&base) {
                    columns.push(base);
                }
            }
        }

        let Some(this_base) = layout.stack_base(series) else {
            return 0.0;
        };
        let Some(index) = columns.iter().position(|column| *column == this_base) else {
            return 0.0;
        };

        let count = columns.len();
        let center = (count - 1) / 2;
        let odd = count % 2 == 1;
        if odd && index == center {
            return 0.0;
        }

        let width = |column: SeriesId| {
            layout
                .pixel_width(column, key)
                .map_or(0.0, |(lower, upper)| (upper - lower).abs())
        };
        let spacing = |column: SeriesId| {
            layout
                .key_axis(column)
                .map_or(0.0, |axis| self.pixel_spacing(axis, key))
        };

        if (index as f64) < (count as f64 - 1.0) / 2.0 {
            let (start, mut offset) = if odd {
                (
                    center - 1,
                    width(columns[center]) * 0.5 + spacing(columns[center]),
                )
            } else {
                let start = count / 2 - 1;
                (start, spacing(columns[start]) * 0.5)
            };
            for column in columns[index + 1..=start].iter().rev() {
                offset += width(*column) + spacing(*column);
            }
            offset += width(columns[index]) * 0.5;
            -offset
        } else {
            let (start, mut offset) = if odd {
                (
                    center + 1,
                    width(columns[center]) * 0.5 + spacing(columns[center]),
                )
            } else {
                let start = count / 2;
                (start, spacing(columns[start]) * 0.5)
            };
            for column in &columns[start..index] {
                offset += width(*column) + spacing(*column);
            }
            offset += width(columns[index]) * 0.5;
            offset
        }
    }
}
