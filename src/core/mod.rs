pub mod axis;
pub mod bar_group;
pub mod bar_series;
pub mod bar_stack;
pub mod color_gradient;
pub mod data_container;
pub mod gradient_presets;
pub mod primitives;
pub mod scale;
pub mod types;

pub use axis::{Axis, AxisTransform};
pub use bar_group::{BarGroup, GroupLayout, SpacingMode};
pub use bar_series::{BarSeries, BarStyle, WidthType};
pub use color_gradient::{ColorGradient, ColorInterpolation, DEFAULT_LEVEL_COUNT};
pub use data_container::BarDataContainer;
pub use gradient_presets::GradientPreset;
pub use scale::{AxisScaleType, ScaleMapping};
pub use types::{
    AxisId, BarData, DataRange, GroupId, Orientation, PixelPoint, PixelRect, SeriesId, Viewport,
};
