use serde::{Deserialize, Serialize};

use crate::core::{ColorGradient, DEFAULT_LEVEL_COUNT, GradientPreset, SpacingMode, WidthType};
use crate::error::{ChartError, ChartResult};

/// Defaults applied to series and groups created through a [`super::BarPlot`].
///
/// This type is serializable so host applications can keep plot defaults in
/// their own settings files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPlotConfig {
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    #[serde(default)]
    pub width_type: WidthType,
    #[serde(default)]
    pub base_value: f64,
    #[serde(default)]
    pub spacing_mode: SpacingMode,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default = "default_level_count")]
    pub gradient_level_count: usize,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            width_type: WidthType::default(),
            base_value: 0.0,
            spacing_mode: SpacingMode::default(),
            spacing: default_spacing(),
            gradient_level_count: default_level_count(),
        }
    }
}

impl BarPlotConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width new series start with.
    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64, width_type: WidthType) -> Self {
        self.bar_width = bar_width;
        self.width_type = width_type;
        self
    }

    /// Sets the base value new series start with.
    #[must_use]
    pub fn with_base_value(mut self, base_value: f64) -> Self {
        self.base_value = base_value;
        self
    }

    /// Sets the spacing new groups start with.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64, spacing_mode: SpacingMode) -> Self {
        self.spacing = spacing;
        self.spacing_mode = spacing_mode;
        self
    }

    /// Sets the level count of gradients built through [`Self::gradient`].
    #[must_use]
    pub fn with_gradient_level_count(mut self, level_count: usize) -> Self {
        self.gradient_level_count = level_count;
        self
    }

    /// Gradient loaded with `preset` and the configured level count.
    #[must_use]
    pub fn gradient(self, preset: GradientPreset) -> ColorGradient {
        let mut gradient = ColorGradient::from_preset(preset);
        gradient.set_level_count(self.gradient_level_count);
        gradient
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.bar_width.is_finite() || self.bar_width < 0.0 {
            return Err(ChartError::InvalidData(
                "bar width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.base_value.is_finite() {
            return Err(ChartError::InvalidData(
                "base value must be finite".to_owned(),
            ));
        }
        if !self.spacing.is_finite() {
            return Err(ChartError::InvalidData(
                "group spacing must be finite".to_owned(),
            ));
        }
        if self.gradient_level_count < 2 {
            return Err(ChartError::InvalidData(
                "gradient level count must be >= 2".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_bar_width() -> f64 {
    0.75
}

fn default_spacing() -> f64 {
    4.0
}

fn default_level_count() -> usize {
    DEFAULT_LEVEL_COUNT
}
