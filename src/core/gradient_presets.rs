use serde::{Deserialize, Serialize};

use crate::core::color_gradient::ColorInterpolation;

const ONE_THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Built-in color gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientPreset {
    /// Black to white, RGB.
    Grayscale,
    /// Dark red through orange and yellow to white.
    Hot,
    /// Dark blue through light blue to white.
    Cold,
    /// Dark green-blue to near white, HSV.
    Night,
    /// Blue to pale pink, HSV.
    Candy,
    /// Water blues to land greens and mountain grays.
    Geography,
    /// Dark red through blue and cyan to green, HSV.
    Ion,
    /// Dark blue through purple, orange and yellow to white.
    Thermal,
    /// Cyan through black to yellow, for data symmetric around zero.
    Polar,
    /// Full spectrum, dark purple to dark red, HSV.
    Spectrum,
    /// Dark blue through cyan and yellow to dark red.
    Jet,
    /// Periodic hue wheel starting and ending at red, HSV.
    Hues,
}

impl GradientPreset {
    pub const ALL: [GradientPreset; 12] = [
        GradientPreset::Grayscale,
        GradientPreset::Hot,
        GradientPreset::Cold,
        GradientPreset::Night,
        GradientPreset::Candy,
        GradientPreset::Geography,
        GradientPreset::Ion,
        GradientPreset::Thermal,
        GradientPreset::Polar,
        GradientPreset::Spectrum,
        GradientPreset::Jet,
        GradientPreset::Hues,
    ];

    #[must_use]
    pub fn interpolation(self) -> ColorInterpolation {
        match self {
            GradientPreset::Night
            | GradientPreset::Candy
            | GradientPreset::Ion
            | GradientPreset::Spectrum
            | GradientPreset::Hues => ColorInterpolation::Hsv,
            _ => ColorInterpolation::Rgb,
        }
    }

    /// Stop positions with 8-bit RGB colors.
    #[must_use]
    pub fn stops(self) -> &'static [(f64, [u8; 3])] {
        match self {
            GradientPreset::Grayscale => &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])],
            GradientPreset::Hot => &[
                (0.0, [50, 0, 0]),
                (0.2, [180, 10, 0]),
                (0.4, [245, 50, 0]),
                (0.6, [255, 150, 10]),
                (0.8, [255, 255, 50]),
                (1.0, [255, 255, 255]),
            ],
            GradientPreset::Cold => &[
                (0.0, [0, 0, 50]),
                (0.2, [0, 10, 180]),
                (0.4, [0, 50, 245]),
                (0.6, [10, 150, 255]),
                (0.8, [50, 255, 255]),
                (1.0, [255, 255, 255]),
            ],
            GradientPreset::Night => &[(0.0, [10, 20, 30]), (1.0, [250, 255, 250])],
            GradientPreset::Candy => &[(0.0, [0, 0, 255]), (1.0, [255, 250, 250])],
            GradientPreset::Geography => &[
                (0.0, [70, 170, 210]),
                (0.20, [90, 160, 180]),
                (0.25, [45, 130, 175]),
                (0.30, [100, 140, 125]),
                (0.5, [100, 140, 100]),
                (0.6, [130, 145, 120]),
                (0.7, [140, 130, 120]),
                (0.9, [180, 190, 190]),
                (1.0, [210, 210, 230]),
            ],
            GradientPreset::Ion => &[
                (0.0, [50, 10, 10]),
                (0.45, [0, 0, 255]),
                (0.8, [0, 255, 255]),
                (1.0, [0, 255, 0]),
            ],
            GradientPreset::Thermal => &[
                (0.0, [0, 0, 50]),
                (0.15, [20, 0, 120]),
                (0.33, [200, 30, 140]),
                (0.6, [255, 100, 0]),
                (0.85, [255, 255, 40]),
                (1.0, [255, 255, 255]),
            ],
            GradientPreset::Polar => &[
                (0.0, [50, 255, 255]),
                (0.18, [10, 70, 255]),
                (0.28, [10, 10, 190]),
                (0.5, [0, 0, 0]),
                (0.72, [190, 10, 10]),
                (0.82, [255, 70, 10]),
                (1.0, [255, 255, 50]),
            ],
            GradientPreset::Spectrum => &[
                (0.0, [50, 0, 50]),
                (0.15, [0, 0, 255]),
                (0.35, [0, 255, 255]),
                (0.6, [255, 255, 0]),
                (0.75, [255, 30, 0]),
                (1.0, [50, 0, 0]),
            ],
            GradientPreset::Jet => &[
                (0.0, [0, 0, 100]),
                (0.15, [0, 50, 255]),
                (0.35, [0, 255, 255]),
                (0.65, [255, 255, 0]),
                (0.85, [255, 30, 0]),
                (1.0, [100, 0, 0]),
            ],
            GradientPreset::Hues => &[
                (0.0, [255, 0, 0]),
                (ONE_THIRD, [0, 0, 255]),
                (TWO_THIRDS, [0, 255, 0]),
                (1.0, [255, 0, 0]),
            ],
        }
    }
}
