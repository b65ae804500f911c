use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid range: lower={lower}, upper={upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error(
        "logarithmic mapping needs positive values: position={position}, range=[{lower}, {upper}]"
    )]
    LogDomain { position: f64, lower: f64, upper: f64 },

    #[error("unknown series handle")]
    UnknownSeries,

    #[error("unknown bar group handle")]
    UnknownGroup,

    #[error("unknown axis handle")]
    UnknownAxis,

    #[error("series do not share the same key and value axis")]
    AxisMismatch,
}
