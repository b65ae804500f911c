//! barchart-rs: bar stacking, bar grouping and color-gradient lookup for
//! embedded desktop charts.
//!
//! The crate keeps a strict split between geometry (`core`), the owning plot
//! facade (`api`) and drawing backends (`render`).

pub mod api;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarHit, BarPlot, BarPlotConfig};
pub use error::{ChartError, ChartResult};
