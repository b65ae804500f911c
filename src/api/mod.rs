mod bar_geometry;
mod bar_plot;
mod bar_plot_config;
mod group_controller;
mod render_frame_builder;
mod stack_controller;

pub use bar_geometry::BarHit;
pub use bar_plot::BarPlot;
pub use bar_plot_config::BarPlotConfig;
