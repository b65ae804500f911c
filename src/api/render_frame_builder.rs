use tracing::trace;

use crate::core::{SeriesId, Viewport, bar_stack};
use crate::error::{ChartError, ChartResult};
use crate::render::{PolygonPrimitive, RenderFrame, Renderer};

use super::BarPlot;
use super::bar_geometry::polygon_for;

impl BarPlot {
    /// Materializes the visible bars of every series into a backend-agnostic
    /// frame, in draw order.
    pub fn build_render_frame(&self, viewport: Viewport) -> ChartResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut frame = RenderFrame::new(viewport);
        for series in self.draw_order.iter().copied() {
            self.push_series_polygons(&mut frame, series)?;
        }
        trace!(polygons = frame.polygons.len(), "build bar frame");
        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R, viewport: Viewport) -> ChartResult<()> {
        let frame = self.build_render_frame(viewport)?;
        renderer.render(&frame)
    }

    fn push_series_polygons(&self, frame: &mut RenderFrame, series: SeriesId) -> ChartResult<()> {
        let entry = self.entry(series)?;
        let key_axis = self.key_axis_of(entry)?;
        let value_axis = self.value_axis_of(entry)?;
        let style = entry.style;

        for index in self.visible_data_bounds(series)? {
            let Some(point) = entry.data().get(index) else {
                continue;
            };
            let offset = self.key_pixel_offset(series, point.key)?;
            let base =
                bar_stack::stacked_base(&self.series, series, point.key, point.value >= 0.0)?;
            let polygon = polygon_for(
                entry,
                key_axis,
                value_axis,
                offset,
                base,
                point.key,
                point.value,
            );
            // Skip bars a log axis cannot place.
            if polygon.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                continue;
            }
            frame.polygons.push(PolygonPrimitive::new(
                polygon.to_vec(),
                style.fill_color,
                style.stroke_color,
                style.stroke_width,
            ));
        }
        Ok(())
    }
}
