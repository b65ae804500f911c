use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_polygon_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_polygon_count = frame.polygons.len();
        self.frames_rendered += 1;
        Ok(())
    }
}
