use crate::domain::ports::chart_renderer::ChartRenderer;
use crate::domain::values::series::ChartData;

/// Renderer for environments without a drawing surface.
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&self, _chart: &ChartData) {}

    fn name(&self) -> &str {
        "noop"
    }
}
