use crate::domain::values::series::ChartData;

/// Draws a plan's actual and theoretical curves.
///
/// Rendering is infallible from the caller's side: an implementation that
/// cannot draw (no surface, closed output) degrades to a no-op.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, chart: &ChartData);

    /// Renderer name for logging
    fn name(&self) -> &str;
}
