use crate::domain::entities::plan::PlanState;
use crate::domain::ports::chart_renderer::ChartRenderer;
use crate::domain::values::series::ChartData;

/// Build the plan's chart series and hand them to `renderer`.
pub fn draw(state: &PlanState, renderer: &dyn ChartRenderer) -> ChartData {
    let chart = ChartData::from_state(state);
    tracing::debug!(
        renderer = renderer.name(),
        points = chart.actual.len(),
        "rendering chart"
    );
    renderer.render(&chart);
    chart
}
