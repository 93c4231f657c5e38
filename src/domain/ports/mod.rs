pub mod chart_renderer;
pub mod plan_store;
