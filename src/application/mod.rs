pub mod chart;
pub mod create_plan;
pub mod load_plan;
pub mod record_observation;
pub mod reset_plan;
pub mod summary;
