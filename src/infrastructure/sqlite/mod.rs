pub mod migrations;
pub mod plan_store;
