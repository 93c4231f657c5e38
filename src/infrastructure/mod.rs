pub mod memory;
pub mod render;
pub mod sqlite;
