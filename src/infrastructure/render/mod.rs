pub mod noop;
pub mod text;
