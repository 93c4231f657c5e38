//! Display formatting. Nothing here feeds back into the numeric model.

pub mod messages;
pub mod money;
