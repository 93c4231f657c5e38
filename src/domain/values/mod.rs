pub mod rate;
pub mod series;
pub mod status;
pub mod stop_loss;
